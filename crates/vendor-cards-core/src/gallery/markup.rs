//! HTML form of a gallery.
//!
//! Each card is a `location-vendor-card` element carrying `data-vendor-id`,
//! followed by its hidden detail panel `vendor-{id}-modal-content`. Styling
//! and behavior are left to the embedding page.

use super::{LayoutToken, RowLayout};
use crate::sanitize::escape_html;
use std::fmt::Write;
use vendor_cards_types::{GalleryViewModel, ImageRef};

/// Element id of the detail panel for a card
#[must_use]
pub fn panel_element_id(item: &GalleryViewModel) -> String {
    format!("vendor-{}-modal-content", item.id)
}

fn write_image(out: &mut String, image: &ImageRef) {
    let _ = write!(
        out,
        r#"<div class="location-vendor-image"><img src="{}" alt="{}"></div>"#,
        escape_html(&image.src),
        escape_html(&image.alt)
    );
}

fn write_card(out: &mut String, item: &GalleryViewModel) {
    let _ = write!(
        out,
        r#"<div class="location-vendor-card" data-vendor-id="{}">"#,
        escape_html(item.id.as_str())
    );
    if let Some(image) = &item.image_ref {
        write_image(out, image);
    }
    let _ = write!(
        out,
        r#"<div class="location-vendor-content"><h3 class="location-vendor-title">{}</h3><p class="location-vendor-name">{}</p></div></div>"#,
        escape_html(&item.title),
        escape_html(&item.owner_name)
    );
}

fn write_panel(out: &mut String, item: &GalleryViewModel) {
    let _ = write!(
        out,
        r#"<div id="{}" class="location-vendor-modal" hidden><div class="modal-overlay"></div><div class="modal-content"><span class="close" role="button" aria-label="Close">&times;</span><div class="modal-left">"#,
        escape_html(&panel_element_id(item))
    );
    if let Some(image) = &item.image_ref {
        write_image(out, image);
    }
    let _ = write!(
        out,
        r#"</div><div class="modal-right"><div class="location-vendor-content"><h3 class="location-vendor-title">{}</h3><p class="location-vendor-name">{}</p><p class="location-vendor-description">{}</p></div></div></div></div>"#,
        escape_html(&item.title),
        escape_html(&item.owner_name),
        escape_html(&item.description)
    );
}

/// Render cards, panels and row breaks. An empty gallery renders nothing.
#[must_use]
pub fn render_html(items: &[GalleryViewModel], layout: &RowLayout) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut out = String::from(r#"<div class="location-vendors-wrapper">"#);
    for token in layout.tokens(items) {
        match token {
            LayoutToken::Card { item, .. } => {
                write_card(&mut out, item);
                write_panel(&mut out, item);
            }
            LayoutToken::RowBreak => out.push_str(r#"<div class="clearfix"></div>"#),
        }
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendor_cards_types::VendorRecord;

    fn item(id: u64, title: &str) -> GalleryViewModel {
        GalleryViewModel::from(VendorRecord::new(id, title))
    }

    #[test]
    fn test_empty_gallery_renders_nothing() {
        assert_eq!(render_html(&[], &RowLayout::default()), "");
    }

    #[test]
    fn test_card_and_panel_share_id() {
        let html = render_html(&[item(2, "Alpha")], &RowLayout::default());
        assert!(html.contains(r#"data-vendor-id="2""#));
        assert!(html.contains(r#"id="vendor-2-modal-content""#));
        assert!(html.contains(" hidden>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let record = VendorRecord::new(1u64, "Fish & <Chips>")
            .with_owner("O'Neil")
            .with_description("<script>alert(1)</script>");
        let html = render_html(&[GalleryViewModel::from(record)], &RowLayout::default());

        assert!(html.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(html.contains("O&#039;Neil"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_image_only_when_present() {
        let without = render_html(&[item(1, "A")], &RowLayout::default());
        assert!(!without.contains("<img"));

        let record = VendorRecord::new(1u64, "A").with_image(ImageRef::new("/img/a.jpg"));
        let with = render_html(&[GalleryViewModel::from(record)], &RowLayout::default());
        assert_eq!(with.matches("<img").count(), 2, "card and panel each show it");
        assert!(with.contains(r#"src="/img/a.jpg""#));
    }

    #[test]
    fn test_clearfix_after_each_row() {
        let items: Vec<_> = (1..=8).map(|i| item(i, &format!("V{i}"))).collect();
        let html = render_html(&items, &RowLayout::default());
        assert_eq!(html.matches(r#"class="clearfix""#).count(), 2);
    }

    #[test]
    fn test_cards_in_given_order() {
        let html = render_html(&[item(3, "Beta"), item(1, "Gamma")], &RowLayout::default());
        let beta = html.find("Beta").unwrap();
        let gamma = html.find("Gamma").unwrap();
        assert!(beta < gamma);
    }

    #[test]
    fn test_panel_element_id() {
        assert_eq!(panel_element_id(&item(42, "X")), "vendor-42-modal-content");
    }
}
