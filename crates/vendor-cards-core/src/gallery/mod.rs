//! Gallery query engine.
//!
//! [`render`] turns a store and a [`GalleryFilter`] into the ordered list of
//! view-models to display. Layout (row breaks) and markup are separate steps
//! in the `layout` and `markup` submodules so the engine itself stays free of any
//! presentation parameters.

mod layout;
mod markup;
mod shortcode;

pub use layout::{LayoutToken, RowLayout};
pub use markup::{panel_element_id, render_html};
pub use shortcode::{SHORTCODE_TAG, filter_from_atts, parse_shortcode};

use crate::config::Config;
use crate::store::{StoreQuery, VendorStore};
use crate::{Error, Result};
use tracing::debug;
use vendor_cards_types::{GalleryFilter, GalleryViewModel, NO_LIMIT, VendorId};

/// Validate `max_count`, returning the truncation length (`None` = no limit).
///
/// # Errors
///
/// Returns [`Error::InvalidFilter`] for any value below `NO_LIMIT`.
pub fn result_limit(filter: &GalleryFilter) -> Result<Option<usize>> {
    match filter.max_count {
        NO_LIMIT => Ok(None),
        n if n < NO_LIMIT => Err(Error::InvalidFilter(format!(
            "count must be -1 or greater, got {n}"
        ))),
        n => usize::try_from(n)
            .map(Some)
            .map_err(|_| Error::InvalidFilter(format!("count {n} is out of range"))),
    }
}

/// Select, order, truncate and project vendors for display.
///
/// Ordering is by title and happens before truncation, so a limit always
/// drops the largest titles, whatever order the store returned.
///
/// # Errors
///
/// Returns [`Error::InvalidFilter`] for a malformed `max_count` and
/// propagates [`Error::StoreUnavailable`] from the store.
pub fn render<S: VendorStore + ?Sized>(
    store: &S,
    filter: &GalleryFilter,
) -> Result<Vec<GalleryViewModel>> {
    let limit = result_limit(filter)?;

    let query = StoreQuery {
        location: filter.location_name().map(str::to_string),
    };
    let mut records = store.list_vendors(&query)?;
    let match_count = records.len();

    // Stable, so a store that already sorted keeps its tie order
    records.sort_by(|a, b| a.title.cmp(&b.title));

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    debug!(
        "Gallery query location={:?} matched {} vendors, returning {}",
        query.location,
        match_count,
        records.len()
    );

    Ok(records.into_iter().map(GalleryViewModel::from).collect())
}

/// A rendered gallery: the view-models plus the layout they are shown with.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub items: Vec<GalleryViewModel>,
    pub layout: RowLayout,
}

impl Gallery {
    /// Render with an explicit filter.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn build<S: VendorStore + ?Sized>(
        store: &S,
        filter: &GalleryFilter,
        layout: RowLayout,
    ) -> Result<Self> {
        Ok(Self {
            items: render(store, filter)?,
            layout,
        })
    }

    /// Render from a `[location_vendors ...]` directive, falling back to the
    /// configured defaults for attributes it omits. Text without the
    /// directive renders the default gallery.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFilter`] for bad attributes or a bad config,
    /// and propagates store errors.
    pub fn from_shortcode<S: VendorStore + ?Sized>(
        store: &S,
        text: &str,
        config: &Config,
    ) -> Result<Self> {
        let filter = match parse_shortcode(text) {
            Some(atts) => filter_from_atts(&atts, &config.base_filter())?,
            None => config.base_filter(),
        };
        Self::build(store, &filter, config.layout()?)
    }

    #[must_use]
    pub fn tokens(&self) -> Vec<LayoutToken<'_>> {
        self.layout.tokens(&self.items)
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        render_html(&self.items, &self.layout)
    }

    /// Ids of the cards a detail toggle may open
    #[must_use]
    pub fn card_ids(&self) -> impl Iterator<Item = &VendorId> {
        self.items.iter().map(|item| &item.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
