//! Shared types for the vendor card gallery.
//!
//! This crate provides the data model used across vendor-cards-core and
//! vendor-cards-cli: the records read from the content store, the filter a
//! gallery is rendered with, the view-models produced for display, and the
//! events driving the detail-view toggle. All types are serializable.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// `max_count` sentinel meaning "no limit".
pub const NO_LIMIT: i64 = -1;

/// Cards per row in the default (four column) layout.
pub const DEFAULT_ROW_SIZE: usize = 4;

/// Record kind name used by the content store.
pub const POST_TYPE: &str = "location-vendors";

/// Tag set (taxonomy) holding vendor locations.
pub const LOCATION_TAXONOMY: &str = "vendor_location";

/// Locations created when a fresh store is initialized.
pub const DEFAULT_LOCATIONS: [&str; 5] = [
    "Downtown",
    "Boardwalk",
    "Shoppes at the Asbury",
    "3 Little Birds",
    "Shoobie Shack",
];

/// Deserialize a string that may be null or missing (both become empty string)
fn deserialize_null_as_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Deserialize a tag set that may be null or missing (both become empty set)
fn deserialize_null_as_empty_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<BTreeSet<String>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

// ============================================================================
// Records
// ============================================================================

/// Opaque, stable identifier of a vendor record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VendorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for VendorId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Reference to a displayable thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
    pub alt: String,
}

impl ImageRef {
    #[must_use]
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: String::new(),
        }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }
}

/// One vendor entry as held by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    pub id: VendorId,

    /// Display name of the stall
    pub title: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
    pub owner_name: String,

    #[serde(default, deserialize_with = "deserialize_null_as_empty_string")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,

    /// Location names this record is tagged with
    #[serde(default, deserialize_with = "deserialize_null_as_empty_set")]
    pub location_tags: BTreeSet<String>,
}

impl VendorRecord {
    #[must_use]
    pub fn new(id: impl Into<VendorId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            owner_name: String::new(),
            description: String::new(),
            image_ref: None,
            location_tags: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_owner(mut self, owner_name: impl Into<String>) -> Self {
        self.owner_name = owner_name.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image_ref = Some(image);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location_tags.insert(location.into());
        self
    }

    /// Exact, case-sensitive tag membership.
    #[must_use]
    pub fn has_location(&self, location: &str) -> bool {
        self.location_tags.contains(location)
    }
}

// ============================================================================
// Gallery query
// ============================================================================

/// Filter a gallery is rendered with. Constructed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryFilter {
    /// Maximum number of cards, `NO_LIMIT` for all
    #[serde(default = "default_max_count")]
    pub max_count: i64,

    /// Exact location name; absent or empty means no filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

fn default_max_count() -> i64 {
    NO_LIMIT
}

impl Default for GalleryFilter {
    fn default() -> Self {
        Self {
            max_count: NO_LIMIT,
            location: None,
        }
    }
}

impl GalleryFilter {
    #[must_use]
    pub fn with_max_count(mut self, max_count: i64) -> Self {
        self.max_count = max_count;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// The location to filter by, treating an empty string as no filter.
    #[must_use]
    pub fn location_name(&self) -> Option<&str> {
        self.location.as_deref().filter(|l| !l.is_empty())
    }
}

/// Render-ready projection of one vendor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryViewModel {
    pub id: VendorId,
    pub title: String,
    pub owner_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<ImageRef>,
    pub has_image: bool,
}

impl From<&VendorRecord> for GalleryViewModel {
    fn from(record: &VendorRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            owner_name: record.owner_name.clone(),
            description: record.description.clone(),
            image_ref: record.image_ref.clone(),
            has_image: record.image_ref.is_some(),
        }
    }
}

impl From<VendorRecord> for GalleryViewModel {
    fn from(record: VendorRecord) -> Self {
        let has_image = record.image_ref.is_some();
        Self {
            id: record.id,
            title: record.title,
            owner_name: record.owner_name,
            description: record.description,
            image_ref: record.image_ref,
            has_image,
        }
    }
}

// ============================================================================
// Detail-view toggle
// ============================================================================

/// Which detail panel is open, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum ToggleState {
    #[default]
    Closed,
    Open(VendorId),
}

impl ToggleState {
    #[must_use]
    pub fn active(&self) -> Option<&VendorId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(id),
        }
    }
}

/// Events accepted by the detail-view toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToggleEvent {
    /// A card was activated
    SelectCard { id: VendorId },

    /// Close whatever panel is open
    Close,
}

/// Where a click landed on the rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ClickTarget {
    Card(VendorId),

    /// The explicit close control inside a panel
    CloseControl,

    /// Dimmed region around an open panel
    Backdrop,

    /// Inside the panel body itself
    PanelContent,
}

impl ClickTarget {
    /// Map a click to the toggle event it triggers, if any.
    #[must_use]
    pub fn to_event(&self) -> Option<ToggleEvent> {
        match self {
            Self::Card(id) => Some(ToggleEvent::SelectCard { id: id.clone() }),
            Self::CloseControl | Self::Backdrop => Some(ToggleEvent::Close),
            Self::PanelContent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_id_from_number() {
        let id = VendorId::from(42u64);
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_vendor_id_serializes_transparently() {
        let json = serde_json::to_string(&VendorId::from("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn test_record_missing_optional_fields() {
        let json = r#"{"id": "7", "title": "Tacos"}"#;
        let record: VendorRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, VendorId::from(7u64));
        assert_eq!(record.owner_name, "");
        assert_eq!(record.description, "");
        assert!(record.image_ref.is_none());
        assert!(record.location_tags.is_empty());
    }

    #[test]
    fn test_record_null_optional_fields() {
        let json = r#"{
            "id": "7",
            "title": "Tacos",
            "ownerName": null,
            "description": null,
            "locationTags": null
        }"#;
        let record: VendorRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.owner_name, "");
        assert_eq!(record.description, "");
        assert!(record.location_tags.is_empty());
    }

    #[test]
    fn test_record_duplicate_tags_collapse() {
        let json = r#"{"id": "1", "title": "A", "locationTags": ["Downtown", "Downtown"]}"#;
        let record: VendorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.location_tags.len(), 1);
    }

    #[test]
    fn test_has_location_is_exact() {
        let record = VendorRecord::new("1", "A").with_location("Downtown");
        assert!(record.has_location("Downtown"));
        assert!(!record.has_location("downtown"));
        assert!(!record.has_location("Down"));
        assert!(!record.has_location("Downtown "));
    }

    #[test]
    fn test_filter_default_is_unfiltered() {
        let filter = GalleryFilter::default();
        assert_eq!(filter.max_count, NO_LIMIT);
        assert!(filter.location_name().is_none());
    }

    #[test]
    fn test_filter_empty_location_means_none() {
        let filter = GalleryFilter::default().with_location("");
        assert!(filter.location_name().is_none());
    }

    #[test]
    fn test_filter_parse_defaults() {
        let filter: GalleryFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(filter, GalleryFilter::default());
    }

    #[test]
    fn test_view_model_without_image() {
        let record = VendorRecord::new("1", "Alpha").with_owner("Ann");
        let vm = GalleryViewModel::from(&record);

        assert!(!vm.has_image);
        assert!(vm.image_ref.is_none());
        assert_eq!(vm.owner_name, "Ann");
        assert_eq!(vm.description, "");
    }

    #[test]
    fn test_view_model_with_image() {
        let record =
            VendorRecord::new("1", "Alpha").with_image(ImageRef::new("/a.jpg").with_alt("Stall"));
        let vm = GalleryViewModel::from(record);

        assert!(vm.has_image);
        assert_eq!(vm.image_ref.unwrap().alt, "Stall");
    }

    #[test]
    fn test_toggle_state_json_shape() {
        let open = serde_json::to_value(ToggleState::Open(VendorId::from("2"))).unwrap();
        assert_eq!(open, serde_json::json!({"state": "open", "id": "2"}));

        let closed = serde_json::to_value(ToggleState::Closed).unwrap();
        assert_eq!(closed, serde_json::json!({"state": "closed"}));
    }

    #[test]
    fn test_toggle_event_json_shape() {
        let json = r#"{"type": "select_card", "id": "3"}"#;
        let event: ToggleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            ToggleEvent::SelectCard {
                id: VendorId::from("3")
            }
        );

        let close: ToggleEvent = serde_json::from_str(r#"{"type": "close"}"#).unwrap();
        assert_eq!(close, ToggleEvent::Close);
    }

    #[test]
    fn test_click_target_events() {
        assert_eq!(
            ClickTarget::Card(VendorId::from("1")).to_event(),
            Some(ToggleEvent::SelectCard {
                id: VendorId::from("1")
            })
        );
        assert_eq!(ClickTarget::CloseControl.to_event(), Some(ToggleEvent::Close));
        assert_eq!(ClickTarget::Backdrop.to_event(), Some(ToggleEvent::Close));
        assert_eq!(ClickTarget::PanelContent.to_event(), None);
    }
}

/// Property-based tests for record decoding and projection.
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_text() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[a-zA-Z0-9 &<>'\"]{0,40}")
            .unwrap()
            .boxed()
    }

    prop_compose! {
        fn arb_record()(
            id in 0u64..10_000,
            title in arb_text(),
            owner in arb_text(),
            description in arb_text(),
            image in proptest::option::of(arb_text()),
            tags in proptest::collection::btree_set(arb_text(), 0..4),
        ) -> VendorRecord {
            VendorRecord {
                id: VendorId::from(id),
                title,
                owner_name: owner,
                description,
                image_ref: image.map(ImageRef::new),
                location_tags: tags,
            }
        }
    }

    proptest! {
        #[test]
        fn view_model_has_image_matches_image_ref(record in arb_record()) {
            let vm = GalleryViewModel::from(&record);
            prop_assert_eq!(vm.has_image, record.image_ref.is_some());
            prop_assert_eq!(&vm.id, &record.id);
            prop_assert_eq!(&vm.title, &record.title);
        }

        #[test]
        fn owned_and_borrowed_projection_agree(record in arb_record()) {
            let borrowed = GalleryViewModel::from(&record);
            let owned = GalleryViewModel::from(record);
            prop_assert_eq!(borrowed, owned);
        }
    }
}
