//! Content store collaborator.
//!
//! The gallery only ever reads through [`VendorStore`]. Two implementations
//! ship with the crate: [`InMemoryStore`], which owns its records and can be
//! persisted to a snapshot file, and [`JsonFileStore`], which re-reads a
//! snapshot file on every query.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vendor_cards_types::{DEFAULT_LOCATIONS, LOCATION_TAXONOMY, POST_TYPE, VendorId, VendorRecord};

/// Current snapshot file format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// What a gallery asks the store for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreQuery {
    /// Exact location tag; `None` lists every record
    pub location: Option<String>,
}

impl StoreQuery {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
        }
    }
}

/// Read access to vendor records.
///
/// Implementations return records of the vendor kind, restricted to those
/// whose tags contain `query.location` exactly when it is set, ordered by
/// title ascending (`str` ordering). Records with equal titles keep the
/// store's own iteration order.
pub trait VendorStore: Send + Sync {
    /// List vendors matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StoreUnavailable`] when the backing data cannot
    /// be read.
    fn list_vendors(&self, query: &StoreQuery) -> Result<Vec<VendorRecord>>;
}

impl<S: VendorStore + ?Sized> VendorStore for &S {
    fn list_vendors(&self, query: &StoreQuery) -> Result<Vec<VendorRecord>> {
        (**self).list_vendors(query)
    }
}

/// Record kind and location tag set a store is initialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSchema {
    pub post_type: String,
    pub taxonomy: String,

    /// Locations may nest (parent/child terms)
    pub hierarchical: bool,

    /// Location terms created up front
    pub locations: Vec<String>,
}

impl Default for StoreSchema {
    fn default() -> Self {
        Self {
            post_type: POST_TYPE.to_string(),
            taxonomy: LOCATION_TAXONOMY.to_string(),
            hierarchical: true,
            locations: DEFAULT_LOCATIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl StoreSchema {
    #[must_use]
    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }
}

/// On-disk form of a store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub vendors: Vec<VendorRecord>,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Collapse records sharing an id: the last one wins, at the position of the first.
pub(crate) fn dedup_by_id(records: Vec<VendorRecord>) -> Vec<VendorRecord> {
    let mut positions: HashMap<VendorId, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<VendorRecord> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(&pos) = positions.get(&record.id) {
            unique[pos] = record;
        } else {
            positions.insert(record.id.clone(), unique.len());
            unique.push(record);
        }
    }
    unique
}

/// Filter and order records the way every store promises to.
///
/// `sort_by` is stable, so equal titles keep their input order.
pub(crate) fn select_and_order<'a, I>(records: I, query: &StoreQuery) -> Vec<VendorRecord>
where
    I: IntoIterator<Item = &'a VendorRecord>,
{
    let location = query.location.as_deref().filter(|l| !l.is_empty());
    let mut selected: Vec<VendorRecord> = records
        .into_iter()
        .filter(|record| location.is_none_or(|l| record.has_location(l)))
        .cloned()
        .collect();
    selected.sort_by(|a, b| a.title.cmp(&b.title));
    selected
}
