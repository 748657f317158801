use super::{StoreQuery, StoreSnapshot, VendorStore};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use vendor_cards_types::VendorRecord;

/// Store backed by a snapshot file, re-read on every query.
///
/// Unlike [`super::InMemoryStore::load`], a missing or unreadable file is
/// reported as [`Error::StoreUnavailable`] rather than an empty store.
/// Records repeating an id collapse to the last one, as on load.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_snapshot(&self) -> Result<StoreSnapshot> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            warn!("Failed to read vendor store {}: {}", self.path.display(), e);
            Error::StoreUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            warn!(
                "Failed to parse vendor store {} (at line {}, column {}): {}",
                self.path.display(),
                e.line(),
                e.column(),
                e
            );
            Error::StoreUnavailable(format!("{}: {e}", self.path.display()))
        })
    }
}

impl VendorStore for JsonFileStore {
    fn list_vendors(&self, query: &StoreQuery) -> Result<Vec<VendorRecord>> {
        let snapshot = self.read_snapshot()?;
        debug!(
            "Read {} vendors from {}",
            snapshot.vendors.len(),
            self.path.display()
        );
        let vendors = super::dedup_by_id(snapshot.vendors);
        Ok(super::select_and_order(&vendors, query))
    }
}
