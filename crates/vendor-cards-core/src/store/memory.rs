use super::{SNAPSHOT_VERSION, StoreQuery, StoreSchema, StoreSnapshot, VendorStore};
use crate::Result;
use crate::sanitize::sanitize_text_field;
use std::path::Path;
use tracing::{debug, info, warn};
use vendor_cards_types::{VendorId, VendorRecord};

/// Owns vendor records and location terms in insertion order
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    schema: StoreSchema,
    locations: Vec<String>,
    vendors: Vec<VendorRecord>,
}

impl InMemoryStore {
    /// Create an empty store with the schema's location terms
    #[must_use]
    pub fn new(schema: StoreSchema) -> Self {
        let mut store = Self {
            locations: Vec::new(),
            vendors: Vec::new(),
            schema,
        };
        for location in store.schema.locations.clone() {
            store.add_location(&location);
        }
        store
    }

    /// Create a store from records, registering every tag they carry
    #[must_use]
    pub fn with_records(schema: StoreSchema, records: Vec<VendorRecord>) -> Self {
        let mut store = Self::new(schema);
        for record in records {
            store.upsert(record);
        }
        store
    }

    /// Load a store from a snapshot file.
    ///
    /// A missing file yields an empty store seeded from `schema`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path, schema: StoreSchema) -> Result<Self> {
        if !path.exists() {
            debug!("Vendor store not found at {}", path.display());
            return Ok(Self::new(schema));
        }

        debug!("Loading vendor store from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content)?;
        if snapshot.version > SNAPSHOT_VERSION {
            warn!(
                "Vendor store {} has version {} (newer than {}), reading anyway",
                path.display(),
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }

        let mut store = Self::new(schema);
        for location in &snapshot.locations {
            store.add_location(location);
        }
        for record in snapshot.vendors {
            store.upsert(record);
        }

        info!(
            "Loaded {} vendors and {} locations from {}",
            store.vendors.len(),
            store.locations.len(),
            path.display()
        );
        Ok(store)
    }

    /// Save the store as a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.snapshot())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        debug!("Saved {} vendors to {}", self.vendors.len(), path.display());
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            locations: self.locations.clone(),
            vendors: self.vendors.clone(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &StoreSchema {
        &self.schema
    }

    /// Register a location term. Returns false if it already existed.
    pub fn add_location(&mut self, name: &str) -> bool {
        let name = sanitize_text_field(name);
        if name.is_empty() || self.locations.iter().any(|l| *l == name) {
            return false;
        }
        self.locations.push(name);
        true
    }

    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Insert a record, or replace the one with the same id in place.
    ///
    /// Owner names and location tags are sanitized, descriptions trimmed,
    /// and any location tag not yet known is registered as a term.
    pub fn upsert(&mut self, mut record: VendorRecord) {
        record.owner_name = sanitize_text_field(&record.owner_name);
        record.description = record.description.trim().to_string();
        record.location_tags = record
            .location_tags
            .iter()
            .map(|tag| sanitize_text_field(tag))
            .filter(|tag| !tag.is_empty())
            .collect();

        for tag in &record.location_tags {
            self.add_location(tag);
        }

        if let Some(existing) = self.vendors.iter_mut().find(|v| v.id == record.id) {
            *existing = record;
        } else {
            self.vendors.push(record);
        }
    }

    /// Remove a record. Returns the removed record, if any.
    pub fn remove(&mut self, id: &VendorId) -> Option<VendorRecord> {
        let pos = self.vendors.iter().position(|v| v.id == *id)?;
        Some(self.vendors.remove(pos))
    }

    #[must_use]
    pub fn get(&self, id: &VendorId) -> Option<&VendorRecord> {
        self.vendors.iter().find(|v| v.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(StoreSchema::default())
    }
}

impl VendorStore for InMemoryStore {
    fn list_vendors(&self, query: &StoreQuery) -> Result<Vec<VendorRecord>> {
        Ok(super::select_and_order(&self.vendors, query))
    }
}
