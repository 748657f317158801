use crate::gallery::{RowLayout, result_limit};
use crate::store::StoreSchema;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vendor_cards_types::{DEFAULT_LOCATIONS, DEFAULT_ROW_SIZE, GalleryFilter, NO_LIMIT};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Defaults used when an embedding directive omits an option
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryConfig {
    #[serde(default = "default_count")]
    pub default_count: i64,

    #[serde(default)]
    pub default_location: String,

    /// Cards per row before a row break
    #[serde(default = "default_row_size")]
    pub row_size: usize,
}

fn default_count() -> i64 {
    NO_LIMIT
}
fn default_row_size() -> usize {
    DEFAULT_ROW_SIZE
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            default_location: String::new(),
            row_size: default_row_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Snapshot file; defaults to the data directory's `vendors.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Location terms a new store starts with
    #[serde(default = "default_locations")]
    pub locations: Vec<String>,
}

fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(ToString::to_string).collect()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            locations: default_locations(),
        }
    }
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a zero row size and
    /// [`Error::InvalidFilter`] for a default count below -1.
    pub fn validate(&self) -> Result<()> {
        if self.gallery.row_size == 0 {
            return Err(Error::Config("gallery.rowSize must be at least 1".to_string()));
        }
        result_limit(&self.base_filter())?;
        Ok(())
    }

    /// Filter used when the embedding surface supplies no options
    #[must_use]
    pub fn base_filter(&self) -> GalleryFilter {
        let location = self.gallery.default_location.trim();
        GalleryFilter {
            max_count: self.gallery.default_count,
            location: (!location.is_empty()).then(|| location.to_string()),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] when the row size is zero.
    pub fn layout(&self) -> Result<RowLayout> {
        RowLayout::try_from_size(self.gallery.row_size)
    }

    #[must_use]
    pub fn schema(&self) -> StoreSchema {
        StoreSchema::default().with_locations(self.store.locations.iter().cloned())
    }

    /// Store file, preferring the configured path over `fallback`
    #[must_use]
    pub fn store_path(&self, fallback: &Path) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}
