pub mod config;
pub mod gallery;
pub mod store;
pub mod toggle;

mod error;
mod sanitize;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use gallery::{Gallery, LayoutToken, RowLayout, render, render_html};
pub use store::{InMemoryStore, JsonFileStore, StoreQuery, StoreSchema, VendorStore};
pub use toggle::{DetailToggle, Transition};

pub use vendor_cards_types::*;
