//! Embedding directive parsing: `[location_vendors count="4" location="Downtown"]`

use super::result_limit;
use crate::sanitize::sanitize_text_field;
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};
use vendor_cards_types::GalleryFilter;

/// Directive name recognized in embedding text
pub const SHORTCODE_TAG: &str = "location_vendors";

fn directive_pattern() -> &'static Regex {
    static DIRECTIVE: OnceLock<Regex> = OnceLock::new();
    DIRECTIVE.get_or_init(|| {
        Regex::new(r"\[location_vendors(?:\s([^\]]*))?\]").expect("directive pattern is valid")
    })
}

fn attribute_pattern() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r#"([A-Za-z_][\w-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'/\]]+))"#)
            .expect("attribute pattern is valid")
    })
}

/// Extract the attributes of the first `[location_vendors ...]` directive in
/// `text`. Keys are lowercased. Returns `None` when there is no directive.
#[must_use]
pub fn parse_shortcode(text: &str) -> Option<HashMap<String, String>> {
    let captures = directive_pattern().captures(text)?;
    let body = captures.get(1).map_or("", |m| m.as_str());

    let atts: HashMap<String, String> = attribute_pattern()
        .captures_iter(body)
        .filter_map(|cap| {
            let key = cap.get(1)?.as_str().to_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or("", |m| m.as_str());
            Some((key, value.to_string()))
        })
        .collect();

    debug!("Parsed {} directive with {} attributes", SHORTCODE_TAG, atts.len());
    Some(atts)
}

/// Build a filter from string-keyed attributes.
///
/// `count` overrides the result limit and `location` the location filter;
/// attributes that are absent keep the values from `base`. Unknown keys are
/// ignored with a warning.
///
/// # Errors
///
/// Returns [`Error::InvalidFilter`] if `count` is not an integer or is below -1.
pub fn filter_from_atts<S: std::hash::BuildHasher>(
    atts: &HashMap<String, String, S>,
    base: &GalleryFilter,
) -> Result<GalleryFilter> {
    let mut filter = base.clone();

    for (key, value) in atts {
        match key.to_lowercase().as_str() {
            "count" => {
                let trimmed = value.trim();
                filter.max_count = trimmed.parse::<i64>().map_err(|_| {
                    Error::InvalidFilter(format!("count must be an integer, got {trimmed:?}"))
                })?;
            }
            "location" => {
                let location = sanitize_text_field(value);
                filter.location = (!location.is_empty()).then_some(location);
            }
            other => warn!("Ignoring unknown {} attribute: {}", SHORTCODE_TAG, other),
        }
    }

    result_limit(&filter)?;
    Ok(filter)
}
