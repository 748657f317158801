//! End-to-end rendering from embedding directives

use super::fixtures::*;
use crate::Error;
use crate::config::Config;
use crate::gallery::Gallery;

#[test]
fn test_directive_with_location() {
    let gallery = Gallery::from_shortcode(
        &scenario_store(),
        r#"<p>Find us downtown</p>[location_vendors location="Downtown"]"#,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(ids(&gallery.items), vec![vid(2), vid(3)]);
}

#[test]
fn test_directive_with_count() {
    let gallery =
        Gallery::from_shortcode(&scenario_store(), "[location_vendors count=1]", &Config::default())
            .unwrap();

    assert_eq!(ids(&gallery.items), vec![vid(2)]);
}

#[test]
fn test_directive_without_attributes_uses_config_defaults() {
    let mut config = Config::default();
    config.gallery.default_location = "Downtown".to_string();
    config.gallery.default_count = 1;

    let gallery =
        Gallery::from_shortcode(&scenario_store(), "[location_vendors]", &config).unwrap();

    assert_eq!(ids(&gallery.items), vec![vid(2)]);
}

#[test]
fn test_directive_empty_location_overrides_default() {
    let mut config = Config::default();
    config.gallery.default_location = "Downtown".to_string();

    let gallery =
        Gallery::from_shortcode(&scenario_store(), r#"[location_vendors location=""]"#, &config)
            .unwrap();

    assert_eq!(gallery.len(), 3);
}

#[test]
fn test_text_without_directive_renders_defaults() {
    let gallery =
        Gallery::from_shortcode(&scenario_store(), "no directive here", &Config::default())
            .unwrap();

    assert_eq!(gallery.len(), 3);
}

#[test]
fn test_directive_bad_count_surfaces() {
    let err = Gallery::from_shortcode(
        &scenario_store(),
        r#"[location_vendors count="-3"]"#,
        &Config::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::InvalidFilter(_)));
}

#[test]
fn test_directive_uses_configured_row_size() {
    let mut config = Config::default();
    config.gallery.row_size = 2;

    let gallery =
        Gallery::from_shortcode(&scenario_store(), "[location_vendors]", &config).unwrap();

    assert_eq!(gallery.layout.row_size(), 2);
    assert_eq!(gallery.to_html().matches(r#"class="clearfix""#).count(), 1);
}

#[test]
fn test_directive_zero_row_size_is_config_error() {
    let mut config = Config::default();
    config.gallery.row_size = 0;

    let err =
        Gallery::from_shortcode(&scenario_store(), "[location_vendors]", &config).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
}
