//! Widget configuration
//!
//! Widgets are configured from plain attribute strings and JSON payloads
//! embedded in the page, not a wire protocol. This module turns those into
//! explicit typed structs at construction time:
//!
//! - attribute strings: absent values default to empty (or the widget's
//!   built-in label)
//! - JSON payloads: strict parsing returns an explicit `Result`; the
//!   `*_lenient` entry points log the failure and fall back to an empty
//!   list, so a malformed payload degrades the widget instead of crashing
//!   the page
//!
//! The ingredients payload arrives HTML-escaped in practice, so it is
//! sanitized (whitespace collapse, `&quot;` unescape) before parsing.

use crate::error::Result;
use crate::types::{Ingredient, PipelineItem};

/// Configuration for the before/after image-split widget
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSplitConfig {
    pub left_image: String,
    pub right_image: String,
    pub left_alt: String,
    pub right_alt: String,
}

impl Default for ImageSplitConfig {
    fn default() -> Self {
        Self {
            left_image: String::new(),
            right_image: String::new(),
            left_alt: "Before".to_string(),
            right_alt: "After".to_string(),
        }
    }
}

impl ImageSplitConfig {
    /// Build from raw attribute values; absent URLs become empty strings,
    /// absent alt texts fall back to the default labels.
    pub fn from_attrs(
        left_image: Option<&str>,
        right_image: Option<&str>,
        left_alt: Option<&str>,
        right_alt: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            left_image: left_image.unwrap_or("").to_string(),
            right_image: right_image.unwrap_or("").to_string(),
            left_alt: left_alt.unwrap_or(&defaults.left_alt).to_string(),
            right_alt: right_alt.unwrap_or(&defaults.right_alt).to_string(),
        }
    }
}

/// Configuration for the composite scan-result card
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanCellConfig {
    pub title: String,
    pub brand: String,
    pub left_image: String,
    pub right_image: String,
    pub ingredients: Vec<Ingredient>,
}

impl ScanCellConfig {
    /// Build from raw attribute values. The ingredients payload is parsed
    /// leniently: a malformed payload yields an empty list.
    pub fn from_attrs(
        title: Option<&str>,
        brand: Option<&str>,
        left_image: Option<&str>,
        right_image: Option<&str>,
        ingredients_json: Option<&str>,
    ) -> Self {
        Self {
            title: title.unwrap_or("").to_string(),
            brand: brand.unwrap_or("").to_string(),
            left_image: left_image.unwrap_or("").to_string(),
            right_image: right_image.unwrap_or("").to_string(),
            ingredients: parse_ingredients_lenient(ingredients_json.unwrap_or("[]")),
        }
    }
}

/// Parse the pipeline chart's `{name, value}` item list. Strict variant:
/// the caller decides what a malformed payload means.
pub fn parse_pipeline_items(json: &str) -> Result<Vec<PipelineItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Lenient variant used at widget construction: a malformed payload is
/// logged and treated as an empty list (the sequencer then runs a
/// zero-pill sequence that still fires the content-reveal hook).
pub fn parse_pipeline_items_lenient(json: &str) -> Vec<PipelineItem> {
    match parse_pipeline_items(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("failed to parse pipeline items, using empty list: {e}");
            Vec::new()
        }
    }
}

/// Undo the HTML escaping the ingredients payload picks up when embedded
/// as an attribute: collapse whitespace runs, trim, unescape `&quot;`.
pub fn sanitize_payload(raw: &str) -> String {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.replace("&quot;", "\"")
}

/// Parse an ingredients payload after sanitizing it
pub fn parse_ingredients(raw: &str) -> Result<Vec<Ingredient>> {
    Ok(serde_json::from_str(&sanitize_payload(raw))?)
}

/// Lenient ingredients parse: malformed payloads are logged and become an
/// empty list.
pub fn parse_ingredients_lenient(raw: &str) -> Vec<Ingredient> {
    match parse_ingredients(raw) {
        Ok(ingredients) => ingredients,
        Err(e) => {
            tracing::warn!("failed to parse ingredients, using empty list: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_split_defaults() {
        let cfg = ImageSplitConfig::from_attrs(None, None, None, None);
        assert_eq!(cfg.left_image, "");
        assert_eq!(cfg.right_image, "");
        assert_eq!(cfg.left_alt, "Before");
        assert_eq!(cfg.right_alt, "After");
    }

    #[test]
    fn test_parse_pipeline_items() {
        let items = parse_pipeline_items(r#"[{"name": "scanned", "value": 10}]"#).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "scanned");
        assert_eq!(items[0].value, 10.0);
    }

    #[test]
    fn test_malformed_pipeline_payload_is_empty() {
        assert!(parse_pipeline_items("not json").is_err());
        assert!(parse_pipeline_items_lenient("not json").is_empty());
        assert!(parse_pipeline_items_lenient("{\"name\":").is_empty());
    }

    #[test]
    fn test_sanitize_payload() {
        let raw = "  [ {&quot;name&quot;: &quot;Water&quot;,\n   &quot;verified&quot;: true} ] ";
        let clean = sanitize_payload(raw);
        assert!(!clean.contains("&quot;"));
        assert!(!clean.contains('\n'));

        let ingredients = parse_ingredients(raw).unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Water");
        assert!(ingredients[0].verified);
    }

    #[test]
    fn test_scan_cell_with_bad_ingredients_degrades() {
        let cfg = ScanCellConfig::from_attrs(
            Some("Shampoo"),
            Some("Acme"),
            Some("left.jpg"),
            Some("right.jpg"),
            Some("{{ broken"),
        );
        assert_eq!(cfg.title, "Shampoo");
        assert!(cfg.ingredients.is_empty());
    }
}
