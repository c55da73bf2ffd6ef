//! Display-safe normalization of product records.
//!
//! Every field that reaches the renderer is guaranteed non-empty: missing or
//! blank values are replaced with fixed placeholders here, so paging and
//! rendering never deal with absent data.

use std::borrow::Cow;

use super::ProductRecord;

/// Placeholder for a missing SKU or barcode.
pub const MISSING_CODE: &str = "N/A";
/// Placeholder for a missing product name.
pub const MISSING_NAME: &str = "Nome indisponível";
/// Placeholder image shown when the record has no image URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/120";
/// Placeholder link for records without a product URL.
pub const PLACEHOLDER_LINK: &str = "#";

/// A product record with every display field filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub sku: String,
    /// Raw name, for plain text display.
    pub name: String,
    /// Name with markup-significant characters escaped, for attribute and
    /// inline-markup contexts.
    pub name_markup: String,
    pub barcode: String,
    pub image_url: String,
    pub product_url: String,
}

/// Fill placeholders and derive the markup-safe name.
pub fn normalize(record: &ProductRecord) -> NormalizedRecord {
    let name = or_placeholder(record.name.as_deref(), MISSING_NAME);
    NormalizedRecord {
        sku: or_placeholder(record.sku.as_deref(), MISSING_CODE),
        name_markup: escape_markup(&name).into_owned(),
        name,
        barcode: or_placeholder(record.barcode.as_deref(), MISSING_CODE),
        image_url: or_placeholder(record.image_url.as_deref(), PLACEHOLDER_IMAGE),
        product_url: or_placeholder(record.product_url.as_deref(), PLACEHOLDER_LINK),
    }
}

impl From<&NormalizedRecord> for ProductRecord {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            sku: Some(record.sku.clone()),
            name: Some(record.name.clone()),
            barcode: Some(record.barcode.clone()),
            image_url: Some(record.image_url.clone()),
            product_url: Some(record.product_url.clone()),
        }
    }
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` as HTML character references.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
pub fn escape_markup(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_all_missing_fields_get_placeholders() {
        let normalized = normalize(&ProductRecord::default());
        assert_eq!(normalized.sku, "N/A");
        assert_eq!(normalized.name, "Nome indisponível");
        assert_eq!(normalized.name_markup, "Nome indisponível");
        assert_eq!(normalized.barcode, "N/A");
        assert_eq!(normalized.image_url, "https://via.placeholder.com/120");
        assert_eq!(normalized.product_url, "#");
    }

    #[test]
    fn test_blank_fields_get_placeholders() {
        let record = ProductRecord {
            sku: Some("".into()),
            name: Some("   ".into()),
            ..Default::default()
        };
        let normalized = normalize(&record);
        assert_eq!(normalized.sku, MISSING_CODE);
        assert_eq!(normalized.name, MISSING_NAME);
    }

    #[test]
    fn test_present_fields_are_kept_verbatim() {
        let record = ProductRecord {
            sku: Some("7073800".into()),
            name: Some("Papel Toalha Mili".into()),
            barcode: Some("7896104998".into()),
            image_url: Some("https://cdn.example.com/p.png".into()),
            product_url: Some("https://shop.example.com/p/7073800".into()),
        };
        let normalized = normalize(&record);
        assert_eq!(normalized.sku, "7073800");
        assert_eq!(normalized.name, "Papel Toalha Mili");
        assert_eq!(normalized.product_url, "https://shop.example.com/p/7073800");
    }

    #[test]
    fn test_name_markup_escapes_quotes() {
        let record = ProductRecord {
            name: Some(r#"Copo 12" D'Ouro <Promo> & Cia"#.into()),
            ..Default::default()
        };
        let normalized = normalize(&record);
        assert_eq!(normalized.name, r#"Copo 12" D'Ouro <Promo> & Cia"#);
        assert_eq!(
            normalized.name_markup,
            "Copo 12&quot; D&#39;Ouro &lt;Promo&gt; &amp; Cia"
        );
    }

    #[test]
    fn test_escape_markup_borrows_clean_text() {
        assert!(matches!(escape_markup("plain text"), Cow::Borrowed(_)));
    }

    fn field() -> impl Strategy<Value = Option<String>> {
        prop::option::of("[ a-zA-Z0-9'\"&<>]{0,12}")
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(
            sku in field(),
            name in field(),
            barcode in field(),
            image_url in field(),
            product_url in field(),
        ) {
            let record = ProductRecord { sku, name, barcode, image_url, product_url };
            let once = normalize(&record);
            let twice = normalize(&ProductRecord::from(&once));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalized_fields_never_blank(name in field(), sku in field()) {
            let normalized = normalize(&ProductRecord { sku, name, ..Default::default() });
            prop_assert!(!normalized.name.trim().is_empty());
            prop_assert!(!normalized.sku.trim().is_empty());
            prop_assert!(!normalized.name_markup.contains(['"', '\'', '<', '>']));
        }
    }
}
