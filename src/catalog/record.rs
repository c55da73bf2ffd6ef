use serde::{Deserialize, Deserializer};

// ============================================================================
// Product Record
// ============================================================================

/// A product as delivered by the catalog endpoint.
///
/// Wire names follow the backend payload (`sku`, `nome`, `ean`, `imagem`,
/// `url`). English aliases are accepted so hand-written JSON exports load too.
/// Every field is optional; placeholders are applied later by
/// [`normalize`](super::normalize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,

    #[serde(rename = "nome", alias = "name", default, deserialize_with = "lenient_text")]
    pub name: Option<String>,

    #[serde(rename = "ean", alias = "barcode", default, deserialize_with = "lenient_text")]
    pub barcode: Option<String>,

    #[serde(
        rename = "imagem",
        alias = "imageUrl",
        default,
        deserialize_with = "lenient_text"
    )]
    pub image_url: Option<String>,

    #[serde(
        rename = "url",
        alias = "productUrl",
        default,
        deserialize_with = "lenient_text"
    )]
    pub product_url: Option<String>,
}

impl ProductRecord {
    /// Lower-cased haystacks used by the filter: SKU, name, barcode.
    ///
    /// Missing fields yield the empty string so placeholders are never matched.
    pub(crate) fn search_fields(&self) -> [String; 3] {
        [
            self.sku.as_deref().unwrap_or_default().to_lowercase(),
            self.name.as_deref().unwrap_or_default().to_lowercase(),
            self.barcode.as_deref().unwrap_or_default().to_lowercase(),
        ]
    }
}

/// Accept strings, numbers, booleans and `null` for a text field.
///
/// Spreadsheet-backed feeds emit SKUs and barcodes as JSON numbers.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            tracing::debug!(value = %other, "Ignoring non-scalar product field");
            None
        }
    })
}
