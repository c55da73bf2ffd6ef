use serde::Deserialize;

use super::SourceError;
use crate::catalog::ProductRecord;

/// Response envelope returned by the catalog endpoint.
///
/// Success: `{"success": true, "total": 14, "produtos": [...]}`.
/// Failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub produtos: Option<Vec<ProductRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CatalogPayload {
    /// Parse a response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SourceError> {
        serde_json::from_slice(bytes).map_err(SourceError::Decode)
    }

    /// Unwrap the product list, turning a rejected payload into an error.
    pub fn into_records(self) -> Result<Vec<ProductRecord>, SourceError> {
        if !self.success {
            let reason = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(SourceError::Rejected(reason));
        }

        let records = self.produtos.ok_or(SourceError::MissingProducts)?;
        if let Some(total) = self.total {
            if total != records.len() as u64 {
                tracing::warn!(
                    total,
                    received = records.len(),
                    "Payload total does not match product count"
                );
            }
        }
        Ok(records)
    }
}
