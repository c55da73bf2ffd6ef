use std::path::{Path, PathBuf};

use super::{CatalogPayload, CatalogSource, SourceError};
use crate::catalog::ProductRecord;

/// Catalog payload saved to disk (same JSON envelope as the endpoint).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileSource {
    async fn fetch(&self) -> Result<Vec<ProductRecord>, SourceError> {
        tracing::debug!(path = %self.path.display(), "Reading catalog file");
        let bytes = tokio::fs::read(&self.path).await?;
        let records = CatalogPayload::from_slice(&bytes)?.into_records()?;
        tracing::info!(path = %self.path.display(), count = records.len(), "Catalog loaded from file");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_source_reads_payload() {
        let dir = std::env::temp_dir().join("shelf_file_source_ok");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        std::fs::write(
            &path,
            r#"{"success":true,"total":1,"produtos":[{"sku":"7076192","nome":"Saponáceo"}]}"#,
        )
        .unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Saponáceo"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/tmp/shelf_test_nonexistent_catalog.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn test_file_source_rejected_payload() {
        let dir = std::env::temp_dir().join("shelf_file_source_rejected");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        std::fs::write(&path, r#"{"success":false,"error":"export incomplete"}"#).unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert_eq!(err.user_message(), "export incomplete");

        std::fs::remove_dir_all(&dir).ok();
    }
}
