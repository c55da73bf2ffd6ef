use std::sync::Arc;

use super::ProductRecord;

/// The loaded catalog and the subset matching the current filter.
///
/// `all` is shared behind `Arc` so recomputing `active` only bumps refcounts.
#[derive(Debug, Default)]
pub struct CatalogStore {
    all: Vec<Arc<ProductRecord>>,
    active: Vec<Arc<ProductRecord>>,
    query: String,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with `records` and drop any filter.
    ///
    /// Called once per session by the loader; a second call simply replaces
    /// the data.
    pub fn ingest(&mut self, records: Vec<ProductRecord>) {
        self.all = records.into_iter().map(Arc::new).collect();
        self.active = self.all.clone();
        self.query.clear();
        tracing::debug!(count = self.all.len(), "Catalog ingested");
    }

    /// Recompute the active subset for `raw_query`.
    ///
    /// Case-insensitive substring match against SKU, name or barcode. The
    /// subset is always re-derived from the full catalog.
    pub fn apply_filter(&mut self, raw_query: &str) {
        self.query = raw_query.to_lowercase();

        let query = self.query.as_str();
        self.active = self
            .all
            .iter()
            .filter(|record| {
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.contains(query))
            })
            .cloned()
            .collect();

        tracing::debug!(
            query = %self.query,
            matched = self.active.len(),
            total = self.all.len(),
            "Filter applied"
        );
    }

    /// True when the catalog itself has no records (as opposed to a filter
    /// matching nothing).
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn all(&self) -> &[Arc<ProductRecord>] {
        &self.all
    }

    pub fn active(&self) -> &[Arc<ProductRecord>] {
        &self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}
