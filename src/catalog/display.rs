//! The display surface: what has been rendered for the current filter epoch.
//!
//! Rendering is split in two steps. [`DisplayUnit::from`] is a pure mapping
//! from a normalized record to drawable data, and [`Display`] accumulates
//! units page by page. The terminal widgets and the HTML export both draw
//! from the same units.

use super::NormalizedRecord;

/// Drawable data for a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    /// Plain-text product name.
    pub title: String,
    /// Secondary line: identifiers.
    pub subtitle: String,
    pub sku: String,
    pub image_url: String,
    pub link: String,
    /// Markup-safe name for attribute positions (image alt, link title).
    pub alt_text: String,
    /// Text placed on the clipboard by the copy action.
    pub copy_text: String,
}

impl From<&NormalizedRecord> for DisplayUnit {
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            title: record.name.clone(),
            subtitle: format!("SKU {} · EAN {}", record.sku, record.barcode),
            sku: record.sku.clone(),
            image_url: record.image_url.clone(),
            link: record.product_url.clone(),
            alt_text: record.name_markup.clone(),
            copy_text: record.sku.clone(),
        }
    }
}

/// Informational notices shown in place of products.
///
/// Distinct from status-line errors: an empty result is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoProducts,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::NoProducts => "No products found",
        }
    }
}

/// Append-only list of rendered units plus an optional notice.
#[derive(Debug, Default)]
pub struct Display {
    units: Vec<DisplayUnit>,
    notice: Option<Notice>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page of records.
    ///
    /// An empty page on an empty surface shows [`Notice::NoProducts`]; this is
    /// the only way the notice appears. Anything else clears the notice and
    /// appends units in the given order.
    pub fn render_page(&mut self, page: &[NormalizedRecord]) {
        if self.units.is_empty() && page.is_empty() {
            self.notice = Some(Notice::NoProducts);
            return;
        }

        self.notice = None;
        self.units.extend(page.iter().map(DisplayUnit::from));
    }

    /// Drop all units and the notice. Only a filter change does this.
    pub fn clear(&mut self) {
        self.units.clear();
        self.notice = None;
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.units
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
