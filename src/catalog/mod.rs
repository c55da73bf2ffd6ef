//! Catalog data and paging.
//!
//! - [`record`] - Wire representation of a product
//! - [`normalize`] - Placeholder filling and markup escaping
//! - [`store`] - Full catalog plus the filtered active subset
//! - [`pager`] - Page boundaries over the active subset
//! - [`display`] - Rendered units for the current filter epoch
//! - [`export`] - HTML card export of rendered units

mod display;
mod export;
mod normalize;
mod pager;
mod record;
mod store;

pub use display::{Display, DisplayUnit, Notice};
pub use export::{fill_template, html_fragment, PRODUCTS_MARKER};
pub use normalize::{
    escape_markup, normalize, NormalizedRecord, MISSING_CODE, MISSING_NAME, PLACEHOLDER_IMAGE,
    PLACEHOLDER_LINK,
};
pub use pager::{Pager, PAGE_SIZE};
pub use record::ProductRecord;
pub use store::CatalogStore;
