//! Terminal product catalog viewer.
//!
//! Fetches a product catalog once, then pages and filters it locally.

pub mod app;
pub mod catalog;
pub mod config;
pub mod source;
pub mod ui;
pub mod util;
