//! Utility functions for common operations.
//!
//! This module provides reusable utilities for:
//!
//! - **Link validation**: only http(s) product links are handed to the OS opener
//! - **Text processing**: Unicode-aware string width calculation and truncation
//! - **Background tasks**: panic capture for spawned futures
//!
//! # Examples
//!
//! ```
//! use shelf::util::{validate_url_for_open, display_width, truncate_to_width};
//!
//! assert!(validate_url_for_open("https://example.com/p/1").is_ok());
//! assert_eq!(display_width("Hello"), 5);
//! assert_eq!(truncate_to_width("Long product name", 10), "Long pr...");
//! ```

mod task;
mod text;
mod url_validator;

pub use task::catch_task_panic;
pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};
