//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and overlays
//! - `products` - Product list and details widgets
//! - `status` - Status bar widget
//! - `clipboard` - OSC 52 clipboard writes

mod clipboard;
mod events;
mod input;
mod loop_runner;
mod products;
mod render;
mod status;

// Re-export the public API
pub use events::handle_app_event;
pub use loop_runner::{run, Action};
