//! Browser session management
//!
//! The headless_chrome-backed implementation of the session seam: one Chrome
//! instance per product identifier, configured the way the scraper always
//! runs it, released when the session drops.

pub mod chrome;
pub mod config;

pub use chrome::{ChromeFactory, ChromeSession};
pub use config::SessionOptions;
