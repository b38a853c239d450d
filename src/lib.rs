//! # fsn-scraper
//!
//! Batch scraper for Flipkart product pages. Given an ordered list of product
//! identifiers (FSNs), it drives one Chrome session per identifier via the
//! Chrome DevTools Protocol (CDP), extracts the product fields the page
//! exposes, and aggregates everything into one tabular CSV export.
//!
//! ## Features
//!
//! - **Bounded-retry lookups**: elements that have not rendered yet are
//!   retried with full page reloads between attempts; missing fields degrade
//!   to sentinel values instead of failing the record
//! - **Page-state classification**: Flipkart's error interstitial is detected
//!   up front and recorded as a minimal issue row
//! - **Fail-fast batch policy**: the first unrecovered per-identifier failure
//!   aborts the whole batch, keeping the records gathered up to that point
//! - **Injected progress sink**: all logging and progress output flows through
//!   a caller-owned [`ProgressSink`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fsn_scraper::{
//!     BatchOrchestrator, ChromeFactory, LogSink, ScrapeConfig, SessionOptions, export,
//! };
//!
//! # fn main() -> fsn_scraper::Result<()> {
//! let factory = ChromeFactory::new(SessionOptions::default());
//! let orchestrator = BatchOrchestrator::new(factory, ScrapeConfig::default())
//!     .with_sink(Box::new(LogSink));
//!
//! let identifiers = vec!["MOBGHWFHECFVMDCX".to_string()];
//! let result = orchestrator.run(&identifiers);
//!
//! if result.is_completed() {
//!     export::export_to_path(&result.records, "flipkart_data.csv")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`batch`]: batch orchestration over an identifier sequence
//! - [`browser`]: Chrome session management and configuration
//! - [`classify`]: error-interstitial vs. normal page classification
//! - [`driver`]: the browser-session seam ([`PageDriver`], [`SessionFactory`])
//! - [`extract`]: the ordered, absence-tolerant field extraction pipeline
//! - [`export`]: union-of-columns CSV export
//! - [`input`]: identifier-list CSV input
//! - [`locator`]: page locators with Flipkart defaults
//! - [`progress`]: caller-owned progress/logging sink
//! - [`record`]: the two product-record shapes
//! - [`retry`]: bounded-retry element lookup

pub mod batch;
pub mod browser;
pub mod classify;
pub mod driver;
pub mod error;
pub mod export;
pub mod extract;
pub mod input;
pub mod locator;
pub mod progress;
pub mod record;
pub mod retry;

pub use batch::{BatchOrchestrator, BatchResult, BatchStatus, ScrapeConfig};
pub use browser::{ChromeFactory, ChromeSession, SessionOptions};
pub use classify::PageState;
pub use driver::{ElementHandle, LookupError, PageDriver, SessionFactory};
pub use error::{Result, ScrapeError};
pub use extract::{FieldPipeline, ProductFields};
pub use locator::{Locator, ProductLocators};
pub use progress::{LogSink, NoopSink, ProgressSink};
pub use record::ProductRecord;
pub use retry::{RetryPolicy, RetryableLookup};
