//! Progress and logging sink
//!
//! The orchestrator and the retrying lookups report everything observable
//! through a [`ProgressSink`] owned by the caller, instead of writing to
//! process-global logging state. [`LogSink`] is the default: structured
//! entries through the `log` facade plus the human-readable per-field
//! progress lines on stdout. Sinks are informational only and never feed
//! back into the data contract.

use crate::error::ScrapeError;
use crate::locator::Locator;

/// Receiver for retrieval progress and diagnostics
///
/// All methods default to no-ops so sinks only implement what they observe.
pub trait ProgressSink {
    /// A new product identifier is about to be processed (`position` is 1-based)
    fn product_started(&self, position: usize, identifier: &str) {
        let _ = (position, identifier);
    }

    /// The loaded page was the error interstitial
    fn interstitial(&self, identifier: &str) {
        let _ = identifier;
    }

    /// A field finished extracting (sentinel values included)
    fn field_extracted(&self, label: &str, value: &str) {
        let _ = (label, value);
    }

    /// A lookup timed out and is reloading before attempt `attempt`
    fn retrying(&self, locator: &Locator, attempt: u32) {
        let _ = (locator, attempt);
    }

    /// A lookup exhausted its retry budget
    fn lookup_exhausted(&self, locator: &Locator) {
        let _ = locator;
    }

    /// A lookup failed for a reason other than a wait-timeout
    fn lookup_failed(&self, locator: &Locator, reason: &str) {
        let _ = (locator, reason);
    }

    /// Processing one identifier failed unrecoverably
    fn product_failed(&self, identifier: &str, error: &ScrapeError) {
        let _ = (identifier, error);
    }
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NoopSink;

impl ProgressSink for NoopSink {}

/// Default sink: `log` facade entries plus per-field progress lines
#[derive(Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn product_started(&self, position: usize, identifier: &str) {
        println!("Scraping Product {}: {}", position, identifier);
        log::info!("scraping product {} ({})", identifier, position);
    }

    fn interstitial(&self, identifier: &str) {
        println!("Unknown issue occurred for {}", identifier);
        log::warn!("error interstitial for product {}", identifier);
    }

    fn field_extracted(&self, label: &str, value: &str) {
        println!("{}: {}", label, value);
        log::debug!("extracted {}: {}", label, value);
    }

    fn retrying(&self, locator: &Locator, attempt: u32) {
        println!("Retrying...");
        log::debug!("retrying lookup of {} (attempt {})", locator, attempt);
    }

    fn lookup_exhausted(&self, locator: &Locator) {
        println!("Max attempts reached. Element not found.");
        log::debug!("lookup exhausted for {}", locator);
    }

    fn lookup_failed(&self, locator: &Locator, reason: &str) {
        println!("An unexpected error occurred: {}", reason);
        log::warn!("lookup of {} failed: {}", locator, reason);
    }

    fn product_failed(&self, identifier: &str, error: &ScrapeError) {
        log::error!("Error scraping product {}: {}", identifier, error);
    }
}
