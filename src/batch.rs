//! Batch orchestration
//!
//! Processes an ordered identifier sequence strictly one at a time: open a
//! fresh session, navigate, classify, extract, assemble, release the session.
//! The session is released on every exit path (it is dropped when the
//! per-identifier scope ends), including mid-extraction failure. An
//! unrecovered failure for one identifier aborts the whole batch immediately;
//! identifiers after it are never attempted and records stay truncated at the
//! abort point.

use crate::classify::{PageState, classify};
use crate::driver::{PageDriver, SessionFactory};
use crate::error::Result;
use crate::extract::FieldPipeline;
use crate::locator::ProductLocators;
use crate::progress::{NoopSink, ProgressSink};
use crate::record::ProductRecord;
use crate::retry::RetryPolicy;
use std::time::Duration;

/// Flipkart product URL prefix; the identifier goes into the `pid` query
/// parameter, the path segment is irrelevant to the served product
pub const DEFAULT_BASE_URL: &str =
    "https://www.flipkart.com/cotton-fabric-undershirt/p/itm120ded1ca7a63";

/// Tunables for one batch run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Product URL prefix the identifier is appended to as `?pid=`
    pub base_url: String,
    /// Settle delay between navigation and page classification
    pub settle: Duration,
    /// Retry budget for element lookups
    pub retry: RetryPolicy,
    /// Locator set for the product-page layout
    pub locators: ProductLocators,
}

impl ScrapeConfig {
    /// The page URL for one product identifier
    pub fn product_url(&self, identifier: &str) -> String {
        format!("{}?pid={}", self.base_url, identifier)
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            settle: Duration::from_secs(1),
            retry: RetryPolicy::default(),
            locators: ProductLocators::default(),
        }
    }
}

/// Terminal status of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every identifier was processed
    Completed,
    /// An unrecovered failure stopped the batch at `identifier`
    Aborted { identifier: String, reason: String },
}

/// Ordered records for the identifiers attempted before any abort
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub records: Vec<ProductRecord>,
    pub status: BatchStatus,
}

impl BatchResult {
    pub fn is_completed(&self) -> bool {
        self.status == BatchStatus::Completed
    }
}

/// Sequences retrieval sessions over a batch of product identifiers
pub struct BatchOrchestrator<F: SessionFactory> {
    factory: F,
    config: ScrapeConfig,
    sink: Box<dyn ProgressSink>,
}

impl<F: SessionFactory> BatchOrchestrator<F> {
    pub fn new(factory: F, config: ScrapeConfig) -> Self {
        Self { factory, config, sink: Box::new(NoopSink) }
    }

    /// Report progress and diagnostics to `sink`
    pub fn with_sink(mut self, sink: Box<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Process `identifiers` in order, fail-fast on the first unrecovered
    /// per-identifier failure
    pub fn run(&self, identifiers: &[String]) -> BatchResult {
        let mut records = Vec::with_capacity(identifiers.len());

        for (i, identifier) in identifiers.iter().enumerate() {
            self.sink.product_started(i + 1, identifier);
            match self.scrape_one(identifier) {
                Ok(record) => records.push(record),
                Err(err) => {
                    self.sink.product_failed(identifier, &err);
                    return BatchResult {
                        records,
                        status: BatchStatus::Aborted {
                            identifier: identifier.clone(),
                            reason: err.to_string(),
                        },
                    };
                }
            }
        }

        BatchResult { records, status: BatchStatus::Completed }
    }

    /// Retrieve one record. The session lives exactly as long as this call;
    /// dropping it releases the browser resource on every exit path.
    fn scrape_one(&self, identifier: &str) -> Result<ProductRecord> {
        let session = self.factory.open()?;
        session.navigate(&self.config.product_url(identifier))?;

        match classify(&session, &self.config.locators, self.config.settle) {
            PageState::ErrorInterstitial => {
                self.sink.interstitial(identifier);
                Ok(ProductRecord::issue(identifier))
            }
            PageState::Normal => {
                let pipeline =
                    FieldPipeline::new(&self.config.locators, self.config.retry, &*self.sink);
                let fields = pipeline.run(&session);
                Ok(ProductRecord::from_fields(identifier, fields))
            }
        }
    }
}
