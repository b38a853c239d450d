//! Browser-session seam
//!
//! [`PageDriver`] is the boundary between the retrieval logic and the actual
//! browser: one implementor drives a live Chrome tab
//! ([`ChromeSession`](crate::browser::ChromeSession)), test doubles script
//! page behavior deterministically. A driver is bound to exactly one product
//! identifier's processing lifetime; releasing the underlying browser
//! resource is the implementor's `Drop`.

use crate::error::Result;
use crate::locator::Locator;
use std::time::Duration;
use thiserror::Error;

/// Snapshot of a located element's extractable content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// Rendered inner text
    pub text: String,
    /// `src` attribute, when the element carries one
    pub source: Option<String>,
}

impl ElementHandle {
    /// Handle with text content only
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), source: None }
    }

    /// Handle for an image element with a `src` URL
    pub fn image(src: impl Into<String>) -> Self {
        Self { text: String::new(), source: Some(src.into()) }
    }
}

/// Failure classes of a bounded element wait
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The element did not appear within the wait budget
    #[error("Timed out waiting for element")]
    Timeout,

    /// Any other failure during the wait
    #[error("Lookup failed: {0}")]
    Other(String),
}

/// Result of a bounded element wait
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// One live page session bound to a single product identifier
pub trait PageDriver {
    /// Navigate the session to a URL and wait for the load to settle
    fn navigate(&self, url: &str) -> Result<()>;

    /// Force a full reload of the current page
    fn reload(&self) -> Result<()>;

    /// Wait up to `timeout` for one element matching `locator`
    fn wait_for(&self, locator: &Locator, timeout: Duration) -> LookupResult<ElementHandle>;

    /// Wait up to `timeout` for at least one element matching `locator`
    fn wait_for_all(&self, locator: &Locator, timeout: Duration)
    -> LookupResult<Vec<ElementHandle>>;

    /// Immediate lookup of all elements matching `locator`, no waiting
    fn find_all_now(&self, locator: &Locator) -> Vec<ElementHandle>;

    /// Immediate presence probe, no waiting
    fn present_now(&self, locator: &Locator) -> bool {
        !self.find_all_now(locator).is_empty()
    }

    /// Click the first element matching `locator`
    fn click(&self, locator: &Locator) -> Result<()>;
}

/// Creates one fresh session per product identifier
pub trait SessionFactory {
    /// The session type produced by this factory
    type Session: PageDriver;

    /// Open a fresh, isolated session
    fn open(&self) -> Result<Self::Session>;
}
