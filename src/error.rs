//! Error types and result aliases

use thiserror::Error;

/// Errors surfaced by the scraper
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Failed to launch the browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Navigation or reload failed unrecoverably
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// Interacting with a located element failed
    #[error("Interaction failed: {0}")]
    InteractionFailed(String),

    /// The input identifier list could not be read
    #[error("Failed to read identifier list: {0}")]
    InputList(String),

    /// Writing the tabular export failed
    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
