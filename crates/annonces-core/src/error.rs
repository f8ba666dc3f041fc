use thiserror::Error;

/// Application-wide error types for the scraper.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed (fetching a page).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    Network(String),

    /// A CSS selector failed to compile.
    #[error("Selector error: {0}")]
    Selector(String),

    /// A single listing card could not be extracted.
    #[error("Extraction error: {0}")]
    Extract(String),

    /// CSV serialization/deserialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or input.
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// Returns true for fetch-side failures, where the whole page is
    /// reported and yields an empty result. Per-item extraction failures
    /// only drop the affected listing.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::Timeout(_) | AppError::Network(_)
        )
    }
}
