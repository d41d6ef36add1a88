//! Errors that end the scrape of one filing-type key.

use filing_core::{ConfigError, FilingKey};
use thiserror::Error;

/// Scrape failure for a single key.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Results table never appeared within the page-load timeout
    #[error("results table did not load for item {key}: {source}")]
    PageLoad {
        /// Key being scraped
        key: FilingKey,
        /// Underlying wait failure
        source: filing_browser::BrowserError,
    },

    /// Key lookup or other configuration problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filing link base is not a usable URL
    #[error("invalid filing base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// Any other browser failure (launch, navigation, DOM queries)
    #[error("Browser error: {0}")]
    Browser(#[from] filing_browser::BrowserError),
}

/// Result type alias using `ScanError`.
pub type Result<T> = std::result::Result<T, ScanError>;
