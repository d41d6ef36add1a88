//! Filing Scanner - search results scraping.
//!
//! Builds the date-bounded search URL for a filing-type key, drives a
//! browser session to the results page and turns each complete table row
//! into a [`FilingRecord`](filing_core::FilingRecord). Incomplete rows are
//! skipped with a warning; a results table that never renders fails only
//! the key being scraped.
//!
//! # Example
//!
//! ```rust,ignore
//! use filing_browser::{ChromiumLauncher, EngineOptions};
//! use filing_scanner::FilingScraper;
//! use std::sync::Arc;
//!
//! let scraper = FilingScraper::new(ChromiumLauncher::new(EngineOptions::default()), Arc::new(config))?;
//! let filings = scraper.scrape(&key).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
#[allow(missing_docs)]
pub mod parser;
pub mod scrape;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use parser::{RawRow, RowParser};
pub use scrape::FilingScraper;
pub use url_builder::build_search_url;
