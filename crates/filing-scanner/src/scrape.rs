//! Per-key scrape of the filings search results page.
//!
//! One browser session is opened for each call to [`FilingScraper::scrape`]
//! and closed before it returns, whether or not extraction succeeded.

use crate::error::{Result, ScanError};
use crate::parser::{RowParser, RESULTS_TABLE, RESULT_ROWS};
use crate::url_builder::build_search_url;
use chrono::{Local, NaiveDate};
use filing_browser::{BrowserActions, SessionFactory};
use filing_core::{AppConfig, FilingKey, FilingRecord};
use std::sync::Arc;

/// Scrapes filing records for configured filing-type keys.
pub struct FilingScraper<F> {
    /// Opens one browser session per scrape
    sessions: F,
    /// Search URLs, lookback window and timeouts
    config: Arc<AppConfig>,
    /// Row validation and link resolution
    parser: RowParser,
}

impl<F: SessionFactory> FilingScraper<F> {
    /// Create a scraper over `sessions` using the search settings in `config`.
    pub fn new(sessions: F, config: Arc<AppConfig>) -> Result<Self> {
        let parser = RowParser::new(&config.filing_base_url)?;
        Ok(Self {
            sessions,
            config,
            parser,
        })
    }

    /// Scrape filings for `key` over the lookback window ending today.
    pub async fn scrape(&self, key: &FilingKey) -> Result<Vec<FilingRecord>> {
        self.scrape_until(key, Local::now().date_naive()).await
    }

    /// Scrape filings for `key` over the lookback window ending on `today`.
    ///
    /// Returns an empty vector when the table rendered but no row was
    /// complete. A missing search URL fails before any browser is launched.
    pub async fn scrape_until(&self, key: &FilingKey, today: NaiveDate) -> Result<Vec<FilingRecord>> {
        let base = self.config.search_url(key)?;
        let search_url = build_search_url(base, self.config.fetch_days, today, &self.config.forms);

        let session = self.sessions.open().await?;
        let extracted = self.extract(&session, key, &search_url).await;

        if let Err(e) = session.close().await {
            tracing::warn!(key = %key, "Failed to close browser session: {}", e);
        }

        let filings = extracted?;
        tracing::info!(
            key = %key,
            "Scraping completed with {} valid filings found.",
            filings.len()
        );
        Ok(filings)
    }

    async fn extract(
        &self,
        session: &F::Session,
        key: &FilingKey,
        search_url: &str,
    ) -> Result<Vec<FilingRecord>> {
        tracing::info!(key = %key, "Opening URL: {}", search_url);
        session.navigate(search_url).await?;

        session
            .wait_for_selector(RESULTS_TABLE, self.config.page_load_timeout())
            .await
            .map_err(|source| ScanError::PageLoad {
                key: key.clone(),
                source,
            })?;

        let rows = session.find_all(RESULT_ROWS).await?;
        tracing::info!(key = %key, "Found {} rows in the table.", rows.len());

        let mut filings = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let raw = self.parser.read_row(row.as_ref()).await;
            match self.parser.validate_row(raw) {
                Some(record) => filings.push(record),
                None => tracing::warn!(
                    key = %key,
                    "Skipping row {} due to missing elements.",
                    index + 1
                ),
            }
        }

        Ok(filings)
    }
}
