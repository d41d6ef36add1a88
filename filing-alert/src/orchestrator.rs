//! Pipeline orchestrator for running every filing-type key.
//!
//! Keys run one after another: scrape, format, send. A key that fails is
//! logged and recorded in the [`RunSummary`]; the next key still runs.

use filing_browser::SessionFactory;
use filing_core::{AppConfig, ConfigResult, FilingKey};
use filing_mail::{build_digest, DigestSender, MailTransport, SendOutcome};
use filing_scanner::FilingScraper;

/// Result of processing a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Key that was processed
    pub key: FilingKey,
    /// Number of valid filings scraped
    pub filings_count: usize,
    /// What the sender did; `None` when scraping failed
    pub delivery: Option<SendOutcome>,
    /// Scrape error message if the key failed before sending
    pub error: Option<String>,
}

impl KeyOutcome {
    /// Whether the key failed to scrape or to deliver.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || matches!(self.delivery, Some(SendOutcome::Failed(_)))
    }
}

/// Per-key outcomes of one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<KeyOutcome>,
}

impl RunSummary {
    /// Number of digests handed to the transport.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.delivery == Some(SendOutcome::Sent))
            .count()
    }

    /// Number of keys that failed to scrape or deliver.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

/// Resolve the keys to run.
///
/// No requested keys means every configured key, in configuration order.
/// A requested key without a search URL is a configuration error.
pub fn select_keys(config: &AppConfig, requested: &[String]) -> ConfigResult<Vec<FilingKey>> {
    if requested.is_empty() {
        return Ok(config.keys().cloned().collect());
    }

    requested
        .iter()
        .map(|raw| {
            let key = FilingKey::new(raw.as_str())?;
            config.search_url(&key)?;
            Ok(key)
        })
        .collect()
}

/// Scrape → format → send, for each key.
pub struct Pipeline<F, T> {
    scraper: FilingScraper<F>,
    sender: DigestSender<T>,
}

impl<F, T> Pipeline<F, T>
where
    F: SessionFactory,
    T: MailTransport,
{
    /// Create a pipeline from a scraper and a sender.
    pub fn new(scraper: FilingScraper<F>, sender: DigestSender<T>) -> Self {
        Self { scraper, sender }
    }

    /// The sender, for inspecting its transport.
    pub fn sender(&self) -> &DigestSender<T> {
        &self.sender
    }

    /// Run every key in order. Never fails as a whole.
    pub async fn run(&self, keys: &[FilingKey]) -> RunSummary {
        let mut summary = RunSummary::default();
        for key in keys {
            summary.outcomes.push(self.run_key(key).await);
        }
        summary
    }

    /// Run one key, containing any failure in the returned outcome.
    pub async fn run_key(&self, key: &FilingKey) -> KeyOutcome {
        let filings = match self.scraper.scrape(key).await {
            Ok(filings) => filings,
            Err(e) => {
                tracing::error!(key = %key, error = ?e, "Scrape failed for Item {}: {}", key, e);
                return KeyOutcome {
                    key: key.clone(),
                    filings_count: 0,
                    delivery: None,
                    error: Some(e.to_string()),
                };
            }
        };

        let digest = build_digest(&filings, key);
        let delivery = self.sender.send(digest.as_ref(), key).await;

        KeyOutcome {
            key: key.clone(),
            filings_count: filings.len(),
            delivery: Some(delivery),
            error: None,
        }
    }
}
