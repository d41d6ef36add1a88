//! filing-alert application shell
//!
//! Wires the configuration, browser, scanner and mail crates together. The
//! per-key pipeline lives in [`orchestrator`].

pub mod cli;
pub mod orchestrator;

pub use cli::Cli;
pub use orchestrator::{select_keys, KeyOutcome, Pipeline, RunSummary};

use anyhow::Context;
use filing_browser::{ChromiumLauncher, EngineOptions, SessionFactory, StaticPageSource};
use filing_core::{AppConfig, FilingKey};
use filing_mail::{DigestSender, LogOnlyTransport, MailTransport, SmtpMailTransport};
use filing_scanner::FilingScraper;
use std::sync::Arc;
use tracing::Instrument;

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

/// Load configuration and run the pipeline for the selected keys.
///
/// Only configuration and setup problems are returned as errors; per-key
/// failures are reported in the [`RunSummary`].
pub async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id);

    async move {
        tracing::info!("Starting filing-alert v{}", env!("CARGO_PKG_VERSION"));

        let path = AppConfig::resolve_path(cli.config.as_deref())?;
        let config = AppConfig::load_with_env(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        if !cli.dry_run {
            config.validate_mail().context("Mail settings incomplete")?;
        }

        let keys = select_keys(&config, &cli.keys)?;
        let config = Arc::new(config);

        let summary = match (&cli.page_source, cli.dry_run) {
            (Some(file), dry_run) => {
                let source = StaticPageSource::from_file(file)
                    .with_context(|| format!("Failed to read page source {}", file.display()))?;
                tracing::info!("Replaying saved page {}", file.display());
                if dry_run {
                    execute(source, LogOnlyTransport, config, &keys).await?
                } else {
                    let transport = smtp_transport(&config);
                    execute(source, transport, config, &keys).await?
                }
            }
            (None, dry_run) => {
                let launcher = ChromiumLauncher::new(EngineOptions {
                    headless: config.chrome_headless,
                    user_agent: config.user_agent.clone(),
                });
                if dry_run {
                    execute(launcher, LogOnlyTransport, config, &keys).await?
                } else {
                    let transport = smtp_transport(&config);
                    execute(launcher, transport, config, &keys).await?
                }
            }
        };

        tracing::info!(
            "Run finished: {} keys, {} emails sent, {} failures",
            summary.outcomes.len(),
            summary.sent(),
            summary.failures()
        );
        Ok::<_, anyhow::Error>(summary)
    }
    .instrument(span)
    .await
}

fn smtp_transport(config: &AppConfig) -> SmtpMailTransport {
    SmtpMailTransport::plaintext(&config.smtp_server, config.smtp_port)
}

async fn execute<F, T>(
    sessions: F,
    transport: T,
    config: Arc<AppConfig>,
    keys: &[FilingKey],
) -> anyhow::Result<RunSummary>
where
    F: SessionFactory,
    T: MailTransport,
{
    let sender = DigestSender::from_config(&config, transport);
    let scraper = FilingScraper::new(sessions, config).context("Invalid scraper settings")?;
    Ok(Pipeline::new(scraper, sender).run(keys).await)
}
