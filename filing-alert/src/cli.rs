use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "filing-alert",
    version,
    about = "Email a digest of newly posted SEC filings for each configured item"
)]
pub struct Cli {
    /// Configuration file (JSON, or TOML by extension). Defaults to
    /// ./configuration.json, then the platform config directory.
    #[arg(long, short, env = "FILING_ALERT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only process this filing-type key; repeat for several
    #[arg(long = "key", short = 'k', value_name = "KEY")]
    pub keys: Vec<String>,

    /// Log the digests instead of sending mail
    #[arg(long)]
    pub dry_run: bool,

    /// Scrape a saved results page instead of launching Chromium
    #[arg(long, value_name = "FILE")]
    pub page_source: Option<PathBuf>,
}
