use clap::Parser;
use filing_alert::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    filing_alert::init_tracing();

    let cli = Cli::parse();
    match filing_alert::run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Critical error: {e:?}");
            ExitCode::FAILURE
        }
    }
}
