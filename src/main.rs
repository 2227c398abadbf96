mod cli;
mod export;
mod markdown;
mod research;
mod youtube;

pub const USER_AGENT: &str = concat!("nichescout/", env!("CARGO_PKG_VERSION"));

use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use cli::{Cli, OutputFormat};
use youtube::YouTubeClient;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Exit status for rejected configuration (same as clap usage errors).
const EXIT_INVALID_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nichescout=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.research_config();
    if let Err(e) = config.validate() {
        error!("invalid configuration: {e}");
        return Ok(ExitCode::from(EXIT_INVALID_CONFIG));
    }

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let youtube = YouTubeClient::from_env(http)
        .inspect_err(|e| error!("YouTube client not available: {e}"))?;

    info!(keywords = config.keywords.len(), limit = config.limit, "starting niche research");
    let report = research::research(&youtube, &config).await?;

    let output = match cli.format {
        OutputFormat::Markdown => export::format_report(&report, &config.keywords),
        OutputFormat::Json => export::to_json(&report.table)? + "\n",
    };
    std::io::stdout().lock().write_all(output.as_bytes())?;

    if report.table.is_empty() {
        info!("no rows matched the filters; nothing exported");
    } else if !cli.no_export {
        export::write_csv_file(&report.table, &cli.output)?;
        info!(path = %cli.output.display(), rows = report.table.len(), "results saved");
    }

    Ok(ExitCode::SUCCESS)
}
