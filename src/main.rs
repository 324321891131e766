use anyhow::Result;
use clap::{CommandFactory, Parser};
use quotetab::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Ticker symbols to quote
    symbols: Vec<String>,

    /// Sort column, prefixed with + (ascending) or - (descending)
    #[arg(short, long)]
    sort: Option<String>,

    /// PEM file with extra certificates to trust
    #[arg(long)]
    cafile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Create default configuration
    #[arg(long)]
    setup: bool,
}

impl From<Cli> for quotetab::QuoteRequest {
    fn from(cli: Cli) -> quotetab::QuoteRequest {
        quotetab::QuoteRequest {
            symbols: cli.symbols,
            sort: cli.sort,
            cafile: cli.cafile,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = if cli.setup {
        quotetab::cli::setup::setup()
    } else if cli.symbols.is_empty() {
        Cli::command().print_help()?;
        Ok(())
    } else {
        let config_path = cli.config_path.clone();
        quotetab::run(&cli.into(), config_path.as_deref()).await
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
