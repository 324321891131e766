pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::quotes::{DisplayZone, RenderOptions};
use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::{FetchError, QuoteProvider, QuoteRecord, SortSpec, sort_quotes};
use crate::providers::{IexOptions, IexProvider};
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// What the user asked for on the command line. Unset fields fall back to
/// the config file.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub symbols: Vec<String>,
    pub sort: Option<String>,
    pub cafile: Option<PathBuf>,
}

pub async fn run(request: &QuoteRequest, config_path: Option<&str>) -> Result<()> {
    info!("quotetab starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = IexProvider::new(&IexOptions {
        base_url: config.iex_base_url().to_string(),
        timeout: config.timeout(),
        cafile: request.cafile.clone().or_else(|| config.cafile.clone()),
    })?;

    let spec = SortSpec::parse(request.sort.as_deref().unwrap_or(&config.sort));
    debug!("Sorting by {spec}");

    let options = RenderOptions {
        alert_threshold: config.alert_threshold,
        zone: DisplayZone::from_name(config.timezone.as_deref()),
    };

    let records = fetch_sorted(&provider, &request.symbols, spec).await?;
    cli::quotes::display_quotes(&records, &options);
    Ok(())
}

/// Fetches one batch and orders it. Nothing is rendered until the whole
/// batch has arrived.
pub async fn fetch_sorted(
    provider: &(dyn QuoteProvider + Send + Sync),
    symbols: &[String],
    spec: SortSpec,
) -> Result<Vec<QuoteRecord>, FetchError> {
    let pb = ui::new_spinner("Fetching quotes");
    let result = provider.fetch_quotes(symbols).await;
    pb.finish_and_clear();

    let batch = result?;
    debug!("Received {} of {} quotes", batch.len(), symbols.len());
    Ok(sort_quotes(batch.into_values().collect(), spec))
}
