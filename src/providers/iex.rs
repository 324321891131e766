use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Certificate, Client, Url};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::config::{DEFAULT_IEX_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::core::quote::{BatchEntry, normalize_symbols};
use crate::core::{FetchError, QuoteBatch, QuoteProvider};

const BATCH_ENDPOINT: &str = "/stock/market/batch";

#[derive(Debug, Clone)]
pub struct IexOptions {
    pub base_url: String,
    pub timeout: Duration,
    /// Extra PEM bundle trusted alongside the system roots.
    pub cafile: Option<PathBuf>,
}

impl Default for IexOptions {
    fn default() -> Self {
        IexOptions {
            base_url: DEFAULT_IEX_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cafile: None,
        }
    }
}

/// Batch quote client for the IEX market endpoint.
pub struct IexProvider {
    endpoint: Url,
    client: Client,
}

impl IexProvider {
    pub fn new(options: &IexOptions) -> Result<Self> {
        let endpoint = format!("{}{}", options.base_url.trim_end_matches('/'), BATCH_ENDPOINT);
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("Invalid IEX base URL: {}", options.base_url))?;

        let mut builder = Client::builder()
            .user_agent(concat!("quotetab/", env!("CARGO_PKG_VERSION")))
            .timeout(options.timeout);

        if let Some(path) = &options.cafile {
            for cert in load_certificates(path)? {
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(IexProvider { endpoint, client })
    }
}

/// Reads a PEM bundle. A file that cannot be read is an error; a file with no
/// usable certificates only warns, leaving the system roots in effect.
fn load_certificates(path: &Path) -> Result<Vec<Certificate>> {
    let pem = std::fs::read(path)
        .with_context(|| format!("Failed to read certificate file: {}", path.display()))?;

    match Certificate::from_pem_bundle(&pem) {
        Ok(certs) if certs.is_empty() => {
            warn!(
                "No certs found in {}, using system certs only",
                path.display()
            );
            Ok(Vec::new())
        }
        Ok(certs) => {
            debug!("Adding {} certs from {}", certs.len(), path.display());
            Ok(certs)
        }
        Err(e) => {
            warn!(
                "Failed to add certs from {}: {}, using system certs only",
                path.display(),
                e
            );
            Ok(Vec::new())
        }
    }
}

#[async_trait]
impl QuoteProvider for IexProvider {
    #[instrument(name = "IexBatchFetch", skip(self, symbols), fields(count = symbols.len()))]
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<QuoteBatch, FetchError> {
        let symbols = normalize_symbols(symbols);
        if symbols.is_empty() {
            debug!("No symbols requested");
            return Ok(QuoteBatch::new());
        }

        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("symbols", &symbols.join(","))
            .append_pair("types", "quote")
            .append_pair("last", "1");
        debug!("Requesting quotes from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let text = response.text().await?;
        let entries: HashMap<String, BatchEntry> = serde_json::from_str(&text)?;

        let batch: QuoteBatch = entries
            .into_iter()
            .map(|(key, entry)| {
                let record = entry.quote.into_record(&key);
                (record.symbol.clone(), record)
            })
            .collect();

        let missing: Vec<&str> = symbols
            .iter()
            .filter(|s| !batch.contains_key(s.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            debug!("No quotes returned for {}", missing.join(","));
        }

        Ok(batch)
    }
}
