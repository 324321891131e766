//! Quote model and the provider abstraction

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashSet};

use super::error::FetchError;

/// Latest observation for a single ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRecord {
    pub symbol: String,
    pub open: f64,
    pub close: f64,
    pub latest: f64,
    pub change: f64,
    /// Fractional change, `0.025` is 2.5%.
    pub change_pct: f64,
    /// Epoch milliseconds of the last update.
    pub as_of: i64,
    pub volume: u64,
}

/// Quotes returned by one batch request, keyed by symbol.
pub type QuoteBatch = BTreeMap<String, QuoteRecord>;

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<QuoteBatch, FetchError>;
}

/// Upper-cases and de-duplicates symbols, keeping the first occurrence.
pub fn normalize_symbols(symbols: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(symbols.len());
    let mut normalized = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() && seen.insert(symbol.clone()) {
            normalized.push(symbol);
        }
    }
    normalized
}

// Wire shape of one entry in the batch response: `{"AAPL": {"quote": {...}}}`
#[derive(Debug, Deserialize)]
pub(crate) struct BatchEntry {
    pub quote: WireQuote,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireQuote {
    #[serde(default, deserialize_with = "null_as_default")]
    symbol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    open: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    close: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    latest_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    change: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    change_percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    latest_update: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    latest_volume: u64,
}

impl WireQuote {
    pub(crate) fn into_record(self, key: &str) -> QuoteRecord {
        let symbol = if self.symbol.is_empty() {
            key.to_string()
        } else {
            self.symbol
        };
        QuoteRecord {
            symbol,
            open: self.open,
            close: self.close,
            latest: self.latest_price,
            change: self.change,
            change_pct: self.change_percent,
            as_of: self.latest_update,
            volume: self.latest_volume,
        }
    }
}

// Pre-market quotes carry `null` for prices that have not printed yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
