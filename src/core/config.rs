use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const DEFAULT_IEX_BASE_URL: &str = "https://api.iextrading.com/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 4;
/// Fractional move (5%) above which a row is flagged.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 0.05;
pub const DEFAULT_SORT: &str = "+symbol";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IexProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub iex: Option<IexProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            iex: Some(IexProviderConfig {
                base_url: DEFAULT_IEX_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    pub timeout_secs: u64,
    pub alert_threshold: f64,
    pub sort: String,
    pub cafile: Option<PathBuf>,
    /// IANA zone name used for the time column; local time when unset.
    pub timezone: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            sort: DEFAULT_SORT.to_string(),
            cafile: None,
            timezone: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file has been created.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "quotetab", "quotetab")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn iex_base_url(&self) -> &str {
        self.providers
            .iex
            .as_ref()
            .map_or(DEFAULT_IEX_BASE_URL, |p| &p.base_url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
