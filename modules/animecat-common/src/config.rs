use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CatalogError;

const DEFAULT_KITSU_BASE_URL: &str = "https://kitsu.io/api/edge";
const DEFAULT_CINEMETA_BASE_URL: &str = "https://v3-cinemeta.strem.io";
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 5;
const DEFAULT_WORKERS: usize = 8;

/// Which metadata search service resolves titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Kitsu,
    Cinemeta,
}

impl FromStr for Provider {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kitsu" => Ok(Provider::Kitsu),
            "cinemeta" => Ok(Provider::Cinemeta),
            other => Err(CatalogError::Config(format!(
                "unknown provider '{other}' (expected kitsu or cinemeta)"
            ))),
        }
    }
}

/// How the orchestrator orders surviving records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputOrder {
    /// Re-sorted by each record's position in the input batch.
    #[default]
    Input,
    /// Order in which workers got records into the dedup map. Varies between runs.
    Acceptance,
}

impl FromStr for OutputOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input" => Ok(OutputOrder::Input),
            "acceptance" => Ok(OutputOrder::Acceptance),
            other => Err(CatalogError::Config(format!(
                "unknown output order '{other}' (expected input or acceptance)"
            ))),
        }
    }
}

/// Runtime configuration loaded from environment variables (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub kitsu_base_url: String,
    pub cinemeta_base_url: String,
    pub lookup_timeout: Duration,
    pub workers: usize,
    pub output_order: OutputOrder,

    // Stremio addon identity
    pub catalog_id: String,
    pub catalog_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::Kitsu,
            kitsu_base_url: DEFAULT_KITSU_BASE_URL.to_string(),
            cinemeta_base_url: DEFAULT_CINEMETA_BASE_URL.to_string(),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            workers: DEFAULT_WORKERS,
            output_order: OutputOrder::Input,
            catalog_id: "animeworld_updated".to_string(),
            catalog_name: "AnimeWorld Updated".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, CatalogError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults;
    /// set-but-invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CatalogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match var("ANIMECAT_PROVIDER") {
            Some(v) => v.parse()?,
            None => defaults.provider,
        };
        let output_order = match var("ANIMECAT_OUTPUT_ORDER") {
            Some(v) => v.parse()?,
            None => defaults.output_order,
        };
        let lookup_timeout = match var("ANIMECAT_LOOKUP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number(&v, "ANIMECAT_LOOKUP_TIMEOUT_SECS")?),
            None => defaults.lookup_timeout,
        };
        let workers = match var("ANIMECAT_WORKERS") {
            Some(v) => parse_number(&v, "ANIMECAT_WORKERS")?,
            None => defaults.workers,
        };
        if workers == 0 {
            return Err(CatalogError::Config("ANIMECAT_WORKERS must be at least 1".into()));
        }

        Ok(Self {
            provider,
            kitsu_base_url: var("KITSU_BASE_URL").unwrap_or(defaults.kitsu_base_url),
            cinemeta_base_url: var("CINEMETA_BASE_URL").unwrap_or(defaults.cinemeta_base_url),
            lookup_timeout,
            workers,
            output_order,
            catalog_id: var("ANIMECAT_CATALOG_ID").unwrap_or(defaults.catalog_id),
            catalog_name: var("ANIMECAT_CATALOG_NAME").unwrap_or(defaults.catalog_name),
        })
    }

    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  ANIMECAT_PROVIDER: {:?}", self.provider);
        tracing::info!("  KITSU_BASE_URL: {}", self.kitsu_base_url);
        tracing::info!("  CINEMETA_BASE_URL: {}", self.cinemeta_base_url);
        tracing::info!("  ANIMECAT_LOOKUP_TIMEOUT_SECS: {}", self.lookup_timeout.as_secs());
        tracing::info!("  ANIMECAT_WORKERS: {}", self.workers);
        tracing::info!("  ANIMECAT_OUTPUT_ORDER: {:?}", self.output_order);
        tracing::info!("  ANIMECAT_CATALOG_ID: {}", self.catalog_id);
    }
}

fn parse_number<T: FromStr>(value: &str, key: &str) -> Result<T, CatalogError> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::Config(format!("{key} must be a number, got '{value}'")))
}
