pub mod error;

pub use error::{CinemetaError, Result};

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://v3-cinemeta.strem.io";

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub metas: Vec<CinemetaMeta>,
}

/// One entry of a Cinemeta catalog. `id` is an IMDb identifier (`tt…`).
#[derive(Debug, Clone, Deserialize)]
pub struct CinemetaMeta {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

pub struct CinemetaClient {
    client: reqwest::Client,
    base_url: String,
}

impl CinemetaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search the "top series" catalog and return its first entry.
    pub async fn search_series(&self, query: &str) -> Result<Option<CinemetaMeta>> {
        let endpoint = format!("{}/catalog/series/top.json", self.base_url);

        let resp = self
            .client
            .get(&endpoint)
            .query(&[("search", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CinemetaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let catalog: CatalogResponse = serde_json::from_str(&body)?;
        Ok(catalog.metas.into_iter().next())
    }
}
