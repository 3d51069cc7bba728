pub mod error;
pub mod types;

pub use error::{KitsuError, Result};
pub use types::{AnimeAttributes, KitsuAnime, KitsuImageSet, SearchResponse};

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://kitsu.io/api/edge";

/// Kitsu speaks JSON:API and rejects plain `application/json` on some edges.
const JSON_API: &str = "application/vnd.api+json";

pub struct KitsuClient {
    client: reqwest::Client,
    base_url: String,
}

impl KitsuClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("animecat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full-text anime search. Returns the service's top hit, or `None` when
    /// the result set is empty.
    pub async fn search_anime(&self, query: &str) -> Result<Option<KitsuAnime>> {
        let url = format!("{}/anime", self.base_url);
        let resp = self
            .client
            .get(&url)
            .header("Accept", JSON_API)
            .query(&[("filter[text]", query), ("page[limit]", "1")])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(KitsuError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;
        let hit = parsed.data.into_iter().next();
        tracing::debug!(query, found = hit.is_some(), "Kitsu search complete");
        Ok(hit)
    }
}
