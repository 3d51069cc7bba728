// Trait seams between the resolution core and its collaborators.
//
// MetadataSearch — the remote catalog search (Kitsu, Cinemeta, or a mock).
// ItemSource — whatever produced the scraped listing.
// CatalogSink — where the final records end up.
//
// Tests swap in MockSearch from `testing`, so nothing here touches the network.

use anyhow::Result;
use async_trait::async_trait;

use animecat_common::{MatchResult, RawItem, ResolvedRecord};
use cinemeta_client::CinemetaClient;
use kitsu_client::KitsuClient;

// ---------------------------------------------------------------------------
// MetadataSearch
// ---------------------------------------------------------------------------

#[async_trait]
pub trait MetadataSearch: Send + Sync {
    /// Free-text search. Only the service's first hit is ever considered.
    /// Transport and status failures are errors; an empty result set is
    /// `Ok(MatchResult::NotFound)`.
    async fn search(&self, query: &str) -> Result<MatchResult>;

    fn name(&self) -> &str;
}

#[async_trait]
impl MetadataSearch for KitsuClient {
    async fn search(&self, query: &str) -> Result<MatchResult> {
        Ok(match self.search_anime(query).await? {
            Some(anime) => MatchResult::found(
                format!("kitsu:{}", anime.id),
                anime.poster_url().map(String::from),
            ),
            None => MatchResult::NotFound,
        })
    }

    fn name(&self) -> &str {
        "kitsu"
    }
}

#[async_trait]
impl MetadataSearch for CinemetaClient {
    async fn search(&self, query: &str) -> Result<MatchResult> {
        Ok(match self.search_series(query).await? {
            Some(meta) => MatchResult::found(meta.id, meta.poster),
            None => MatchResult::NotFound,
        })
    }

    fn name(&self) -> &str {
        "cinemeta"
    }
}

// ---------------------------------------------------------------------------
// ItemSource / CatalogSink
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn items(&self) -> Result<Vec<RawItem>>;
}

#[async_trait]
pub trait CatalogSink: Send + Sync {
    async fn write(&self, records: &[ResolvedRecord]) -> Result<()>;
}
