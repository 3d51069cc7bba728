use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;

use animecat_common::{CatalogError, RawItem};

use crate::traits::ItemSource;

/// Reads a scraped listing that the page fetcher dumped as a JSON array of
/// [`RawItem`]s.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<RawItem>, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::Source(format!("{}: {e}", self.path.display())))?;
        let items: Vec<RawItem> = serde_json::from_str(&raw)?;
        tracing::info!(path = %self.path.display(), count = items.len(), "Loaded scraped items");
        Ok(items)
    }
}

#[async_trait]
impl ItemSource for JsonFileSource {
    async fn items(&self) -> Result<Vec<RawItem>> {
        Ok(self.load().await?)
    }
}
