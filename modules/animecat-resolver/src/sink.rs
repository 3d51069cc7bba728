use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use animecat_common::{CatalogError, Config, ResolvedRecord};

use crate::traits::CatalogSink;

// --- Stremio addon manifest ---

#[derive(Debug, Clone, Serialize)]
pub struct AddonManifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub resources: Vec<String>,
    pub types: Vec<String>,
    pub catalogs: Vec<CatalogDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogDescriptor {
    #[serde(rename = "type")]
    pub catalog_type: String,
    pub id: String,
    pub name: String,
    pub extra: Vec<CatalogExtra>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogExtra {
    pub name: String,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
}

impl AddonManifest {
    /// Catalog-only addon. Records carry standard catalog IDs, so Stremio
    /// resolves full metadata and streams through other addons.
    pub fn catalog_only(catalog_id: &str, catalog_name: &str) -> Self {
        Self {
            id: format!("community.{}", catalog_id.replace('_', ".")),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: catalog_name.to_string(),
            description: "Latest episodes from the listing page, matched to catalog IDs."
                .to_string(),
            resources: vec!["catalog".to_string()],
            types: vec!["series".to_string()],
            catalogs: vec![CatalogDescriptor {
                catalog_type: "series".to_string(),
                id: catalog_id.to_string(),
                name: catalog_name.to_string(),
                extra: vec![CatalogExtra {
                    name: "search".to_string(),
                    is_required: false,
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct CatalogFile<'a> {
    metas: &'a [ResolvedRecord],
}

// --- Sink ---

/// Writes `manifest.json` and `catalog/series/<catalog_id>.json` under `out_dir`.
pub struct StremioCatalogSink {
    out_dir: PathBuf,
    catalog_id: String,
    manifest: AddonManifest,
}

impl StremioCatalogSink {
    pub fn new(out_dir: impl Into<PathBuf>, manifest: AddonManifest) -> Self {
        let catalog_id = manifest
            .catalogs
            .first()
            .map(|c| c.id.clone())
            .unwrap_or_else(|| manifest.id.clone());
        Self {
            out_dir: out_dir.into(),
            catalog_id,
            manifest,
        }
    }

    pub fn from_config(out_dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self::new(
            out_dir,
            AddonManifest::catalog_only(&config.catalog_id, &config.catalog_name),
        )
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.out_dir
            .join("catalog")
            .join("series")
            .join(format!("{}.json", self.catalog_id))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.out_dir.join("manifest.json")
    }

    async fn persist(&self, records: &[ResolvedRecord]) -> Result<(), CatalogError> {
        let catalog_path = self.catalog_path();
        if let Some(parent) = catalog_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let catalog = serde_json::to_string_pretty(&CatalogFile { metas: records })?;
        write_file(&catalog_path, catalog).await?;

        let manifest = serde_json::to_string_pretty(&self.manifest)?;
        write_file(&self.manifest_path(), manifest).await?;

        tracing::info!(
            path = %catalog_path.display(),
            count = records.len(),
            "Catalog written"
        );
        Ok(())
    }
}

async fn write_file(path: &Path, contents: String) -> Result<(), CatalogError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| CatalogError::Sink(format!("{}: {e}", path.display())))
}

#[async_trait]
impl CatalogSink for StremioCatalogSink {
    async fn write(&self, records: &[ResolvedRecord]) -> Result<()> {
        Ok(self.persist(records).await?)
    }
}
