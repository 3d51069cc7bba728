use serde::{Deserialize, Serialize};

// --- Input ---

/// One entry scraped from the listing page.
///
/// `primary_title` is defaulted on deserialization so that a record missing it
/// is reported as malformed by the orchestrator instead of failing the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub primary_title: String,
    /// Original-script title (usually romaji/Japanese) when the site provides one.
    #[serde(default)]
    pub alternate_title: Option<String>,
    #[serde(default)]
    pub episode_label: String,
    #[serde(default)]
    pub fallback_image_url: Option<String>,
}

impl RawItem {
    pub fn new(primary_title: impl Into<String>) -> Self {
        Self {
            primary_title: primary_title.into(),
            ..Default::default()
        }
    }

    pub fn with_alternate(mut self, title: impl Into<String>) -> Self {
        self.alternate_title = Some(title.into());
        self
    }

    pub fn with_episode(mut self, label: impl Into<String>) -> Self {
        self.episode_label = label.into();
        self
    }

    pub fn with_fallback_image(mut self, url: impl Into<String>) -> Self {
        self.fallback_image_url = Some(url.into());
        self
    }

    /// A blank primary title cannot be searched or displayed.
    pub fn is_well_formed(&self) -> bool {
        !self.primary_title.trim().is_empty()
    }

    /// Alternate title, if present and not blank.
    pub fn alternate(&self) -> Option<&str> {
        self.alternate_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// --- Remote lookup outcome ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogMatch {
    /// Namespaced identifier in the external catalog, e.g. `kitsu:11` or `tt0112159`.
    pub canonical_id: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found(CatalogMatch),
    NotFound,
}

impl MatchResult {
    pub fn found(canonical_id: impl Into<String>, image_url: Option<String>) -> Self {
        MatchResult::Found(CatalogMatch {
            canonical_id: canonical_id.into(),
            image_url,
        })
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }
}

// --- Output ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Series,
    Movie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosterShape {
    Poster,
    Landscape,
    Square,
}

/// A resolved catalog entry, serialized in the Stremio "meta preview" shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRecord {
    #[serde(rename = "id")]
    pub canonical_id: String,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    #[serde(rename = "name")]
    pub title: String,
    #[serde(rename = "poster", skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    pub description: String,
    #[serde(rename = "posterShape")]
    pub poster_shape: PosterShape,
}

/// Description shown under the catalog tile.
pub fn episode_description(label: &str) -> String {
    let label = label.trim();
    if label.is_empty() {
        "Latest episode: ?".to_string()
    } else {
        format!("Latest episode: {label}")
    }
}
