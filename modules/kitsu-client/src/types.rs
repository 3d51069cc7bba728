use serde::Deserialize;

/// JSON:API envelope returned by `/anime` collection endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<KitsuAnime>,
}

/// A single anime resource. Only the fields the catalog needs are mapped.
#[derive(Debug, Clone, Deserialize)]
pub struct KitsuAnime {
    pub id: String,
    pub attributes: AnimeAttributes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimeAttributes {
    #[serde(rename = "canonicalTitle")]
    pub canonical_title: Option<String>,
    #[serde(rename = "posterImage")]
    pub poster_image: Option<KitsuImageSet>,
    pub subtype: Option<String>,
}

/// Poster URLs keyed by size. Kitsu omits sizes it has not generated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitsuImageSet {
    pub tiny: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub original: Option<String>,
}

impl KitsuImageSet {
    /// Largest poster that is still a resized rendition, falling back to the
    /// original upload and then to the thumbnails.
    pub fn best(&self) -> Option<&str> {
        [
            &self.large,
            &self.medium,
            &self.original,
            &self.small,
            &self.tiny,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .find(|url| !url.trim().is_empty())
    }
}

impl KitsuAnime {
    pub fn poster_url(&self) -> Option<&str> {
        self.attributes.poster_image.as_ref()?.best()
    }
}
