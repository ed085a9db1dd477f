//! Google Books API response types for deserialization.
//!
//! These mirror the JSON returned by the `volumes` endpoints. Every field the
//! API may omit is optional or defaulted so partial records still parse.

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope returned by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_items: u64,
    /// Absent entirely when nothing matched.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<BookResult>,
}

/// A single volume, as found in search items or returned by the detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    pub published_date: Option<String>,
    pub image_links: Option<ImageLinks>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    /// 0-5 scale.
    pub average_rating: Option<f32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    pub language: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

impl ImageLinks {
    /// All present links, largest first.
    pub fn largest_first(&self) -> impl Iterator<Item = &str> {
        [
            &self.extra_large,
            &self.large,
            &self.medium,
            &self.small,
            &self.thumbnail,
            &self.small_thumbnail,
        ]
        .into_iter()
        .filter_map(|link| link.as_deref())
        .filter(|link| !link.is_empty())
    }
}
