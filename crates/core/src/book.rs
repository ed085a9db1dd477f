use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::parse::ParsedName;

/// Provider-id key under which Google Books volume ids are stored.
pub const GOOGLE_BOOKS_PROVIDER_ID: &str = "GoogleBooks";

/// What the host knows about a book file before lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookInfo {
    pub name: String,
    pub series_name: Option<String>,
    pub index_number: Option<u32>,
    pub year: Option<i32>,
    #[serde(default)]
    pub provider_ids: BTreeMap<String, String>,
}

impl BookInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build from a file path, using the file stem as the raw name.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let stem = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        Self::new(stem)
    }

    pub fn with_series(mut self, series_name: impl Into<String>) -> Self {
        self.series_name = Some(series_name.into());
        self
    }

    pub fn with_provider_id(mut self, provider: &str, id: impl Into<String>) -> Self {
        self.provider_ids.insert(provider.to_string(), id.into());
        self
    }

    pub fn provider_id(&self, provider: &str) -> Option<&str> {
        self.provider_ids
            .get(provider)
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }

    /// Merge a parse result into this record.
    ///
    /// The name is always replaced, even by an empty one. Series, index and
    /// year keep the caller-supplied value when the parse did not capture one,
    /// so context from a parent folder survives.
    pub fn apply_parsed(&mut self, parsed: ParsedName) {
        self.name = parsed.name;
        if parsed.series_name.is_some() {
            self.series_name = parsed.series_name;
        }
        if parsed.index.is_some() {
            self.index_number = parsed.index;
        }
        if parsed.year.is_some() {
            self.year = parsed.year;
        }
    }
}

/// The host's book entity as filled in by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub name: Option<String>,
    pub overview: Option<String>,
    pub production_year: Option<i32>,
    pub studios: Vec<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    /// 0-10 scale.
    pub community_rating: Option<f32>,
    pub provider_ids: BTreeMap<String, String>,
}

impl Book {
    pub fn set_provider_id(&mut self, provider: &str, id: impl Into<String>) {
        self.provider_ids.insert(provider.to_string(), id.into());
    }

    pub fn provider_id(&self, provider: &str) -> Option<&str> {
        self.provider_ids.get(provider).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonKind {
    Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    pub name: String,
    pub kind: PersonKind,
}

/// Outcome of a metadata fetch. `has_metadata == false` means nothing usable
/// was found; that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataResult {
    pub item: Option<Book>,
    pub people: Vec<PersonInfo>,
    pub result_language: Option<String>,
    pub has_metadata: bool,
    pub queried_by_id: bool,
}

impl MetadataResult {
    pub fn add_person(&mut self, person: PersonInfo) {
        self.people.push(person);
    }
}

/// One row of a candidate list shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSearchResult {
    pub name: String,
    pub overview: Option<String>,
    pub production_year: Option<i32>,
    pub image_url: Option<String>,
    pub provider_ids: BTreeMap<String, String>,
    pub search_provider_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageType {
    Primary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteImageInfo {
    pub provider_name: String,
    pub url: String,
    pub image_type: ImageType,
}
