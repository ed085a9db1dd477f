//! Google Books metadata provider.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::google_books_types::{BookResult, SearchResult};
use super::{cancellable, ensure_not_cancelled, MetadataProvider};
use crate::book::{
    BookInfo, MetadataResult, RemoteImageInfo, RemoteSearchResult, GOOGLE_BOOKS_PROVIDER_ID,
};
use crate::config::{GoogleBooksConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RESULTS};
use crate::error::LookupError;
use crate::mapping::{to_metadata_result, to_remote_images, to_search_result, PROVIDER_NAME};
use crate::matcher::select_candidate;
use crate::parse::parse_name;
use crate::query::search_query;

/// Metadata provider for the Google Books volumes API.
///
/// Search hits `{base_url}/volumes?q=..&startIndex=0&maxResults=..` and detail
/// lookups hit `{base_url}/volumes/{id}`.
#[derive(Debug, Clone)]
pub struct GoogleBooksProvider {
    client: reqwest::Client,
    base_url: String,
    max_results: u32,
}

impl GoogleBooksProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn from_config(cfg: &GoogleBooksConfig) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &cfg.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            client: builder.build()?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            max_results: cfg.max_results,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Raw search-endpoint call.
    pub async fn search_volumes(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResult, LookupError> {
        let max_results = self.max_results.to_string();
        let request = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&[
                ("q", query),
                ("startIndex", "0"),
                ("maxResults", max_results.as_str()),
            ])
            .build()?;
        tracing::debug!(url = %request.url(), query, "Searching Google Books");
        self.get_json(request, cancel).await
    }

    /// Raw detail-endpoint call.
    pub async fn fetch_volume(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<BookResult, LookupError> {
        let mut request = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .build()?;
        // The id is opaque: pushed as one segment so '/', '?' and '#' are escaped.
        request
            .url_mut()
            .path_segments_mut()
            .map_err(|()| LookupError::InvalidBaseUrl(self.base_url.clone()))?
            .push(id);
        tracing::debug!(url = %request.url(), "Fetching Google Books volume");
        self.get_json(request, cancel).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
        cancel: &CancellationToken,
    ) -> Result<T, LookupError> {
        let client = &self.client;
        cancellable(cancel, async move {
            let response = client.execute(request).await?.error_for_status()?;
            Ok::<T, LookupError>(response.json::<T>().await?)
        })
        .await
    }
}

impl Default for GoogleBooksProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The lookup target after filename parsing has been merged in.
fn parsed_target(info: &BookInfo) -> BookInfo {
    let mut target = info.clone();
    target.apply_parsed(parse_name(&info.name));
    target
}

#[async_trait]
impl MetadataProvider for GoogleBooksProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn search(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteSearchResult>, LookupError> {
        ensure_not_cancelled(cancel)?;

        if let Some(id) = info.provider_id(GOOGLE_BOOKS_PROVIDER_ID) {
            let book = self.fetch_volume(id, cancel).await?;
            return Ok(book
                .volume_info
                .as_ref()
                .map(|v| to_search_result(id, v))
                .into_iter()
                .collect());
        }

        let target = parsed_target(info);
        let Some(query) = search_query(&target) else {
            tracing::debug!(name = %info.name, "Nothing to search for");
            return Ok(Vec::new());
        };
        let results = self.search_volumes(&query, cancel).await?;
        Ok(results
            .items
            .iter()
            .filter_map(|b| b.volume_info.as_ref().map(|v| to_search_result(&b.id, v)))
            .collect())
    }

    async fn resolve_id(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, LookupError> {
        ensure_not_cancelled(cancel)?;

        if let Some(id) = info.provider_id(GOOGLE_BOOKS_PROVIDER_ID) {
            return Ok(Some(id.to_string()));
        }

        let target = parsed_target(info);
        let Some(query) = search_query(&target) else {
            tracing::debug!(name = %info.name, "Nothing to search for");
            return Ok(None);
        };
        let results = self.search_volumes(&query, cancel).await?;
        let id = select_candidate(&results.items, &target).map(|c| c.id.clone());
        match &id {
            Some(id) => tracing::info!(%query, %id, "Identified Google Books volume"),
            None => tracing::debug!(
                %query,
                candidates = results.items.len(),
                "No matching Google Books volume"
            ),
        }
        Ok(id)
    }

    async fn get_metadata(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<MetadataResult, LookupError> {
        ensure_not_cancelled(cancel)?;

        let queried_by_id = info.provider_id(GOOGLE_BOOKS_PROVIDER_ID).is_some();
        let Some(id) = self.resolve_id(info, cancel).await? else {
            return Ok(MetadataResult::default());
        };

        let book = self.fetch_volume(&id, cancel).await?;
        if book.volume_info.is_none() {
            tracing::warn!(%id, "Google Books volume has no volume info");
            return Ok(MetadataResult::default());
        }

        let mut result = to_metadata_result(&book);
        if let Some(item) = result.item.as_mut() {
            if item.provider_id(GOOGLE_BOOKS_PROVIDER_ID).is_none() {
                item.set_provider_id(GOOGLE_BOOKS_PROVIDER_ID, id);
            }
        }
        result.queried_by_id = queried_by_id;
        Ok(result)
    }

    async fn get_images(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteImageInfo>, LookupError> {
        ensure_not_cancelled(cancel)?;

        let Some(id) = info.provider_id(GOOGLE_BOOKS_PROVIDER_ID) else {
            return Ok(Vec::new());
        };
        let book = self.fetch_volume(id, cancel).await?;
        Ok(book
            .volume_info
            .as_ref()
            .map(to_remote_images)
            .unwrap_or_default())
    }

    async fn get_image_response(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response, LookupError> {
        let request = self.client.get(url);
        cancellable(cancel, async move { Ok::<_, LookupError>(request.send().await?) }).await
    }
}
