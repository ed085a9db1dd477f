//! Metadata lookup via pluggable providers.

pub mod google_books;
pub mod google_books_types;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::book::{BookInfo, MetadataResult, RemoteImageInfo, RemoteSearchResult};
use crate::error::LookupError;

pub use google_books::GoogleBooksProvider;

/// A remote catalog that can identify a book and describe it.
///
/// Every operation checks the cancellation token on entry and before each
/// remote call. Nothing found is `Ok` with an empty value, never an error.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Candidate list for a book, for manual identification.
    async fn search(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteSearchResult>, LookupError>;

    /// The provider's id for a book, searching and disambiguating if the
    /// book does not already carry one.
    async fn resolve_id(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, LookupError>;

    async fn get_metadata(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<MetadataResult, LookupError>;

    /// Images for a book that already carries this provider's id.
    async fn get_images(
        &self,
        info: &BookInfo,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteImageInfo>, LookupError>;

    /// Raw response for an image URL. The status is not inspected.
    async fn get_image_response(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<reqwest::Response, LookupError>;
}

pub(crate) fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), LookupError> {
    if cancel.is_cancelled() {
        Err(LookupError::Cancelled)
    } else {
        Ok(())
    }
}

/// Run a request future, abandoning it as soon as the token fires.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, LookupError>
where
    F: std::future::Future<Output = Result<T, LookupError>>,
{
    ensure_not_cancelled(cancel)?;
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LookupError::Cancelled),
        result = fut => result,
    }
}
