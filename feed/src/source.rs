//! Rate source trait and implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{FeedError, FeedResult};
use crate::record::FeedResponse;

/// Trait for upstream rate feeds.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Get the source name.
    fn name(&self) -> &str;

    /// Fetch the current feed document.
    async fn fetch(&self) -> FeedResult<FeedResponse>;
}

/// Reads a feed document from a JSON file on every fetch.
pub struct FileRateSource {
    name: String,
    path: PathBuf,
}

impl FileRateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RateSource for FileRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> FeedResult<FeedResponse> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;

        let response = FeedResponse::from_slice(&bytes)?;
        debug!(path = %self.path.display(), items = response.items.len(), "Read rate feed");
        Ok(response)
    }
}

/// Mock rate source for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockRateSource {
    name: String,
    response: parking_lot::RwLock<Option<FeedResponse>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockRateSource {
    /// Create a source with nothing to serve.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: parking_lot::RwLock::new(None),
        }
    }

    /// Set the document served by subsequent fetches.
    pub fn set_response(&self, response: FeedResponse) {
        *self.response.write() = Some(response);
    }

    /// Make subsequent fetches fail.
    pub fn fail(&self) {
        *self.response.write() = None;
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl RateSource for MockRateSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> FeedResult<FeedResponse> {
        self.response
            .read()
            .clone()
            .ok_or_else(|| FeedError::SourceUnavailable(self.name.clone()))
    }
}
