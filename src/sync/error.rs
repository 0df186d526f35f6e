use thiserror::Error;

use crate::core::document::Collection;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP client build failed: {0}")]
    Client(String),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<reqwest::Error>,
    },

    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },

    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl StoreError {
    pub(crate) fn request(url: &str, source: reqwest::Error) -> Self {
        StoreError::Request {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

/// Reasons an upload or clear stops before it starts or part way through
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Please load a JSON file first!")]
    NoDocument,

    #[error("{0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("a remote {} record has no id", .0.name())]
    MissingId(Collection),

    #[error("the sync job stopped unexpectedly")]
    Interrupted,
}
