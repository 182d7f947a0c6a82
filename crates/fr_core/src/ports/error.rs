use thiserror::Error;

/// Failure reported by a persistence backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Failure reported by a scraping or geo adapter. "Not found" is not an
/// error: adapters return `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScraperError {
    #[error("Request to {source_name} failed: {message}")]
    Request { source_name: String, message: String },

    #[error("Unexpected payload from {source_name}: {message}")]
    Payload { source_name: String, message: String },
}
