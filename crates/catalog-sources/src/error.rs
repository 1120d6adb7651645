use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or placeholder credential; fatal to every remote call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Non-success HTTP status, with the response body for diagnostics
    #[error("Catalog request failed: {status} {body}")]
    RemoteFetch { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, CatalogError::Configuration(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
