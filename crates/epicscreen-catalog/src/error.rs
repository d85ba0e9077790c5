use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TMDB API key is not configured (set tmdb.api_key or TMDB_API_KEY)")]
    MissingApiKey,

    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// True for a 404 from the catalog (unknown movie id)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status { status: 404, .. })
    }
}
