use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed for {url}: unexpected HTTP status {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("invalid Accept-Language header value {value:?}")]
    InvalidAcceptLanguage { value: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
