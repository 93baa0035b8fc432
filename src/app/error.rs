use thiserror::Error;

/// Remediation text shown when no usable API key is configured.
pub const API_KEY_HELP: &str = "API key not configured

To read the Bible you need to:
1. Go to https://scripture.api.bible
2. Create a free account
3. Obtain an API key
4. Set `api_key` under [api] in ~/.config/biblia/config.toml (or pass --api-key)";

#[derive(Error, Debug)]
pub enum BibliaError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to decode response: {0}")]
    Decoding(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{}", API_KEY_HELP)]
    ApiKeyNotConfigured,

    #[error("API key is invalid or unauthorized")]
    Unauthorized,

    #[error("Access forbidden - check your API key")]
    Forbidden,

    #[error("Resource not found in the API")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load books: {0}")]
    BooksUnavailable(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BibliaError>;
