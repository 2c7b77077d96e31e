// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The page environment is gone (tab closed, snapshot missing, navigated away).
    #[error("page unavailable: {0}")]
    PageUnavailable(String),

    #[error("invalid selector `{0}`")]
    InvalidSelector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("capture failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<ScrapeError>,
    },
}

impl ScrapeError {
    /// Environment failures are the ones worth retrying or silencing while polling.
    pub fn is_environment(&self) -> bool {
        matches!(self, ScrapeError::PageUnavailable(_) | ScrapeError::Io(_))
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Http(err.to_string())
    }
}
