use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not reach {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("text extraction failed for {url}: {reason}")]
    ExtractionFailure { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<mailsift_core::CoreError> for ScraperError {
    fn from(err: mailsift_core::CoreError) -> Self {
        match err {
            mailsift_core::CoreError::InvalidInput(msg) => ScraperError::InvalidInput(msg),
        }
    }
}
