//! Failures at the fetch boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response arrived but is empty or not the expected JSON.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The backend answered `{"error": "..."}`; shown to the user verbatim.
    #[error("{0}")]
    Backend(String),

    /// Non-success status without an error message in the body.
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Malformed(_) => "malformed",
            Self::Backend(_) => "backend",
            Self::Status(_) => "status",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }

    /// Text shown inline on the screen.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
