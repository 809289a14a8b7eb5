// Error types for the octodash service.
// Upstream HTTP failures carry their status code so the handler can mirror it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("GitHub API error: HTTP {status}")]
    Upstream { status: u16 },

    #[error("upstream request timed out")]
    Timeout,

    #[error("GitHub API error: {0}")]
    Api(reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else {
            AppError::Api(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
