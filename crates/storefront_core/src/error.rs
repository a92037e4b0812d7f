use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("catalog payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog load cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Transport failures and server-side statuses are worth another attempt;
    /// client statuses and malformed payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Transport(_) => true,
            CatalogError::Status { status } => *status >= 500,
            CatalogError::Decode(_) | CatalogError::Cancelled => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::Transport(_) => ErrorCode::Transport,
            CatalogError::Status { .. } => ErrorCode::Status,
            CatalogError::Decode(_) => ErrorCode::Decode,
            CatalogError::Cancelled => ErrorCode::Cancelled,
        }
    }
}

impl From<&CatalogError> for ApiError {
    fn from(value: &CatalogError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        ApiError::from(&value)
    }
}
