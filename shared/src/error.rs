use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    #[error("Invalid input provided")]
    InvalidInput,
    #[error("Resource not found")]
    NotFound,
    #[error("Already voted")]
    AlreadyVoted,
    #[error("Invalid option")]
    InvalidOption,
    #[error("Internal system error")]
    SystemError,
}

impl ErrorCode {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCode::InvalidInput | ErrorCode::InvalidOption => 400,
            ErrorCode::AlreadyVoted => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::SystemError => 500,
        }
    }
}

/// Body of every failed API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
    #[serde(default)]
    pub next: Vec<String>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>, next: Vec<String>) -> Self {
        Self {
            error: error.into(),
            code,
            next,
        }
    }
}
