use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::error::{ErrorCode, ErrorResponse};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::utils::links;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid poll id")]
    InvalidId,
    #[error("{source}")]
    Store { source: StoreError, next: Vec<String> },
}

impl ApiError {
    pub fn store(source: StoreError, next: Vec<String>) -> Self {
        ApiError::Store { source, next }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidId => ErrorCode::InvalidInput,
            ApiError::Store { source, .. } => match source {
                StoreError::Validation(_) => ErrorCode::InvalidInput,
                StoreError::NotFound(_) => ErrorCode::NotFound,
                StoreError::AlreadyVoted => ErrorCode::AlreadyVoted,
                StoreError::InvalidOption(_) => ErrorCode::InvalidOption,
                StoreError::Backend(_) => ErrorCode::SystemError,
            },
        }
    }

    fn next(&self) -> Vec<String> {
        match self {
            ApiError::InvalidId => vec![links::list()],
            ApiError::Store { next, .. } => next.clone(),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let status = Status::from_code(code.status_code()).unwrap_or(Status::InternalServerError);

        // Storage details stay in the logs.
        let message = match &self {
            ApiError::Store { source: StoreError::Backend(details), .. } => {
                error!("Storage failure while serving {}: {}", req.uri(), details);
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse::new(code, message, self.next());
        rocket::Response::build_from(Json(body).respond_to(req)?)
            .status(status)
            .ok()
    }
}
