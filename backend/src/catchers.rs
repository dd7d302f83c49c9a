use rocket::{Request, catch, serde::json::Json};
use shared::error::{ErrorCode, ErrorResponse};

use crate::utils::links;

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        ErrorCode::InvalidInput,
        "Invalid request parameters.",
        vec![links::list()],
    ))
}

#[catch(403)]
pub fn forbidden(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        ErrorCode::AlreadyVoted,
        "Access forbidden. You may have already voted on this poll.",
        vec![links::list()],
    ))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        ErrorCode::NotFound,
        "The requested resource was not found.",
        vec![links::list()],
    ))
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> Json<ErrorResponse> {
    let next = match req.uri().path().as_str() {
        "/polls/create" => links::create(),
        _ => links::list(),
    };

    Json(ErrorResponse::new(
        ErrorCode::InvalidInput,
        "Malformed JSON body.",
        vec![next],
    ))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        ErrorCode::SystemError,
        "An internal server error occurred.",
        vec![links::list()],
    ))
}
