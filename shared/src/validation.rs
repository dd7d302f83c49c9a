use std::collections::HashSet;
use crate::models::CreatePollRequest;

pub const MIN_OPTIONS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Too few options (minimum {MIN_OPTIONS})")]
    TooFewOptions,
    #[error("Duplicate option: {0}")]
    DuplicateOption(String),
}

/// Checks a creation request and returns the question and options to store.
///
/// Text is kept byte-for-byte; votes match options exactly.
pub fn validate_poll_request(request: &CreatePollRequest) -> Result<(String, Vec<String>), ValidationError> {
    if request.options.len() < MIN_OPTIONS { return Err(ValidationError::TooFewOptions); }

    let mut seen = HashSet::with_capacity(request.options.len());
    if let Some(duplicate) = request.options.iter().find(|opt| !seen.insert(opt.as_str())) {
        return Err(ValidationError::DuplicateOption(duplicate.clone()));
    }

    Ok((request.question.clone(), request.options.clone()))
}
