use crate::error::ApiError;

pub fn parse_poll_id(id: &str) -> Result<i64, ApiError> {
    id.trim().parse::<i64>().map_err(|_| ApiError::InvalidId)
}

/// Follow-up requests suggested in every response.
pub mod links {
    pub fn list() -> String {
        "GET /polls".into()
    }

    pub fn create() -> String {
        "POST /polls/create".into()
    }

    pub fn poll(id: i64) -> String {
        format!("GET /polls/{id}")
    }

    pub fn vote(id: i64) -> String {
        format!("POST /polls/{id}/vote")
    }

    pub fn stats(id: i64) -> String {
        format!("GET /polls/{id}/stats")
    }
}
