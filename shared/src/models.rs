use serde::{Serialize, Deserialize};
use std::collections::HashMap;

/// A question with a fixed set of options and the number of accepted votes per option.
///
/// `results` only ever holds keys that appear in `options`; an option nobody voted for
/// has no entry yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub results: HashMap<String, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteRequest {
    pub option: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollStats {
    pub total_votes: u64,
    pub votes: HashMap<String, u64>,
    pub percent: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResponse {
    pub poll: Poll,
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollListResponse {
    pub polls: Vec<Poll>,
    pub next: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub poll_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub votes: HashMap<String, u64>,
    pub percent: HashMap<String, f64>,
    pub total_votes: u64,
    pub next: Vec<String>,
}

impl Poll {
    pub fn new(id: i64, question: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id,
            question: question.into(),
            options,
            results: HashMap::new(),
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|opt| opt == option)
    }

    pub fn votes_for(&self, option: &str) -> u64 {
        self.results.get(option).copied().unwrap_or(0)
    }

    pub fn total_votes(&self) -> u64 {
        self.results.values().sum()
    }
}
