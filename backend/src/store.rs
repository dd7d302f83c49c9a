//! Poll storage and voting consistency.
//!
//! [`PollStore`] is the only way the rest of the service touches polls. It is built once at
//! startup around a [`PollBackend`] and shared through Rocket managed state. Backends own the
//! atomicity of a vote: the memory backend locks one poll at a time, the redis backend runs
//! the whole check-and-increment as a single server-side script.
use std::sync::Arc;

use shared::models::{CreatePollRequest, Poll, PollStats};
use shared::validation::{validate_poll_request, ValidationError};
use tracing::{debug, info, instrument, warn};

use crate::config::{BackendKind, StoreConfig};
use crate::database::RedisBackend;
use crate::memory::MemoryBackend;
use crate::processor::PollProcessor;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("poll not found")]
    NotFound(i64),
    #[error("already voted from this IP")]
    AlreadyVoted,
    #[error("invalid option")]
    InvalidOption(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Backend(format!("serialization: {e}"))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of the atomic vote step, decided by the backend in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded,
    PollMissing,
    AlreadyVoted,
    InvalidOption,
}

/// Storage capabilities the store is built on.
///
/// `record_vote` must be atomic per poll: load, marker check, option check, marker write and
/// result increment happen as one step, and a rejected vote leaves no trace.
#[rocket::async_trait]
pub trait PollBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn next_id(&self) -> StoreResult<i64>;

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()>;

    async fn load_poll(&self, id: i64) -> StoreResult<Option<Poll>>;

    /// All polls, ascending by id.
    async fn load_polls(&self) -> StoreResult<Vec<Poll>>;

    async fn has_voted(&self, poll_id: i64, voter: &str) -> StoreResult<bool>;

    async fn record_vote(&self, poll_id: i64, option: &str, voter: &str) -> StoreResult<VoteOutcome>;
}

#[derive(Clone)]
pub struct PollStore {
    backend: Arc<dyn PollBackend>,
}

impl std::fmt::Debug for PollStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl PollStore {
    pub fn new(backend: impl PollBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Builds the store for the configured backend. Redis connections are established here so
    /// a bad address fails startup instead of the first request.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        match config.backend {
            BackendKind::Memory => {
                info!("Using in-memory poll store");
                Ok(Self::in_memory())
            }
            BackendKind::Redis => {
                let backend = RedisBackend::connect(config).await?;
                info!("Using redis poll store at {}", config.redis_addr);
                Ok(Self::new(backend))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    #[instrument(skip(self, options), fields(options = options.len()))]
    pub async fn create(&self, question: &str, options: &[String]) -> StoreResult<Poll> {
        let request = CreatePollRequest {
            question: question.to_string(),
            options: options.to_vec(),
        };
        let (question, options) = validate_poll_request(&request)?;

        let id = self.backend.next_id().await?;
        let poll = Poll::new(id, question, options);
        self.backend.insert_poll(&poll).await?;

        info!(poll_id = id, "Created poll");
        Ok(poll)
    }

    pub async fn get(&self, id: i64) -> StoreResult<Poll> {
        self.backend
            .load_poll(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn list(&self) -> StoreResult<Vec<Poll>> {
        self.backend.load_polls().await
    }

    #[instrument(skip(self, voter))]
    pub async fn vote(&self, poll_id: i64, option: &str, voter: &str) -> StoreResult<()> {
        match self.backend.record_vote(poll_id, option, voter).await? {
            VoteOutcome::Recorded => {
                debug!("Vote recorded");
                Ok(())
            }
            VoteOutcome::PollMissing => Err(StoreError::NotFound(poll_id)),
            VoteOutcome::AlreadyVoted => {
                warn!("Duplicate vote rejected");
                Err(StoreError::AlreadyVoted)
            }
            VoteOutcome::InvalidOption => Err(StoreError::InvalidOption(option.to_string())),
        }
    }

    pub async fn has_voted(&self, poll_id: i64, voter: &str) -> StoreResult<bool> {
        self.backend.has_voted(poll_id, voter).await
    }

    pub async fn stats(&self, poll_id: i64) -> StoreResult<(Poll, PollStats)> {
        let poll = self.get(poll_id).await?;
        let stats = PollProcessor::calculate_stats(&poll);
        Ok((poll, stats))
    }
}
