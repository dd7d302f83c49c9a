use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use shared::models::Poll;
use tracing::error;

use crate::store::{PollBackend, StoreError, StoreResult, VoteOutcome};

#[derive(Debug)]
struct PollSlot {
    poll: Poll,
    voters: HashSet<String>,
}

/// Process-local backend. Each poll sits behind its own mutex together with the set of
/// addresses that voted on it, so a vote only contends with votes on the same poll.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    id_seq: AtomicI64,
    polls: RwLock<HashMap<i64, Arc<Mutex<PollSlot>>>>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    error!("Failed to acquire poll store lock: {}", e);
    StoreError::Backend("poll store lock poisoned".into())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: i64) -> StoreResult<Option<Arc<Mutex<PollSlot>>>> {
        let polls = self.polls.read().map_err(poisoned)?;
        Ok(polls.get(&id).cloned())
    }
}

#[rocket::async_trait]
impl PollBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn next_id(&self) -> StoreResult<i64> {
        Ok(self.id_seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()> {
        let slot = PollSlot {
            poll: poll.clone(),
            voters: HashSet::new(),
        };
        let mut polls = self.polls.write().map_err(poisoned)?;
        polls.insert(poll.id, Arc::new(Mutex::new(slot)));
        Ok(())
    }

    async fn load_poll(&self, id: i64) -> StoreResult<Option<Poll>> {
        let Some(slot) = self.slot(id)? else { return Ok(None) };
        let slot = slot.lock().map_err(poisoned)?;
        Ok(Some(slot.poll.clone()))
    }

    async fn load_polls(&self) -> StoreResult<Vec<Poll>> {
        let slots: Vec<_> = {
            let polls = self.polls.read().map_err(poisoned)?;
            polls.values().cloned().collect()
        };

        let mut all = Vec::with_capacity(slots.len());
        for slot in slots {
            all.push(slot.lock().map_err(poisoned)?.poll.clone());
        }
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn has_voted(&self, poll_id: i64, voter: &str) -> StoreResult<bool> {
        let Some(slot) = self.slot(poll_id)? else { return Ok(false) };
        let slot = slot.lock().map_err(poisoned)?;
        Ok(slot.voters.contains(voter))
    }

    async fn record_vote(&self, poll_id: i64, option: &str, voter: &str) -> StoreResult<VoteOutcome> {
        let Some(slot) = self.slot(poll_id)? else { return Ok(VoteOutcome::PollMissing) };
        let mut slot = slot.lock().map_err(poisoned)?;

        if slot.voters.contains(voter) {
            return Ok(VoteOutcome::AlreadyVoted);
        }
        if !slot.poll.has_option(option) {
            return Ok(VoteOutcome::InvalidOption);
        }

        slot.voters.insert(voter.to_string());
        *slot.poll.results.entry(option.to_string()).or_insert(0) += 1;
        Ok(VoteOutcome::Recorded)
    }
}
