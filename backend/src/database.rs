//! # Redis
//!
//! Networked backend for production.
//!
//! ## Layout
//!
//! - `{prefix}poll:id:seq`: counter, `INCR` hands out poll ids
//! - `{prefix}poll:{id}`: poll as a JSON blob, results included
//! - `{prefix}polls:index`: sorted set of every poll id (score = id), used for listing
//! - `{prefix}vote:{id}:{ip}`: vote marker, value `"1"`, written once
//!
//! ## Atomicity
//!
//! Plain `GET`/`SET` on the blob would lose increments between two servers, so a vote runs
//! as one Lua script. Redis executes scripts without interleaving other commands, which
//! makes the marker check, option check, marker write and result increment a single step
//! across every process sharing the database.
use redis::{
    AsyncCommands, Client, Script,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use shared::models::Poll;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::store::{PollBackend, StoreError, StoreResult, VoteOutcome};

/// KEYS[1] poll blob, KEYS[2] vote marker, ARGV[1] option.
/// Returns 1 recorded, 0 poll missing, -1 already voted, -2 invalid option.
const VOTE_SCRIPT: &str = r#"
local raw = redis.call('GET', KEYS[1])
if not raw then
    return 0
end
if redis.call('EXISTS', KEYS[2]) == 1 then
    return -1
end
local poll = cjson.decode(raw)
local valid = false
for _, opt in ipairs(poll.options) do
    if opt == ARGV[1] then
        valid = true
        break
    end
end
if not valid then
    return -2
end
if type(poll.results) ~= 'table' then
    poll.results = {}
end
poll.results[ARGV[1]] = (tonumber(poll.results[ARGV[1]]) or 0) + 1
redis.call('SET', KEYS[2], '1')
redis.call('SET', KEYS[1], cjson.encode(poll))
return 1
"#;

pub fn redis_url(config: &StoreConfig) -> String {
    match &config.redis_password {
        Some(password) => format!("redis://:{}@{}/{}", password, config.redis_addr, config.redis_db),
        None => format!("redis://{}/{}", config.redis_addr, config.redis_db),
    }
}

pub async fn init_redis(config: &StoreConfig) -> StoreResult<ConnectionManager> {
    let manager_config = ConnectionManagerConfig::new()
        .set_number_of_retries(config.redis_retries)
        .set_connection_timeout(config.redis_timeout)
        .set_response_timeout(config.redis_timeout);

    let client = Client::open(redis_url(config))?;
    let connection_manager = client
        .get_connection_manager_with_config(manager_config)
        .await?;

    Ok(connection_manager)
}

pub struct RedisBackend {
    connection: ConnectionManager,
    prefix: String,
    vote_script: Script,
}

impl RedisBackend {
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let connection = init_redis(config).await?;
        Ok(Self::with_connection(connection, config.key_prefix.clone()))
    }

    pub fn with_connection(connection: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            connection,
            prefix: prefix.into(),
            vote_script: Script::new(VOTE_SCRIPT),
        }
    }

    fn seq_key(&self) -> String {
        format!("{}poll:id:seq", self.prefix)
    }

    fn index_key(&self) -> String {
        format!("{}polls:index", self.prefix)
    }

    fn poll_key(&self, id: i64) -> String {
        format!("{}poll:{}", self.prefix, id)
    }

    fn vote_key(&self, poll_id: i64, voter: &str) -> String {
        format!("{}vote:{}:{}", self.prefix, poll_id, voter)
    }
}

fn decode_poll(raw: &str) -> StoreResult<Poll> {
    Ok(serde_json::from_str(raw)?)
}

#[rocket::async_trait]
impl PollBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn next_id(&self) -> StoreResult<i64> {
        let mut conn = self.connection.clone();
        let id: i64 = conn.incr(self.seq_key(), 1).await?;
        Ok(id)
    }

    async fn insert_poll(&self, poll: &Poll) -> StoreResult<()> {
        let data = serde_json::to_string(poll)?;
        let mut conn = self.connection.clone();

        let (): () = redis::pipe()
            .atomic()
            .set(self.poll_key(poll.id), data)
            .ignore()
            .zadd(self.index_key(), poll.id, poll.id)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    async fn load_poll(&self, id: i64) -> StoreResult<Option<Poll>> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(self.poll_key(id)).await?;
        raw.as_deref().map(decode_poll).transpose()
    }

    async fn load_polls(&self) -> StoreResult<Vec<Poll>> {
        let mut conn = self.connection.clone();
        let ids: Vec<i64> = conn.zrange(self.index_key(), 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| self.poll_key(*id)).collect();
        let blobs: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut polls = Vec::with_capacity(blobs.len());
        for (key, blob) in keys.iter().zip(blobs) {
            match blob {
                Some(raw) => polls.push(decode_poll(&raw)?),
                None => warn!("Indexed poll {} has no data", key),
            }
        }
        Ok(polls)
    }

    async fn has_voted(&self, poll_id: i64, voter: &str) -> StoreResult<bool> {
        let mut conn = self.connection.clone();
        let voted: bool = conn.exists(self.vote_key(poll_id, voter)).await?;
        Ok(voted)
    }

    async fn record_vote(&self, poll_id: i64, option: &str, voter: &str) -> StoreResult<VoteOutcome> {
        let mut conn = self.connection.clone();
        let code: i64 = self
            .vote_script
            .key(self.poll_key(poll_id))
            .key(self.vote_key(poll_id, voter))
            .arg(option)
            .invoke_async(&mut conn)
            .await?;

        debug!(poll_id, code, "Vote script finished");
        match code {
            1 => Ok(VoteOutcome::Recorded),
            0 => Ok(VoteOutcome::PollMissing),
            -1 => Ok(VoteOutcome::AlreadyVoted),
            -2 => Ok(VoteOutcome::InvalidOption),
            other => Err(StoreError::Backend(format!("unexpected vote script result {other}"))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_password_and_db() {
        let config = StoreConfig {
            redis_addr: "cache:6380".into(),
            redis_password: Some("hunter2".into()),
            redis_db: 4,
            ..StoreConfig::default()
        };
        assert_eq!(redis_url(&config), "redis://:hunter2@cache:6380/4");
    }

    #[test]
    fn url_without_password() {
        assert_eq!(redis_url(&StoreConfig::default()), "redis://127.0.0.1:6379/0");
    }
}
