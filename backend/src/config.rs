use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown poll backend {0:?} (expected \"memory\" or \"redis\")")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Redis,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(BackendKind::Memory),
            "redis" => Ok(BackendKind::Redis),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: BackendKind,
    pub redis_addr: String,
    pub redis_password: Option<String>,
    pub redis_db: i64,
    pub key_prefix: String,
    pub redis_timeout: Duration,
    pub redis_retries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Redis,
            redis_addr: "127.0.0.1:6379".into(),
            redis_password: None,
            redis_db: 0,
            key_prefix: String::new(),
            redis_timeout: Duration::from_millis(500),
            redis_retries: 2,
        }
    }
}

impl StoreConfig {
    pub fn memory() -> Self {
        Self {
            backend: BackendKind::Memory,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads every setting through `lookup`, so secrets stores and the environment can be
    /// layered by the caller.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match var("POLL_BACKEND") {
            Some(name) => name.parse()?,
            None if var("ENV").as_deref() == Some("test") => BackendKind::Memory,
            None => defaults.backend,
        };

        let redis_addr = var("REDIS_ADDR").unwrap_or_else(|| {
            if backend == BackendKind::Redis {
                info!("REDIS_ADDR not set, using default: {}", defaults.redis_addr);
            }
            defaults.redis_addr.clone()
        });

        Ok(Self {
            backend,
            redis_addr,
            redis_password: var("REDIS_PASSWORD"),
            redis_db: try_load(var("REDIS_DB"), "REDIS_DB", defaults.redis_db),
            key_prefix: var("REDIS_KEY_PREFIX").unwrap_or_default(),
            redis_timeout: Duration::from_millis(try_load(
                var("REDIS_TIMEOUT_MS"),
                "REDIS_TIMEOUT_MS",
                defaults.redis_timeout.as_millis() as u64,
            )),
            redis_retries: try_load(var("REDIS_RETRIES"), "REDIS_RETRIES", defaults.redis_retries),
        })
    }
}

fn try_load<T>(value: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = value else { return default };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
