pub mod catchers;
pub mod config;
pub mod database;
pub mod error;
pub mod memory;
pub mod processor;
pub mod routes;
pub mod store;
pub mod utils;
pub use shared::user_info;
pub use shared::{models::*, error::*, user_info::*};
pub use store::{PollStore, StoreError};

use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the fmt subscriber filtered by `RUST_LOG` (default `info`).
/// Returns false when a global subscriber was already set.
pub fn init_tracing() -> bool {
    match fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            warn!("Keeping the existing tracing subscriber: {}", e);
            false
        }
    }
}
