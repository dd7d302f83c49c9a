use crowdsay_backend::{
    init_tracing,
    config::StoreConfig,
    routes::{app, AppState},
    store::PollStore,
};
use shuttle_runtime::{CustomError, SecretStore};
use tracing::info;

#[shuttle_runtime::main]
async fn rocket(
    #[shuttle_runtime::Secrets] secret_store: SecretStore,
) -> shuttle_rocket::ShuttleRocket {
    init_tracing();

    info!("🚀 Starting crowdsay poll server");

    let config = StoreConfig::from_lookup(|key| {
        secret_store.get(key).or_else(|| std::env::var(key).ok())
    })
    .map_err(CustomError::new)?;

    let store = PollStore::connect(&config)
        .await
        .map_err(CustomError::new)?;

    info!("📋 Poll store ready ({})", store.backend_name());

    Ok(app(AppState::new(store)).into())
}
