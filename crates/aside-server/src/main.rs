//! Aside Server binary.

use std::sync::Arc;

use anyhow::Context;
use aside_backends::{PostgresUserStore, RedisUserCache};
use aside_core::{UserCache, UserService, UserStore};
use aside_server::metrics::{MeteredCache, init_metrics};
use aside_server::{AppState, BackendMode, Settings, run_server_with_state};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.server.addr()?;

    tracing::info!("Starting Aside Server v{}", env!("CARGO_PKG_VERSION"));

    let prometheus = init_metrics().context("failed to install metrics recorder")?;

    let state = match settings.backend {
        BackendMode::Live => AppState::new(connect_live(&settings).await?),
        BackendMode::Memory => {
            tracing::warn!("Using in-memory backends, data will not survive a restart");
            AppState::in_memory(settings.cache)
        },
    };

    let policy = state.users().policy();
    tracing::info!(
        populate_on_create = policy.populate_on_create,
        on_populate_failure = ?policy.on_populate_failure,
        "Cache policy"
    );

    run_server_with_state(addr, state, prometheus).await?;

    Ok(())
}

/// Builds the coordinator over PostgreSQL and Redis.
///
/// Migration and the first Redis connection must succeed. The pings after
/// them are only logged; `/health` reports later outages.
async fn connect_live(settings: &Settings) -> anyhow::Result<UserService> {
    let database = &settings.database;
    tracing::info!(
        host = %database.host,
        port = database.port,
        name = %database.name,
        "Configuring PostgreSQL store"
    );
    let store = PostgresUserStore::from_config(database).context("invalid database settings")?;

    if database.run_migrations {
        store
            .migrate()
            .await
            .context("failed to migrate users table")?;
    }

    match store.health_check().await {
        Ok(()) => tracing::info!("PostgreSQL reachable"),
        Err(e) => tracing::warn!(error = %e, "PostgreSQL ping failed"),
    }

    tracing::info!(url = %settings.redis.redacted_url(), "Connecting to Redis");
    let cache = RedisUserCache::connect(&settings.redis)
        .await
        .context("failed to connect to Redis")?;

    match cache.health_check().await {
        Ok(()) => tracing::info!("Redis reachable"),
        Err(e) => tracing::warn!(error = %e, "Redis ping failed"),
    }

    Ok(UserService::new(
        Arc::new(store),
        Arc::new(MeteredCache::new(cache)),
        settings.cache,
    ))
}
