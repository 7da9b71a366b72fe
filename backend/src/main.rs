//! Backend entry-point: loads settings, migrates the database, optionally
//! seeds the demo network, and serves the REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %session.key_fingerprint(),
        "session signing key loaded"
    );

    let database_url = settings.database_url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply database migrations")?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.as_str())
            .with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    #[cfg(feature = "example-data")]
    seed_demo_network(&pool).await?;

    let bind_addr = settings.bind_addr();
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    );
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

#[cfg(feature = "example-data")]
async fn seed_demo_network(pool: &DbPool) -> color_eyre::Result<()> {
    use backend::example_data::{ExampleDataSettings, seed_example_data_on_startup};

    let settings = ExampleDataSettings::load()
        .map_err(|e| eyre!("failed to load example data settings: {e}"))?;
    seed_example_data_on_startup(&settings, pool)
        .await
        .wrap_err("demo network seeding failed")?;
    Ok(())
}
