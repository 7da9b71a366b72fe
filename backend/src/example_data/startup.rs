//! Demo-network seeding at startup.

use std::sync::Arc;

use example_data::{RegistryError, SeedRegistry};
use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::SeedingResult;
use crate::domain::{DemoNetworkSeedOutcome, DemoNetworkSeeder, DemoNetworkSeedingError};
use crate::example_data::config::ExampleDataSettings;
use crate::outbound::persistence::{DbPool, DieselDemoNetworkRepository};

/// Errors returned while seeding at startup.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The registry could not be read or parsed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Generation or persistence failed.
    #[error("demo network seeding error: {0}")]
    Seeding(#[from] DemoNetworkSeedingError),
    /// Seed name must not be blank.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Seed the demo network when enabled.
///
/// Returns `Ok(None)` when seeding is disabled. Re-running against a database
/// that already holds the demo user reports [`SeedingResult::AlreadySeeded`].
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the registry is unreadable, the seed
/// name is blank, or generation and persistence fail.
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    db_pool: &DbPool,
) -> Result<Option<DemoNetworkSeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "demo network seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = SeedRegistry::from_file(&settings.registry_path())?;
    let repository = DieselDemoNetworkRepository::new(db_pool.clone());
    let seeder = DemoNetworkSeeder::new(Arc::new(repository), Arc::new(DefaultClock));
    let outcome = seeder
        .seed_from_registry(&registry, seed_name, settings.demo_password())
        .await?;

    let state = match outcome.result {
        SeedingResult::Applied => "applied",
        SeedingResult::AlreadySeeded => "already present",
    };
    info!(
        seed_name = %outcome.seed_name,
        username = %outcome.username,
        contact_count = outcome.contact_count,
        state,
        "demo network seeding finished"
    );

    Ok(Some(outcome))
}
