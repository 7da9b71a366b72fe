//! Demo-network seeding settings loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "demo-network";
const DEFAULT_DEMO_PASSWORD: &str = "demo123";

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Settings controlling demo-network seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed the demo network on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry seed to generate.
    pub seed_name: Option<String>,
    /// Registry file override.
    pub registry_path: Option<PathBuf>,
    /// Password for the demo account.
    pub demo_password: Option<String>,
}

impl ExampleDataSettings {
    /// Whether seeding should run.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Configured seed name, or `demo-network`.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Configured registry path, or the bundled fixture.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }

    /// Configured demo password, or `demo123`.
    #[must_use]
    pub fn demo_password(&self) -> &str {
        self.demo_password.as_deref().unwrap_or(DEFAULT_DEMO_PASSWORD)
    }
}
