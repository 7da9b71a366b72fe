//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types; no business rules live here.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never leave
//!   this module.
//! - Every query filters by the acting user's id.
//!
//! # Example
//!
//! ```no_run
//! use backend::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/crm")).await?;
//! let contacts = DieselContactRepository::new(pool);
//! # let _ = contacts;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_contact_repository;
mod diesel_demo_network_repository;
mod diesel_interaction_repository;
mod diesel_network_analytics_repository;
mod diesel_relationship_repository;
mod diesel_tag_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_demo_network_repository::DieselDemoNetworkRepository;
pub use diesel_interaction_repository::DieselInteractionRepository;
pub use diesel_network_analytics_repository::DieselNetworkAnalyticsRepository;
pub use diesel_relationship_repository::DieselRelationshipRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
