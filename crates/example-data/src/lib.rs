//! Deterministic demo contact-network generation for demonstration purposes.
//!
//! This crate turns a named seed from a JSON registry into a believable,
//! reproducible personal network: a demo account, its contacts, their
//! interaction history, relationships between contacts, and tag assignments.
//! It is independent of backend domain types to avoid circular dependencies.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_demo_network};
//!
//! let json = r##"{
//!     "version": 1,
//!     "demoUser": {"username": "demo_user", "email": "demo@example.com",
//!                  "firstName": "John", "lastName": "Smith"},
//!     "tags": [{"name": "Startup", "color": "#F59E0B"}],
//!     "seeds": [{"name": "test-seed", "seed": 42, "contactCount": 3}]
//! }"##;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let network = generate_demo_network(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(network.contacts.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod vocabulary;

pub use error::{GenerationError, RegistryError};
pub use generator::{MAX_CONTACTS, generate_demo_network};
pub use registry::{DemoUserProfile, SeedDefinition, SeedRegistry, TagDefinition};
pub use seed::{
    ContactSeed, ContactTagSeed, DemoNetworkSeed, DemoUserSeed, InteractionSeed,
    RelationshipSeed, TagSeed,
};
