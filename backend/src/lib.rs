//! Personal CRM backend library.
//!
//! Layered hexagonally: [`domain`] owns entities, validation and services;
//! [`inbound`] adapts HTTP requests onto the domain's driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL.

pub mod doc;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
