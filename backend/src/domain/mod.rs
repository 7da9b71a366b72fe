//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the ports adapters implement, and the services that
//! drive them. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User and UserId: account owner and the identity threaded through every
//!   repository call.
//! - Contact, Interaction, Relationship and Tag aggregates with their drafts
//!   and patches.
//! - NetworkStats and NetworkGraph: analytics projections.
//! - ContactService, InteractionService, RelationshipService, TagService,
//!   AnalyticsService and PasswordLoginService: driving port implementations.

pub mod analytics;
mod analytics_service;
pub mod auth;
pub mod contact;
mod contact_service;
pub mod error;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod interaction;
mod interaction_service;
pub mod list_limit;
mod login_service;
pub mod ports;
pub mod relationship;
mod relationship_service;
pub mod strength;
pub mod tag;
mod tag_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::analytics::{
    DORMANT_WINDOW_DAYS, GraphLink, GraphNode, NetworkGraph, NetworkStats, RECENT_WINDOW_DAYS,
    StatsWindow,
};
pub use self::analytics_service::AnalyticsService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordHashError, hash_password, verify_password,
};
pub use self::contact::{Contact, ContactDetails, ContactDraft, ContactPatch};
pub use self::contact_service::ContactService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
#[cfg(feature = "example-data")]
pub use self::example_data::{DemoNetworkSeedOutcome, DemoNetworkSeeder, DemoNetworkSeedingError};
pub use self::interaction::{
    Interaction, InteractionDraft, InteractionOutcome, InteractionPatch, InteractionWithContact,
    UnknownOutcome,
};
pub use self::interaction_service::InteractionService;
pub use self::list_limit::ListLimit;
pub use self::login_service::PasswordLoginService;
pub use self::relationship::{DEFAULT_RELATIONSHIP_TYPE, Relationship, RelationshipDraft};
pub use self::relationship_service::RelationshipService;
pub use self::strength::{Strength, StrengthOutOfRange};
pub use self::tag::{InvalidTagColor, Tag, TagColor, TagDraft};
pub use self::tag_service::TagService;
pub use self::trace_id::TraceId;
pub use self::user::{StoredUser, User, UserId, UserIdError};
pub use self::validation::{FieldViolation, ValidationErrors, ViolationCode};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("contact not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
