//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every route except login lives behind the session guard in
//! [`session::SessionContext`]. [`configure_api`] wires the handlers into an
//! `/api` scope.

use actix_web::web;

pub mod auth;
pub mod contacts;
mod contacts_dto;
pub mod error;
pub mod health;
pub mod interactions;
mod interactions_dto;
pub mod network;
pub mod relationships;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api` handler on `cfg`.
///
/// Search is registered ahead of the id route so `/contacts/search` never
/// binds `search` as an id.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(contacts::list_contacts)
        .service(contacts::search_contacts)
        .service(contacts::get_contact)
        .service(contacts::create_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(contacts::assign_tag)
        .service(contacts::unassign_tag)
        .service(interactions::list_interactions)
        .service(interactions::create_interaction)
        .service(interactions::update_interaction)
        .service(interactions::delete_interaction)
        .service(relationships::list_relationships)
        .service(relationships::create_relationship)
        .service(relationships::delete_relationship)
        .service(tags::list_tags)
        .service(tags::create_tag)
        .service(tags::delete_tag)
        .service(network::network_stats)
        .service(network::network_graph);
}
