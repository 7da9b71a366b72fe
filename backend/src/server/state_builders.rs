//! Wires Diesel repositories into domain services for the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use backend::domain::{
    AnalyticsService, ContactService, InteractionService, PasswordLoginService,
    RelationshipService, TagService,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselContactRepository, DieselInteractionRepository,
    DieselNetworkAnalyticsRepository, DieselRelationshipRepository, DieselTagRepository,
    DieselUserRepository,
};

/// Build every driving port over `pool` with the system clock.
pub fn build_http_state(pool: &DbPool) -> HttpState {
    build_http_state_with_clock(pool, Arc::new(DefaultClock))
}

fn build_http_state_with_clock(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let contacts = Arc::new(ContactService::new(
        Arc::new(DieselContactRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let interactions = Arc::new(InteractionService::new(
        Arc::new(DieselInteractionRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let relationships = Arc::new(RelationshipService::new(
        Arc::new(DieselRelationshipRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let tags = Arc::new(TagService::new(
        Arc::new(DieselTagRepository::new(pool.clone())),
        Arc::clone(&clock),
    ));
    let network = Arc::new(AnalyticsService::new(
        Arc::new(DieselNetworkAnalyticsRepository::new(pool.clone())),
        clock,
    ));
    let login = Arc::new(PasswordLoginService::new(Arc::new(
        DieselUserRepository::new(pool.clone()),
    )));

    HttpState {
        login,
        contacts: contacts.clone(),
        contacts_query: contacts,
        interactions: interactions.clone(),
        interactions_query: interactions,
        relationships: relationships.clone(),
        relationships_query: relationships,
        tags: tags.clone(),
        tags_query: tags,
        network,
    }
}
