//! Deterministic demo-network generation from seed definitions.
//!
//! The same seed definition and registry always produce identical output.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::raw::{CityName, StateAbbr};
use fake::faker::company::raw::CompanyName;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{
    ContactSeed, ContactTagSeed, DemoNetworkSeed, DemoUserSeed, InteractionSeed,
    RelationshipSeed, TagSeed,
};
use crate::vocabulary::{
    CATEGORIES, INTERACTION_TYPES, OUTCOMES, RELATIONSHIP_TYPES, SOURCES, SUBJECTS, TITLES,
    outcome_remark,
};

/// Largest contact count a seed may request.
pub const MAX_CONTACTS: usize = 5_000;

/// Only the first contacts receive interactions.
const INTERACTION_CONTACTS: usize = 50;
/// Interactions per contact, inclusive bounds.
const INTERACTIONS_PER_CONTACT: (usize, usize) = (1, 3);
/// Interactions are dated up to this many days in the past.
const INTERACTION_WINDOW_DAYS: u32 = 180;
/// Chance (numerator/denominator) that an interaction needs a follow-up.
const FOLLOW_UP_RATIO: (u32, u32) = (3, 10);
/// Follow-ups fall due within this many days.
const FOLLOW_UP_WINDOW_DAYS: u32 = 30;

/// Relationship candidates drawn; pairs with equal endpoints are dropped.
const RELATIONSHIP_CANDIDATES: usize = 25;
/// Relationship endpoints come from the first contacts only.
const RELATIONSHIP_POOL: usize = 50;

/// Only the first contacts receive tags.
const TAGGED_CONTACTS: usize = 60;
/// Tag draws per contact, inclusive bounds; repeated draws collapse.
const TAGS_PER_CONTACT: (usize, usize) = (1, 3);

/// Generates a demo network from a seed definition.
///
/// # Errors
///
/// Returns [`GenerationError::ContactCountTooLarge`] when the seed asks for
/// more than [`MAX_CONTACTS`] contacts.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_demo_network};
///
/// let json = r##"{
///     "version": 1,
///     "demoUser": {"username": "demo_user", "email": "demo@example.com",
///                  "firstName": "John", "lastName": "Smith"},
///     "tags": [{"name": "Investor", "color": "#EC4899"}],
///     "seeds": [{"name": "test", "seed": 42, "contactCount": 10}]
/// }"##;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let network = generate_demo_network(&registry, seed_def).expect("generated");
///
/// assert_eq!(network.contacts.len(), 10);
/// let again = generate_demo_network(&registry, seed_def).expect("generated");
/// assert_eq!(network, again);
/// ```
pub fn generate_demo_network(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<DemoNetworkSeed, GenerationError> {
    let count = seed_def.contact_count();
    if count > MAX_CONTACTS {
        return Err(GenerationError::ContactCountTooLarge {
            count,
            max: MAX_CONTACTS,
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let profile = registry.demo_user();
    let user = DemoUserSeed {
        id: random_id(&mut rng),
        username: profile.username.trim().to_owned(),
        email: profile.email.clone(),
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
    };

    let contacts: Vec<ContactSeed> = (0..count)
        .map(|index| generate_contact(&mut rng, index))
        .collect();
    let interactions = generate_interactions(&mut rng, &contacts);
    let relationships = generate_relationships(&mut rng, &contacts);
    let tags: Vec<TagSeed> = registry
        .tags()
        .iter()
        .map(|tag| TagSeed {
            id: random_id(&mut rng),
            name: tag.name.clone(),
            color: tag.color.to_ascii_uppercase(),
        })
        .collect();
    let contact_tags = generate_contact_tags(&mut rng, &contacts, &tags);

    Ok(DemoNetworkSeed {
        user,
        contacts,
        interactions,
        relationships,
        tags,
        contact_tags,
    })
}

fn random_id(rng: &mut ChaCha8Rng) -> Uuid {
    Builder::from_random_bytes(rng.random()).into_uuid()
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn count_between(rng: &mut ChaCha8Rng, (min, max): (usize, usize)) -> usize {
    rng.random_range(min..=max)
}

/// Lowercase ASCII letters and digits only, for e-mail domains and URLs.
fn slug(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn generate_contact(rng: &mut ChaCha8Rng, index: usize) -> ContactSeed {
    let first_name: String = FirstName(EN).fake_with_rng(rng);
    let last_name: String = LastName(EN).fake_with_rng(rng);
    let company: String = CompanyName(EN).fake_with_rng(rng);
    let city: String = CityName(EN).fake_with_rng(rng);
    let state: String = StateAbbr(EN).fake_with_rng(rng);
    let title = pick(rng, TITLES);
    let category = pick(rng, CATEGORIES);
    let source = pick(rng, SOURCES);
    let strength: u8 = rng.random_range(1..=5);

    ContactSeed {
        id: random_id(rng),
        email: format!(
            "{}.{}@{}.com",
            slug(&first_name),
            slug(&last_name),
            slug(&company)
        ),
        phone: format!("+1-555-{:04}", 1000 + index),
        linkedin_url: format!(
            "https://linkedin.com/in/{}{}",
            slug(&first_name),
            slug(&last_name)
        ),
        location: format!("{city}, {state}"),
        notes: format!("Professional contact in {category} category. Met through {source}."),
        first_name,
        last_name,
        company,
        title: title.to_owned(),
        category: category.to_owned(),
        relationship_strength: strength,
        contact_source: source.to_owned(),
    }
}

fn generate_interactions(rng: &mut ChaCha8Rng, contacts: &[ContactSeed]) -> Vec<InteractionSeed> {
    let mut interactions = Vec::new();
    for contact in contacts.iter().take(INTERACTION_CONTACTS) {
        for _ in 0..count_between(rng, INTERACTIONS_PER_CONTACT) {
            let kind = pick(rng, INTERACTION_TYPES);
            let outcome = pick(rng, OUTCOMES);
            let subject = pick(rng, SUBJECTS);
            let days_ago = rng.random_range(0..INTERACTION_WINDOW_DAYS);
            let follow_up_in_days = rng
                .random_ratio(FOLLOW_UP_RATIO.0, FOLLOW_UP_RATIO.1)
                .then(|| rng.random_range(0..FOLLOW_UP_WINDOW_DAYS));
            interactions.push(InteractionSeed {
                id: random_id(rng),
                contact_id: contact.id,
                kind: kind.to_owned(),
                subject: subject.to_owned(),
                notes: format!(
                    "{subject} with {}. {}",
                    contact.first_name,
                    outcome_remark(outcome)
                ),
                outcome: outcome.to_owned(),
                days_ago,
                follow_up_in_days,
            });
        }
    }
    interactions
}

fn generate_relationships(
    rng: &mut ChaCha8Rng,
    contacts: &[ContactSeed],
) -> Vec<RelationshipSeed> {
    let pool = contacts.len().min(RELATIONSHIP_POOL);
    if pool < 2 {
        return Vec::new();
    }

    let mut relationships = Vec::new();
    for _ in 0..RELATIONSHIP_CANDIDATES {
        let from = contacts.get(rng.random_range(0..pool));
        let to = contacts.get(rng.random_range(0..pool));
        let (Some(from), Some(to)) = (from, to) else {
            continue;
        };
        if from.id == to.id {
            continue;
        }
        let relationship_type = pick(rng, RELATIONSHIP_TYPES);
        relationships.push(RelationshipSeed {
            id: random_id(rng),
            from_contact_id: from.id,
            to_contact_id: to.id,
            relationship_type: relationship_type.to_owned(),
            strength: rng.random_range(1..=5),
            notes: format!(
                "{} relationship between {} and {}",
                relationship_type.replace('_', " "),
                from.first_name,
                to.first_name
            ),
        });
    }
    relationships
}

fn generate_contact_tags(
    rng: &mut ChaCha8Rng,
    contacts: &[ContactSeed],
    tags: &[TagSeed],
) -> Vec<ContactTagSeed> {
    let mut assignments = Vec::new();
    if tags.is_empty() {
        return assignments;
    }
    for contact in contacts.iter().take(TAGGED_CONTACTS) {
        let mut chosen = HashSet::new();
        for _ in 0..count_between(rng, TAGS_PER_CONTACT) {
            let Some(tag) = tags.choose(rng) else {
                continue;
            };
            if chosen.insert(tag.id) {
                assignments.push(ContactTagSeed {
                    contact_id: contact.id,
                    tag_id: tag.id,
                });
            }
        }
    }
    assignments
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    const REGISTRY_JSON: &str = r##"{
        "version": 1,
        "demoUser": {"username": "demo_user", "email": "demo@example.com",
                     "firstName": "John", "lastName": "Smith"},
        "tags": [
            {"name": "Tech Industry", "color": "#2563eb"},
            {"name": "Investor", "color": "#EC4899"},
            {"name": "Remote", "color": "#14B8A6"}
        ],
        "seeds": [
            {"name": "demo-network", "seed": 2024, "contactCount": 127},
            {"name": "tiny", "seed": 7, "contactCount": 1},
            {"name": "huge", "seed": 7, "contactCount": 5001}
        ]
    }"##;

    #[fixture]
    fn registry() -> SeedRegistry {
        SeedRegistry::from_json(REGISTRY_JSON).expect("registry should parse")
    }

    fn generate(registry: &SeedRegistry, name: &str) -> Result<DemoNetworkSeed, GenerationError> {
        let seed = registry.find_seed(name).expect("seed exists");
        generate_demo_network(registry, seed)
    }

    #[rstest]
    fn generation_is_deterministic(registry: SeedRegistry) {
        let first = generate(&registry, "demo-network").expect("generated");
        let second = generate(&registry, "demo-network").expect("generated");
        assert_eq!(first, second);
    }

    #[rstest]
    fn different_seeds_differ(registry: SeedRegistry) {
        let first = generate(&registry, "demo-network").expect("generated");
        let other = SeedDefinition::new("other", 2025, 127);
        let second = generate_demo_network(&registry, &other).expect("generated");
        assert_ne!(first.contacts, second.contacts);
    }

    #[rstest]
    fn contacts_follow_the_requested_shape(registry: SeedRegistry) {
        let network = generate(&registry, "demo-network").expect("generated");
        assert_eq!(network.contacts.len(), 127);
        assert_eq!(network.user.username, "demo_user");
        for contact in &network.contacts {
            assert!((1..=5).contains(&contact.relationship_strength));
            assert!(CATEGORIES.contains(&contact.category.as_str()));
            assert!(contact.email.contains('@'));
            assert!(contact.linkedin_url.starts_with("https://linkedin.com/in/"));
        }
        let ids: HashSet<_> = network.contacts.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), network.contacts.len());
    }

    #[rstest]
    fn interactions_cover_only_the_first_fifty(registry: SeedRegistry) {
        let network = generate(&registry, "demo-network").expect("generated");
        let eligible: HashSet<_> = network.contacts.iter().take(50).map(|c| c.id).collect();
        assert!(network.interactions.len() >= 50);
        assert!(network.interactions.len() <= 150);
        for interaction in &network.interactions {
            assert!(eligible.contains(&interaction.contact_id));
            assert!(interaction.days_ago < 180);
            assert!(interaction.follow_up_in_days.is_none_or(|d| d < 30));
            assert!(OUTCOMES.contains(&interaction.outcome.as_str()));
        }
    }

    #[rstest]
    fn relationships_join_distinct_contacts(registry: SeedRegistry) {
        let network = generate(&registry, "demo-network").expect("generated");
        assert!(network.relationships.len() <= 25);
        let pool: HashSet<_> = network.contacts.iter().take(50).map(|c| c.id).collect();
        for relationship in &network.relationships {
            assert_ne!(relationship.from_contact_id, relationship.to_contact_id);
            assert!(pool.contains(&relationship.from_contact_id));
            assert!(pool.contains(&relationship.to_contact_id));
            assert!((1..=5).contains(&relationship.strength));
        }
    }

    #[rstest]
    fn tag_assignments_are_unique_and_bounded(registry: SeedRegistry) {
        let network = generate(&registry, "demo-network").expect("generated");
        assert_eq!(network.tags.len(), 3);
        assert_eq!(
            network.tags.first().map(|t| t.color.as_str()),
            Some("#2563EB")
        );
        let pairs: HashSet<_> = network.contact_tags.iter().copied().collect();
        assert_eq!(pairs.len(), network.contact_tags.len());
        let tagged: HashSet<_> = network.contacts.iter().take(60).map(|c| c.id).collect();
        assert!(network.contact_tags.iter().all(|ct| tagged.contains(&ct.contact_id)));
    }

    #[rstest]
    fn single_contact_network_has_no_relationships(registry: SeedRegistry) {
        let network = generate(&registry, "tiny").expect("generated");
        assert_eq!(network.contacts.len(), 1);
        assert!(network.relationships.is_empty());
    }

    #[rstest]
    fn rejects_oversized_networks(registry: SeedRegistry) {
        assert_eq!(
            generate(&registry, "huge"),
            Err(GenerationError::ContactCountTooLarge {
                count: 5001,
                max: MAX_CONTACTS
            })
        );
    }
}
