//! Demo network seeding orchestration.
//!
//! Converts a deterministic network generated by the `example-data` crate into
//! domain rows anchored to the injected clock, then hands the whole batch to
//! the seeding repository port.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use example_data::{
    ContactSeed, DemoNetworkSeed, DemoUserSeed, GenerationError, InteractionSeed, RegistryError,
    RelationshipSeed, SeedRegistry, TagSeed, generate_demo_network,
};
use mockable::Clock;
use thiserror::Error;

use crate::domain::ports::{
    DemoNetworkRepository, DemoNetworkRepositoryError, DemoNetworkSeedRequest, SeedingResult,
};
use crate::domain::{
    Contact, Interaction, InvalidTagColor, PasswordHashError, Relationship, StoredUser, Strength,
    StrengthOutOfRange, Tag, TagColor, UnknownOutcome, User, UserId, hash_password,
};

/// Result of attempting to apply a demo network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoNetworkSeedOutcome {
    /// Registry seed that produced the network.
    pub seed_name: String,
    /// Demo account the network belongs to.
    pub username: String,
    /// Number of contacts generated.
    pub contact_count: usize,
    /// Persistence outcome.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying a demo network.
#[derive(Debug, Error)]
pub enum DemoNetworkSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Network generation failed.
    #[error("demo network generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated strength fell outside `1..=5`.
    #[error("generated strength is invalid: {0}")]
    Strength(#[from] StrengthOutOfRange),
    /// A generated interaction outcome was not recognised.
    #[error("generated outcome is invalid: {0}")]
    Outcome(#[from] UnknownOutcome),
    /// A registry tag colour failed domain validation.
    #[error("tag colour is invalid: {0}")]
    TagColor(#[from] InvalidTagColor),
    /// The demo password could not be hashed.
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
    /// Persistence adapter failed while seeding.
    #[error("demo network persistence error: {0}")]
    Persistence(#[from] DemoNetworkRepositoryError),
}

/// Service that generates and stores the demo network.
#[derive(Clone)]
pub struct DemoNetworkSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DemoNetworkSeeder<R> {
    /// Create a seeder over the given persistence adapter and clock.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> DemoNetworkSeeder<R>
where
    R: DemoNetworkRepository,
{
    /// Generate the network for `seed_name` and store it under the registry's
    /// demo account, protected by `demo_password`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoNetworkSeedingError`] if registry lookup, generation,
    /// conversion, hashing or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
        demo_password: &str,
    ) -> Result<DemoNetworkSeedOutcome, DemoNetworkSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let network = generate_demo_network(registry, seed_def)?;
        let password_hash = hash_password(demo_password)?;
        let request = build_request(network, password_hash, self.clock.utc())?;

        let username = request.user.user.username.clone();
        let contact_count = request.contacts.len();
        let result = self.repository.seed(&request).await?;

        Ok(DemoNetworkSeedOutcome {
            seed_name: seed_def.name().to_owned(),
            username,
            contact_count,
            result,
        })
    }
}

fn build_request(
    network: DemoNetworkSeed,
    password_hash: String,
    now: DateTime<Utc>,
) -> Result<DemoNetworkSeedRequest, DemoNetworkSeedingError> {
    let user = convert_user(network.user, password_hash, now);
    let owner = user.user.id;

    let contacts = network
        .contacts
        .into_iter()
        .map(|seed| convert_contact(seed, owner, now))
        .collect::<Result<Vec<_>, _>>()?;
    let interactions = network
        .interactions
        .into_iter()
        .map(|seed| convert_interaction(seed, owner, now))
        .collect::<Result<Vec<_>, _>>()?;
    let relationships = network
        .relationships
        .into_iter()
        .map(|seed| convert_relationship(seed, owner, now))
        .collect::<Result<Vec<_>, _>>()?;
    let tags = network
        .tags
        .into_iter()
        .map(|seed| convert_tag(seed, owner, now))
        .collect::<Result<Vec<_>, _>>()?;
    let contact_tags = network
        .contact_tags
        .into_iter()
        .map(|link| (link.contact_id, link.tag_id))
        .collect();

    Ok(DemoNetworkSeedRequest {
        user,
        contacts,
        interactions,
        relationships,
        tags,
        contact_tags,
    })
}

fn convert_user(seed: DemoUserSeed, password_hash: String, now: DateTime<Utc>) -> StoredUser {
    StoredUser {
        user: User {
            id: UserId::from(seed.id),
            username: seed.username,
            email: Some(seed.email),
            first_name: Some(seed.first_name),
            last_name: Some(seed.last_name),
            created_at: now,
        },
        password_hash,
    }
}

fn convert_contact(
    seed: ContactSeed,
    owner: UserId,
    now: DateTime<Utc>,
) -> Result<Contact, StrengthOutOfRange> {
    Ok(Contact {
        id: seed.id,
        user_id: owner,
        first_name: seed.first_name,
        last_name: seed.last_name,
        email: Some(seed.email),
        phone: Some(seed.phone),
        company: Some(seed.company),
        title: Some(seed.title),
        location: Some(seed.location),
        linkedin_url: Some(seed.linkedin_url),
        category: seed.category,
        relationship_strength: Strength::new(i64::from(seed.relationship_strength))?,
        contact_source: Some(seed.contact_source),
        notes: Some(seed.notes),
        created_at: now,
        updated_at: now,
    })
}

fn convert_interaction(
    seed: InteractionSeed,
    owner: UserId,
    now: DateTime<Utc>,
) -> Result<Interaction, UnknownOutcome> {
    Ok(Interaction {
        id: seed.id,
        user_id: owner,
        contact_id: seed.contact_id,
        kind: seed.kind,
        subject: Some(seed.subject),
        notes: Some(seed.notes),
        outcome: Some(seed.outcome.parse()?),
        follow_up_required: seed
            .follow_up_in_days
            .map(|days| now + Duration::days(i64::from(days))),
        created_at: now - Duration::days(i64::from(seed.days_ago)),
    })
}

fn convert_relationship(
    seed: RelationshipSeed,
    owner: UserId,
    now: DateTime<Utc>,
) -> Result<Relationship, StrengthOutOfRange> {
    Ok(Relationship {
        id: seed.id,
        user_id: owner,
        from_contact_id: seed.from_contact_id,
        to_contact_id: seed.to_contact_id,
        relationship_type: seed.relationship_type,
        strength: Strength::new(i64::from(seed.strength))?,
        notes: Some(seed.notes),
        created_at: now,
    })
}

fn convert_tag(seed: TagSeed, owner: UserId, now: DateTime<Utc>) -> Result<Tag, InvalidTagColor> {
    Ok(Tag {
        id: seed.id,
        user_id: owner,
        name: seed.name,
        color: TagColor::new(&seed.color)?,
        created_at: now,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for demo network seeding orchestration.

    use super::*;
    use crate::domain::ports::MockDemoNetworkRepository;
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};
    use crate::domain::verify_password;
    use rstest::rstest;

    const REGISTRY_JSON: &str = r##"{
        "version": 1,
        "demoUser": {"username": "demo_user", "email": "demo@networktracker.com",
                     "firstName": "John", "lastName": "Smith"},
        "tags": [{"name": "Investor", "color": "#ec4899"}, {"name": "Remote", "color": "#14B8A6"}],
        "seeds": [{"name": "tiny", "seed": 42, "contactCount": 8}]
    }"##;

    fn registry() -> SeedRegistry {
        SeedRegistry::from_json(REGISTRY_JSON).expect("registry should parse")
    }

    #[rstest]
    #[tokio::test]
    async fn seed_applies_network_anchored_to_clock() {
        let mut repo = MockDemoNetworkRepository::new();
        repo.expect_seed()
            .withf(|request| {
                let owner = request.user.user.id;
                request.user.user.username == "demo_user"
                    && request.contacts.len() == 8
                    && request.tags.len() == 2
                    && request.contacts.iter().all(|c| c.user_id == owner)
                    && request
                        .interactions
                        .iter()
                        .all(|i| i.created_at <= fixture_timestamp())
                    && request
                        .tags
                        .iter()
                        .any(|t| t.color.as_str() == "#EC4899")
                    && verify_password("demo-pass", &request.user.password_hash)
                        .unwrap_or(false)
            })
            .times(1)
            .return_once(|_| Ok(SeedingResult::Applied));

        let seeder = DemoNetworkSeeder::new(Arc::new(repo), fixture_clock());
        let outcome = seeder
            .seed_from_registry(&registry(), "tiny", "demo-pass")
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::Applied);
        assert_eq!(outcome.contact_count, 8);
        assert_eq!(outcome.username, "demo_user");
        assert_eq!(outcome.seed_name, "tiny");
    }

    #[rstest]
    #[tokio::test]
    async fn seed_reports_existing_account() {
        let mut repo = MockDemoNetworkRepository::new();
        repo.expect_seed()
            .times(1)
            .return_once(|_| Ok(SeedingResult::AlreadySeeded));

        let seeder = DemoNetworkSeeder::new(Arc::new(repo), fixture_clock());
        let outcome = seeder
            .seed_from_registry(&registry(), "tiny", "demo-pass")
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::AlreadySeeded);
    }

    #[rstest]
    #[tokio::test]
    async fn seed_rejects_unknown_seed() {
        let mut repo = MockDemoNetworkRepository::new();
        repo.expect_seed().never();

        let seeder = DemoNetworkSeeder::new(Arc::new(repo), fixture_clock());
        let error = seeder
            .seed_from_registry(&registry(), "missing-seed", "demo-pass")
            .await
            .expect_err("missing seed should error");

        assert!(matches!(error, DemoNetworkSeedingError::Registry(_)));
    }

    #[rstest]
    fn interaction_offsets_are_relative_to_now() {
        let now = fixture_timestamp();
        let seed = InteractionSeed {
            id: uuid::Uuid::new_v4(),
            contact_id: uuid::Uuid::new_v4(),
            kind: "coffee".to_owned(),
            subject: "Coffee Chat".to_owned(),
            notes: "Caught up.".to_owned(),
            outcome: "neutral".to_owned(),
            days_ago: 31,
            follow_up_in_days: Some(5),
        };

        let interaction = convert_interaction(seed, UserId::random(), now).expect("valid seed");
        assert_eq!(interaction.created_at, now - Duration::days(31));
        assert_eq!(interaction.follow_up_required, Some(now + Duration::days(5)));
    }

    #[rstest]
    fn out_of_range_strength_is_rejected() {
        let seed = RelationshipSeed {
            id: uuid::Uuid::new_v4(),
            from_contact_id: uuid::Uuid::new_v4(),
            to_contact_id: uuid::Uuid::new_v4(),
            relationship_type: "colleague".to_owned(),
            strength: 9,
            notes: String::new(),
        };

        assert!(convert_relationship(seed, UserId::random(), fixture_timestamp()).is_err());
    }
}
