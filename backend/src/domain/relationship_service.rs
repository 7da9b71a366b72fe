//! Relationship domain service implementing the relationship driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{RelationshipRepository, RelationshipsCommand, RelationshipsQuery};
use crate::domain::{Error, Relationship, RelationshipDraft, UserId};

use super::contact_service::CONTACT_NOT_FOUND;

const RELATIONSHIP_NOT_FOUND: &str = "relationship not found";

/// Relationship service backed by a [`RelationshipRepository`].
#[derive(Clone)]
pub struct RelationshipService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RelationshipService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> RelationshipsQuery for RelationshipService<R>
where
    R: RelationshipRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Relationship>, Error> {
        Ok(self.repo.list(user_id).await?)
    }
}

#[async_trait]
impl<R> RelationshipsCommand for RelationshipService<R>
where
    R: RelationshipRepository,
{
    async fn create(
        &self,
        user_id: &UserId,
        draft: RelationshipDraft,
    ) -> Result<Relationship, Error> {
        self.repo
            .create(user_id, &draft, self.clock.utc())
            .await?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error> {
        if self.repo.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(Error::not_found(RELATIONSHIP_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::Strength;
    use crate::domain::ports::MockRelationshipRepository;
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};

    fn draft() -> RelationshipDraft {
        RelationshipDraft {
            from_contact_id: Uuid::new_v4(),
            to_contact_id: Uuid::new_v4(),
            relationship_type: "colleague".to_owned(),
            strength: Strength::default(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_stamps_now_and_returns_row() {
        let user_id = UserId::random();
        let request = draft();
        let stored = Relationship {
            id: Uuid::new_v4(),
            user_id,
            from_contact_id: request.from_contact_id,
            to_contact_id: request.to_contact_id,
            relationship_type: request.relationship_type.clone(),
            strength: request.strength,
            notes: None,
            created_at: fixture_timestamp(),
        };
        let mut repo = MockRelationshipRepository::new();
        repo.expect_create()
            .withf(|_, _, now| *now == fixture_timestamp())
            .times(1)
            .return_once(move |_, _, _| Ok(Some(stored)));

        let service = RelationshipService::new(Arc::new(repo), fixture_clock());
        let relationship = service.create(&user_id, request).await.expect("created");
        assert_eq!(relationship.relationship_type, "colleague");
    }

    #[tokio::test]
    async fn create_with_foreign_endpoint_is_not_found() {
        let mut repo = MockRelationshipRepository::new();
        repo.expect_create().times(1).return_once(|_, _, _| Ok(None));

        let service = RelationshipService::new(Arc::new(repo), fixture_clock());
        let error = service
            .create(&UserId::random(), draft())
            .await
            .expect_err("foreign endpoint");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let mut repo = MockRelationshipRepository::new();
        repo.expect_delete().times(1).return_once(|_, _| Ok(false));

        let service = RelationshipService::new(Arc::new(repo), fixture_clock());
        let error = service
            .delete(&UserId::random(), Uuid::new_v4())
            .await
            .expect_err("missing");
        assert_eq!(error.message(), RELATIONSHIP_NOT_FOUND);
    }
}
