//! Interaction domain service implementing the interaction driving ports.
//!
//! Logging an interaction also marks its contact as recently active; the
//! repository performs both writes in one transaction using the same `now`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{InteractionRepository, InteractionsCommand, InteractionsQuery};
use crate::domain::validation::{FieldViolation, ValidationErrors, ViolationCode};
use crate::domain::{
    Error, Interaction, InteractionDraft, InteractionPatch, InteractionWithContact, ListLimit,
    UserId,
};

use super::contact_service::CONTACT_NOT_FOUND;

const INTERACTION_NOT_FOUND: &str = "interaction not found";

/// Interaction service backed by an [`InteractionRepository`].
#[derive(Clone)]
pub struct InteractionService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> InteractionService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> InteractionsQuery for InteractionService<R>
where
    R: InteractionRepository,
{
    async fn list(
        &self,
        user_id: &UserId,
        contact_id: Option<Uuid>,
        limit: ListLimit,
    ) -> Result<Vec<InteractionWithContact>, Error> {
        Ok(self.repo.list(user_id, contact_id, limit).await?)
    }
}

#[async_trait]
impl<R> InteractionsCommand for InteractionService<R>
where
    R: InteractionRepository,
{
    async fn create(
        &self,
        user_id: &UserId,
        draft: InteractionDraft,
    ) -> Result<Interaction, Error> {
        let now = self.clock.utc();
        if draft.occurred_at.is_some_and(|at| at > now) {
            return Err(ValidationErrors::from(FieldViolation::new(
                "createdAt",
                ViolationCode::InFuture,
                "createdAt must not be in the future",
            ))
            .into());
        }

        let interaction = self
            .repo
            .create(user_id, &draft, now)
            .await?
            .ok_or_else(|| Error::not_found(CONTACT_NOT_FOUND))?;
        debug!(
            interaction_id = %interaction.id,
            contact_id = %interaction.contact_id,
            "interaction logged"
        );
        Ok(interaction)
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: Uuid,
        patch: InteractionPatch,
    ) -> Result<Interaction, Error> {
        self.repo
            .update(user_id, id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(INTERACTION_NOT_FOUND))
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error> {
        if self.repo.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(Error::not_found(INTERACTION_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockInteractionRepository;
    use crate::domain::test_fixtures::{
        fixture_clock, fixture_timestamp, sample_contact, sample_interaction,
    };
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::json;

    fn make_service(
        repo: MockInteractionRepository,
    ) -> InteractionService<MockInteractionRepository> {
        InteractionService::new(Arc::new(repo), fixture_clock())
    }

    fn draft(occurred_at: Option<chrono::DateTime<chrono::Utc>>) -> InteractionDraft {
        InteractionDraft {
            contact_id: Uuid::new_v4(),
            kind: "meeting".to_owned(),
            subject: None,
            notes: None,
            outcome: None,
            follow_up_required: None,
            occurred_at,
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some(fixture_timestamp() - Duration::days(3)))]
    #[case(Some(fixture_timestamp()))]
    #[tokio::test]
    async fn create_accepts_now_or_past(
        #[case] occurred_at: Option<chrono::DateTime<chrono::Utc>>,
    ) {
        let user_id = UserId::random();
        let contact = sample_contact(user_id, "Grace", "Hopper");
        let stored = sample_interaction(&contact, occurred_at.unwrap_or_else(fixture_timestamp));
        let mut repo = MockInteractionRepository::new();
        repo.expect_create()
            .withf(|_, _, now| *now == fixture_timestamp())
            .times(1)
            .return_once(move |_, _, _| Ok(Some(stored)));

        let interaction = make_service(repo)
            .create(&user_id, draft(occurred_at))
            .await
            .expect("create succeeds");
        assert!(interaction.created_at <= fixture_timestamp());
    }

    #[tokio::test]
    async fn create_rejects_future_timestamps_before_storage() {
        let mut repo = MockInteractionRepository::new();
        repo.expect_create().never();

        let future = fixture_timestamp() + Duration::minutes(1);
        let error = make_service(repo)
            .create(&UserId::random(), draft(Some(future)))
            .await
            .expect_err("future timestamp");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|d| d.pointer("/fields/0/code")),
            Some(&json!("in_future"))
        );
    }

    #[tokio::test]
    async fn create_for_foreign_contact_is_not_found() {
        let mut repo = MockInteractionRepository::new();
        repo.expect_create().times(1).return_once(|_, _, _| Ok(None));

        let error = make_service(repo)
            .create(&UserId::random(), draft(None))
            .await
            .expect_err("foreign contact");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), CONTACT_NOT_FOUND);
    }

    #[tokio::test]
    async fn update_and_delete_map_absence_to_not_found() {
        let mut repo = MockInteractionRepository::new();
        repo.expect_update().times(1).return_once(|_, _, _| Ok(None));
        repo.expect_delete().times(1).return_once(|_, _| Ok(false));
        let service = make_service(repo);
        let user_id = UserId::random();

        let update = service
            .update(&user_id, Uuid::new_v4(), InteractionPatch::default())
            .await
            .expect_err("missing");
        assert_eq!(update.code(), ErrorCode::NotFound);
        let delete = service
            .delete(&user_id, Uuid::new_v4())
            .await
            .expect_err("missing");
        assert_eq!(delete.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_forwards_the_contact_filter() {
        let contact_id = Uuid::new_v4();
        let mut repo = MockInteractionRepository::new();
        repo.expect_list()
            .withf(move |_, filter, limit| *filter == Some(contact_id) && limit.get() == 50)
            .times(1)
            .return_once(|_, _, _| Ok(Vec::new()));

        let rows = make_service(repo)
            .list(&UserId::random(), Some(contact_id), ListLimit::default())
            .await
            .expect("list succeeds");
        assert!(rows.is_empty());
    }
}
