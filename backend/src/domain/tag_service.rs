//! Tag domain service implementing the tag driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{TagRepository, TagsCommand, TagsQuery};
use crate::domain::{Error, Tag, TagDraft, UserId};

const TAG_NOT_FOUND: &str = "tag not found";
const ASSIGNMENT_NOT_FOUND: &str = "contact or tag not found";

/// Tag service backed by a [`TagRepository`].
#[derive(Clone)]
pub struct TagService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TagService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> TagsQuery for TagService<R>
where
    R: TagRepository,
{
    async fn list(&self, user_id: &UserId) -> Result<Vec<Tag>, Error> {
        Ok(self.repo.list(user_id).await?)
    }
}

#[async_trait]
impl<R> TagsCommand for TagService<R>
where
    R: TagRepository,
{
    async fn create(&self, user_id: &UserId, draft: TagDraft) -> Result<Tag, Error> {
        let tag = self.repo.create(user_id, &draft, self.clock.utc()).await?;
        debug!(tag_id = %tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    async fn delete(&self, user_id: &UserId, id: Uuid) -> Result<(), Error> {
        if self.repo.delete(user_id, id).await? {
            Ok(())
        } else {
            Err(Error::not_found(TAG_NOT_FOUND))
        }
    }

    async fn assign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), Error> {
        if self.repo.assign(user_id, contact_id, tag_id).await? {
            Ok(())
        } else {
            Err(Error::not_found(ASSIGNMENT_NOT_FOUND))
        }
    }

    async fn unassign(
        &self,
        user_id: &UserId,
        contact_id: Uuid,
        tag_id: Uuid,
    ) -> Result<(), Error> {
        if self.repo.unassign(user_id, contact_id, tag_id).await? {
            Ok(())
        } else {
            Err(Error::not_found(ASSIGNMENT_NOT_FOUND))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockTagRepository, TagRepositoryError};
    use crate::domain::test_fixtures::{fixture_clock, fixture_timestamp};
    use crate::domain::{ErrorCode, TagColor};
    use rstest::rstest;

    fn service(repo: MockTagRepository) -> TagService<MockTagRepository> {
        TagService::new(Arc::new(repo), fixture_clock())
    }

    fn draft(name: &str) -> TagDraft {
        TagDraft {
            name: name.to_owned(),
            color: TagColor::default(),
        }
    }

    #[tokio::test]
    async fn create_returns_stored_tag() {
        let user_id = UserId::random();
        let mut repo = MockTagRepository::new();
        repo.expect_create()
            .withf(|_, draft, now| draft.name == "Investor" && *now == fixture_timestamp())
            .times(1)
            .return_once(move |_, draft, now| {
                Ok(Tag {
                    id: Uuid::new_v4(),
                    user_id,
                    name: draft.name.clone(),
                    color: draft.color.clone(),
                    created_at: now,
                })
            });

        let tag = service(repo)
            .create(&user_id, draft("Investor"))
            .await
            .expect("tag created");
        assert_eq!(tag.color.as_str(), "#3B82F6");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let mut repo = MockTagRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_, _, _| Err(TagRepositoryError::duplicate_name("Investor")));

        let error = service(repo)
            .create(&UserId::random(), draft("Investor"))
            .await
            .expect_err("duplicate");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn assign_maps_missing_rows(#[case] matched: bool, #[case] expected: Option<ErrorCode>) {
        let mut repo = MockTagRepository::new();
        repo.expect_assign()
            .times(1)
            .return_once(move |_, _, _| Ok(matched));

        let result = service(repo)
            .assign(&UserId::random(), Uuid::new_v4(), Uuid::new_v4())
            .await;
        assert_eq!(result.err().map(|e| e.code()), expected);
    }

    #[tokio::test]
    async fn unassign_and_delete_report_not_found() {
        let mut repo = MockTagRepository::new();
        repo.expect_unassign().times(1).return_once(|_, _, _| Ok(false));
        repo.expect_delete().times(1).return_once(|_, _| Ok(false));
        let tags = service(repo);
        let user_id = UserId::random();

        let unassign = tags
            .unassign(&user_id, Uuid::new_v4(), Uuid::new_v4())
            .await
            .expect_err("missing link");
        assert_eq!(unassign.message(), ASSIGNMENT_NOT_FOUND);
        let delete = tags
            .delete(&user_id, Uuid::new_v4())
            .await
            .expect_err("missing tag");
        assert_eq!(delete.message(), TAG_NOT_FOUND);
    }
}
