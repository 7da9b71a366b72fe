//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations, and convert into domain types
//! through validated constructors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Contact, ContactPatch, Interaction, InteractionOutcome, InteractionPatch, Relationship,
    StoredUser, Strength, Tag, TagColor, User, UserId,
};

use super::schema::{contact_tags, contacts, interactions, relationships, tags, users};

/// A stored value failed domain validation on the way out of the database.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: {message}")]
pub(crate) struct CorruptRow {
    table: &'static str,
    id: Uuid,
    message: String,
}

impl CorruptRow {
    fn new(table: &'static str, id: Uuid, message: impl ToString) -> Self {
        Self {
            table,
            id,
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: UserId::from(row.id),
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                created_at: row.created_at,
            },
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a StoredUser> for NewUserRow<'a> {
    fn from(stored: &'a StoredUser) -> Self {
        Self {
            id: *stored.user.id.as_uuid(),
            username: &stored.user.username,
            password_hash: &stored.password_hash,
            email: stored.user.email.as_deref(),
            first_name: stored.user.first_name.as_deref(),
            last_name: stored.user.last_name.as_deref(),
            created_at: stored.user.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub category: String,
    pub relationship_strength: i32,
    pub contact_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = CorruptRow;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let relationship_strength = Strength::try_from(row.relationship_strength)
            .map_err(|err| CorruptRow::new("contacts", row.id, err))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from(row.user_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            company: row.company,
            title: row.title,
            location: row.location,
            linkedin_url: row.linkedin_url,
            category: row.category,
            relationship_strength,
            contact_source: row.contact_source,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub title: Option<&'a str>,
    pub location: Option<&'a str>,
    pub linkedin_url: Option<&'a str>,
    pub category: &'a str,
    pub relationship_strength: i32,
    pub contact_source: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Contact> for NewContactRow<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            id: contact.id,
            user_id: *contact.user_id.as_uuid(),
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            email: contact.email.as_deref(),
            phone: contact.phone.as_deref(),
            company: contact.company.as_deref(),
            title: contact.title.as_deref(),
            location: contact.location.as_deref(),
            linkedin_url: contact.linkedin_url.as_deref(),
            category: &contact.category,
            relationship_strength: i32::from(contact.relationship_strength),
            contact_source: contact.contact_source.as_deref(),
            notes: contact.notes.as_deref(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Partial contact update. `None` leaves a column untouched; `Some(None)`
/// clears a nullable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactChangeset<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<Option<&'a str>>,
    pub phone: Option<Option<&'a str>>,
    pub company: Option<Option<&'a str>>,
    pub title: Option<Option<&'a str>>,
    pub location: Option<Option<&'a str>>,
    pub linkedin_url: Option<Option<&'a str>>,
    pub category: Option<&'a str>,
    pub relationship_strength: Option<i32>,
    pub contact_source: Option<Option<&'a str>>,
    pub notes: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

fn nullable(field: Option<&Option<String>>) -> Option<Option<&str>> {
    field.map(Option::as_deref)
}

impl<'a> ContactChangeset<'a> {
    pub(crate) fn from_patch(patch: &'a ContactPatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            first_name: patch.first_name.as_deref(),
            last_name: patch.last_name.as_deref(),
            email: nullable(patch.email.as_ref()),
            phone: nullable(patch.phone.as_ref()),
            company: nullable(patch.company.as_ref()),
            title: nullable(patch.title.as_ref()),
            location: nullable(patch.location.as_ref()),
            linkedin_url: nullable(patch.linkedin_url.as_ref()),
            category: patch.category.as_deref(),
            relationship_strength: patch.relationship_strength.map(i32::from),
            contact_source: nullable(patch.contact_source.as_ref()),
            notes: nullable(patch.notes.as_ref()),
            updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Interactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InteractionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_id: Uuid,
    pub kind: String,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub outcome: Option<String>,
    pub follow_up_required: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = CorruptRow;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let outcome = row
            .outcome
            .as_deref()
            .map(str::parse::<InteractionOutcome>)
            .transpose()
            .map_err(|err| CorruptRow::new("interactions", row.id, err))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from(row.user_id),
            contact_id: row.contact_id,
            kind: row.kind,
            subject: row.subject,
            notes: row.notes,
            outcome,
            follow_up_required: row.follow_up_required,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = interactions)]
pub(crate) struct NewInteractionRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_id: Uuid,
    pub kind: &'a str,
    pub subject: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub outcome: Option<&'static str>,
    pub follow_up_required: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Interaction> for NewInteractionRow<'a> {
    fn from(interaction: &'a Interaction) -> Self {
        Self {
            id: interaction.id,
            user_id: *interaction.user_id.as_uuid(),
            contact_id: interaction.contact_id,
            kind: &interaction.kind,
            subject: interaction.subject.as_deref(),
            notes: interaction.notes.as_deref(),
            outcome: interaction.outcome.map(InteractionOutcome::as_str),
            follow_up_required: interaction.follow_up_required,
            created_at: interaction.created_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = interactions)]
pub(crate) struct InteractionChangeset<'a> {
    pub kind: Option<&'a str>,
    pub subject: Option<Option<&'a str>>,
    pub notes: Option<Option<&'a str>>,
    pub outcome: Option<Option<&'static str>>,
    pub follow_up_required: Option<Option<DateTime<Utc>>>,
}

impl<'a> From<&'a InteractionPatch> for InteractionChangeset<'a> {
    fn from(patch: &'a InteractionPatch) -> Self {
        Self {
            kind: patch.kind.as_deref(),
            subject: nullable(patch.subject.as_ref()),
            notes: nullable(patch.notes.as_ref()),
            outcome: patch
                .outcome
                .map(|outcome| outcome.map(InteractionOutcome::as_str)),
            follow_up_required: patch.follow_up_required,
        }
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = relationships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RelationshipRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub from_contact_id: Uuid,
    pub to_contact_id: Uuid,
    pub relationship_type: String,
    pub strength: i32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RelationshipRow> for Relationship {
    type Error = CorruptRow;

    fn try_from(row: RelationshipRow) -> Result<Self, Self::Error> {
        let strength = Strength::try_from(row.strength)
            .map_err(|err| CorruptRow::new("relationships", row.id, err))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from(row.user_id),
            from_contact_id: row.from_contact_id,
            to_contact_id: row.to_contact_id,
            relationship_type: row.relationship_type,
            strength,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = relationships)]
pub(crate) struct NewRelationshipRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub from_contact_id: Uuid,
    pub to_contact_id: Uuid,
    pub relationship_type: &'a str,
    pub strength: i32,
    pub notes: Option<&'a str>,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Relationship> for NewRelationshipRow<'a> {
    fn from(relationship: &'a Relationship) -> Self {
        Self {
            id: relationship.id,
            user_id: *relationship.user_id.as_uuid(),
            from_contact_id: relationship.from_contact_id,
            to_contact_id: relationship.to_contact_id,
            relationship_type: &relationship.relationship_type,
            strength: i32::from(relationship.strength),
            notes: relationship.notes.as_deref(),
            created_at: relationship.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<TagRow> for Tag {
    type Error = CorruptRow;

    fn try_from(row: TagRow) -> Result<Self, Self::Error> {
        let color = TagColor::new(&row.color).map_err(|err| CorruptRow::new("tags", row.id, err))?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from(row.user_id),
            name: row.name,
            color,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub color: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Tag> for NewTagRow<'a> {
    fn from(tag: &'a Tag) -> Self {
        Self {
            id: tag.id,
            user_id: *tag.user_id.as_uuid(),
            name: &tag.name,
            color: tag.color.as_str(),
            created_at: tag.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = contact_tags)]
pub(crate) struct NewContactTagRow {
    pub contact_id: Uuid,
    pub tag_id: Uuid,
}
