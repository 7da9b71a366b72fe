//! Cache keys and the mutation → stale-query graph.

use std::fmt;

use uuid::Uuid;

/// Identity of one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `GET /api/contacts?limit=`
    Contacts { limit: Option<u32> },
    /// `GET /api/contacts/{id}`
    Contact(Uuid),
    /// `GET /api/contacts/search?q=` keyed by the trimmed query.
    ContactSearch(String),
    /// `GET /api/interactions?contactId=`
    Interactions { contact_id: Option<Uuid> },
    /// `GET /api/relationships`
    Relationships,
    /// `GET /api/tags`
    Tags,
    /// `GET /api/analytics/stats`
    Stats,
    /// `GET /api/network/graph`
    Graph,
}

/// Every variant of [`QueryKey`] regardless of its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    /// Contact lists of any limit.
    Contacts,
    /// Single contact details.
    Contact,
    /// Search results for any query.
    ContactSearch,
    /// Interaction lists, filtered or not.
    Interactions,
    /// The relationship list.
    Relationships,
    /// The tag list.
    Tags,
    /// Network statistics.
    Stats,
    /// The network graph.
    Graph,
}

impl QueryKey {
    /// The family this key belongs to.
    #[must_use]
    pub const fn family(&self) -> QueryFamily {
        match self {
            Self::Contacts { .. } => QueryFamily::Contacts,
            Self::Contact(_) => QueryFamily::Contact,
            Self::ContactSearch(_) => QueryFamily::ContactSearch,
            Self::Interactions { .. } => QueryFamily::Interactions,
            Self::Relationships => QueryFamily::Relationships,
            Self::Tags => QueryFamily::Tags,
            Self::Stats => QueryFamily::Stats,
            Self::Graph => QueryFamily::Graph,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contacts { limit: Some(limit) } => write!(f, "contacts?limit={limit}"),
            Self::Contacts { limit: None } => f.write_str("contacts"),
            Self::Contact(id) => write!(f, "contacts/{id}"),
            Self::ContactSearch(q) => write!(f, "contacts/search?q={q}"),
            Self::Interactions {
                contact_id: Some(id),
            } => write!(f, "interactions?contactId={id}"),
            Self::Interactions { contact_id: None } => f.write_str("interactions"),
            Self::Relationships => f.write_str("relationships"),
            Self::Tags => f.write_str("tags"),
            Self::Stats => f.write_str("analytics/stats"),
            Self::Graph => f.write_str("network/graph"),
        }
    }
}

/// Which cached reads a mutation makes stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Invalidation {
    /// Every key of the family.
    Family(QueryFamily),
    /// One key.
    Key(QueryKey),
}

impl Invalidation {
    /// Whether `key` falls under this invalidation.
    #[must_use]
    pub fn covers(&self, key: &QueryKey) -> bool {
        match self {
            Self::Family(family) => key.family() == *family,
            Self::Key(target) => target == key,
        }
    }
}

/// A successful write against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// `POST /api/contacts`
    CreateContact,
    /// `PUT /api/contacts/{id}`
    UpdateContact { id: Uuid },
    /// `DELETE /api/contacts/{id}`
    DeleteContact { id: Uuid },
    /// `POST /api/interactions`
    CreateInteraction { contact_id: Uuid },
    /// `PUT /api/interactions/{id}`; `contact_id` is the owning contact when
    /// the caller knows it.
    UpdateInteraction { contact_id: Option<Uuid> },
    /// `DELETE /api/interactions/{id}`
    DeleteInteraction { contact_id: Option<Uuid> },
    /// `POST /api/relationships`
    CreateRelationship,
    /// `DELETE /api/relationships/{id}`
    DeleteRelationship,
    /// `POST /api/tags`
    CreateTag,
    /// `DELETE /api/tags/{id}`
    DeleteTag,
    /// `PUT /api/contacts/{id}/tags/{tagId}`
    AssignTag { contact_id: Uuid },
    /// `DELETE /api/contacts/{id}/tags/{tagId}`
    UnassignTag { contact_id: Uuid },
}

impl Mutation {
    /// Cached reads to drop once this mutation succeeds.
    #[must_use]
    pub fn invalidates(&self) -> Vec<Invalidation> {
        use Invalidation::{Family, Key};
        use QueryFamily as F;

        match *self {
            Self::CreateContact => vec![
                Family(F::Contacts),
                Family(F::ContactSearch),
                Family(F::Stats),
                Family(F::Graph),
            ],
            Self::UpdateContact { id } => vec![
                Family(F::Contacts),
                Family(F::ContactSearch),
                Key(QueryKey::Contact(id)),
                Family(F::Interactions),
                Family(F::Stats),
                Family(F::Graph),
            ],
            Self::DeleteContact { id } => vec![
                Family(F::Contacts),
                Family(F::ContactSearch),
                Key(QueryKey::Contact(id)),
                Family(F::Interactions),
                Family(F::Stats),
                Family(F::Graph),
                Family(F::Relationships),
            ],
            Self::CreateInteraction { contact_id } => vec![
                Family(F::Interactions),
                Family(F::Contacts),
                Family(F::ContactSearch),
                Key(QueryKey::Contact(contact_id)),
                Family(F::Stats),
            ],
            Self::UpdateInteraction { contact_id } | Self::DeleteInteraction { contact_id } => {
                let mut stale = vec![
                    Family(F::Interactions),
                    Family(F::Contacts),
                    Family(F::ContactSearch),
                    Family(F::Stats),
                ];
                // Without the owner every cached contact may embed the row.
                stale.push(contact_id.map_or(Family(F::Contact), |id| {
                    Key(QueryKey::Contact(id))
                }));
                stale
            }
            Self::CreateRelationship | Self::DeleteRelationship => {
                vec![Family(F::Relationships), Family(F::Graph)]
            }
            Self::CreateTag => vec![Family(F::Tags)],
            Self::DeleteTag => vec![
                Family(F::Tags),
                Family(F::Contact),
                Family(F::Contacts),
                Family(F::ContactSearch),
            ],
            Self::AssignTag { contact_id } | Self::UnassignTag { contact_id } => vec![
                Key(QueryKey::Contact(contact_id)),
                Family(F::Contacts),
                Family(F::ContactSearch),
            ],
        }
    }
}
