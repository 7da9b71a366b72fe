//! Network summary statistics and graph projection.
//!
//! All windows are evaluated against a caller-supplied `now`, never cached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Interactions newer than this count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 7;
/// Contacts without an interaction inside this window are dormant.
pub const DORMANT_WINDOW_DAYS: i64 = 30;

/// Time cut-offs for one statistics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    /// Interactions created at or after this instant are recent.
    pub recent_since: DateTime<Utc>,
    /// Contacts with no interaction at or after this instant are dormant.
    pub dormant_before: DateTime<Utc>,
}

impl StatsWindow {
    /// Derive the cut-offs from the current instant.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::StatsWindow;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
    /// let window = StatsWindow::ending_at(now);
    /// assert_eq!(now - window.recent_since, Duration::days(7));
    /// assert_eq!(now - window.dormant_before, Duration::days(30));
    /// ```
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        Self {
            recent_since: now - Duration::days(RECENT_WINDOW_DAYS),
            dormant_before: now - Duration::days(DORMANT_WINDOW_DAYS),
        }
    }
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    pub total_contacts: i64,
    /// Contacts with relationship strength of at least 4.
    pub strong_connections: i64,
    /// Interactions logged inside the recent window.
    pub recent_interactions: i64,
    /// Contacts with no interaction inside the dormant window.
    pub dormant_contacts: i64,
}

/// One contact in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: Uuid,
    /// `"first last"`.
    pub name: String,
    pub category: String,
    #[schema(minimum = 1, maximum = 5)]
    pub strength: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// One relationship in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphLink {
    pub source: Uuid,
    pub target: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(minimum = 1, maximum = 5)]
    pub strength: i32,
}

/// Nodes and links for a force-directed layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_serialise_in_camel_case() {
        let stats = NetworkStats {
            total_contacts: 3,
            strong_connections: 1,
            recent_interactions: 2,
            dormant_contacts: 1,
        };
        assert_eq!(
            serde_json::to_value(stats).expect("serialise"),
            json!({
                "totalContacts": 3,
                "strongConnections": 1,
                "recentInteractions": 2,
                "dormantContacts": 1,
            })
        );
    }

    #[test]
    fn link_kind_serialises_as_type_and_node_omits_missing_company() {
        let graph = NetworkGraph {
            nodes: vec![GraphNode {
                id: Uuid::nil(),
                name: "Ada Lovelace".to_owned(),
                category: "mentor".to_owned(),
                strength: 5,
                company: None,
            }],
            links: vec![GraphLink {
                source: Uuid::nil(),
                target: Uuid::max(),
                kind: "colleague".to_owned(),
                strength: 2,
            }],
        };
        let value = serde_json::to_value(graph).expect("serialise");
        assert!(value.pointer("/nodes/0/company").is_none());
        assert_eq!(value.pointer("/links/0/type"), Some(&json!("colleague")));
    }
}
