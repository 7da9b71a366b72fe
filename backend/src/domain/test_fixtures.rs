//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::{Contact, Interaction, InteractionOutcome, Strength, UserId};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn sample_contact(user_id: UserId, first_name: &str, last_name: &str) -> Contact {
    let at = fixture_timestamp();
    Contact {
        id: Uuid::new_v4(),
        user_id,
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: None,
        phone: None,
        company: None,
        title: None,
        location: None,
        linkedin_url: None,
        category: "mentor".to_owned(),
        relationship_strength: Strength::default(),
        contact_source: None,
        notes: None,
        created_at: at,
        updated_at: at,
    }
}

pub(crate) fn sample_interaction(contact: &Contact, created_at: DateTime<Utc>) -> Interaction {
    Interaction {
        id: Uuid::new_v4(),
        user_id: contact.user_id,
        contact_id: contact.id,
        kind: "call".to_owned(),
        subject: Some("Check-in Call".to_owned()),
        notes: None,
        outcome: Some(InteractionOutcome::Positive),
        follow_up_required: None,
        created_at,
    }
}
