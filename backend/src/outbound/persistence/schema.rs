//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Account owners. Created by seeding and read at login.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        email -> Nullable<Varchar>,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// People tracked by a user.
    contacts (id) {
        id -> Uuid,
        user_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        company -> Nullable<Varchar>,
        title -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        linkedin_url -> Nullable<Varchar>,
        category -> Varchar,
        /// Constrained to 1..=5 by a CHECK constraint.
        relationship_strength -> Int4,
        contact_source -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged engagements with a contact.
    interactions (id) {
        id -> Uuid,
        user_id -> Uuid,
        contact_id -> Uuid,
        #[sql_name = "type"]
        kind -> Varchar,
        subject -> Nullable<Varchar>,
        notes -> Nullable<Text>,
        outcome -> Nullable<Varchar>,
        follow_up_required -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed edges between two contacts of the same user.
    relationships (id) {
        id -> Uuid,
        user_id -> Uuid,
        from_contact_id -> Uuid,
        to_contact_id -> Uuid,
        relationship_type -> Varchar,
        strength -> Int4,
        notes -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User-defined labels; names are unique per user.
    tags (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        color -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Many-to-many link between contacts and tags.
    contact_tags (contact_id, tag_id) {
        contact_id -> Uuid,
        tag_id -> Uuid,
    }
}

diesel::joinable!(contacts -> users (user_id));
diesel::joinable!(interactions -> contacts (contact_id));
diesel::joinable!(tags -> users (user_id));
diesel::joinable!(contact_tags -> contacts (contact_id));
diesel::joinable!(contact_tags -> tags (tag_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    contacts,
    interactions,
    relationships,
    tags,
    contact_tags,
);
