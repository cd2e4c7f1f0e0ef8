//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Identity records. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        name -> Nullable<Varchar>,
        password_hash -> Varchar,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Opaque session tokens, one per user (`user_id` is unique).
    auth_tokens (key) {
        key -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes owned by a user. Prices are stored as fixed-point cents.
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        time_minutes -> Int4,
        price_cents -> Int8,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::joinable!(recipes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(auth_tokens, recipes, users);
