//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `email` is unique.
    users (id) {
        id -> Uuid,
        name -> Nullable<Text>,
        email -> Text,
        email_verified -> Nullable<Timestamptz>,
        image -> Nullable<Text>,
        /// `default` or `ADMIN`.
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// OAuth provider accounts; `(provider, provider_account_id)` is unique.
    accounts (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[sql_name = "type"]
        account_type -> Text,
        provider -> Text,
        provider_account_id -> Text,
        refresh_token -> Nullable<Text>,
        access_token -> Nullable<Text>,
        expires_at -> Nullable<Int8>,
        token_type -> Nullable<Text>,
        scope -> Nullable<Text>,
        id_token -> Nullable<Text>,
        session_state -> Nullable<Text>,
    }
}

diesel::table! {
    /// Login sessions keyed by their opaque token.
    sessions (id) {
        id -> Uuid,
        session_token -> Text,
        user_id -> Uuid,
        expires -> Timestamptz,
    }
}

diesel::table! {
    verification_tokens (identifier, token) {
        identifier -> Text,
        token -> Text,
        expires -> Timestamptz,
    }
}

diesel::table! {
    feedback_posts (id) {
        id -> Uuid,
        author_id -> Uuid,
        #[max_length = 255]
        title -> Varchar,
        body -> Text,
        status -> Text,
        num_votes -> Int4,
        num_comments -> Int4,
        posted_at -> Timestamptz,
        last_active_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (post, user) vote.
    feedback_votes (post_id, user_id) {
        post_id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(accounts -> users (user_id));
diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(feedback_posts -> users (author_id));
diesel::joinable!(feedback_votes -> feedback_posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    accounts,
    sessions,
    verification_tokens,
    feedback_posts,
    feedback_votes,
);
