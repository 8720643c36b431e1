//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When a
//! migration changes a table, update the matching block here as well;
//! `diesel print-schema` against a migrated database is the quickest way.

diesel::table! {
    /// Profiles of people known to the identity provider.
    ///
    /// `id` is the identity provider's user id, not generated here.
    users (id) {
        id -> Uuid,
        /// Lower-cased, unique.
        email -> Text,
        first_name -> Text,
        last_name -> Text,
        is_admin -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Purchasable ticket offers.
    offers (id) {
        id -> Uuid,
        name -> Text,
        description -> Text,
        /// `NUMERIC(10, 2)`.
        price -> Numeric,
        category -> Text,
        image_url -> Nullable<Text>,
        max_attendees -> Int4,
        features -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// One row per checkout; written only by settlement.
    transactions (id) {
        id -> Uuid,
        user_id -> Uuid,
        amount -> Numeric,
        /// `pending`, `completed` or `failed`.
        status -> Text,
        transaction_key -> Uuid,
        payment_method -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per cart line of a settled checkout.
    reservations (id) {
        id -> Uuid,
        user_id -> Uuid,
        offer_id -> Uuid,
        quantity -> Int4,
        transaction_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per admitted person.
    e_tickets (id) {
        id -> Uuid,
        reservation_id -> Uuid,
        /// Unique scan reference.
        qr_code_url -> Text,
        is_used -> Bool,
        used_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(e_tickets -> reservations (reservation_id));
diesel::joinable!(reservations -> offers (offer_id));
diesel::joinable!(reservations -> transactions (transaction_id));
diesel::joinable!(transactions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(e_tickets, offers, reservations, transactions, users);
