//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// Lower-cased login email; unique (`users_email_key`).
        email -> Varchar,
        /// Push token of the user's device, when one is registered.
        notification_token -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered cars. `(plate_number, country)` is unique
    /// (`cars_plate_number_country_key`).
    cars (id) {
        id -> Uuid,
        plate_number -> Varchar,
        /// ISO 3166-1 alpha-2 country code.
        country -> Varchar,
        /// Brand catalog code.
        brand -> Int4,
        model -> Varchar,
        /// Colour catalog code.
        color -> Int4,
        license_expiry -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ownership links; the composite primary key gives set semantics.
    user_cars (user_id, car_id) {
        user_id -> Uuid,
        car_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed blocking edges; the composite primary key forbids duplicates.
    blocking_relations (blocking_car_id, blocked_car_id) {
        blocking_car_id -> Uuid,
        blocked_car_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(user_cars -> users (user_id));
diesel::joinable!(user_cars -> cars (car_id));

diesel::allow_tables_to_appear_in_same_query!(users, cars, user_cars, blocking_relations);
