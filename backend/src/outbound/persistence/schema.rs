//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; `diesel
//! print-schema` can regenerate them from a live database.

diesel::table! {
    /// Registered accounts: clients, suppliers, and the administrator.
    users (id) {
        /// Primary key, UUID v4.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Unique login email.
        email -> Varchar,
        /// Optional contact phone.
        phone -> Nullable<Varchar>,
        /// Stored credential (plaintext by explicit non-goal).
        password -> Varchar,
        /// CLIENT, SUPPLIER, or ADMIN.
        role -> Varchar,
        /// Accumulated supplier earnings.
        balance -> Numeric,
        /// Manual verification flag.
        is_verified -> Bool,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Supplier-owned service listings.
    services (id) {
        /// Primary key, UUID v4.
        id -> Uuid,
        /// Owning supplier (FK to `users`).
        supplier_id -> Uuid,
        /// Listing title.
        title -> Varchar,
        /// Listing description.
        description -> Text,
        /// EVENTS, TRANSPORTATION, DINING, or ACCOMMODATION.
        category -> Varchar,
        /// Listed price.
        price -> Numeric,
        /// Optional location text.
        location -> Nullable<Varchar>,
        /// Whether new bookings are accepted.
        availability -> Bool,
        /// Listing creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client bookings and their payment lifecycle.
    bookings (id) {
        /// Primary key, UUID v4.
        id -> Uuid,
        /// Booked service (FK to `services`).
        service_id -> Uuid,
        /// Booking client (FK to `users`).
        client_id -> Uuid,
        /// Requested date, if any.
        booking_date -> Nullable<Timestamptz>,
        /// Free-form client notes.
        notes -> Nullable<Text>,
        /// Agreed amount.
        total_amount -> Numeric,
        /// PENDING, CONFIRMED, CANCELLED, or COMPLETED.
        status -> Varchar,
        /// Set exactly once, on payment verification.
        payment_verified -> Bool,
        /// Opaque reference to the uploaded proof.
        payment_proof -> Nullable<Text>,
        /// Admin-supplied rejection reason.
        rejection_reason -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Client reviews of services.
    reviews (id) {
        /// Primary key, UUID v4.
        id -> Uuid,
        /// Reviewed service (FK to `services`).
        service_id -> Uuid,
        /// Reviewing client (FK to `users`).
        client_id -> Uuid,
        /// Rating in 1..=5.
        rating -> SmallInt,
        /// Optional review text.
        comment -> Nullable<Text>,
        /// Review timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared social feed posts.
    social_posts (id) {
        /// Primary key, UUID v4.
        id -> Uuid,
        /// Posting user (FK to `users`).
        author_id -> Uuid,
        /// Post body.
        content -> Text,
        /// Opaque references to attached images.
        images -> Array<Text>,
        /// Promotion flag.
        is_promotion -> Bool,
        /// Like counter.
        likes -> Int4,
        /// Publication timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(services -> users (supplier_id));
diesel::joinable!(bookings -> services (service_id));
diesel::joinable!(reviews -> services (service_id));
diesel::joinable!(social_posts -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, services, bookings, reviews, social_posts);
