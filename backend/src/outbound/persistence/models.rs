//! Diesel row structs internal to the persistence layer.
//!
//! Rows convert to domain types at the adapter boundary; enum-like columns
//! (`role`, `category`, `status`) are stored as their wire strings and
//! parsed on read, surfacing corrupt rows as query errors rather than
//! panics.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{
    Booking, BookingStatus, Category, Role, Service, SocialPost, User, UserId,
};

use super::schema::{bookings, reviews, services, social_posts, users};

fn parse_column<T, E>(value: &str, column: &'static str) -> Result<T, String>
where
    T: std::str::FromStr<Err = E>,
    E: std::fmt::Display,
{
    value
        .parse()
        .map_err(|err| format!("corrupt {column} column: {err}"))
}

/// Row in `users`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: String,
    pub balance: Decimal,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_domain(self) -> Result<User, String> {
        Ok(User {
            id: UserId::from_uuid(self.id),
            name: self.name,
            email: self.email,
            phone: self.phone,
            password: self.password,
            role: parse_column::<Role, _>(&self.role, "users.role")?,
            balance: self.balance,
            is_verified: self.is_verified,
            created_at: self.created_at,
        })
    }
}

/// Insertable row for `users`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: String,
    pub balance: Decimal,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Row in `services`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub location: Option<String>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

impl ServiceRow {
    pub fn into_domain(self) -> Result<Service, String> {
        Ok(Service {
            id: self.id,
            supplier_id: UserId::from_uuid(self.supplier_id),
            title: self.title,
            description: self.description,
            category: parse_column::<Category, _>(&self.category, "services.category")?,
            price: self.price,
            location: self.location,
            availability: self.availability,
            created_at: self.created_at,
        })
    }
}

/// Insertable row for `services`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = services)]
pub struct NewServiceRow {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub location: Option<String>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}

/// Row in `bookings`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingRow {
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub booking_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_verified: bool,
    pub payment_proof: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRow {
    pub fn into_domain(self) -> Result<Booking, String> {
        Ok(Booking {
            id: self.id,
            service_id: self.service_id,
            client_id: UserId::from_uuid(self.client_id),
            booking_date: self.booking_date,
            notes: self.notes,
            total_amount: self.total_amount,
            status: parse_column::<BookingStatus, _>(&self.status, "bookings.status")?,
            payment_verified: self.payment_verified,
            payment_proof: self.payment_proof,
            rejection_reason: self.rejection_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable row for `bookings`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub booking_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_verified: bool,
    pub payment_proof: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rating projection from `reviews` used by the listing aggregation.
#[derive(Debug, Clone, Copy, Queryable)]
pub struct ReviewRatingRow {
    pub service_id: Uuid,
    pub rating: i16,
}

/// Insertable row for `reviews`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row in `social_posts`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = social_posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SocialPostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub is_promotion: bool,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl SocialPostRow {
    pub fn into_domain(self) -> Result<SocialPost, String> {
        let likes = u32::try_from(self.likes)
            .map_err(|_| "corrupt social_posts.likes column: negative".to_owned())?;
        Ok(SocialPost {
            id: self.id,
            author_id: UserId::from_uuid(self.author_id),
            content: self.content,
            images: self.images,
            is_promotion: self.is_promotion,
            likes,
            created_at: self.created_at,
        })
    }
}

/// Insertable row for `social_posts`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = social_posts)]
pub struct NewSocialPostRow {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub images: Vec<String>,
    pub is_promotion: bool,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}
