//! In-memory repository doubles and app assembly for HTTP integration tests.
//!
//! The doubles honour the same contracts as the Diesel adapters: duplicate
//! emails are rejected, payment decisions only apply to `PENDING` bookings,
//! and verification credits the owning supplier in the shared user store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::{App, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use backend::domain::ports::{
    BookingRepository, BookingRepositoryError, ServiceRepository, ServiceRepositoryError,
    SocialRepository, SocialRepositoryError, UserRepository, UserRepositoryError,
};
use backend::domain::{
    AccountService, AuthorSummary, BookedServiceSummary, Booking, BookingDetails, BookingService,
    BookingStatus, CatalogueService, ContactSummary, FeedKind, NewBooking, NewPost, NewService,
    NewUser, PaymentService, PostDetails, Service, ServiceRecord, SocialPost, SocialService, User,
    UserId,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, bookings, events, payments, services, social};

/// Shared mutable state behind all repository doubles.
#[derive(Default)]
pub struct InMemoryStore {
    pub users: Mutex<HashMap<Uuid, User>>,
    pub services: Mutex<HashMap<Uuid, Service>>,
    pub bookings: Mutex<HashMap<Uuid, Booking>>,
    pub ratings: Mutex<HashMap<Uuid, Vec<i16>>>,
    pub posts: Mutex<Vec<SocialPost>>,
    seq: AtomicI64,
}

impl InMemoryStore {
    /// Strictly increasing timestamps so newest-first ordering is decisive.
    pub fn next_timestamp(&self) -> DateTime<Utc> {
        let tick = self.seq.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap() + Duration::milliseconds(tick)
    }

    pub fn user_balance(&self, id: UserId) -> Option<Decimal> {
        self.users
            .lock()
            .unwrap()
            .get(&id.as_uuid())
            .map(|user| user.balance)
    }

    pub fn set_service_availability(&self, id: Uuid, availability: bool) {
        if let Some(service) = self.services.lock().unwrap().get_mut(&id) {
            service.availability = availability;
        }
    }
}

fn contact(user: &User) -> ContactSummary {
    ContactSummary {
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut users = self.store.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserRepositoryError::duplicate_email(user.email));
        }
        let created = User {
            id: UserId::random(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            password: user.password,
            role: user.role,
            balance: Decimal::ZERO,
            is_verified: false,
            created_at: self.store.next_timestamp(),
        };
        users.insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.store.users.lock().unwrap().get(&id.as_uuid()).cloned())
    }
}

#[derive(Clone)]
pub struct InMemoryServiceRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryServiceRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn insert(&self, service: NewService) -> Result<Service, ServiceRepositoryError> {
        if !self
            .store
            .users
            .lock()
            .unwrap()
            .contains_key(&service.supplier_id.as_uuid())
        {
            return Err(ServiceRepositoryError::supplier_missing(
                service.supplier_id.to_string(),
            ));
        }
        let created = Service {
            id: Uuid::new_v4(),
            supplier_id: service.supplier_id,
            title: service.title,
            description: service.description,
            category: service.category,
            price: service.price,
            location: service.location,
            availability: true,
            created_at: self.store.next_timestamp(),
        };
        self.store
            .services
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, ServiceRepositoryError> {
        Ok(self.store.services.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceRepositoryError> {
        let users = self.store.users.lock().unwrap();
        let ratings = self.store.ratings.lock().unwrap();
        self.store
            .services
            .lock()
            .unwrap()
            .values()
            .map(|service| {
                let supplier = users.get(&service.supplier_id.as_uuid()).ok_or_else(|| {
                    ServiceRepositoryError::supplier_missing(service.supplier_id.to_string())
                })?;
                Ok(ServiceRecord {
                    service: service.clone(),
                    supplier_name: supplier.name.clone(),
                    supplier_email: supplier.email.clone(),
                    ratings: ratings.get(&service.id).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct InMemoryBookingRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryBookingRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    fn details(&self, booking: Booking) -> Result<BookingDetails, BookingRepositoryError> {
        let services = self.store.services.lock().unwrap();
        let users = self.store.users.lock().unwrap();
        let service = services
            .get(&booking.service_id)
            .ok_or_else(|| BookingRepositoryError::query("booking references a missing service"))?;
        let supplier = users
            .get(&service.supplier_id.as_uuid())
            .ok_or_else(|| BookingRepositoryError::supplier_missing(service.supplier_id.to_string()))?;
        let client = users
            .get(&booking.client_id.as_uuid())
            .ok_or_else(|| BookingRepositoryError::query("booking references a missing client"))?;
        Ok(BookingDetails {
            booking,
            service: BookedServiceSummary::from_service(service, contact(supplier)),
            client: contact(client),
        })
    }

    /// Guard and mutate a booking under one `bookings` lock, so concurrent
    /// decisions serialize the way the SQL adapter's row lock does. An error
    /// from `apply` leaves the booking untouched.
    fn decide_pending<F>(&self, id: Uuid, apply: F) -> Result<Booking, BookingRepositoryError>
    where
        F: FnOnce(&mut Booking) -> Result<(), BookingRepositoryError>,
    {
        let mut bookings = self.store.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(&id)
            .ok_or_else(|| BookingRepositoryError::booking_missing(id.to_string()))?;
        if booking.status != BookingStatus::Pending {
            return Err(BookingRepositoryError::not_pending(
                id.to_string(),
                booking.status.to_string(),
            ));
        }
        apply(booking)?;
        booking.updated_at = self.store.next_timestamp();
        Ok(booking.clone())
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<BookingDetails, BookingRepositoryError> {
        let now = self.store.next_timestamp();
        let created = Booking {
            id: Uuid::new_v4(),
            service_id: booking.service_id,
            client_id: booking.client_id,
            booking_date: booking.booking_date,
            notes: booking.notes,
            total_amount: booking.total_amount,
            status: BookingStatus::Pending,
            payment_verified: false,
            payment_proof: booking.payment_proof,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.store
            .bookings
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        self.details(created)
    }

    async fn find_details(
        &self,
        id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError> {
        let booking = self.store.bookings.lock().unwrap().get(&id).cloned();
        booking.map(|booking| self.details(booking)).transpose()
    }

    async fn list(&self) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let bookings: Vec<Booking> =
            self.store.bookings.lock().unwrap().values().cloned().collect();
        bookings
            .into_iter()
            .map(|booking| self.details(booking))
            .collect()
    }

    async fn verify_payment(
        &self,
        id: Uuid,
        supplier_credit: Decimal,
    ) -> Result<BookingDetails, BookingRepositoryError> {
        let booking = self.decide_pending(id, |booking| {
            let supplier_id = self
                .store
                .services
                .lock()
                .unwrap()
                .get(&booking.service_id)
                .map(|service| service.supplier_id)
                .ok_or_else(|| {
                    BookingRepositoryError::query("booking references a missing service")
                })?;
            let mut users = self.store.users.lock().unwrap();
            let supplier = users.get_mut(&supplier_id.as_uuid()).ok_or_else(|| {
                BookingRepositoryError::supplier_missing(supplier_id.to_string())
            })?;
            supplier.balance += supplier_credit;
            booking.status = BookingStatus::Confirmed;
            booking.payment_verified = true;
            Ok(())
        })?;
        self.details(booking)
    }

    async fn reject_payment(
        &self,
        id: Uuid,
        reason: String,
    ) -> Result<BookingDetails, BookingRepositoryError> {
        let booking = self.decide_pending(id, |booking| {
            booking.status = BookingStatus::Cancelled;
            booking.rejection_reason = Some(reason);
            Ok(())
        })?;
        self.details(booking)
    }
}

#[derive(Clone)]
pub struct InMemorySocialRepository {
    store: Arc<InMemoryStore>,
}

impl InMemorySocialRepository {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SocialRepository for InMemorySocialRepository {
    async fn insert(&self, post: NewPost) -> Result<PostDetails, SocialRepositoryError> {
        let author = self
            .store
            .users
            .lock()
            .unwrap()
            .get(&post.author_id.as_uuid())
            .cloned()
            .ok_or_else(|| SocialRepositoryError::author_missing(post.author_id.to_string()))?;
        let created = SocialPost {
            id: Uuid::new_v4(),
            author_id: post.author_id,
            content: post.content,
            images: post.images,
            is_promotion: post.is_promotion,
            likes: 0,
            created_at: self.store.next_timestamp(),
        };
        self.store.posts.lock().unwrap().push(created.clone());
        Ok(PostDetails {
            post: created,
            author: AuthorSummary {
                name: author.name,
                role: author.role,
            },
        })
    }

    async fn list(
        &self,
        kind: FeedKind,
        limit: usize,
    ) -> Result<Vec<PostDetails>, SocialRepositoryError> {
        let users = self.store.users.lock().unwrap();
        let mut posts: Vec<SocialPost> = self
            .store
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|post| kind.admits(post.is_promotion))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
            .into_iter()
            .take(limit)
            .map(|post| {
                let author = users.get(&post.author_id.as_uuid()).ok_or_else(|| {
                    SocialRepositoryError::author_missing(post.author_id.to_string())
                })?;
                Ok(PostDetails {
                    author: AuthorSummary {
                        name: author.name.clone(),
                        role: author.role,
                    },
                    post,
                })
            })
            .collect()
    }
}

/// Wire the real domain services over the in-memory doubles.
pub fn http_state(store: &Arc<InMemoryStore>) -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new(store.clone()));
    let services = Arc::new(InMemoryServiceRepository::new(store.clone()));
    let bookings = Arc::new(InMemoryBookingRepository::new(store.clone()));
    let posts = Arc::new(InMemorySocialRepository::new(store.clone()));

    HttpState {
        accounts: Arc::new(AccountService::new(users)),
        catalogue: Arc::new(CatalogueService::new(services.clone())),
        bookings: Arc::new(BookingService::new(bookings.clone(), services)),
        payments: Arc::new(PaymentService::new(bookings)),
        social: Arc::new(SocialService::new(posts)),
    }
}

/// Build the full API app backed by the given store.
pub async fn init_app(
    store: &Arc<InMemoryStore>,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse<
        impl actix_web::body::MessageBody<Error: std::fmt::Debug> + Unpin,
    >,
    Error = actix_web::Error,
> {
    let session = SessionMiddleware::builder(
        CookieSessionStore::default(),
        Key::from(&[0u8; 64]),
    )
    .cookie_secure(false)
    .build();

    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(store)))
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(auth::register)
                    .service(auth::login)
                    .service(services::list_services)
                    .service(services::create_service)
                    .service(bookings::create_booking)
                    .service(bookings::list_bookings)
                    .service(payments::list_payments)
                    .service(payments::decide_payment)
                    .service(events::list_events)
                    .service(social::list_feed)
                    .service(social::create_post),
            ),
    )
    .await
}
