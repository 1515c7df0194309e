//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{
    AccountService, BookingService, CatalogueService, PaymentService, SocialService,
};
use backend::inbound::http::auth::{login, register};
use backend::inbound::http::bookings::{create_booking, list_bookings};
use backend::inbound::http::events::list_events;
use backend::inbound::http::health;
use backend::inbound::http::payments::{decide_payment, list_payments};
use backend::inbound::http::services::{create_service, list_services};
use backend::inbound::http::social::{create_post, list_feed};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselServiceRepository, DieselSocialRepository,
    DieselUserRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the domain services onto the Diesel adapters.
fn build_http_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let services = Arc::new(DieselServiceRepository::new(pool.clone()));
    let bookings = Arc::new(DieselBookingRepository::new(pool.clone()));
    let posts = Arc::new(DieselSocialRepository::new(pool.clone()));

    HttpState {
        accounts: Arc::new(AccountService::new(users)),
        catalogue: Arc::new(CatalogueService::new(services.clone())),
        bookings: Arc::new(BookingService::new(bookings.clone(), services)),
        payments: Arc::new(PaymentService::new(bookings)),
        social: Arc::new(SocialService::new(posts)),
    }
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("id".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(list_services)
        .service(create_service)
        .service(create_booking)
        .service(list_bookings)
        .service(list_payments)
        .service(decide_payment)
        .service(list_events)
        .service(list_feed)
        .service(create_post);

    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(health::scope());

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the given configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool,
    } = config;

    let http_state = web::Data::new(build_http_state(&db_pool));

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
