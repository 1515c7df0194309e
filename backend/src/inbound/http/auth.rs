//! Auth API handlers.
//!
//! ```text
//! POST /api/v1/auth/register {"name":"Sara","email":"sara@x.com","password":"..."}
//! POST /api/v1/auth/login    {"email":"sara@x.com","password":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewUser, Role, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, require_text,
};

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login email; must be unique.
    pub email: Option<String>,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Credential.
    pub password: Option<String>,
    /// `CLIENT` (default), `SUPPLIER`, or `ADMIN`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email.
    pub email: Option<String>,
    /// Credential.
    pub password: Option<String>,
}

/// Response body carrying a confirmation message and the user.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The account, without the credential.
    pub user: UserProfile,
}

fn new_user_from(payload: RegisterRequest) -> Result<NewUser, Error> {
    let role = match payload.role.as_deref().filter(|raw| !raw.trim().is_empty()) {
        None => Role::default(),
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|err| invalid_value_error(FieldName::new("role"), err.to_string()))?,
    };
    Ok(NewUser {
        name: require_text(payload.name, FieldName::new("name"))?,
        email: require_text(payload.email, FieldName::new("email"))?,
        phone: payload.phone.filter(|raw| !raw.trim().is_empty()),
        password: require_text(payload.password, FieldName::new("password"))?,
        role,
    })
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let draft = new_user_from(payload.into_inner())?;
    let user = state.accounts.register(draft).await?;
    Ok(HttpResponse::Created().json(AuthResponse {
        message: "Registration successful",
        user,
    }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = crate::domain::ports::Credentials {
        email: require_text(payload.email, FieldName::new("email"))?,
        password: require_text(payload.password, FieldName::new("password"))?,
    };
    let user = state.accounts.login(credentials).await?;
    session.persist_user(&user)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful",
        user,
    }))
}
