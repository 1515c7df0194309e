//! Session helpers keeping handlers free of framework-specific logic.
//!
//! A thin wrapper around Actix sessions exposing domain-friendly operations:
//! persist the logged-in user, read it back, and gate handlers on a role.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Role, UserId, UserProfile};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ROLE_KEY: &str = "role";

/// Authenticated session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser {
    /// Logged-in user id.
    pub id: UserId,
    /// Role recorded at login.
    pub role: Role,
}

/// Newtype wrapper exposing higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in the session cookie.
    pub fn persist_user(&self, profile: &UserProfile) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, profile.id.to_string())
            .and_then(|()| self.0.insert(ROLE_KEY, profile.role))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The logged-in user, if the session holds a valid one.
    pub fn user(&self) -> Result<Option<SessionUser>, Error> {
        let read_error =
            |error| Error::internal(format!("failed to read session: {error}"));
        let Some(raw_id) = self.0.get::<String>(USER_ID_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        let Some(role) = self.0.get::<Role>(ROLE_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        match UserId::parse(&raw_id) {
            Ok(id) => Ok(Some(SessionUser { id, role })),
            Err(error) => {
                tracing::warn!(%error, "invalid user id in session cookie");
                Ok(None)
            }
        }
    }

    /// Require a logged-in user or fail with `401 Unauthorized`.
    pub fn require_user(&self) -> Result<SessionUser, Error> {
        self.user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require a logged-in user with the given role; `403 Forbidden` for a
    /// logged-in user holding any other role.
    pub fn require_role(&self, role: Role) -> Result<SessionUser, Error> {
        let user = self.require_user()?;
        if user.role == role {
            Ok(user)
        } else {
            Err(Error::forbidden(format!("{role} role required")))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
