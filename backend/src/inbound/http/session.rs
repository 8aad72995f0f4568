//! Session helpers keeping handlers free of framework details.
//!
//! The cookie only carries the opaque session token. The signed-in user is
//! resolved per request through the auth adapter.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{Error, SessionToken, User};

use super::state::HttpState;

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";

/// Newtype over the Actix session exposing token-level operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the token in the session cookie.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0
            .insert(SESSION_TOKEN_KEY, token.as_str())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token stored in the cookie, if any.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match SessionToken::new(raw) {
            Ok(token) => Some(token),
            Err(error) => {
                warn!("invalid session token in cookie: {error}");
                None
            }
        }))
    }

    /// Drop the cookie's contents.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Resolve the signed-in user. Unknown and expired sessions yield `None`.
    pub async fn current_user(&self, state: &HttpState) -> Result<Option<User>, Error> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let Some((session, user)) = state.auth.get_session_and_user(&token).await? else {
            debug!("session token not recognised");
            return Ok(None);
        };
        if session.is_expired(state.clock.utc()) {
            debug!(user_id = %user.id, expires = %session.expires, "ignoring expired session");
            return Ok(None);
        }
        Ok(Some(user))
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
