//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, Route, web};
use async_trait::async_trait;
use mockable::DefaultClock;

use crate::domain::ports::{FeedbackActions, FixturePageCache, MockAuthAdapter, PageCache};
use crate::domain::{
    ActionOutcome, EmailAddress, Error, FeedbackPost, FeedbackPostId, Role, SessionToken, User,
    UserId,
};

use super::session::SessionContext;
use super::session_config::SESSION_COOKIE_NAME;
use super::state::HttpState;

pub const SESSION_FIXTURE_TOKEN: &str = "fixture-session-token";

/// Session middleware with a fresh key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

pub fn fixture_user() -> User {
    User {
        id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
        name: Some("Ada Lovelace".to_owned()),
        email: EmailAddress::new("ada@example.com").expect("fixture email"),
        email_verified: None,
        image: None,
        role: Role::Default,
    }
}

/// `POST` route storing [`SESSION_FIXTURE_TOKEN`] in the session cookie.
pub fn login_route() -> Route {
    web::post().to(|session: SessionContext| async move {
        let token = SessionToken::new(SESSION_FIXTURE_TOKEN).expect("fixture token");
        session.persist_token(&token)?;
        Ok::<_, Error>(HttpResponse::Ok().finish())
    })
}

pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

pub fn state_with_auth(auth: MockAuthAdapter, feedback: Arc<ScriptedFeedback>) -> HttpState {
    state_with(auth, feedback, Arc::new(FixturePageCache))
}

pub fn state_with(
    auth: MockAuthAdapter,
    feedback: Arc<ScriptedFeedback>,
    page_cache: Arc<dyn PageCache>,
) -> HttpState {
    HttpState::new(Arc::new(auth), feedback, page_cache, Arc::new(DefaultClock))
}

/// One call observed by [`ScriptedFeedback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCall {
    pub action: &'static str,
    pub caller: Option<UserId>,
    pub post_id: Option<FeedbackPostId>,
    pub title: Option<String>,
}

/// Feedback actions answering every call with a fixed outcome.
pub struct ScriptedFeedback {
    outcome: Result<ActionOutcome, Error>,
    post: Option<FeedbackPost>,
    calls: Mutex<Vec<FeedbackCall>>,
}

impl Default for ScriptedFeedback {
    fn default() -> Self {
        Self {
            outcome: Ok(ActionOutcome::Redirect("/feedback/scripted".to_owned())),
            post: None,
            calls: Mutex::default(),
        }
    }
}

impl ScriptedFeedback {
    pub fn answering(outcome: Result<ActionOutcome, Error>) -> Self {
        Self {
            outcome,
            ..Self::default()
        }
    }

    pub fn serving(post: FeedbackPost) -> Self {
        Self {
            post: Some(post),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<FeedbackCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(
        &self,
        action: &'static str,
        caller: Option<&User>,
        post_id: Option<&FeedbackPostId>,
        title: Option<&str>,
    ) -> Result<ActionOutcome, Error> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(FeedbackCall {
                action,
                caller: caller.map(|user| user.id),
                post_id: post_id.copied(),
                title: title.map(str::to_owned),
            });
        self.outcome.clone()
    }
}

#[async_trait]
impl FeedbackActions for ScriptedFeedback {
    async fn post_feedback(
        &self,
        caller: Option<&User>,
        title: &str,
        _body: &str,
    ) -> Result<ActionOutcome, Error> {
        self.record("post_feedback", caller, None, Some(title))
    }

    async fn vote_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        self.record("vote_post", caller, Some(post_id), None)
    }

    async fn withdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        self.record("withdraw_post", caller, Some(post_id), None)
    }

    async fn unwithdraw_post(
        &self,
        caller: Option<&User>,
        post_id: &FeedbackPostId,
    ) -> Result<ActionOutcome, Error> {
        self.record("unwithdraw_post", caller, Some(post_id), None)
    }

    async fn get_post(&self, post_id: &FeedbackPostId) -> Result<Option<FeedbackPost>, Error> {
        Ok(self.post.clone().filter(|post| post.id == *post_id))
    }
}
