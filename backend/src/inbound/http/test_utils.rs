//! Test helpers for inbound HTTP components.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::test as actix_test;
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{
    FIXTURE_ID_TOKEN, FixtureIdentityVerifier, PushTransport, PushTransportError,
};
use crate::domain::{
    BlockingRelationService, CarRegistryService, PushNotification, PushNotificationDispatcher,
    UserAccountService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock pinned to a single instant.
pub struct FixedClock;

impl FixedClock {
    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Self::instant().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Push transport remembering every notification it was asked to send.
#[derive(Default, Clone)]
pub struct RecordingPushTransport {
    sent: Arc<Mutex<Vec<PushNotification>>>,
}

impl RecordingPushTransport {
    pub fn sent(&self) -> Vec<PushNotification> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PushTransport for RecordingPushTransport {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushTransportError> {
        self.sent
            .lock()
            .map_err(|_| PushTransportError::transport("recorder poisoned"))?
            .push(notification.clone());
        Ok(())
    }
}

/// Handler state wired to the real services over an in-memory store.
pub struct TestHarness {
    pub state: HttpState,
    pub store: InMemoryStore,
    pub push: RecordingPushTransport,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let push = RecordingPushTransport::default();
        let shared = Arc::new(store.clone());

        let accounts = Arc::new(UserAccountService::new(
            Arc::clone(&shared),
            Arc::new(FixtureIdentityVerifier),
        ));
        let cars = Arc::new(CarRegistryService::new(
            Arc::clone(&shared),
            Arc::clone(&shared),
            Arc::clone(&shared),
        ));
        let dispatcher = Arc::new(PushNotificationDispatcher::new(
            Arc::clone(&shared),
            Arc::new(push.clone()),
        ));
        let relations = Arc::new(BlockingRelationService::new(
            Arc::clone(&shared),
            Arc::clone(&shared),
            dispatcher,
            Arc::new(FixedClock),
        ));

        let state = HttpState::new(HttpStatePorts {
            login: accounts.clone(),
            accounts: accounts.clone(),
            accounts_query: accounts,
            cars: cars.clone(),
            cars_query: cars,
            relations: relations.clone(),
            relations_query: relations,
        });
        Self { state, store, push }
    }
}

/// Sign in through `POST /api/v1/login` and return the session cookie.
pub async fn login_cookie<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "email": email, "idToken": FIXTURE_ID_TOKEN }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
