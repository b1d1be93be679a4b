//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so the
//! in-crate test utilities are not visible here. This module wires the real
//! services over the in-memory store and records every push instead of
//! sending it.

#![expect(
    dead_code,
    reason = "each integration test crate uses a different subset of helpers"
)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::DefaultClock;
use unblock::domain::catalog::{Brand, Color, Country, NotificationKind};
use unblock::domain::ports::{
    CarRegistryCommand, FixtureIdentityVerifier, PushTransport, PushTransportError,
    RegisterCarRequest, UserAccountCommand,
};
use unblock::domain::{
    BlockingRelationService, Car, CarRegistryService, DisplayName, Email, NotificationToken,
    PlateNumber, PushNotification, PushNotificationDispatcher, User, UserAccountService,
};
use unblock::inbound::http::state::{HttpState, HttpStatePorts};
use unblock::outbound::memory::InMemoryStore;

pub type Accounts = UserAccountService<InMemoryStore, FixtureIdentityVerifier>;
pub type Registry = CarRegistryService<InMemoryStore, InMemoryStore, InMemoryStore>;
pub type Graph = BlockingRelationService<InMemoryStore, InMemoryStore>;

/// Push transport remembering every notification it was asked to send.
#[derive(Default, Clone)]
pub struct RecordingPushTransport {
    sent: Arc<Mutex<Vec<PushNotification>>>,
}

impl RecordingPushTransport {
    pub fn sent(&self) -> Vec<PushNotification> {
        self.sent.lock().expect("recorder lock").clone()
    }

    pub fn sent_of(&self, kind: NotificationKind) -> Vec<PushNotification> {
        self.sent()
            .into_iter()
            .filter(|push| push.kind == kind)
            .collect()
    }
}

#[async_trait]
impl PushTransport for RecordingPushTransport {
    async fn send(&self, notification: &PushNotification) -> Result<(), PushTransportError> {
        self.sent
            .lock()
            .expect("recorder lock")
            .push(notification.clone());
        Ok(())
    }
}

/// Push transport whose provider is always unreachable.
pub struct UnreachablePushTransport;

#[async_trait]
impl PushTransport for UnreachablePushTransport {
    async fn send(&self, _notification: &PushNotification) -> Result<(), PushTransportError> {
        Err(PushTransportError::transport("connection refused"))
    }
}

/// The full service graph over one shared in-memory store.
pub struct World {
    pub accounts: Arc<Accounts>,
    pub registry: Arc<Registry>,
    pub graph: Arc<Graph>,
    pub push: RecordingPushTransport,
}

impl World {
    pub fn new() -> Self {
        let push = RecordingPushTransport::default();
        Self::assemble(push.clone(), Arc::new(push))
    }

    /// Services whose notifications go through `transport`. Nothing is
    /// recorded in [`World::push`].
    pub fn with_transport(transport: Arc<dyn PushTransport>) -> Self {
        Self::assemble(RecordingPushTransport::default(), transport)
    }

    fn assemble(push: RecordingPushTransport, transport: Arc<dyn PushTransport>) -> Self {
        let store = Arc::new(InMemoryStore::new());

        let accounts = Arc::new(UserAccountService::new(
            Arc::clone(&store),
            Arc::new(FixtureIdentityVerifier),
        ));
        let registry = Arc::new(CarRegistryService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
        ));
        let dispatcher = Arc::new(PushNotificationDispatcher::new(
            Arc::clone(&store),
            transport,
        ));
        let graph = Arc::new(BlockingRelationService::new(
            Arc::clone(&store),
            store,
            dispatcher,
            Arc::new(DefaultClock),
        ));

        Self {
            accounts,
            registry,
            graph,
            push,
        }
    }

    /// Handler state exposing the same services the domain tests drive.
    pub fn http_state(&self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: self.accounts.clone(),
            accounts: self.accounts.clone(),
            accounts_query: self.accounts.clone(),
            cars: self.registry.clone(),
            cars_query: self.registry.clone(),
            relations: self.graph.clone(),
            relations_query: self.graph.clone(),
        })
    }

    pub async fn car(&self, plate: &str) -> Car {
        self.registry
            .register_car(RegisterCarRequest {
                plate_number: PlateNumber::new(plate).expect("valid plate"),
                country: Country::Israel,
                brand: Brand::Mazda,
                model: "3".to_owned(),
                color: Color::White,
                license_expiry: None,
            })
            .await
            .expect("car registers")
    }

    /// Register a driver with a push token and link them to `car`.
    pub async fn owner_of(&self, car: &Car, name: &str) -> User {
        let user = self
            .accounts
            .register_user(
                Email::new(format!("{name}@example.org")).expect("valid email"),
                DisplayName::new(name).expect("valid display name"),
            )
            .await
            .expect("user registers");
        let user = self
            .accounts
            .update_notification_token(
                user.id(),
                Some(NotificationToken::new(format!("token-{name}")).expect("valid token")),
            )
            .await
            .expect("token stored");
        self.registry
            .link_owner(user.id(), car.id)
            .await
            .expect("owner linked");
        user
    }
}
