//! Builders wiring repository adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use unblock::domain::ports::{
    BlockingRelationRepository, CarRepository, FixtureIdentityVerifier, IdentityVerifier,
    PushTransport, UserCarRepository, UserRepository,
};
use unblock::domain::{
    BlockingRelationService, CarRegistryService, PushNotificationDispatcher, UserAccountService,
};
use unblock::inbound::http::state::{HttpState, HttpStatePorts};
use unblock::outbound::memory::InMemoryStore;
use unblock::outbound::persistence::{
    DieselBlockingRelationRepository, DieselCarRepository, DieselUserCarRepository,
    DieselUserRepository,
};
use unblock::outbound::push::LoggingPushTransport;

use super::ServerConfig;

/// One adapter per driven repository port.
struct Repositories<C, U, O, R> {
    cars: Arc<C>,
    users: Arc<U>,
    ownership: Arc<O>,
    relations: Arc<R>,
}

/// Outbound integrations shared by every store flavour.
struct Integrations {
    push: Arc<dyn PushTransport>,
    identity: Arc<dyn IdentityVerifier>,
}

fn build_ports<C, U, O, R>(repos: Repositories<C, U, O, R>, ext: Integrations) -> HttpStatePorts
where
    C: CarRepository + 'static,
    U: UserRepository + 'static,
    O: UserCarRepository + 'static,
    R: BlockingRelationRepository + 'static,
{
    let Repositories {
        cars,
        users,
        ownership,
        relations,
    } = repos;

    let accounts = Arc::new(UserAccountService::new(Arc::clone(&users), ext.identity));
    let registry = Arc::new(CarRegistryService::new(
        Arc::clone(&cars),
        users,
        Arc::clone(&ownership),
    ));
    let dispatcher = Arc::new(PushNotificationDispatcher::new(ownership, ext.push));
    let graph = Arc::new(BlockingRelationService::new(
        cars,
        relations,
        dispatcher,
        Arc::new(DefaultClock),
    ));

    HttpStatePorts {
        login: accounts.clone(),
        accounts: accounts.clone(),
        accounts_query: accounts,
        cars: registry.clone(),
        cars_query: registry,
        relations: graph.clone(),
        relations_query: graph,
    }
}

/// Build HTTP state from configuration.
///
/// Uses Diesel repositories when a pool is configured and the shared
/// in-memory store otherwise. Missing integrations fall back to the logging
/// push transport and the development identity verifier.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let push = config.push.clone().unwrap_or_else(|| {
        info!("no push endpoint configured; notifications will only be logged");
        Arc::new(LoggingPushTransport)
    });
    let identity = config.identity.clone().unwrap_or_else(|| {
        info!("no identity endpoint configured; accepting the development token");
        Arc::new(FixtureIdentityVerifier)
    });
    let ext = Integrations { push, identity };

    let ports = match &config.db_pool {
        Some(pool) => build_ports(
            Repositories {
                cars: Arc::new(DieselCarRepository::new(pool.clone())),
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                ownership: Arc::new(DieselUserCarRepository::new(pool.clone())),
                relations: Arc::new(DieselBlockingRelationRepository::new(pool.clone())),
            },
            ext,
        ),
        None => {
            info!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::new());
            build_ports(
                Repositories {
                    cars: Arc::clone(&store),
                    users: Arc::clone(&store),
                    ownership: Arc::clone(&store),
                    relations: store,
                },
                ext,
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}
