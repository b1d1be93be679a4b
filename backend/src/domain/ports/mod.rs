//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are consumed by
//! inbound adapters. Driven ports (`*Repository`, [`PushTransport`],
//! [`IdentityVerifier`], [`NotificationDispatcher`]) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod blocking_relation_repository;
mod blocking_relations_command;
mod blocking_relations_query;
mod car_registry_command;
mod car_registry_query;
mod car_repository;
mod identity_verifier;
mod login_service;
mod notification_dispatcher;
mod push_transport;
mod user_account_command;
mod user_account_query;
mod user_car_repository;
mod user_repository;

#[cfg(test)]
pub use blocking_relation_repository::MockBlockingRelationRepository;
pub use blocking_relation_repository::{
    BlockingRelationRepository, BlockingRelationRepositoryError,
};
#[cfg(test)]
pub use blocking_relations_command::MockBlockingRelationsCommand;
pub use blocking_relations_command::{BlockingRelationError, BlockingRelationsCommand};
#[cfg(test)]
pub use blocking_relations_query::MockBlockingRelationsQuery;
pub use blocking_relations_query::BlockingRelationsQuery;
#[cfg(test)]
pub use car_registry_command::MockCarRegistryCommand;
pub use car_registry_command::{CarRegistryCommand, CarRegistryError, RegisterCarRequest};
#[cfg(test)]
pub use car_registry_query::MockCarRegistryQuery;
pub use car_registry_query::CarRegistryQuery;
#[cfg(test)]
pub use car_repository::MockCarRepository;
pub use car_repository::{CarRepository, CarRepositoryError};
#[cfg(test)]
pub use identity_verifier::MockIdentityVerifier;
pub use identity_verifier::{
    FIXTURE_ID_TOKEN, FixtureIdentityVerifier, IdentityVerifier, IdentityVerifierError,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use notification_dispatcher::MockNotificationDispatcher;
pub use notification_dispatcher::NotificationDispatcher;
#[cfg(test)]
pub use push_transport::MockPushTransport;
pub use push_transport::{PushTransport, PushTransportError};
#[cfg(test)]
pub use user_account_command::MockUserAccountCommand;
pub use user_account_command::{UserAccountCommand, UserAccountError};
#[cfg(test)]
pub use user_account_query::MockUserAccountQuery;
pub use user_account_query::UserAccountQuery;
#[cfg(test)]
pub use user_car_repository::MockUserCarRepository;
pub use user_car_repository::{UserCarRepository, UserCarRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
