//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving ports,
//! so they can be exercised without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BlockingRelationsCommand, BlockingRelationsQuery, CarRegistryCommand, CarRegistryQuery,
    LoginService, UserAccountCommand, UserAccountQuery,
};

/// Parameter object bundling every port the handlers use.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountCommand>,
    pub accounts_query: Arc<dyn UserAccountQuery>,
    pub cars: Arc<dyn CarRegistryCommand>,
    pub cars_query: Arc<dyn CarRegistryQuery>,
    pub relations: Arc<dyn BlockingRelationsCommand>,
    pub relations_query: Arc<dyn BlockingRelationsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn UserAccountCommand>,
    pub accounts_query: Arc<dyn UserAccountQuery>,
    pub cars: Arc<dyn CarRegistryCommand>,
    pub cars_query: Arc<dyn CarRegistryQuery>,
    pub relations: Arc<dyn BlockingRelationsCommand>,
    pub relations_query: Arc<dyn BlockingRelationsQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            accounts,
            accounts_query,
            cars,
            cars_query,
            relations,
            relations_query,
        } = ports;
        Self {
            login,
            accounts,
            accounts_query,
            cars,
            cars_query,
            relations,
            relations_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
