//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::cookie::time::Duration;
use unblock::domain::ports::{IdentityVerifier, PushTransport};
use unblock::inbound::http::session_config::SessionSettings;
use unblock::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) push: Option<Arc<dyn PushTransport>>,
    pub(crate) identity: Option<Arc<dyn IdentityVerifier>>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            session_ttl: ttl,
            bind_addr,
            db_pool: None,
            push: None,
            identity: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, every repository port is served by the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Deliver notifications through `transport` instead of logging them.
    #[must_use]
    pub fn with_push_transport(mut self, transport: Arc<dyn PushTransport>) -> Self {
        self.push = Some(transport);
        self
    }

    /// Verify login tokens with `verifier` instead of the development fixture.
    #[must_use]
    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = Some(verifier);
        self
    }
}
