//! Driving port for login.
//!
//! Inbound adapters call it to turn verified credentials into a user id
//! without knowing how identities are checked or where users live.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the id of the (possibly new) user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
