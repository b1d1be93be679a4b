//! Driving port for reading user accounts.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::UserAccountError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountQuery: Send + Sync {
    /// Fetch a user by id.
    async fn fetch_user(&self, user: &UserId) -> Result<User, UserAccountError>;
}
