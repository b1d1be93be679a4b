//! Port for the many-to-many link between users and the cars they own.

use async_trait::async_trait;

use crate::domain::{Car, CarId, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by ownership adapters.
    pub enum UserCarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "ownership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "ownership repository query failed: {message}",
    }
}

/// Ownership links with set semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCarRepository: Send + Sync {
    /// Link `user` to `car`. Returns `false` when the link already existed.
    async fn link(&self, user: &UserId, car: CarId) -> Result<bool, UserCarRepositoryError>;

    /// Owners of `car`, ordered by display name.
    async fn owners_of(&self, car: CarId) -> Result<Vec<User>, UserCarRepositoryError>;

    /// Cars owned by `user`, ordered by plate number.
    async fn cars_of(&self, user: &UserId) -> Result<Vec<Car>, UserCarRepositoryError>;
}
