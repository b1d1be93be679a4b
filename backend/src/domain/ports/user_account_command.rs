//! Driving port for user account mutations.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email, Error, NotificationToken, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user account use-cases.
    pub enum UserAccountError {
        /// No user matches the given id.
        NotFound { user_id: String } => "user {user_id} not found",
        /// The email is already registered.
        DuplicateEmail { email: String } => "email {email} is already registered",
        /// The store is unreachable.
        StoreUnavailable { operation: String, message: String } =>
            "{operation}: store unavailable: {message}",
        /// The store failed while executing the operation.
        StoreFailure { operation: String, message: String } =>
            "{operation}: store failure: {message}",
    }
}

impl From<UserAccountError> for Error {
    fn from(value: UserAccountError) -> Self {
        let message = value.to_string();
        match value {
            UserAccountError::NotFound { .. } => Self::not_found(message),
            UserAccountError::DuplicateEmail { .. } => Self::conflict(message),
            UserAccountError::StoreUnavailable { .. } => Self::service_unavailable(message),
            UserAccountError::StoreFailure { .. } => Self::internal(message),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAccountCommand: Send + Sync {
    /// Register a user under a fresh id.
    async fn register_user(
        &self,
        email: Email,
        display_name: DisplayName,
    ) -> Result<User, UserAccountError>;

    /// Replace (or clear, with `None`) the user's push token.
    async fn update_notification_token(
        &self,
        user: &UserId,
        token: Option<NotificationToken>,
    ) -> Result<User, UserAccountError>;
}
