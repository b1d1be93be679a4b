//! User account domain service.
//!
//! Verifies login tokens through the [`IdentityVerifier`] port and keeps user
//! records in the [`UserRepository`]. A first successful login registers the
//! user.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    IdentityVerifier, IdentityVerifierError, LoginService, UserAccountCommand, UserAccountError,
    UserAccountQuery, UserRepository, UserRepositoryError,
};
use crate::domain::{
    DisplayName, Email, Error, LoginCredentials, NotificationToken, User, UserId,
};

/// User account service implementing [`LoginService`], [`UserAccountCommand`]
/// and [`UserAccountQuery`].
pub struct UserAccountService<U, V: ?Sized> {
    users: Arc<U>,
    verifier: Arc<V>,
}

impl<U, V: ?Sized> Clone for UserAccountService<U, V> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            verifier: Arc::clone(&self.verifier),
        }
    }
}

impl<U, V: ?Sized> UserAccountService<U, V> {
    /// Create a new service.
    pub fn new(users: Arc<U>, verifier: Arc<V>) -> Self {
        Self { users, verifier }
    }
}

fn map_user_error(
    operation: &'static str,
) -> impl FnOnce(UserRepositoryError) -> UserAccountError {
    move |error| match error {
        UserRepositoryError::Connection { message } => {
            UserAccountError::store_unavailable(operation, message)
        }
        UserRepositoryError::Query { message } => {
            UserAccountError::store_failure(operation, message)
        }
        UserRepositoryError::DuplicateEmail { email } => UserAccountError::duplicate_email(email),
    }
}

fn map_verifier_error(error: IdentityVerifierError) -> Error {
    match error {
        IdentityVerifierError::Rejected { .. } => Error::unauthorized("invalid credentials"),
        IdentityVerifierError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

impl<U, V> UserAccountService<U, V>
where
    U: UserRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn find_or_register(
        &self,
        email: Email,
        display_name: DisplayName,
    ) -> Result<User, UserAccountError> {
        if let Some(existing) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error("authenticate"))?
        {
            return Ok(existing);
        }

        match self.register_user(email.clone(), display_name).await {
            Ok(user) => Ok(user),
            // A concurrent first login registered the same email.
            Err(UserAccountError::DuplicateEmail { .. }) => self
                .users
                .find_by_email(&email)
                .await
                .map_err(map_user_error("authenticate"))?
                .ok_or_else(|| UserAccountError::duplicate_email(email.as_ref())),
            Err(other) => Err(other),
        }
    }
}

#[async_trait]
impl<U, V> LoginService for UserAccountService<U, V>
where
    U: UserRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let identity = self
            .verifier
            .verify(credentials)
            .await
            .map_err(map_verifier_error)?;
        if &identity.email != credentials.email() {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let user = self
            .find_or_register(identity.email, identity.display_name)
            .await?;
        Ok(user.id().clone())
    }
}

#[async_trait]
impl<U, V> UserAccountCommand for UserAccountService<U, V>
where
    U: UserRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn register_user(
        &self,
        email: Email,
        display_name: DisplayName,
    ) -> Result<User, UserAccountError> {
        let user = User::new(UserId::random(), display_name, email);
        self.users
            .insert(&user)
            .await
            .map_err(map_user_error("register_user"))?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn update_notification_token(
        &self,
        user: &UserId,
        token: Option<NotificationToken>,
    ) -> Result<User, UserAccountError> {
        let cleared = token.is_none();
        let updated = self
            .users
            .set_notification_token(user, token)
            .await
            .map_err(map_user_error("update_notification_token"))?
            .ok_or_else(|| UserAccountError::not_found(user.as_ref()))?;
        info!(user_id = %user, cleared, "notification token updated");
        Ok(updated)
    }
}

#[async_trait]
impl<U, V> UserAccountQuery for UserAccountService<U, V>
where
    U: UserRepository,
    V: IdentityVerifier + ?Sized,
{
    async fn fetch_user(&self, user: &UserId) -> Result<User, UserAccountError> {
        self.users
            .find_by_id(user)
            .await
            .map_err(map_user_error("fetch_user"))?
            .ok_or_else(|| UserAccountError::not_found(user.as_ref()))
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
