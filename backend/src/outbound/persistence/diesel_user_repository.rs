//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NotificationToken, User, UserId};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> UserRepositoryError {
    move |error| match classify_diesel_error(error, operation) {
        StoreFailure::Connection(message) => UserRepositoryError::connection(message),
        StoreFailure::UniqueViolation(_) => {
            UserRepositoryError::query(format!("{operation}: unexpected unique violation"))
        }
        StoreFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(UserRepositoryError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match classify_diesel_error(error, "insert_user") {
                StoreFailure::UniqueViolation(_) => {
                    UserRepositoryError::duplicate_email(user.email().as_ref())
                }
                StoreFailure::Connection(message) => UserRepositoryError::connection(message),
                StoreFailure::Query(message) => UserRepositoryError::query(message),
            })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find_user_by_id"))?;

        row.map(to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find_user_by_email"))?;

        row.map(to_user).transpose()
    }

    async fn set_notification_token(
        &self,
        id: &UserId,
        token: Option<NotificationToken>,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let token = token.as_ref().map(AsRef::<str>::as_ref);
        let row: Option<UserRow> = diesel::update(users::table.find(*id.as_uuid()))
            .set(users::notification_token.eq(token))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("set_notification_token"))?;

        row.map(to_user).transpose()
    }
}
