//! PostgreSQL-backed `UserCarRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserCarRepository, UserCarRepositoryError};
use crate::domain::{Car, CarId, User, UserId};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{CarRow, NewUserCarRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{cars, user_cars, users};

/// Diesel implementation of the [`UserCarRepository`] port.
#[derive(Clone)]
pub struct DieselUserCarRepository {
    pool: DbPool,
}

impl DieselUserCarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserCarRepositoryError {
    UserCarRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> UserCarRepositoryError {
    move |error| match classify_diesel_error(error, operation) {
        StoreFailure::Connection(message) => UserCarRepositoryError::connection(message),
        StoreFailure::UniqueViolation(_) => {
            UserCarRepositoryError::query(format!("{operation}: unexpected unique violation"))
        }
        StoreFailure::Query(message) => UserCarRepositoryError::query(message),
    }
}

#[async_trait]
impl UserCarRepository for DieselUserCarRepository {
    async fn link(&self, user: &UserId, car: CarId) -> Result<bool, UserCarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let inserted = diesel::insert_into(user_cars::table)
            .values(NewUserCarRow {
                user_id: *user.as_uuid(),
                car_id: *car.as_uuid(),
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error("link_owner"))?;

        Ok(inserted > 0)
    }

    async fn owners_of(&self, car: CarId) -> Result<Vec<User>, UserCarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .inner_join(user_cars::table)
            .filter(user_cars::car_id.eq(car.as_uuid()))
            .select(UserRow::as_select())
            .order_by(users::display_name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("owners_of"))?;

        rows.into_iter()
            .map(|row| User::try_from(row).map_err(UserCarRepositoryError::query))
            .collect()
    }

    async fn cars_of(&self, user: &UserId) -> Result<Vec<Car>, UserCarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CarRow> = cars::table
            .inner_join(user_cars::table)
            .filter(user_cars::user_id.eq(user.as_uuid()))
            .select(CarRow::as_select())
            .order_by(cars::plate_number.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("cars_of"))?;

        rows.into_iter()
            .map(|row| Car::try_from(row).map_err(UserCarRepositoryError::query))
            .collect()
    }
}
