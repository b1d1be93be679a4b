//! PostgreSQL-backed `CarRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::catalog::{CatalogEntry, Country};
use crate::domain::ports::{CarRepository, CarRepositoryError};
use crate::domain::{Car, CarId, PlateNumber};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error};
use super::models::{CarRow, NewCarRow};
use super::pool::{DbPool, PoolError};
use super::schema::cars;

/// Diesel implementation of the [`CarRepository`] port.
#[derive(Clone)]
pub struct DieselCarRepository {
    pool: DbPool,
}

impl DieselCarRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CarRepositoryError {
    CarRepositoryError::connection(error.into_message())
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> CarRepositoryError {
    move |error| match classify_diesel_error(error, operation) {
        StoreFailure::Connection(message) => CarRepositoryError::connection(message),
        StoreFailure::UniqueViolation(constraint) => CarRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unnamed constraint")
        )),
        StoreFailure::Query(message) => CarRepositoryError::query(message),
    }
}

fn to_car(row: CarRow) -> Result<Car, CarRepositoryError> {
    Car::try_from(row).map_err(CarRepositoryError::query)
}

#[async_trait]
impl CarRepository for DieselCarRepository {
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(cars::table)
            .values(NewCarRow::from(car))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| match classify_diesel_error(error, "insert_car") {
                StoreFailure::UniqueViolation(_) => CarRepositoryError::duplicate_natural_key(
                    car.plate_number.as_ref(),
                    car.country.to_code(),
                ),
                StoreFailure::Connection(message) => CarRepositoryError::connection(message),
                StoreFailure::Query(message) => CarRepositoryError::query(message),
            })
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CarRow> = cars::table
            .filter(cars::id.eq(id.as_uuid()))
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find_car_by_id"))?;

        row.map(to_car).transpose()
    }

    async fn find_by_natural_key(
        &self,
        plate_number: &PlateNumber,
        country: Country,
    ) -> Result<Option<Car>, CarRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CarRow> = cars::table
            .filter(cars::plate_number.eq(plate_number.as_ref()))
            .filter(cars::country.eq(country.to_code()))
            .select(CarRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error("find_car_by_natural_key"))?;

        row.map(to_car).transpose()
    }

    async fn find_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, CarRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows: Vec<CarRow> = cars::table
            .filter(cars::id.eq_any(uuids))
            .select(CarRow::as_select())
            .order_by(cars::plate_number.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error("find_cars_by_ids"))?;

        rows.into_iter().map(to_car).collect()
    }
}
