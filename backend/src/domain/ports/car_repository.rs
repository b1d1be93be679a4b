//! Port abstraction for car persistence.

use async_trait::async_trait;

use crate::domain::catalog::Country;
use crate::domain::{Car, CarId, PlateNumber};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by car repository adapters.
    pub enum CarRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "car repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "car repository query failed: {message}",
        /// Another car already carries the same plate and country.
        DuplicateNaturalKey { plate_number: String, country: String } =>
            "car {plate_number} ({country}) already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Insert a new car.
    ///
    /// Fails with [`CarRepositoryError::DuplicateNaturalKey`] when the
    /// `(plate_number, country)` pair is taken.
    async fn insert(&self, car: &Car) -> Result<(), CarRepositoryError>;

    /// Fetch a car by surrogate id.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// Fetch a car by natural key.
    async fn find_by_natural_key(
        &self,
        plate_number: &PlateNumber,
        country: Country,
    ) -> Result<Option<Car>, CarRepositoryError>;

    /// Fetch every car whose id is listed; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[CarId]) -> Result<Vec<Car>, CarRepositoryError>;
}
