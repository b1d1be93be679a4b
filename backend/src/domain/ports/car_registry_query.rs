//! Driving port for reading cars and ownership.

use async_trait::async_trait;

use crate::domain::catalog::Country;
use crate::domain::{Car, CarId, PlateNumber, User, UserId};

use super::CarRegistryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRegistryQuery: Send + Sync {
    /// Find a car by natural key.
    async fn find_car(
        &self,
        plate_number: &PlateNumber,
        country: Country,
    ) -> Result<Car, CarRegistryError>;

    /// Find a car by surrogate id.
    async fn find_car_by_id(&self, car: CarId) -> Result<Car, CarRegistryError>;

    /// Owners of a car; empty when the car is ownerless.
    async fn owners_of(&self, car: CarId) -> Result<Vec<User>, CarRegistryError>;

    /// Cars owned by a user.
    async fn cars_of(&self, user: &UserId) -> Result<Vec<Car>, CarRegistryError>;
}
