//! Car registry domain service.
//!
//! Implements the car registration and ownership driving ports on top of the
//! car, user and ownership repositories.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::catalog::{CatalogEntry, Country};
use crate::domain::ports::{
    CarRegistryCommand, CarRegistryError, CarRegistryQuery, CarRepository, CarRepositoryError,
    RegisterCarRequest, UserCarRepository, UserCarRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{Car, CarId, PlateNumber, User, UserId};

/// Car registry service implementing [`CarRegistryCommand`] and
/// [`CarRegistryQuery`].
#[derive(Clone)]
pub struct CarRegistryService<C, U, O> {
    cars: Arc<C>,
    users: Arc<U>,
    ownership: Arc<O>,
}

impl<C, U, O> CarRegistryService<C, U, O> {
    /// Create a new service with the given repositories.
    pub fn new(cars: Arc<C>, users: Arc<U>, ownership: Arc<O>) -> Self {
        Self {
            cars,
            users,
            ownership,
        }
    }
}

impl<C, U, O> CarRegistryService<C, U, O>
where
    C: CarRepository,
    U: UserRepository,
    O: UserCarRepository,
{
    fn map_car_error(
        operation: &'static str,
    ) -> impl FnOnce(CarRepositoryError) -> CarRegistryError {
        move |error| match error {
            CarRepositoryError::Connection { message } => {
                CarRegistryError::store_unavailable(operation, message)
            }
            CarRepositoryError::Query { message } => {
                CarRegistryError::store_failure(operation, message)
            }
            CarRepositoryError::DuplicateNaturalKey {
                plate_number,
                country,
            } => CarRegistryError::duplicate_car(plate_number, country),
        }
    }

    fn map_user_error(
        operation: &'static str,
    ) -> impl FnOnce(UserRepositoryError) -> CarRegistryError {
        move |error| match error {
            UserRepositoryError::Connection { message } => {
                CarRegistryError::store_unavailable(operation, message)
            }
            UserRepositoryError::Query { message } => {
                CarRegistryError::store_failure(operation, message)
            }
            UserRepositoryError::DuplicateEmail { email } => CarRegistryError::store_failure(
                operation,
                format!("unexpected email clash: {email}"),
            ),
        }
    }

    fn map_ownership_error(
        operation: &'static str,
    ) -> impl FnOnce(UserCarRepositoryError) -> CarRegistryError {
        move |error| match error {
            UserCarRepositoryError::Connection { message } => {
                CarRegistryError::store_unavailable(operation, message)
            }
            UserCarRepositoryError::Query { message } => {
                CarRegistryError::store_failure(operation, message)
            }
        }
    }

    async fn require_car(
        &self,
        car: CarId,
        operation: &'static str,
    ) -> Result<Car, CarRegistryError> {
        self.cars
            .find_by_id(car)
            .await
            .map_err(Self::map_car_error(operation))?
            .ok_or_else(|| CarRegistryError::car_not_found(car.to_string()))
    }

    async fn require_user(
        &self,
        user: &UserId,
        operation: &'static str,
    ) -> Result<User, CarRegistryError> {
        self.users
            .find_by_id(user)
            .await
            .map_err(Self::map_user_error(operation))?
            .ok_or_else(|| CarRegistryError::user_not_found(user.to_string()))
    }
}

#[async_trait]
impl<C, U, O> CarRegistryCommand for CarRegistryService<C, U, O>
where
    C: CarRepository,
    U: UserRepository,
    O: UserCarRepository,
{
    async fn register_car(&self, request: RegisterCarRequest) -> Result<Car, CarRegistryError> {
        const OPERATION: &str = "register_car";

        if self
            .cars
            .find_by_natural_key(&request.plate_number, request.country)
            .await
            .map_err(Self::map_car_error(OPERATION))?
            .is_some()
        {
            return Err(CarRegistryError::duplicate_car(
                request.plate_number.as_ref(),
                request.country.to_code(),
            ));
        }

        let car = Car {
            id: CarId::random(),
            plate_number: request.plate_number,
            country: request.country,
            brand: request.brand,
            model: request.model,
            color: request.color,
            license_expiry: request.license_expiry,
        };
        self.cars
            .insert(&car)
            .await
            .map_err(Self::map_car_error(OPERATION))?;

        info!(
            car_id = %car.id,
            plate = %car.plate_number,
            country = car.country.to_code(),
            "car registered"
        );
        Ok(car)
    }

    async fn register_car_for(
        &self,
        owner: &UserId,
        request: RegisterCarRequest,
    ) -> Result<Car, CarRegistryError> {
        const OPERATION: &str = "register_car_for";

        self.require_user(owner, OPERATION).await?;
        let car = self.register_car(request).await?;
        self.ownership
            .link(owner, car.id)
            .await
            .map_err(Self::map_ownership_error(OPERATION))?;
        info!(user_id = %owner, car_id = %car.id, "owner linked");
        Ok(car)
    }

    async fn link_owner(&self, user: &UserId, car: CarId) -> Result<(), CarRegistryError> {
        const OPERATION: &str = "link_owner";

        self.require_user(user, OPERATION).await?;
        self.require_car(car, OPERATION).await?;

        let linked = self
            .ownership
            .link(user, car)
            .await
            .map_err(Self::map_ownership_error(OPERATION))?;
        if linked {
            info!(user_id = %user, car_id = %car, "owner linked");
        } else {
            debug!(user_id = %user, car_id = %car, "owner already linked");
        }
        Ok(())
    }
}

#[async_trait]
impl<C, U, O> CarRegistryQuery for CarRegistryService<C, U, O>
where
    C: CarRepository,
    U: UserRepository,
    O: UserCarRepository,
{
    async fn find_car(
        &self,
        plate_number: &PlateNumber,
        country: Country,
    ) -> Result<Car, CarRegistryError> {
        self.cars
            .find_by_natural_key(plate_number, country)
            .await
            .map_err(Self::map_car_error("find_car"))?
            .ok_or_else(|| {
                CarRegistryError::car_not_found(format!("{plate_number} ({})", country.to_code()))
            })
    }

    async fn find_car_by_id(&self, car: CarId) -> Result<Car, CarRegistryError> {
        self.require_car(car, "find_car_by_id").await
    }

    async fn owners_of(&self, car: CarId) -> Result<Vec<User>, CarRegistryError> {
        const OPERATION: &str = "owners_of";

        self.require_car(car, OPERATION).await?;
        self.ownership
            .owners_of(car)
            .await
            .map_err(Self::map_ownership_error(OPERATION))
    }

    async fn cars_of(&self, user: &UserId) -> Result<Vec<Car>, CarRegistryError> {
        const OPERATION: &str = "cars_of";

        self.require_user(user, OPERATION).await?;
        self.ownership
            .cars_of(user)
            .await
            .map_err(Self::map_ownership_error(OPERATION))
    }
}

#[cfg(test)]
#[path = "car_registry_service_tests.rs"]
mod tests;
