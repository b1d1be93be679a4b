//! Driving port for car registration and ownership changes.
//!
//! Inbound adapters call this port with already-validated domain values and
//! receive [`CarRegistryError`] on failure; the HTTP adapter converts those
//! into the shared [`Error`] envelope.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::catalog::{Brand, Color, Country};
use crate::domain::{Car, CarId, Error, PlateNumber, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by the car registry.
    pub enum CarRegistryError {
        /// No car matches the given id or natural key.
        CarNotFound { car: String } => "car {car} not found",
        /// No user matches the given id.
        UserNotFound { user_id: String } => "user {user_id} not found",
        /// A car with the same plate and country is already registered.
        DuplicateCar { plate_number: String, country: String } =>
            "car {plate_number} ({country}) is already registered",
        /// The store is unreachable.
        StoreUnavailable { operation: String, message: String } =>
            "{operation}: store unavailable: {message}",
        /// The store failed while executing the operation.
        StoreFailure { operation: String, message: String } =>
            "{operation}: store failure: {message}",
    }
}

impl From<CarRegistryError> for Error {
    fn from(value: CarRegistryError) -> Self {
        let message = value.to_string();
        match value {
            CarRegistryError::CarNotFound { .. } | CarRegistryError::UserNotFound { .. } => {
                Self::not_found(message)
            }
            CarRegistryError::DuplicateCar {
                plate_number,
                country,
            } => Self::conflict(message).with_details(json!({
                "code": "duplicate_car",
                "plateNumber": plate_number,
                "country": country,
            })),
            CarRegistryError::StoreUnavailable { .. } => Self::service_unavailable(message),
            CarRegistryError::StoreFailure { .. } => Self::internal(message),
        }
    }
}

/// Validated data for a new car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCarRequest {
    pub plate_number: PlateNumber,
    pub country: Country,
    pub brand: Brand,
    pub model: String,
    pub color: Color,
    pub license_expiry: Option<DateTime<Utc>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRegistryCommand: Send + Sync {
    /// Register a new car under a fresh id.
    async fn register_car(&self, request: RegisterCarRequest) -> Result<Car, CarRegistryError>;

    /// Register a new car and record `owner` as its first owner.
    ///
    /// The owner is checked before anything is written, so an unknown user
    /// leaves no car behind.
    async fn register_car_for(
        &self,
        owner: &UserId,
        request: RegisterCarRequest,
    ) -> Result<Car, CarRegistryError>;

    /// Record `user` as an owner of `car`. Linking twice is a no-op.
    async fn link_owner(&self, user: &UserId, car: CarId) -> Result<(), CarRegistryError>;
}
