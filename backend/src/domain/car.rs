//! Car identity and registration data.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::catalog::{Brand, Color, Country};

/// Validation errors raised while constructing car values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarValidationError {
    #[error("plate number must not be empty")]
    EmptyPlateNumber,
    #[error("car id must be a valid UUID")]
    InvalidId,
}

/// Surrogate identifier of a registered car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(Uuid);

impl CarId {
    /// Parse a car id from its textual UUID form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, CarValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| CarValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Licence plate as printed on the car, trimmed of surrounding whitespace.
///
/// Plates are compared verbatim; no per-country format is enforced.
///
/// # Examples
/// ```
/// use unblock::domain::PlateNumber;
///
/// let plate = PlateNumber::new("  12-345-67 ").expect("non-blank plate");
/// assert_eq!(plate.as_ref(), "12-345-67");
/// assert!(PlateNumber::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateNumber(String);

impl PlateNumber {
    /// Validate and construct a plate number.
    pub fn new(plate: impl AsRef<str>) -> Result<Self, CarValidationError> {
        let trimmed = plate.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CarValidationError::EmptyPlateNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PlateNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered car.
///
/// ## Invariants
/// - `(plate_number, country)` is unique across the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: CarId,
    pub plate_number: PlateNumber,
    pub country: Country,
    pub brand: Brand,
    /// Free-text model name; may be empty.
    pub model: String,
    pub color: Color,
    pub license_expiry: Option<DateTime<Utc>>,
}

impl Car {
    /// Whether this car carries the given natural key.
    pub fn has_natural_key(&self, plate_number: &PlateNumber, country: Country) -> bool {
        &self.plate_number == plate_number && self.country == country
    }
}
