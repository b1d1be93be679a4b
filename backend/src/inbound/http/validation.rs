//! Shared validation helpers for inbound HTTP adapters.

use std::borrow::Borrow;
use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::catalog::{CatalogEntry, CatalogError};
use crate::domain::{CarId, Error, PlateNumber};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    InvalidCode,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidCode => "invalid_code",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Display) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.to_string(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, reason: impl Display) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} is invalid: {reason}"))
        .with_value(ErrorCode::InvalidValue, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        let name = field.as_str();
        ValidationError::new(field, format!("{name} must be a valid UUID"))
            .with_value(ErrorCode::InvalidUuid, value)
    })
}

pub(crate) fn parse_car_id(value: &str, field: FieldName) -> Result<CarId, Error> {
    parse_uuid(value, field).map(CarId::from_uuid)
}

pub(crate) fn parse_plate_number(value: &str, field: FieldName) -> Result<PlateNumber, Error> {
    PlateNumber::new(value).map_err(|err| invalid_value_error(field, value, err))
}

/// Resolve a catalog code, reporting the offending field on failure.
pub(crate) fn resolve_code<T, Q>(code: &Q, field: FieldName) -> Result<T, Error>
where
    T: CatalogEntry,
    T::Code: Borrow<Q>,
    Q: Hash + Eq + Display + ?Sized,
{
    T::resolve(code).map_err(|err| match err {
        CatalogError::InvalidCode { .. } => {
            let name = field.as_str();
            ValidationError::new(field, format!("{name} is not a known {} code", T::NAME))
                .with_value(ErrorCode::InvalidCode, code)
        }
        other => Error::from(other),
    })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| {
                    let name = field.as_str();
                    ValidationError::new(field, format!("{name} must be an RFC 3339 timestamp"))
                        .with_value(ErrorCode::InvalidTimestamp, raw)
                })
        })
        .transpose()
}
