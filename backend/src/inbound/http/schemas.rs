//! OpenAPI schemas for domain types.
//!
//! Domain types do not derive `ToSchema`; these mirrors are registered with
//! utoipa in their place.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with existing state, e.g. a duplicate car.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store or another dependency is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "car 12-345-67 is already recorded as blocking 98-765-43")]
    message: String,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "0f4b7c2e-6a1d-4d93-9a55-1f0e7d2c9b11")]
    trace_id: Option<String>,
    /// Machine-readable context such as the offending `field`.
    details: Option<serde_json::Value>,
}
