//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters, and the services implementing the driving ports.
//! Types validate on construction and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Car, User, BlockingRelation: the persisted aggregates.
//! - NotificationEvent, PushNotification, DispatchReport: notification fan-out.
//! - `catalog`: code-keyed lookup tables for brands, colours, countries and
//!   notification kinds.
//! - `ports`: driving and driven port traits.

pub mod auth;
pub mod blocking;
pub mod blocking_relation_service;
pub mod car;
pub mod car_registry_service;
pub mod catalog;
pub mod error;
pub mod notification;
pub mod notification_dispatcher;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_account_service;

pub use self::auth::{LoginCredentials, LoginValidationError, VerifiedIdentity};
pub use self::blocking::{
    BlockingRelation, CarRelations, RelationChange, RelationKey, SelfBlockError, Situation,
};
pub use self::blocking_relation_service::BlockingRelationService;
pub use self::car::{Car, CarId, CarValidationError, PlateNumber};
pub use self::car_registry_service::CarRegistryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{DispatchReport, DispatchStatus, NotificationEvent, PushNotification};
pub use self::notification_dispatcher::PushNotificationDispatcher;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DISPLAY_NAME_MAX, DisplayName, Email, NotificationToken, User, UserId, UserValidationError,
};
pub use self::user_account_service::UserAccountService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use unblock::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
