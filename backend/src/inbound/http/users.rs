//! Login and account handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"dana@example.org","idToken":"..."}
//! POST /api/v1/logout
//! GET /api/v1/users/me
//! PUT /api/v1/users/me/notification-token {"token":"..."}
//! GET /api/v1/users/me/cars
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, NotificationToken};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CarResponse, UserResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error};

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"dana@example.org","idToken":"eyJhbGciOi..."}`
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    /// Token issued by the identity provider.
    pub id_token: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.id_token)
    }
}

/// Body for `PUT /api/v1/users/me/notification-token`.
///
/// A missing, null or blank token clears the stored one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Verify an identity token, registering the user on first login, and
/// establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Identity provider unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    let user = state.accounts_query.fetch_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => {
            Error::invalid_request("email must look like local@domain")
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        LoginValidationError::EmptyIdToken => Error::invalid_request("idToken must not be empty")
            .with_details(json!({ "field": "idToken", "code": "empty_id_token" })),
    }
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the signed-in user's account.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts_query.fetch_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Store or clear the device token used for push notifications.
#[utoipa::path(
    put,
    path = "/api/v1/users/me/notification-token",
    request_body = NotificationTokenRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateNotificationToken",
    security(("SessionCookie" = []))
)]
#[put("/users/me/notification-token")]
pub async fn update_notification_token(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<NotificationTokenRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user_id = session.require_user_id()?;
    let token = parse_notification_token(payload.into_inner().token)?;
    let user = state
        .accounts
        .update_notification_token(&user_id, token)
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

fn parse_notification_token(raw: Option<String>) -> Result<Option<NotificationToken>, Error> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => NotificationToken::new(&raw)
            .map(Some)
            .map_err(|err| invalid_value_error(FieldName::new("token"), &raw, err)),
        _ => Ok(None),
    }
}

/// List the cars the signed-in user owns, ordered by plate number.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/cars",
    responses(
        (status = 200, description = "Owned cars", body = [CarResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Account no longer exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listMyCars",
    security(("SessionCookie" = []))
)]
#[get("/users/me/cars")]
pub async fn my_cars(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CarResponse>>> {
    let user_id = session.require_user_id()?;
    let cars = state.cars_query.cars_of(&user_id).await?;
    Ok(web::Json(cars.into_iter().map(CarResponse::from).collect()))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
