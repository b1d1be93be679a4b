//! Car registry handlers.
//!
//! ```text
//! POST /api/v1/cars {"plateNumber":"12-345-67","country":"IL","brand":4,...}
//! GET /api/v1/cars?plateNumber=12-345-67&country=IL
//! GET /api/v1/cars/{carId}
//! POST /api/v1/cars/{carId}/owners
//! GET /api/v1/cars/{carId}/owners
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;
use crate::domain::catalog::{Brand, Color, Country};
use crate::domain::ports::RegisterCarRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CarResponse, OwnerResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_car_id, parse_optional_rfc3339_timestamp,
    parse_plate_number, resolve_code,
};

/// Request payload for registering a car.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCarRequestBody {
    #[schema(example = "12-345-67")]
    pub plate_number: String,
    /// ISO 3166-1 alpha-2 code.
    #[schema(example = "IL")]
    pub country: String,
    #[schema(example = 4)]
    pub brand: i32,
    #[serde(default)]
    pub model: String,
    #[schema(example = 5)]
    pub color: i32,
    #[schema(format = "date-time")]
    pub license_expiry: Option<String>,
}

/// Natural-key lookup parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FindCarQuery {
    pub plate_number: Option<String>,
    pub country: Option<String>,
}

/// Path parameter naming a single car.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Path)]
pub struct CarPath {
    #[param(format = "uuid")]
    pub car_id: String,
}

fn parse_register_car_request(body: RegisterCarRequestBody) -> Result<RegisterCarRequest, Error> {
    Ok(RegisterCarRequest {
        plate_number: parse_plate_number(&body.plate_number, FieldName::new("plateNumber"))?,
        country: resolve_code::<Country, str>(body.country.trim(), FieldName::new("country"))?,
        brand: resolve_code::<Brand, _>(&body.brand, FieldName::new("brand"))?,
        model: body.model.trim().to_owned(),
        color: resolve_code::<Color, _>(&body.color, FieldName::new("color"))?,
        license_expiry: parse_optional_rfc3339_timestamp(
            body.license_expiry.as_deref(),
            FieldName::new("licenseExpiry"),
        )?,
    })
}

/// Register a car and record the caller as its first owner.
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = RegisterCarRequestBody,
    responses(
        (status = 201, description = "Car registered", body = CarResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Session user no longer exists", body = ErrorSchema),
        (status = 409, description = "Plate already registered in this country", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "registerCar",
    security(("SessionCookie" = []))
)]
#[post("/cars")]
pub async fn register_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterCarRequestBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let request = parse_register_car_request(payload.into_inner())?;
    let car = state.cars.register_car_for(&user_id, request).await?;
    info!(car_id = %car.id, user_id = %user_id, "car registered by owner");
    Ok(HttpResponse::Created().json(CarResponse::from(car)))
}

/// Find a car by plate number and country.
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    params(FindCarQuery),
    responses(
        (status = 200, description = "Matching car", body = CarResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such car", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "findCar",
    security(("SessionCookie" = []))
)]
#[get("/cars")]
pub async fn find_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<FindCarQuery>,
) -> ApiResult<web::Json<CarResponse>> {
    session.require_user_id()?;
    let FindCarQuery {
        plate_number,
        country,
    } = query.into_inner();
    let plate_field = FieldName::new("plateNumber");
    let country_field = FieldName::new("country");
    let plate_number = plate_number.ok_or_else(|| missing_field_error(plate_field))?;
    let country = country.ok_or_else(|| missing_field_error(country_field))?;

    let plate_number = parse_plate_number(&plate_number, plate_field)?;
    let country = resolve_code::<Country, str>(country.trim(), country_field)?;
    let car = state.cars_query.find_car(&plate_number, country).await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Fetch a car by id.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{carId}",
    params(CarPath),
    responses(
        (status = 200, description = "Car", body = CarResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such car", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "getCar",
    security(("SessionCookie" = []))
)]
#[get("/cars/{carId}")]
pub async fn get_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CarPath>,
) -> ApiResult<web::Json<CarResponse>> {
    session.require_user_id()?;
    let car_id = parse_car_id(&path.car_id, FieldName::new("carId"))?;
    let car = state.cars_query.find_car_by_id(car_id).await?;
    Ok(web::Json(CarResponse::from(car)))
}

/// Record the caller as an owner of an existing car. Repeating the call has
/// no further effect.
#[utoipa::path(
    post,
    path = "/api/v1/cars/{carId}/owners",
    params(CarPath),
    responses(
        (status = 204, description = "Caller is an owner"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such car", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "claimCar",
    security(("SessionCookie" = []))
)]
#[post("/cars/{carId}/owners")]
pub async fn claim_car(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CarPath>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let car_id = parse_car_id(&path.car_id, FieldName::new("carId"))?;
    state.cars.link_owner(&user_id, car_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List a car's owners, ordered by display name.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{carId}/owners",
    params(CarPath),
    responses(
        (status = 200, description = "Owners", body = [OwnerResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such car", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["cars"],
    operation_id = "listCarOwners",
    security(("SessionCookie" = []))
)]
#[get("/cars/{carId}/owners")]
pub async fn list_owners(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CarPath>,
) -> ApiResult<web::Json<Vec<OwnerResponse>>> {
    session.require_user_id()?;
    let car_id = parse_car_id(&path.car_id, FieldName::new("carId"))?;
    let owners = state.cars_query.owners_of(car_id).await?;
    Ok(web::Json(owners.into_iter().map(OwnerResponse::from).collect()))
}

#[cfg(test)]
#[path = "cars_tests.rs"]
mod tests;
