//! Blocking relation handlers.
//!
//! ```text
//! POST /api/v1/relations {"blockingCarId":"...","blockedCarId":"..."}
//! DELETE /api/v1/relations/{blockingCarId}/{blockedCarId}
//! GET /api/v1/cars/{carId}/relations
//! POST /api/v1/cars/{carId}/release-requests
//! ```
//!
//! Any signed-in driver may report or clear a relation; owning either car is
//! not required.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::cars::CarPath;
use crate::inbound::http::dto::{
    CarRelationsResponse, DispatchReportResponse, RelationChangeResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_car_id};

/// Request payload for reporting that one car blocks another.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationRequestBody {
    #[schema(format = "uuid")]
    pub blocking_car_id: String,
    #[schema(format = "uuid")]
    pub blocked_car_id: String,
}

/// Path parameters naming a directed edge.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Path)]
pub struct RelationPath {
    #[param(format = "uuid")]
    pub blocking_car_id: String,
    #[param(format = "uuid")]
    pub blocked_car_id: String,
}

/// Response for a release request.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRequestResponse {
    pub car_id: String,
    /// One report per car currently blocking the requester.
    pub notifications: Vec<DispatchReportResponse>,
}

/// Record that one car blocks another and notify both owners.
#[utoipa::path(
    post,
    path = "/api/v1/relations",
    request_body = CreateRelationRequestBody,
    responses(
        (status = 201, description = "Relation created", body = RelationChangeResponse),
        (status = 400, description = "Invalid request, self-block or unknown car", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Relation already exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "createRelation",
    security(("SessionCookie" = []))
)]
#[post("/relations")]
pub async fn create_relation(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRelationRequestBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let body = payload.into_inner();
    let blocking = parse_car_id(&body.blocking_car_id, FieldName::new("blockingCarId"))?;
    let blocked = parse_car_id(&body.blocked_car_id, FieldName::new("blockedCarId"))?;
    let change = state.relations.create_relation(blocking, blocked).await?;
    Ok(HttpResponse::Created().json(RelationChangeResponse::from(change)))
}

/// Remove a relation and tell the blocked car's owners they may leave.
#[utoipa::path(
    delete,
    path = "/api/v1/relations/{blockingCarId}/{blockedCarId}",
    params(RelationPath),
    responses(
        (status = 200, description = "Relation removed", body = RelationChangeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such relation", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "removeRelation",
    security(("SessionCookie" = []))
)]
#[delete("/relations/{blockingCarId}/{blockedCarId}")]
pub async fn remove_relation(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<RelationPath>,
) -> ApiResult<web::Json<RelationChangeResponse>> {
    session.require_user_id()?;
    let blocking = parse_car_id(&path.blocking_car_id, FieldName::new("blockingCarId"))?;
    let blocked = parse_car_id(&path.blocked_car_id, FieldName::new("blockedCarId"))?;
    let change = state.relations.remove_relation(blocking, blocked).await?;
    Ok(web::Json(RelationChangeResponse::from(change)))
}

/// List the cars a car blocks and the cars blocking it.
#[utoipa::path(
    get,
    path = "/api/v1/cars/{carId}/relations",
    params(CarPath),
    responses(
        (status = 200, description = "Relations around the car", body = CarRelationsResponse),
        (status = 400, description = "Invalid request or unknown car", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "listCarRelations",
    security(("SessionCookie" = []))
)]
#[get("/cars/{carId}/relations")]
pub async fn list_relations(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CarPath>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let car_id = parse_car_id(&path.car_id, FieldName::new("carId"))?;
    let relations = state.relations_query.relations_involving(car_id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(CarRelationsResponse::new(car_id, relations)))
}

/// Ask the owners of every car blocking this one to move.
#[utoipa::path(
    post,
    path = "/api/v1/cars/{carId}/release-requests",
    params(CarPath),
    responses(
        (status = 202, description = "Owners notified", body = ReleaseRequestResponse),
        (status = 400, description = "Invalid request or unknown car", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["relations"],
    operation_id = "requestRelease",
    security(("SessionCookie" = []))
)]
#[post("/cars/{carId}/release-requests")]
pub async fn request_release(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CarPath>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let car_id = parse_car_id(&path.car_id, FieldName::new("carId"))?;
    let reports = state.relations.request_release(car_id).await?;
    Ok(HttpResponse::Accepted().json(ReleaseRequestResponse {
        car_id: car_id.to_string(),
        notifications: reports
            .into_iter()
            .map(DispatchReportResponse::from)
            .collect(),
    }))
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod tests;
