//! Catalog listing endpoints.
//!
//! ```text
//! GET /api/v1/catalog/brands
//! GET /api/v1/catalog/colors
//! GET /api/v1/catalog/countries
//! GET /api/v1/catalog/notification-kinds
//! ```
//!
//! Listings are public so clients can populate pickers before sign-in.

use actix_web::{HttpResponse, get};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::catalog::{Brand, CatalogEntry, Color, Country, NotificationKind};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_catalog_header;
use crate::inbound::http::schemas::ErrorSchema;

/// One code/label pair. Codes are integers except for countries, which use
/// ISO 3166-1 alpha-2 strings.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogEntryResponse {
    #[schema(value_type = Object, example = 4)]
    pub code: Value,
    #[schema(example = "Mazda")]
    pub label: String,
}

fn listing<T>() -> ApiResult<HttpResponse>
where
    T: CatalogEntry,
    T::Code: Serialize,
{
    let catalog = T::catalog().map_err(Error::from)?;
    let entries = catalog
        .entries()
        .iter()
        .map(|entry| {
            serde_json::to_value(entry.to_code())
                .map(|code| CatalogEntryResponse {
                    code,
                    label: entry.label().to_owned(),
                })
                .map_err(|err| Error::internal(format!("{} code: {err}", T::NAME)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HttpResponse::Ok()
        .insert_header(public_catalog_header())
        .json(entries))
}

/// List car brands ordered by code.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/brands",
    responses(
        (status = 200, description = "Brands", body = [CatalogEntryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listBrands",
    security([])
)]
#[get("/catalog/brands")]
pub async fn list_brands() -> ApiResult<HttpResponse> {
    listing::<Brand>()
}

/// List car colours ordered by code.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/colors",
    responses(
        (status = 200, description = "Colours", body = [CatalogEntryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listColors",
    security([])
)]
#[get("/catalog/colors")]
pub async fn list_colors() -> ApiResult<HttpResponse> {
    listing::<Color>()
}

/// List supported countries ordered by ISO code.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/countries",
    responses(
        (status = 200, description = "Countries", body = [CatalogEntryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listCountries",
    security([])
)]
#[get("/catalog/countries")]
pub async fn list_countries() -> ApiResult<HttpResponse> {
    listing::<Country>()
}

/// List the notification kinds a device may receive.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/notification-kinds",
    responses(
        (status = 200, description = "Notification kinds", body = [CatalogEntryResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["catalog"],
    operation_id = "listNotificationKinds",
    security([])
)]
#[get("/catalog/notification-kinds")]
pub async fn list_notification_kinds() -> ApiResult<HttpResponse> {
    listing::<NotificationKind>()
}
