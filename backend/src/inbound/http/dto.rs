//! Response bodies shared by the car, relation and user handlers.
//!
//! Catalog values travel as codes with their labels alongside, so clients can
//! render a car without fetching the catalog first.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::catalog::CatalogEntry;
use crate::domain::{Car, CarId, CarRelations, DispatchReport, RelationChange, Situation, User};

/// A registered car.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    #[schema(example = "5d3c1e0a-3f55-4c1b-9d0b-0b7f3f7a2c11")]
    pub id: String,
    #[schema(example = "12-345-67")]
    pub plate_number: String,
    #[schema(example = "IL")]
    pub country: String,
    pub country_name: String,
    #[schema(example = 4)]
    pub brand: i32,
    pub brand_name: String,
    pub model: String,
    #[schema(example = 5)]
    pub color: i32,
    pub color_name: String,
    /// RFC 3339 timestamp, absent when unknown.
    pub license_expiry: Option<String>,
}

impl From<&Car> for CarResponse {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id.to_string(),
            plate_number: car.plate_number.to_string(),
            country: car.country.to_code().to_owned(),
            country_name: car.country.label().to_owned(),
            brand: car.brand.to_code(),
            brand_name: car.brand.label().to_owned(),
            model: car.model.clone(),
            color: car.color.to_code(),
            color_name: car.color.label().to_owned(),
            license_expiry: car.license_expiry.map(|expiry| expiry.to_rfc3339()),
        }
    }
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self::from(&car)
    }
}

/// The signed-in user's own account.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub has_notification_token: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().to_string(),
            email: user.email().to_string(),
            has_notification_token: user.notification_token().is_some(),
        }
    }
}

/// Another driver listed as a car owner. Contact details stay private.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: String,
    pub display_name: String,
}

impl From<User> for OwnerResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().to_string(),
        }
    }
}

/// Outcome of notifying the owners of one car.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReportResponse {
    #[schema(example = "BEEN_BLOCKED")]
    pub kind: String,
    pub target_car_id: String,
    /// `ATTEMPTED`, `CAR_HAS_NO_OWNER` or `LOOKUP_FAILED`.
    #[schema(example = "ATTEMPTED")]
    pub status: String,
    pub delivered: usize,
    pub failed: usize,
    pub without_token: usize,
}

impl From<DispatchReport> for DispatchReportResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            kind: report.kind.label().to_owned(),
            target_car_id: report.target_car.to_string(),
            status: report.status.as_str().to_owned(),
            delivered: report.delivered,
            failed: report.failed,
            without_token: report.without_token,
        }
    }
}

/// A created or removed edge with the notifications it triggered.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationChangeResponse {
    pub blocking_car_id: String,
    pub blocked_car_id: String,
    pub created_at: String,
    pub notifications: Vec<DispatchReportResponse>,
}

impl From<RelationChange> for RelationChangeResponse {
    fn from(change: RelationChange) -> Self {
        Self {
            blocking_car_id: change.relation.blocking().to_string(),
            blocked_car_id: change.relation.blocked().to_string(),
            created_at: change.relation.created_at().to_rfc3339(),
            notifications: change
                .notifications
                .into_iter()
                .map(DispatchReportResponse::from)
                .collect(),
        }
    }
}

/// A counterpart car and the queried car's side of the edge.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatedCarResponse {
    /// `isBlocking` when the queried car blocks this one, else `isBlocked`.
    #[schema(example = "isBlocking")]
    pub situation: String,
    pub car: CarResponse,
}

/// Both directions of the graph around one car.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarRelationsResponse {
    pub car_id: String,
    /// Cars the queried car blocks.
    pub blocking: Vec<RelatedCarResponse>,
    /// Cars blocking the queried car.
    pub blocked_by: Vec<RelatedCarResponse>,
}

impl CarRelationsResponse {
    pub fn new(car: CarId, relations: CarRelations) -> Self {
        let related = |cars: Vec<Car>, situation: Situation| {
            cars.into_iter()
                .map(|counterpart| RelatedCarResponse {
                    situation: situation.as_str().to_owned(),
                    car: CarResponse::from(counterpart),
                })
                .collect::<Vec<_>>()
        };
        Self {
            car_id: car.to_string(),
            blocking: related(relations.blocking, Situation::IsBlocking),
            blocked_by: related(relations.blocked_by, Situation::IsBlocked),
        }
    }
}
