//! Internal Diesel row structs and their conversions into domain types.
//!
//! Rows never leave the persistence module. Conversions back into domain types
//! re-run domain validation and catalog resolution, so a hand-edited row
//! surfaces as a query error instead of an invalid aggregate.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{Brand, CatalogEntry, Color, Country};
use crate::domain::{
    BlockingRelation, Car, CarId, DisplayName, Email, NotificationToken, PlateNumber,
    RelationKey, User, UserId,
};

use super::schema::{blocking_relations, cars, user_cars, users};

fn invalid_row(entity: &str, id: Uuid, err: impl Display) -> String {
    format!("stored {entity} {id} is invalid: {err}")
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub notification_token: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub notification_token: Option<&'a str>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            display_name: user.display_name().as_ref(),
            email: user.email().as_ref(),
            notification_token: user.notification_token().map(AsRef::as_ref),
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid = |err| invalid_row("user", row.id, err);
        let display_name = DisplayName::new(&row.display_name).map_err(invalid)?;
        let email = Email::new(&row.email).map_err(invalid)?;
        let token = row
            .notification_token
            .as_deref()
            .map(NotificationToken::new)
            .transpose()
            .map_err(invalid)?;
        Ok(User::new(UserId::from_uuid(row.id), display_name, email).with_notification_token(token))
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CarRow {
    pub id: Uuid,
    pub plate_number: String,
    pub country: String,
    pub brand: i32,
    pub model: String,
    pub color: i32,
    pub license_expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cars)]
pub(crate) struct NewCarRow<'a> {
    pub id: Uuid,
    pub plate_number: &'a str,
    pub country: &'static str,
    pub brand: i32,
    pub model: &'a str,
    pub color: i32,
    pub license_expiry: Option<DateTime<Utc>>,
}

impl<'a> From<&'a Car> for NewCarRow<'a> {
    fn from(car: &'a Car) -> Self {
        Self {
            id: *car.id.as_uuid(),
            plate_number: car.plate_number.as_ref(),
            country: car.country.to_code(),
            brand: car.brand.to_code(),
            model: &car.model,
            color: car.color.to_code(),
            license_expiry: car.license_expiry,
        }
    }
}

impl TryFrom<CarRow> for Car {
    type Error = String;

    fn try_from(row: CarRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Car {
            id: CarId::from_uuid(id),
            plate_number: PlateNumber::new(&row.plate_number)
                .map_err(|err| invalid_row("car", id, err))?,
            country: Country::resolve(row.country.as_str())
                .map_err(|err| invalid_row("car", id, err))?,
            brand: Brand::resolve(&row.brand).map_err(|err| invalid_row("car", id, err))?,
            model: row.model,
            color: Color::resolve(&row.color).map_err(|err| invalid_row("car", id, err))?,
            license_expiry: row.license_expiry,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user_cars)]
pub(crate) struct NewUserCarRow {
    pub user_id: Uuid,
    pub car_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = blocking_relations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BlockingRelationRow {
    pub blocking_car_id: Uuid,
    pub blocked_car_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&BlockingRelation> for BlockingRelationRow {
    fn from(relation: &BlockingRelation) -> Self {
        Self {
            blocking_car_id: *relation.blocking().as_uuid(),
            blocked_car_id: *relation.blocked().as_uuid(),
            created_at: relation.created_at(),
        }
    }
}

impl TryFrom<BlockingRelationRow> for BlockingRelation {
    type Error = String;

    fn try_from(row: BlockingRelationRow) -> Result<Self, Self::Error> {
        let key = RelationKey::new(
            CarId::from_uuid(row.blocking_car_id),
            CarId::from_uuid(row.blocked_car_id),
        )
        .map_err(|err| format!("stored relation is invalid: {err}"))?;
        Ok(BlockingRelation::new(key, row.created_at))
    }
}
