//! Tests for the car registry service.

use std::sync::Arc;

use super::*;
use crate::domain::catalog::{Brand, Color};
use crate::domain::ports::{MockCarRepository, MockUserCarRepository, MockUserRepository};
use crate::domain::{DisplayName, Email};
use mockall::predicate::eq;
use rstest::rstest;

type Service = CarRegistryService<MockCarRepository, MockUserRepository, MockUserCarRepository>;

fn make_service(
    cars: MockCarRepository,
    users: MockUserRepository,
    ownership: MockUserCarRepository,
) -> Service {
    CarRegistryService::new(Arc::new(cars), Arc::new(users), Arc::new(ownership))
}

fn plate(raw: &str) -> PlateNumber {
    PlateNumber::new(raw).expect("valid plate")
}

fn sample_car(raw_plate: &str) -> Car {
    Car {
        id: CarId::random(),
        plate_number: plate(raw_plate),
        country: Country::Israel,
        brand: Brand::Mazda,
        model: "3".to_owned(),
        color: Color::Red,
        license_expiry: None,
    }
}

fn sample_user(id: &UserId) -> User {
    User::new(
        id.clone(),
        DisplayName::new("Dana").expect("display name"),
        Email::new("dana@example.org").expect("email"),
    )
}

fn registration(raw_plate: &str) -> RegisterCarRequest {
    RegisterCarRequest {
        plate_number: plate(raw_plate),
        country: Country::Israel,
        brand: Brand::Toyota,
        model: "Corolla".to_owned(),
        color: Color::White,
        license_expiry: None,
    }
}

#[tokio::test]
async fn register_car_persists_new_car() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .times(1)
        .returning(|_, _| Ok(None));
    cars.expect_insert()
        .withf(|car| car.plate_number.as_ref() == "12-345-67" && car.brand == Brand::Toyota)
        .times(1)
        .returning(|_| Ok(()));

    let service = make_service(cars, MockUserRepository::new(), MockUserCarRepository::new());
    let car = service
        .register_car(registration("12-345-67"))
        .await
        .expect("registration succeeds");

    assert_eq!(car.plate_number.as_ref(), "12-345-67");
    assert_eq!(car.country, Country::Israel);
}

#[tokio::test]
async fn register_car_rejects_taken_natural_key() {
    let existing = sample_car("12-345-67");
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .times(1)
        .return_once(move |_, _| Ok(Some(existing)));
    cars.expect_insert().never();

    let service = make_service(cars, MockUserRepository::new(), MockUserCarRepository::new());
    let err = service
        .register_car(registration("12-345-67"))
        .await
        .expect_err("duplicate");

    assert_eq!(err, CarRegistryError::duplicate_car("12-345-67", "IL"));
}

#[tokio::test]
async fn register_car_maps_insert_race_to_duplicate() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .returning(|_, _| Ok(None));
    cars.expect_insert()
        .return_once(|_| Err(CarRepositoryError::duplicate_natural_key("12-345-67", "IL")));

    let service = make_service(cars, MockUserRepository::new(), MockUserCarRepository::new());
    let err = service
        .register_car(registration("12-345-67"))
        .await
        .expect_err("duplicate");

    assert!(matches!(err, CarRegistryError::DuplicateCar { .. }));
}

#[rstest]
#[case(CarRepositoryError::connection("refused"), true)]
#[case(CarRepositoryError::query("syntax"), false)]
#[tokio::test]
async fn register_car_maps_store_errors(
    #[case] failure: CarRepositoryError,
    #[case] unavailable: bool,
) {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .return_once(move |_, _| Err(failure));

    let service = make_service(cars, MockUserRepository::new(), MockUserCarRepository::new());
    let err = service
        .register_car(registration("12-345-67"))
        .await
        .expect_err("store failure");

    if unavailable {
        assert!(matches!(err, CarRegistryError::StoreUnavailable { .. }));
    } else {
        assert!(matches!(err, CarRegistryError::StoreFailure { .. }));
    }
    assert!(err.to_string().starts_with("register_car:"));
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn link_owner_is_idempotent(#[case] newly_linked: bool) {
    let user_id = UserId::random();
    let car = sample_car("98-765-43");
    let car_id = car.id;
    let user = sample_user(&user_id);

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id()
        .with(eq(car_id))
        .return_once(move |_| Ok(Some(car)));
    let mut ownership = MockUserCarRepository::new();
    ownership
        .expect_link()
        .times(1)
        .returning(move |_, _| Ok(newly_linked));

    let service = make_service(cars, users, ownership);
    service
        .link_owner(&user_id, car_id)
        .await
        .expect("link succeeds either way");
}

#[tokio::test]
async fn link_owner_requires_existing_car() {
    let user_id = UserId::random();
    let user = sample_user(&user_id);
    let missing = CarId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id().return_once(|_| Ok(None));
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_link().never();

    let service = make_service(cars, users, ownership);
    let err = service
        .link_owner(&user_id, missing)
        .await
        .expect_err("car missing");

    assert_eq!(err, CarRegistryError::car_not_found(missing.to_string()));
}

#[tokio::test]
async fn link_owner_requires_existing_user() {
    let user_id = UserId::random();
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_link().never();

    let service = make_service(MockCarRepository::new(), users, ownership);
    let err = service
        .link_owner(&user_id, CarId::random())
        .await
        .expect_err("user missing");

    assert!(matches!(err, CarRegistryError::UserNotFound { .. }));
}

#[tokio::test]
async fn register_car_for_unknown_owner_writes_nothing() {
    let owner = UserId::random();
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key().never();
    cars.expect_insert().never();
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_link().never();

    let service = make_service(cars, users, ownership);
    let err = service
        .register_car_for(&owner, registration("12-345-67"))
        .await
        .expect_err("owner missing");

    assert_eq!(err, CarRegistryError::user_not_found(owner.to_string()));
}

#[tokio::test]
async fn register_car_for_links_the_owner() {
    let owner = UserId::random();
    let known = sample_user(&owner);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(known)));
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .returning(|_, _| Ok(None));
    cars.expect_insert().times(1).returning(|_| Ok(()));
    let mut ownership = MockUserCarRepository::new();
    let expected_owner = owner.clone();
    ownership
        .expect_link()
        .withf(move |user, _| *user == expected_owner)
        .times(1)
        .returning(|_, _| Ok(true));

    let service = make_service(cars, users, ownership);
    let car = service
        .register_car_for(&owner, registration("12-345-67"))
        .await
        .expect("registration succeeds");

    assert_eq!(car.plate_number.as_ref(), "12-345-67");
}

#[tokio::test]
async fn find_car_reports_natural_key_when_missing() {
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_natural_key()
        .return_once(|_, _| Ok(None));

    let service = make_service(cars, MockUserRepository::new(), MockUserCarRepository::new());
    let err = service
        .find_car(&plate("12-345-67"), Country::Israel)
        .await
        .expect_err("missing");

    assert_eq!(err.to_string(), "car 12-345-67 (IL) not found");
}

#[tokio::test]
async fn owners_of_returns_empty_for_ownerless_car() {
    let car = sample_car("12-345-67");
    let car_id = car.id;
    let mut cars = MockCarRepository::new();
    cars.expect_find_by_id()
        .return_once(move |_| Ok(Some(car)));
    let mut ownership = MockUserCarRepository::new();
    ownership
        .expect_owners_of()
        .with(eq(car_id))
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(cars, MockUserRepository::new(), ownership);
    let owners = service.owners_of(car_id).await.expect("lookup succeeds");

    assert!(owners.is_empty());
}

#[tokio::test]
async fn cars_of_maps_ownership_failures() {
    let user_id = UserId::random();
    let user = sample_user(&user_id);
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    let mut ownership = MockUserCarRepository::new();
    ownership
        .expect_cars_of()
        .return_once(|_| Err(UserCarRepositoryError::connection("pool exhausted")));

    let service = make_service(MockCarRepository::new(), users, ownership);
    let err = service.cars_of(&user_id).await.expect_err("unavailable");

    assert_eq!(
        err,
        CarRegistryError::store_unavailable("cars_of", "pool exhausted")
    );
}
