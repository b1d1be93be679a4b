//! Tests for car registry handlers.

use super::*;
use crate::domain::UserId;
use crate::inbound::http::test_utils::{TestHarness, login_cookie, test_session_middleware};
use crate::inbound::http::users::login;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(register_car)
                .service(find_car)
                .service(get_car)
                .service(claim_car)
                .service(list_owners),
        )
}

fn mazda(plate: &str) -> Value {
    json!({
        "plateNumber": plate,
        "country": "IL",
        "brand": 4,
        "model": "CX-5",
        "color": 5,
        "licenseExpiry": "2027-01-31T00:00:00Z"
    })
}

async fn register<S>(app: &S, cookie: &Cookie<'static>, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/cars")
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

#[actix_web::test]
async fn registering_a_car_returns_codes_and_labels() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let response = register(&app, &cookie, mazda("12-345-67")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["plateNumber"], "12-345-67");
    assert_eq!(body["brandName"], "Mazda");
    assert_eq!(body["colorName"], "Red");
    assert_eq!(body["countryName"], "Israel");
    assert_eq!(body["licenseExpiry"], "2027-01-31T00:00:00+00:00");
}

#[actix_web::test]
async fn registering_links_the_caller_as_owner() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;
    let created: Value =
        actix_test::read_body_json(register(&app, &cookie, mazda("12-345-67")).await).await;
    let car_id = created["id"].as_str().expect("car id");

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/cars/{car_id}/owners"))
        .cookie(cookie)
        .to_request();
    let owners: Value = actix_test::call_and_read_body_json(&app, request).await;

    let owners = owners.as_array().expect("owner list");
    assert_eq!(owners.len(), 1);
    assert_eq!(owners[0]["displayName"], "dana");
    assert!(owners[0].get("email").is_none());
}

#[actix_web::test]
async fn duplicate_plate_in_the_same_country_conflicts() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;
    assert_eq!(
        register(&app, &cookie, mazda("12-345-67")).await.status(),
        StatusCode::CREATED
    );

    let response = register(&app, &cookie, mazda(" 12-345-67 ")).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "duplicate_car");
}

#[rstest]
#[case::brand("brand", json!(4242))]
#[case::color("color", json!(42))]
#[case::country("country", json!("XX"))]
#[actix_web::test]
async fn unknown_catalog_codes_name_the_field(#[case] field: &str, #[case] value: Value) {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;
    let mut body = mazda("12-345-67");
    body[field] = value;

    let response = register(&app, &cookie, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], "invalid_code");
}

#[actix_web::test]
async fn find_by_natural_key_returns_the_car() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;
    register(&app, &cookie, mazda("12-345-67")).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/cars?plateNumber=12-345-67&country=IL")
        .cookie(cookie.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/cars?plateNumber=12-345-67&country=US")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn find_requires_both_key_parts() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/cars?plateNumber=12-345-67")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["field"], "country");
    assert_eq!(body["details"]["code"], "missing_field");
}

#[rstest]
#[case::malformed("not-a-uuid", StatusCode::BAD_REQUEST)]
#[case::unknown("00000000-0000-0000-0000-000000000042", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn get_car_validates_and_resolves_ids(#[case] car_id: &str, #[case] expected: StatusCode) {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/cars/{car_id}"))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), expected);
}

#[actix_web::test]
async fn claiming_twice_keeps_a_single_ownership() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let dana = login_cookie(&app, "dana@example.org").await;
    let created: Value =
        actix_test::read_body_json(register(&app, &dana, mazda("12-345-67")).await).await;
    let car_id = created["id"].as_str().expect("car id").to_owned();
    let amir = login_cookie(&app, "amir@example.org").await;

    for _ in 0..2 {
        let request = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/cars/{car_id}/owners"))
            .cookie(amir.clone())
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/cars/{car_id}/owners"))
        .cookie(amir)
        .to_request();
    let owners: Value = actix_test::call_and_read_body_json(&app, request).await;
    let names: Vec<&str> = owners
        .as_array()
        .expect("owner list")
        .iter()
        .filter_map(|owner| owner["displayName"].as_str())
        .collect();
    assert_eq!(names, vec!["amir", "dana"]);
}

#[actix_web::test]
async fn registration_requires_a_session() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/cars")
        .set_json(mazda("12-345-67"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn registration_by_an_unknown_user_leaves_no_car_behind() {
    let app = actix_test::init_service(test_app(TestHarness::new().state).route(
        "/stale-session",
        web::get().to(|session: SessionContext| async move {
            session.persist_user(&UserId::random())?;
            Ok::<_, Error>(HttpResponse::Ok())
        }),
    ))
    .await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/stale-session")
            .to_request(),
    )
    .await;
    let stale = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned();

    let response = register(&app, &stale, mazda("12-345-67")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let dana = login_cookie(&app, "dana@example.org").await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/cars?plateNumber=12-345-67&country=IL")
        .cookie(dana.clone())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = register(&app, &dana, mazda("12-345-67")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
