//! Tests for login and account handlers.

use super::*;
use crate::domain::ports::{
    FIXTURE_ID_TOKEN, MockBlockingRelationsCommand, MockBlockingRelationsQuery,
    MockCarRegistryCommand, MockCarRegistryQuery, MockLoginService, MockUserAccountCommand,
    MockUserAccountQuery,
};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{TestHarness, login_cookie, test_session_middleware};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;
use std::sync::Arc;

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
                .service(logout)
                .service(current_user)
                .service(update_notification_token)
                .service(my_cars),
        )
}

fn state_with_login(mock_login: MockLoginService) -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(mock_login),
        accounts: Arc::new(MockUserAccountCommand::new()),
        accounts_query: Arc::new(MockUserAccountQuery::new()),
        cars: Arc::new(MockCarRegistryCommand::new()),
        cars_query: Arc::new(MockCarRegistryQuery::new()),
        relations: Arc::new(MockBlockingRelationsCommand::new()),
        relations_query: Arc::new(MockBlockingRelationsQuery::new()),
    })
}

#[rstest]
#[case::bad_email("not-an-email", FIXTURE_ID_TOKEN, "email", "invalid_email")]
#[case::blank_token("dana@example.org", "  ", "idToken", "empty_id_token")]
#[actix_web::test]
async fn login_rejects_malformed_payloads(
    #[case] email: &str,
    #[case] id_token: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: email.into(),
            id_token: id_token.into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn login_rejects_unverified_tokens() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: "dana@example.org".into(),
            id_token: "forged".into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid credentials");
}

#[actix_web::test]
async fn login_redacts_identity_provider_outages() {
    let mut login_service = MockLoginService::new();
    login_service
        .expect_authenticate()
        .times(1)
        .returning(|_| Err(Error::service_unavailable("token endpoint refused: 10.0.0.7")));
    let app = actix_test::init_service(test_app(state_with_login(login_service))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            email: "dana@example.org".into(),
            id_token: FIXTURE_ID_TOKEN.into(),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Service temporarily unavailable");
}

#[actix_web::test]
async fn first_login_registers_the_user() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/me")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["email"], "dana@example.org");
    assert_eq!(body["displayName"], "dana");
    assert_eq!(body["hasNotificationToken"], false);
}

#[actix_web::test]
async fn repeated_logins_resolve_to_the_same_account() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let cookie = login_cookie(&app, "dana@example.org").await;
        let request = actix_test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;
        ids.push(body["id"].clone());
    }

    assert_eq!(ids[0], ids[1]);
}

#[rstest]
#[case::set(Some("device-token-1"), true)]
#[case::blank(Some("   "), false)]
#[case::null(None, false)]
#[actix_web::test]
async fn notification_token_can_be_set_and_cleared(
    #[case] token: Option<&str>,
    #[case] expected: bool,
) {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/users/me/notification-token")
        .cookie(cookie)
        .set_json(&NotificationTokenRequest {
            token: token.map(str::to_owned),
        })
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["hasNotificationToken"], expected);
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/logout")
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("removal cookie")
        .into_owned();

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/me")
        .cookie(cleared)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case::profile("/api/v1/users/me")]
#[case::cars("/api/v1/users/me/cars")]
#[actix_web::test]
async fn account_endpoints_require_a_session(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn new_users_own_no_cars() {
    let app = actix_test::init_service(test_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "dana@example.org").await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/users/me/cars")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, Value::Array(Vec::new()));
}
