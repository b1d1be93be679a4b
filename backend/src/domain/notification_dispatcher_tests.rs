//! Tests for the push notification dispatcher.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::catalog::{Brand, Color, Country, NotificationKind};
use crate::domain::ports::{
    MockPushTransport, MockUserCarRepository, PushTransportError, UserCarRepositoryError,
};
use crate::domain::{
    Car, CarId, DisplayName, Email, NotificationToken, PlateNumber, User, UserId,
};

fn car(plate: &str) -> Car {
    Car {
        id: CarId::random(),
        plate_number: PlateNumber::new(plate).expect("valid plate"),
        country: Country::Israel,
        brand: Brand::Hyundai,
        model: "i20".to_owned(),
        color: Color::Blue,
        license_expiry: None,
    }
}

fn owner(name: &str, token: Option<&str>) -> User {
    User::new(
        UserId::random(),
        DisplayName::new(name).expect("display name"),
        Email::new(format!("{}@example.org", name.to_lowercase())).expect("email"),
    )
    .with_notification_token(token.map(|raw| NotificationToken::new(raw).expect("token")))
}

fn blocked_event() -> NotificationEvent {
    NotificationEvent::new(
        NotificationKind::BeenBlocked,
        &car("98-765-43"),
        &car("12-345-67"),
    )
}

fn make_dispatcher(
    ownership: MockUserCarRepository,
    transport: MockPushTransport,
) -> PushNotificationDispatcher<MockUserCarRepository, MockPushTransport> {
    PushNotificationDispatcher::new(Arc::new(ownership), Arc::new(transport))
}

#[tokio::test]
async fn sends_one_push_per_owner() {
    let event = blocked_event();
    let owners = vec![owner("Avi", Some("token-a")), owner("Bella", Some("token-b"))];
    let mut ownership = MockUserCarRepository::new();
    ownership
        .expect_owners_of()
        .with(eq(event.target_car))
        .return_once(move |_| Ok(owners));
    let mut transport = MockPushTransport::new();
    transport
        .expect_send()
        .withf(|push| {
            push.kind == NotificationKind::BeenBlocked
                && push.message == "Your car 98-765-43 is blocked by 12-345-67"
        })
        .times(2)
        .returning(|_| Ok(()));

    let report = make_dispatcher(ownership, transport).dispatch(&event).await;

    assert_eq!(report.status, DispatchStatus::Attempted);
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn ownerless_car_is_reported_not_failed() {
    let event = blocked_event();
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_owners_of().return_once(|_| Ok(Vec::new()));
    let mut transport = MockPushTransport::new();
    transport.expect_send().never();

    let report = make_dispatcher(ownership, transport).dispatch(&event).await;

    assert_eq!(report.status, DispatchStatus::CarHasNoOwner);
    assert_eq!(report.status.as_str(), "CAR_HAS_NO_OWNER");
    assert_eq!(report.delivered, 0);
}

#[tokio::test]
async fn owners_without_tokens_are_skipped() {
    let event = blocked_event();
    let owners = vec![owner("Avi", None), owner("Bella", Some("token-b"))];
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_owners_of().return_once(move |_| Ok(owners));
    let mut transport = MockPushTransport::new();
    transport
        .expect_send()
        .withf(|push| push.token.as_ref() == "token-b")
        .times(1)
        .returning(|_| Ok(()));

    let report = make_dispatcher(ownership, transport).dispatch(&event).await;

    assert_eq!(report.delivered, 1);
    assert_eq!(report.without_token, 1);
}

#[rstest]
#[case(PushTransportError::timeout("10s elapsed"))]
#[case(PushTransportError::rejected(410_u16, "token expired"))]
#[case(PushTransportError::transport("connection reset"))]
#[tokio::test]
async fn transport_failures_are_counted_not_raised(#[case] failure: PushTransportError) {
    let event = blocked_event();
    let owners = vec![owner("Avi", Some("token-a")), owner("Bella", Some("token-b"))];
    let mut ownership = MockUserCarRepository::new();
    ownership.expect_owners_of().return_once(move |_| Ok(owners));
    let mut transport = MockPushTransport::new();
    let mut first = Some(failure);
    transport.expect_send().times(2).returning(move |_| match first.take() {
        Some(err) => Err(err),
        None => Ok(()),
    });

    let report = make_dispatcher(ownership, transport).dispatch(&event).await;

    assert_eq!(report.status, DispatchStatus::Attempted);
    assert_eq!(report.failed, 1);
    assert_eq!(report.delivered, 1);
}

#[tokio::test]
async fn owner_lookup_failure_is_reported() {
    let event = blocked_event();
    let mut ownership = MockUserCarRepository::new();
    ownership
        .expect_owners_of()
        .return_once(|_| Err(UserCarRepositoryError::connection("refused")));
    let mut transport = MockPushTransport::new();
    transport.expect_send().never();

    let report = make_dispatcher(ownership, transport).dispatch(&event).await;

    assert_eq!(report.status, DispatchStatus::LookupFailed);
}
