//! End-to-end behaviour of the blocking graph over the in-memory store.

use std::sync::Arc;

use rstest::rstest;
use unblock::domain::catalog::{Brand, CatalogEntry, Color, Country, NotificationKind};
use unblock::domain::ports::{
    BlockingRelationError, BlockingRelationsCommand, BlockingRelationsQuery, CarRegistryCommand,
    CarRegistryQuery,
};
use unblock::domain::{CarId, DispatchStatus, PlateNumber};

mod support;

use support::{UnreachablePushTransport, World};

#[tokio::test]
async fn ownerless_blocker_still_records_the_edge() {
    let world = World::new();
    let blocker = world.car("12-345-67").await;
    let blocked = world.car("98-765-43").await;
    let dana = world.owner_of(&blocked, "dana").await;

    let change = world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect("relation created");

    let statuses: Vec<_> = change
        .notifications
        .iter()
        .map(|report| (report.kind, report.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (NotificationKind::BeenBlocked, DispatchStatus::Attempted),
            (NotificationKind::BeenBlocking, DispatchStatus::CarHasNoOwner),
        ]
    );
    let sent = world.push.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(&sent[0].recipient, dana.id());
    assert_eq!(sent[0].message, "Your car 98-765-43 is blocked by 12-345-67");

    let around = world
        .graph
        .relations_involving(blocked.id)
        .await
        .expect("relations listed");
    assert_eq!(around.blocked_by, vec![blocker]);
    assert!(around.blocking.is_empty());
}

#[tokio::test]
async fn unreachable_push_provider_never_undoes_graph_changes() {
    let world = World::with_transport(Arc::new(UnreachablePushTransport));
    let blocker = world.car("12-345-67").await;
    let blocked = world.car("98-765-43").await;
    world.owner_of(&blocked, "dana").await;

    let change = world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect("relation created despite failed push");
    assert_eq!(change.notifications[0].kind, NotificationKind::BeenBlocked);
    assert_eq!(change.notifications[0].status, DispatchStatus::Attempted);
    assert_eq!(change.notifications[0].failed, 1);
    assert_eq!(change.notifications[0].delivered, 0);

    let around = world
        .graph
        .relations_involving(blocked.id)
        .await
        .expect("relations listed");
    assert_eq!(around.blocked_by, vec![blocker.clone()]);

    let removal = world
        .graph
        .remove_relation(blocker.id, blocked.id)
        .await
        .expect("relation removed despite failed push");
    assert_eq!(removal.notifications[0].kind, NotificationKind::FreeToGo);
    assert_eq!(removal.notifications[0].failed, 1);

    let around = world
        .graph
        .relations_involving(blocked.id)
        .await
        .expect("relations listed");
    assert!(around.blocked_by.is_empty());
}

#[tokio::test]
async fn every_owner_of_the_blocked_car_is_told_separately() {
    let world = World::new();
    let blocker = world.car("12-345-67").await;
    let blocked = world.car("98-765-43").await;
    let amir = world.owner_of(&blocked, "amir").await;
    let dana = world.owner_of(&blocked, "dana").await;

    let change = world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect("relation created");

    assert_eq!(change.notifications[0].delivered, 2);
    let mut recipients: Vec<_> = world
        .push
        .sent_of(NotificationKind::BeenBlocked)
        .into_iter()
        .map(|push| push.recipient)
        .collect();
    recipients.sort_by_key(ToString::to_string);
    let mut expected = vec![amir.id().clone(), dana.id().clone()];
    expected.sort_by_key(ToString::to_string);
    assert_eq!(recipients, expected);
}

#[tokio::test]
async fn a_car_cannot_block_itself() {
    let world = World::new();
    let car = world.car("12-345-67").await;

    let error = world
        .graph
        .create_relation(car.id, car.id)
        .await
        .expect_err("self block rejected");

    assert!(matches!(error, BlockingRelationError::SelfBlock));
    assert!(world.push.sent().is_empty());
}

#[tokio::test]
async fn reporting_the_same_edge_twice_conflicts() {
    let world = World::new();
    let blocker = world.car("12-345-67").await;
    let blocked = world.car("98-765-43").await;
    world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect("first report");

    let error = world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect_err("second report rejected");

    assert!(matches!(error, BlockingRelationError::DuplicateRelation { .. }));
}

#[tokio::test]
async fn unknown_cars_are_rejected() {
    let world = World::new();
    let known = world.car("12-345-67").await;
    let stranger = CarId::random();

    let error = world
        .graph
        .create_relation(known.id, stranger)
        .await
        .expect_err("unknown car rejected");

    assert!(matches!(error, BlockingRelationError::UnknownCar { .. }));
}

#[tokio::test]
async fn removal_clears_both_sides_and_frees_the_blocked_car() {
    let world = World::new();
    let blocker = world.car("12-345-67").await;
    let blocked = world.car("98-765-43").await;
    let dana = world.owner_of(&blocked, "dana").await;
    world
        .graph
        .create_relation(blocker.id, blocked.id)
        .await
        .expect("relation created");

    world
        .graph
        .remove_relation(blocker.id, blocked.id)
        .await
        .expect("relation removed");

    for car in [blocker.id, blocked.id] {
        let around = world
            .graph
            .relations_involving(car)
            .await
            .expect("relations listed");
        assert!(around.is_empty(), "{car} still has relations");
    }
    let freed = world.push.sent_of(NotificationKind::FreeToGo);
    assert_eq!(freed.len(), 1);
    assert_eq!(&freed[0].recipient, dana.id());

    let again = world
        .graph
        .remove_relation(blocker.id, blocked.id)
        .await
        .expect_err("already removed");
    assert!(matches!(again, BlockingRelationError::NotFound { .. }));
}

#[tokio::test]
async fn release_request_nudges_every_blocker() {
    let world = World::new();
    let first = world.car("11-111-11").await;
    let second = world.car("22-222-22").await;
    let stuck = world.car("98-765-43").await;
    world.owner_of(&first, "amir").await;
    world.owner_of(&second, "noa").await;
    for blocker in [first.id, second.id] {
        world
            .graph
            .create_relation(blocker, stuck.id)
            .await
            .expect("relation created");
    }

    let reports = world
        .graph
        .request_release(stuck.id)
        .await
        .expect("release requested");

    assert_eq!(reports.len(), 2);
    assert!(
        reports
            .iter()
            .all(|report| report.kind == NotificationKind::NeedToGo)
    );
    assert_eq!(world.push.sent_of(NotificationKind::NeedToGo).len(), 2);
}

#[tokio::test]
async fn linking_an_owner_twice_keeps_one_link() {
    let world = World::new();
    let car = world.car("12-345-67").await;
    let dana = world.owner_of(&car, "dana").await;

    world
        .registry
        .link_owner(dana.id(), car.id)
        .await
        .expect("repeat link succeeds");

    let owners = world.registry.owners_of(car.id).await.expect("owners");
    assert_eq!(owners.len(), 1);
    let cars = world.registry.cars_of(dana.id()).await.expect("cars");
    assert_eq!(cars, vec![car]);
}

#[tokio::test]
async fn natural_key_lookup_finds_the_registered_car() {
    let world = World::new();
    let car = world.car("12-345-67").await;

    let found = world
        .registry
        .find_car(
            &PlateNumber::new("12-345-67").expect("valid plate"),
            Country::Israel,
        )
        .await
        .expect("car found");

    assert_eq!(found, car);
}

#[rstest]
fn brand_codes_round_trip() {
    for brand in Brand::catalog().expect("brand catalog").entries() {
        assert_eq!(Brand::resolve(&brand.to_code()).expect("listed code"), *brand);
    }
}

#[rstest]
#[case("IL", Country::Israel)]
#[case("US", Country::UnitedStates)]
fn country_codes_resolve(#[case] code: &str, #[case] expected: Country) {
    assert_eq!(Country::resolve(code).expect("listed code"), expected);
    assert_eq!(
        Country::resolve_label(expected.label()).expect("listed label"),
        expected
    );
}

#[rstest]
fn unlisted_colour_code_is_rejected() {
    assert!(Color::resolve(&42_i32).is_err());
}
