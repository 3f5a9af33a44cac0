//! End-to-end availability flows against the in-memory repository.

use chrono::{NaiveDate, NaiveTime};

use slotwise::db::repositories::LocalRepository;
use slotwise::db::repository::{AvailabilityRepository, RepositoryError};
use slotwise::models::{TimeSlot, UserId};
use slotwise::services::{self, ServiceError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn time(s: &str) -> NaiveTime {
    s.parse().unwrap()
}

fn slot(user: i32, date_str: &str, start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(date(date_str), time(start), time(end), UserId::new(user)).unwrap()
}

#[tokio::test]
async fn add_then_list_availability() {
    let repo = LocalRepository::new();
    let slots = vec![
        slot(1, "2023-07-05", "10:00:00", "11:00:00"),
        slot(1, "2023-07-05", "14:00:00", "15:00:00"),
        slot(1, "2023-07-06", "09:00:00", "10:00:00"),
    ];

    let stored = services::add_availability(&repo, &slots).await.unwrap();
    assert_eq!(stored.len(), 3);

    let on_fifth = services::list_availability(&repo, UserId::new(1), date("2023-07-05"))
        .await
        .unwrap();
    assert_eq!(on_fifth.len(), 2);

    let on_sixth = services::list_availability(&repo, UserId::new(1), date("2023-07-06"))
        .await
        .unwrap();
    assert_eq!(on_sixth.len(), 1);
}

#[tokio::test]
async fn empty_batch_is_rejected() {
    let repo = LocalRepository::new();

    let err = services::add_availability(&repo, &[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));
}

#[tokio::test]
async fn duplicate_slot_is_a_conflict_and_commits_nothing() {
    let repo = LocalRepository::new();
    let first = vec![slot(1, "2023-07-05", "10:00:00", "11:00:00")];
    services::add_availability(&repo, &first).await.unwrap();

    // One new slot plus one duplicate: the whole batch must fail.
    let batch = vec![
        slot(1, "2023-07-05", "12:00:00", "13:00:00"),
        slot(1, "2023-07-05", "10:00:00", "11:00:00"),
    ];
    let err = services::add_availability(&repo, &batch).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::Conflict(_))
    ));

    let stored = services::list_availability(&repo, UserId::new(1), date("2023-07-05"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 1, "failed batch must not commit partial rows");
}

#[tokio::test]
async fn deleting_a_contained_range_splits_the_slot() {
    let repo = LocalRepository::new();
    services::add_availability(&repo, &[slot(1, "2023-07-05", "10:00:00", "11:00:00")])
        .await
        .unwrap();

    let remaining =
        services::delete_availability(&repo, &slot(1, "2023-07-05", "10:15:00", "10:45:00"))
            .await
            .unwrap();

    let mut ranges: Vec<(NaiveTime, NaiveTime)> = remaining
        .iter()
        .map(|s| (s.slot.start, s.slot.end))
        .collect();
    ranges.sort();
    assert_eq!(
        ranges,
        vec![
            (time("10:00:00"), time("10:15:00")),
            (time("10:45:00"), time("11:00:00")),
        ]
    );

    // The store reflects the replacement set exactly.
    let stored = services::list_availability(&repo, UserId::new(1), date("2023-07-05"))
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn deletion_spanning_multiple_slots_trims_each() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "09:00:00", "10:00:00"),
            slot(1, "2023-07-05", "10:30:00", "11:30:00"),
            slot(1, "2023-07-05", "13:00:00", "14:00:00"),
        ],
    )
    .await
    .unwrap();

    // Cuts the tail of the first slot and the head of the second; the
    // third is untouched.
    let remaining =
        services::delete_availability(&repo, &slot(1, "2023-07-05", "09:30:00", "11:00:00"))
            .await
            .unwrap();

    let mut ranges: Vec<(NaiveTime, NaiveTime)> = remaining
        .iter()
        .map(|s| (s.slot.start, s.slot.end))
        .collect();
    ranges.sort();
    assert_eq!(
        ranges,
        vec![
            (time("09:00:00"), time("09:30:00")),
            (time("11:00:00"), time("11:30:00")),
            (time("13:00:00"), time("14:00:00")),
        ]
    );
}

#[tokio::test]
async fn exact_deletion_empties_the_day() {
    let repo = LocalRepository::new();
    let window = slot(1, "2023-07-05", "10:00:00", "11:00:00");
    services::add_availability(&repo, &[window]).await.unwrap();

    let remaining = services::delete_availability(&repo, &window).await.unwrap();
    assert!(remaining.is_empty());

    let stored = services::list_availability(&repo, UserId::new(1), date("2023-07-05"))
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn deletion_only_touches_its_own_user_and_date() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "10:00:00", "11:00:00"),
            slot(2, "2023-07-05", "10:00:00", "11:00:00"),
            slot(1, "2023-07-06", "10:00:00", "11:00:00"),
        ],
    )
    .await
    .unwrap();

    services::delete_availability(&repo, &slot(1, "2023-07-05", "10:00:00", "11:00:00"))
        .await
        .unwrap();

    let other_user = services::list_availability(&repo, UserId::new(2), date("2023-07-05"))
        .await
        .unwrap();
    assert_eq!(other_user.len(), 1);

    let other_date = services::list_availability(&repo, UserId::new(1), date("2023-07-06"))
        .await
        .unwrap();
    assert_eq!(other_date.len(), 1);
}

#[tokio::test]
async fn deleting_from_an_empty_day_is_a_no_op() {
    let repo = LocalRepository::new();

    let remaining =
        services::delete_availability(&repo, &slot(1, "2023-07-05", "10:00:00", "11:00:00"))
            .await
            .unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn inverted_cut_is_rejected_by_validation() {
    let repo = LocalRepository::new();

    let cut = TimeSlot {
        date: date("2023-07-05"),
        start: time("11:00:00"),
        end: time("10:00:00"),
        user_id: UserId::new(1),
    };
    let err = services::delete_availability(&repo, &cut).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));
}

#[tokio::test]
async fn repository_health_check() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.unwrap());
}
