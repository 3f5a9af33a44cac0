//! Recurring availability and two-user overlap flows against the
//! in-memory repository.

use chrono::{Days, NaiveDate, NaiveTime};

use slotwise::db::repositories::LocalRepository;
use slotwise::db::repository::RepositoryError;
use slotwise::models::{PageRequest, RecurringSlot, TimeSlot, UserId};
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

fn weekly(user: i32, start_date: &str, occurrences: u32) -> RecurringSlot {
    RecurringSlot {
        start_date: date(start_date),
        start: time("10:00:00"),
        end: time("11:00:00"),
        user_id: UserId::new(user),
        interval: "weekly".to_string(),
        occurrences,
    }
}

#[tokio::test]
async fn recurring_series_lands_on_weekly_dates() {
    let repo = LocalRepository::new();

    let stored = services::add_recurring(&repo, &weekly(1, "2023-07-06", 4))
        .await
        .unwrap();
    assert_eq!(stored.len(), 4);

    for week in 0..4 {
        let expected = date("2023-07-06")
            .checked_add_days(Days::new(week * 7))
            .unwrap();
        let on_date = services::list_availability(&repo, UserId::new(1), expected)
            .await
            .unwrap();
        assert_eq!(on_date.len(), 1, "missing occurrence on {expected}");
        assert_eq!(on_date[0].slot.start, time("10:00:00"));
        assert_eq!(on_date[0].slot.end, time("11:00:00"));
    }
}

#[tokio::test]
async fn recurring_conflict_rolls_back_the_whole_series() {
    let repo = LocalRepository::new();

    // Pre-seed the third occurrence so the series collides mid-way.
    services::add_availability(&repo, &[slot(1, "2023-07-20", "10:00:00", "11:00:00")])
        .await
        .unwrap();

    let err = services::add_recurring(&repo, &weekly(1, "2023-07-06", 4))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::Conflict(_))
    ));

    // Occurrences before the collision must not have been committed.
    let on_first = services::list_availability(&repo, UserId::new(1), date("2023-07-06"))
        .await
        .unwrap();
    assert!(on_first.is_empty());
}

#[tokio::test]
async fn recurring_rejects_unknown_interval_and_bad_counts() {
    let repo = LocalRepository::new();

    let mut spec = weekly(1, "2023-07-06", 4);
    spec.interval = "lunar".to_string();
    let err = services::add_recurring(&repo, &spec).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));

    let err = services::add_recurring(&repo, &weekly(1, "2023-07-06", 0))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));

    let err = services::add_recurring(&repo, &weekly(1, "2023-07-06", 101))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));
}

#[tokio::test]
async fn overlap_reports_the_shared_window() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "10:00:00", "12:00:00"),
            slot(2, "2023-07-05", "11:00:00", "13:00:00"),
        ],
    )
    .await
    .unwrap();

    let page = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.total_items, 1);
    let overlap = &page.items[0];
    assert_eq!(overlap.overlap_start, time("11:00:00"));
    assert_eq!(overlap.overlap_end, time("12:00:00"));
    assert_eq!(overlap.date, date("2023-07-05"));
}

#[tokio::test]
async fn touching_slots_count_as_overlap() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "10:00:00", "11:00:00"),
            slot(2, "2023-07-05", "11:00:00", "12:00:00"),
        ],
    )
    .await
    .unwrap();

    let page = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.total_items, 1);
    let overlap = &page.items[0];
    assert_eq!(overlap.overlap_start, time("11:00:00"));
    assert_eq!(overlap.overlap_end, time("11:00:00"));
}

#[tokio::test]
async fn disjoint_slots_produce_no_overlap() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "09:00:00", "10:00:00"),
            slot(2, "2023-07-05", "11:00:00", "12:00:00"),
        ],
    )
    .await
    .unwrap();

    let page = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn overlap_ignores_other_dates_and_same_user_pairs() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            // Same user twice on the date: never an overlap with itself.
            slot(1, "2023-07-05", "10:00:00", "11:00:00"),
            slot(1, "2023-07-05", "10:30:00", "11:30:00"),
            // Second user overlapping, but on another date.
            slot(2, "2023-07-06", "10:00:00", "11:00:00"),
        ],
    )
    .await
    .unwrap();

    let page = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::default(),
    )
    .await
    .unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn overlap_results_are_paginated() {
    let repo = LocalRepository::new();

    // Eight overlapping pairs: user 1 has eight windows, user 2 spans all
    // of them.
    let mut slots = Vec::new();
    for hour in 8..16 {
        slots.push(slot(
            1,
            "2023-07-05",
            &format!("{hour:02}:00:00"),
            &format!("{hour:02}:30:00"),
        ));
    }
    slots.push(slot(2, "2023-07-05", "08:00:00", "16:00:00"));
    services::add_availability(&repo, &slots).await.unwrap();

    let first = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::new(0, 5),
    )
    .await
    .unwrap();
    assert_eq!(first.items.len(), 5);
    assert_eq!(first.total_items, 8);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].overlap_start, time("08:00:00"));

    let second = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::new(1, 5),
    )
    .await
    .unwrap();
    assert_eq!(second.items.len(), 3);
    assert_eq!(second.items[0].overlap_start, time("13:00:00"));
}

#[tokio::test]
async fn overlap_survives_availability_deletion() {
    let repo = LocalRepository::new();
    services::add_availability(
        &repo,
        &[
            slot(1, "2023-07-05", "10:00:00", "12:00:00"),
            slot(2, "2023-07-05", "10:00:00", "12:00:00"),
        ],
    )
    .await
    .unwrap();

    // Punch a hole in user 1's window; the overlaps shrink to the two
    // remaining fragments.
    services::delete_availability(&repo, &slot(1, "2023-07-05", "10:30:00", "11:30:00"))
        .await
        .unwrap();

    let page = services::find_overlap(
        &repo,
        UserId::new(1),
        UserId::new(2),
        date("2023-07-05"),
        PageRequest::default(),
    )
    .await
    .unwrap();

    let windows: Vec<(NaiveTime, NaiveTime)> = page
        .items
        .iter()
        .map(|o| (o.overlap_start, o.overlap_end))
        .collect();
    assert_eq!(
        windows,
        vec![
            (time("10:00:00"), time("10:30:00")),
            (time("11:30:00"), time("12:00:00")),
        ]
    );
}
