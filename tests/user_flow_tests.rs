//! User registration and lookup flows against the in-memory repository.

use slotwise::db::repositories::LocalRepository;
use slotwise::db::repository::RepositoryError;
use slotwise::models::{PageRequest, User, UserId};
use slotwise::services::{self, ServiceError};

fn user(first: &str, last: &str, email: &str) -> User {
    User::new(first.to_string(), last.to_string(), email.to_string())
}

#[tokio::test]
async fn register_then_look_up_users() {
    let repo = LocalRepository::new();

    let stored = services::add_users(
        &repo,
        &[
            user("Ada", "Lovelace", "ada@example.com"),
            user("Alan", "Turing", "alan@example.com"),
        ],
    )
    .await
    .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|u| u.id.is_some()));

    let found = services::get_user_by_email(&repo, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.first_name, "Ada");

    let by_id = services::get_user_by_id(&repo, found.id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.email, "ada@example.com");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_commits_nothing() {
    let repo = LocalRepository::new();
    services::add_users(&repo, &[user("Ada", "Lovelace", "ada@example.com")])
        .await
        .unwrap();

    let err = services::add_users(
        &repo,
        &[
            user("Grace", "Hopper", "grace@example.com"),
            user("Ada", "Byron", "ada@example.com"),
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::Conflict(_))
    ));

    let page = services::list_users(&repo, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1, "failed batch must not commit partial rows");
}

#[tokio::test]
async fn blank_email_and_empty_batch_are_rejected() {
    let repo = LocalRepository::new();

    let err = services::add_users(&repo, &[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));

    let err = services::add_users(&repo, &[user("No", "Email", "  ")])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Engine(_)));
}

#[tokio::test]
async fn user_listing_is_paginated() {
    let repo = LocalRepository::new();

    let users: Vec<User> = (0..12)
        .map(|i| user("User", &format!("{i}"), &format!("user{i}@example.com")))
        .collect();
    services::add_users(&repo, &users).await.unwrap();

    let first = services::list_users(&repo, PageRequest::new(0, 10))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_items, 12);
    assert_eq!(first.total_pages, 2);

    let second = services::list_users(&repo, PageRequest::new(1, 10))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 2);
}

#[tokio::test]
async fn unknown_lookups_return_none() {
    let repo = LocalRepository::new();

    let by_email = services::get_user_by_email(&repo, "ghost@example.com")
        .await
        .unwrap();
    assert!(by_email.is_none());

    let by_id = services::get_user_by_id(&repo, UserId::new(999))
        .await
        .unwrap();
    assert!(by_id.is_none());
}
