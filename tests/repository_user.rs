mod common;

use novel_likes::domain::entities::NewUser;
use novel_likes::domain::repositories::UserRepository;
use novel_likes::infrastructure::persistence::PgUserRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_upsert_creates_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .upsert(NewUser {
            id: 7,
            name: "Ann".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.name, "Ann");
}

#[sqlx::test]
async fn test_upsert_keeps_name_when_empty(pool: PgPool) {
    common::create_test_user(&pool, 7).await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .upsert(NewUser {
            id: 7,
            name: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "user7");
}

#[sqlx::test]
async fn test_upsert_replaces_name(pool: PgPool) {
    common::create_test_user(&pool, 7).await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .upsert(NewUser {
            id: 7,
            name: "Ann Lee".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Ann Lee");
}

#[sqlx::test]
async fn test_find_by_id(pool: PgPool) {
    common::create_test_user(&pool, 7).await;
    let repo = PgUserRepository::new(Arc::new(pool));

    let found = repo.find_by_id(7).await.unwrap();
    assert_eq!(found.map(|u| u.name), Some("user7".to_string()));

    assert!(repo.find_by_id(8).await.unwrap().is_none());
}
