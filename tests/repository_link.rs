use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_masker::domain::entities::NewLink;
use url_masker::domain::repositories::LinkRepository;
use url_masker::error::AppError;
use url_masker::infrastructure::persistence::PgLinkRepository;

fn new_link(link: &str, target: &str) -> NewLink {
    NewLink {
        link: link.to_string(),
        target: target.to_string(),
        password_hash: None,
        expiration_date: None,
    }
}

#[sqlx::test]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("https://mask.ly/abc12345", "https://example.com"))
        .await
        .unwrap();

    assert!(link.id > 0);
    assert_eq!(link.link, "https://mask.ly/abc12345");
    assert_eq!(link.target, "https://example.com");
    assert!(link.is_valid);
    assert_eq!(link.redirects_count, 0);
    assert!(link.password_hash.is_none());
}

#[sqlx::test]
async fn test_insert_keeps_hash_and_expiration(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let expiration = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let link = repo
        .insert(NewLink {
            link: "https://mask.ly/prot0001".to_string(),
            target: "https://example.com/protected".to_string(),
            password_hash: Some("$argon2id$v=19$fake".to_string()),
            expiration_date: Some(expiration),
        })
        .await
        .unwrap();

    assert_eq!(link.password_hash.as_deref(), Some("$argon2id$v=19$fake"));
    assert_eq!(link.expiration_date, Some(expiration));
}

#[sqlx::test]
async fn test_insert_duplicate_target(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("https://mask.ly/first001", "https://example.com/dup"))
        .await
        .unwrap();

    let result = repo
        .insert(new_link("https://mask.ly/second01", "https://example.com/dup"))
        .await;

    assert!(matches!(result, Err(AppError::DuplicateTarget { .. })));
}

#[sqlx::test]
async fn test_insert_duplicate_link_is_internal(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("https://mask.ly/same0001", "https://example.com/1"))
        .await
        .unwrap();

    let result = repo
        .insert(new_link("https://mask.ly/same0001", "https://example.com/2"))
        .await;

    assert!(matches!(result, Err(AppError::Internal { .. })));
}

#[sqlx::test]
async fn test_find_by_link_target_and_id(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let created = repo
        .insert(new_link("https://mask.ly/find0001", "https://example.com/find"))
        .await
        .unwrap();

    let by_link = repo.find_by_link("https://mask.ly/find0001").await.unwrap();
    let by_target = repo.find_by_target("https://example.com/find").await.unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap();

    assert_eq!(by_link, Some(created.clone()));
    assert_eq!(by_target, Some(created.clone()));
    assert_eq!(by_id, Some(created));
}

#[sqlx::test]
async fn test_find_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find_by_link("https://mask.ly/none").await.unwrap().is_none());
    assert!(repo.find_by_target("https://none.example").await.unwrap().is_none());
    assert!(repo.find_by_id(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_update_persists_validity(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let mut link = repo
        .insert(new_link("https://mask.ly/upd00001", "https://example.com/upd"))
        .await
        .unwrap();

    link.invalidate();
    repo.update(&link).await.unwrap();

    let stored = repo.find_by_id(link.id).await.unwrap().unwrap();
    assert!(!stored.is_valid);
}

#[sqlx::test]
async fn test_update_does_not_overwrite_redirect_count(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let mut stale = repo
        .insert(new_link("https://mask.ly/upd00002", "https://example.com/upd2"))
        .await
        .unwrap();

    repo.increment_redirects(stale.id).await.unwrap();

    stale.invalidate();
    repo.update(&stale).await.unwrap();

    let stored = repo.find_by_id(stale.id).await.unwrap().unwrap();
    assert!(!stored.is_valid);
    assert_eq!(stored.redirects_count, 1);
}

#[sqlx::test]
async fn test_update_missing_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let mut link = new_link("https://mask.ly/ghost001", "https://example.com/ghost")
        .into_link(424_242, Utc::now());
    link.invalidate();

    let result = repo.update(&link).await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_increment_redirects(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo
        .insert(new_link("https://mask.ly/inc00001", "https://example.com/inc"))
        .await
        .unwrap();

    let first = repo.increment_redirects(link.id).await.unwrap().unwrap();
    let second = repo.increment_redirects(link.id).await.unwrap().unwrap();

    assert_eq!(first.redirects_count, 1);
    assert_eq!(second.redirects_count, 2);
    assert!(repo.increment_redirects(999_999).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link = repo
        .insert(new_link("https://mask.ly/conc0001", "https://example.com/conc"))
        .await
        .unwrap();

    let id = link.id;
    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_redirects(id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.redirects_count, 20);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
