//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    links: Vec<Link>,
    next_id: i64,
}

/// Process-local link store.
///
/// Enforces the same unique constraints as the PostgreSQL schema (`link` and
/// `target`) and performs each operation under a single lock, so redirect
/// increments are atomic. Data is lost when the process exits.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    store: RwLock<Store>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.store.write().await;

        if store.links.iter().any(|l| l.target == new_link.target) {
            return Err(AppError::DuplicateTarget {
                target: new_link.target,
            });
        }

        if store.links.iter().any(|l| l.link == new_link.link) {
            return Err(AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": "links_link_key" }),
            ));
        }

        store.next_id += 1;
        let link = new_link.into_link(store.next_id, Utc::now());
        store.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let store = self.store.read().await;
        Ok(store.links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError> {
        let store = self.store.read().await;
        Ok(store.links.iter().find(|l| l.link == link).cloned())
    }

    async fn find_by_target(&self, target: &str) -> Result<Option<Link>, AppError> {
        let store = self.store.read().await;
        Ok(store.links.iter().find(|l| l.target == target).cloned())
    }

    async fn update(&self, link: &Link) -> Result<(), AppError> {
        let mut store = self.store.write().await;

        let stored = store
            .links
            .iter_mut()
            .find(|l| l.id == link.id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link.id })))?;

        stored.is_valid = link.is_valid;

        Ok(())
    }

    async fn increment_redirects(&self, id: i64) -> Result<Option<Link>, AppError> {
        let mut store = self.store.write().await;

        Ok(store.links.iter_mut().find(|l| l.id == id).map(|l| {
            l.redirects_count += 1;
            l.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(link: &str, target: &str) -> NewLink {
        NewLink {
            link: link.to_string(),
            target: target.to_string(),
            password_hash: None,
            expiration_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryLinkRepository::new();

        let first = repo
            .insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();
        let second = repo
            .insert(new_link("https://mask.ly/b", "https://b.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(first.is_valid);
        assert_eq!(first.redirects_count, 0);
    }

    #[tokio::test]
    async fn test_insert_duplicate_target() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        let result = repo
            .insert(new_link("https://mask.ly/b", "https://a.com"))
            .await;

        assert!(matches!(result, Err(AppError::DuplicateTarget { .. })));
    }

    #[tokio::test]
    async fn test_insert_duplicate_link_is_internal() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        let result = repo
            .insert(new_link("https://mask.ly/a", "https://b.com"))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_find_by_fields() {
        let repo = InMemoryLinkRepository::new();
        let created = repo
            .insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(
            repo.find_by_link("https://mask.ly/a").await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            repo.find_by_target("https://a.com").await.unwrap(),
            Some(created)
        );
        assert!(repo.find_by_id(99).await.unwrap().is_none());
        assert!(repo.find_by_link("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_persists_mutable_fields() {
        let repo = InMemoryLinkRepository::new();
        let mut link = repo
            .insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        link.invalidate();
        repo.update(&link).await.unwrap();

        let stored = repo.find_by_id(link.id).await.unwrap().unwrap();
        assert!(!stored.is_valid);
    }

    #[tokio::test]
    async fn test_update_keeps_redirects_counted_after_read() {
        let repo = InMemoryLinkRepository::new();
        let mut stale = repo
            .insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        repo.increment_redirects(stale.id).await.unwrap();
        repo.increment_redirects(stale.id).await.unwrap();

        stale.invalidate();
        repo.update(&stale).await.unwrap();

        let stored = repo.find_by_id(stale.id).await.unwrap().unwrap();
        assert!(!stored.is_valid);
        assert_eq!(stored.redirects_count, 2);
    }

    #[tokio::test]
    async fn test_update_missing_link() {
        let repo = InMemoryLinkRepository::new();
        let link = new_link("https://mask.ly/a", "https://a.com").into_link(42, Utc::now());

        let result = repo.update(&link).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        let link = repo
            .insert(new_link("https://mask.ly/a", "https://a.com"))
            .await
            .unwrap();

        let id = link.id;
        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_redirects(id).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.find_by_id(link.id).await.unwrap().unwrap();
        assert_eq!(stored.redirects_count, 50);
    }

    #[tokio::test]
    async fn test_increment_missing_link() {
        let repo = InMemoryLinkRepository::new();
        assert!(repo.increment_redirects(1).await.unwrap().is_none());
    }
}
