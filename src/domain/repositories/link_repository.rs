//! Repository trait for masked link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for masked links.
///
/// Single-row operations only; no multi-statement transaction is assumed.
/// The store must enforce uniqueness of both `link` and `target`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateTarget`] if the target is already stored.
    /// Returns [`AppError::Internal`] on any other store failure, including a
    /// collision on the masked link itself.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its masked URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its original target URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_target(&self, target: &str) -> Result<Option<Link>, AppError>;

    /// Persists the validity flag of an existing link.
    ///
    /// `redirects_count` is never written here; only
    /// [`LinkRepository::increment_redirects`] changes it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row has `link.id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, link: &Link) -> Result<(), AppError>;

    /// Atomically adds one to the redirect counter and returns the updated link.
    ///
    /// Returns `Ok(None)` if the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_redirects(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
