//! Masked link creation, redirect, statistics and invalidation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::password_hasher::PasswordHasher;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::token_generator::{TOKEN_SIZE_BYTES, generate_token};

/// Service orchestrating the masked link lifecycle.
///
/// Holds no mutable state of its own; every request reads and writes through
/// the repository.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    hasher: Arc<dyn PasswordHasher>,
    mask_prefix: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - link storage
    /// - `hasher` - one-way hash for link passwords
    /// - `mask_prefix` - prepended to every generated token (e.g. `https://mask.ly/`)
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        hasher: Arc<dyn PasswordHasher>,
        mask_prefix: String,
    ) -> Self {
        Self {
            repository,
            hasher,
            mask_prefix,
        }
    }

    /// Creates a masked link for `url`.
    ///
    /// An empty password is treated as no password. Only the hash of a
    /// supplied password is stored. `expiration_date` is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DuplicateTarget`] if `url` already has a masked link.
    /// Returns [`AppError::Internal`] on hashing, randomness or store failures.
    pub async fn create(
        &self,
        url: String,
        password: Option<String>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        if self.repository.find_by_target(&url).await?.is_some() {
            return Err(AppError::DuplicateTarget { target: url });
        }

        let token = generate_token(TOKEN_SIZE_BYTES)?;
        let link = format!("{}{}", self.mask_prefix, token);

        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(plain) => Some(self.hash_password(plain).await?),
            None => None,
        };

        let created = self
            .repository
            .insert(NewLink {
                link,
                target: url,
                password_hash,
                expiration_date,
            })
            .await?;

        info!(
            link_id = created.id,
            protected = created.is_protected(),
            "Masked link created"
        );

        Ok(created)
    }

    /// Returns the link with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn statistics(&self, id: i64) -> Result<Link, AppError> {
        let link = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        debug!(link_id = id, redirects = link.redirects_count, "Statistics read");

        Ok(link)
    }

    /// Resolves a masked link and counts the redirect.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// existence, validity, password presence, password match.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the masked link does not exist
    /// - [`AppError::InvalidLink`] if the link was invalidated
    /// - [`AppError::PasswordRequired`] if the link is protected and no
    ///   (or an empty) password was given
    /// - [`AppError::PasswordIncorrect`] if the password does not match
    pub async fn redirect(&self, link: &str, password: Option<String>) -> Result<Link, AppError> {
        let found = self.find_by_link(link).await?;

        if !found.is_valid {
            return Err(AppError::InvalidLink {
                link: link.to_string(),
            });
        }

        if let Some(hash) = found.password_hash.clone() {
            let Some(plain) = password.filter(|p| !p.is_empty()) else {
                return Err(AppError::PasswordRequired);
            };

            if !self.verify_password(plain, hash).await? {
                warn!(link_id = found.id, "Rejected redirect with incorrect password");
                return Err(AppError::PasswordIncorrect);
            }
        }

        let updated = self
            .repository
            .increment_redirects(found.id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link": link })))?;

        info!(
            link_id = updated.id,
            redirects = updated.redirects_count,
            "Redirect recorded"
        );

        Ok(updated)
    }

    /// Marks a masked link invalid. Invalidating twice succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the masked link does not exist.
    pub async fn invalidate_link(&self, link: &str) -> Result<(), AppError> {
        let mut found = self.find_by_link(link).await?;

        found.invalidate();
        self.repository.update(&found).await?;

        info!(link_id = found.id, "Masked link invalidated");

        Ok(())
    }

    /// Checks that the underlying store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn find_by_link(&self, link: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_link(link)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "link": link })))
    }

    /// Runs on the blocking pool.
    async fn hash_password(&self, plain: String) -> Result<String, AppError> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| {
                AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() }))
            })?
    }

    async fn verify_password(&self, plain: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.hasher.clone();

        tokio::task::spawn_blocking(move || hasher.verify(&plain, &hash))
            .await
            .map_err(|e| {
                AppError::internal(
                    "Password verification task failed",
                    json!({ "reason": e.to_string() }),
                )
            })?
    }
}
