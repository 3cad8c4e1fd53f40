//! Link entity representing a masked URL.

use chrono::{DateTime, Utc};

/// A masked link and its redirect bookkeeping.
///
/// `link`, `target` and `password_hash` never change after creation.
/// `is_valid` only goes from `true` to `false`, and `redirects_count` only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    /// The masked URL handed out to clients (prefix + token).
    pub link: String,
    /// The original URL this link resolves to.
    pub target: String,
    pub is_valid: bool,
    pub redirects_count: i64,
    pub password_hash: Option<String>,
    /// Stored as supplied; redirects do not check it.
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if redirects through this link require a password.
    pub fn is_protected(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Marks the link as no longer resolvable. Calling it twice is a no-op.
    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub link: String,
    pub target: String,
    pub password_hash: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl NewLink {
    /// Builds the stored entity with store-assigned `id` and `created_at`.
    pub fn into_link(self, id: i64, created_at: DateTime<Utc>) -> Link {
        Link {
            id,
            link: self.link,
            target: self.target,
            is_valid: true,
            redirects_count: 0,
            password_hash: self.password_hash,
            expiration_date: self.expiration_date,
            created_at,
        }
    }
}
