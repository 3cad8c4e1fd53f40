//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Unique constraint guarding `links.target`.
const TARGET_UNIQUE_CONSTRAINT: &str = "links_target_key";

const LINK_COLUMNS: &str =
    "id, link, target, is_valid, redirects_count, password_hash, expiration_date, created_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    link: String,
    target: String,
    is_valid: bool,
    redirects_count: i64,
    password_hash: Option<String>,
    expiration_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            link: row.link,
            target: row.target,
            is_valid: row.is_valid,
            redirects_count: row.redirects_count,
            password_hash: row.password_hash,
            expiration_date: row.expiration_date,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for masked links.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn find_one_by(&self, column: &str, value: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE {column} = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }
}

fn is_duplicate_target(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation() && db_err.constraint() == Some(TARGET_UNIQUE_CONSTRAINT)
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            r#"
            INSERT INTO links (link, target, password_hash, expiration_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(&new_link.link)
            .bind(&new_link.target)
            .bind(&new_link.password_hash)
            .bind(new_link.expiration_date)
            .fetch_one(self.pool.as_ref())
            .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_duplicate_target(&e) => Err(AppError::DuplicateTarget {
                target: new_link.target,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE id = $1");

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_link(&self, link: &str) -> Result<Option<Link>, AppError> {
        self.find_one_by("link", link).await
    }

    async fn find_by_target(&self, target: &str) -> Result<Option<Link>, AppError> {
        self.find_one_by("target", target).await
    }

    async fn update(&self, link: &Link) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE links SET is_valid = $2 WHERE id = $1")
            .bind(link.id)
            .bind(link.is_valid)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "id": link.id }),
            ));
        }

        Ok(())
    }

    async fn increment_redirects(&self, id: i64) -> Result<Option<Link>, AppError> {
        let sql = format!(
            r#"
            UPDATE links
            SET redirects_count = redirects_count + 1
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, LinkRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
