//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the domain traits.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory link repositories
//! - [`security`] - Argon2id password hashing

pub mod persistence;
pub mod security;
