//! Domain layer containing the link entity and its collaborator contracts.
//!
//! Nothing here depends on the database, the HTTP layer or a hashing crate.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`password_hasher`] - One-way password hashing capability
//!
//! Implementations of the traits live in [`crate::infrastructure`]; business
//! rules live in [`crate::application::services`].

pub mod entities;
pub mod password_hasher;
pub mod repositories;
