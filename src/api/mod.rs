//! REST API layer for HTTP request/response handling.
//!
//! This layer validates inbound payloads, forwards them to
//! [`crate::application::services::LinkService`] and shapes the responses.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
