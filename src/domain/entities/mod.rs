//! Core domain entities.
//!
//! - [`Link`] - A stored masked link
//! - [`NewLink`] - The fields supplied when a link is created

pub mod link;

pub use link::{Link, NewLink};
