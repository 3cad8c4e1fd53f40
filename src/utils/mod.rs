//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Random URL-safe tokens for masked links

pub mod token_generator;
