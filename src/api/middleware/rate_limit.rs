//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Creates a per-IP rate limiter for the link endpoints.
///
/// # Limits
///
/// - **Rate**: one request slot replenished every `replenish_seconds` seconds
/// - **Burst**: up to `burst` requests at once
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the socket
/// peer address, so the server must be started with connect info.
///
/// # Errors
///
/// Returns an error if `replenish_seconds` or `burst` is zero.
pub fn layer(
    replenish_seconds: u64,
    burst: u32,
) -> Result<GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(replenish_seconds)
        .burst_size(burst)
        .finish()
        .context("Rate limit period and burst must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
