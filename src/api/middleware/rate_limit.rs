//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type IpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// `replenish_ms` is the interval after which one request of the burst is
/// given back, so the sustained rate is `1000 / replenish_ms` per second.
fn build(replenish_ms: u64, burst_size: u32) -> IpGovernorLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_ms)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for like endpoints.
///
/// # Limits
///
/// - **Rate**: 5 requests per second (one every 200 ms)
/// - **Burst**: 50 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Keys are the
/// peer socket address, so the server must be served with connect info.
pub fn layer() -> IpGovernorLayer {
    build(200, 50)
}

/// Stricter rate limiter for login.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure_layer() -> IpGovernorLayer {
    build(1000, 10)
}
