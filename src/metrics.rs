// Prometheus metrics for the gist gateway, exposed at /metrics.

use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    // requests reaching GET /{username}, valid or not
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("gists_requests_total", "Total number of gist requests").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "gists_upstream_latency_seconds",
        "GitHub API request latency in seconds"
    )
    .unwrap();
}

// cache metrics; a miss is one upstream call, a hit also covers joining an in-flight call
lazy_static! {
    pub static ref CACHE_HITS: Counter =
        register_counter!("gists_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("gists_cache_misses_total", "Total cache misses").unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("gists_cache_size", "Current number of items in cache").unwrap();
}

/// Registers every metric up front so /metrics lists them before the first request.
pub fn register() {
    lazy_static::initialize(&REQUEST_TOTAL);
    lazy_static::initialize(&UPSTREAM_LATENCY);
    lazy_static::initialize(&CACHE_HITS);
    lazy_static::initialize(&CACHE_MISSES);
    lazy_static::initialize(&CACHE_SIZE);
}
