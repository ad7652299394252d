use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("vote_requests_total", "Total number of vote requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("vote_rate_limited_total", "Requests rejected by the rate limiter")
            .unwrap();
    pub static ref UPSTREAM_FAILURES: Counter =
        register_counter!("vote_upstream_failures_total", "Failed upstream page fetches").unwrap();
    pub static ref FETCH_LATENCY: Histogram = register_histogram!(
        "vote_fetch_latency_seconds",
        "Upstream fetch and extraction latency in seconds"
    )
    .unwrap();
    pub static ref NAMES_RETURNED: Histogram = register_histogram!(
        "vote_names_returned",
        "Number of names in each successful response",
        vec![0.0, 10.0, 50.0, 100.0, 150.0, 200.0]
    )
    .unwrap();
}
