//! Metrics collection.
//!
//! # Metrics
//! - `router_navigations_total` (counter): completed or failed cycles by `outcome`
//!   (`mounted`, `empty`, `no_match`, `superseded`, `failed`)
//! - `router_redirects_total` (counter): redirects followed
//! - `router_resolution_errors_total` (counter): failed content resolutions
//! - `router_resolution_duration_seconds` (histogram): time spent resolving,
//!   including module imports
//!
//! # Design Decisions
//! - Labels limited to outcome; urls are unbounded and stay out of labels

use std::time::Duration;

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    metrics::describe_counter!(
        "router_navigations_total",
        "Navigation cycles by outcome"
    );
    metrics::describe_counter!("router_redirects_total", "Redirects followed");
    metrics::describe_counter!(
        "router_resolution_errors_total",
        "Content resolutions that failed"
    );
    metrics::describe_histogram!(
        "router_resolution_duration_seconds",
        metrics::Unit::Seconds,
        "Time spent resolving route content"
    );
}

/// Record the end of a navigation cycle.
pub fn record_navigation(outcome: &'static str) {
    metrics::counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

/// Record a followed redirect.
pub fn record_redirect() {
    metrics::counter!("router_redirects_total").increment(1);
}

/// Record one content resolution.
pub fn record_resolution(duration: Duration, ok: bool) {
    metrics::histogram!("router_resolution_duration_seconds").record(duration.as_secs_f64());
    if !ok {
        metrics::counter!("router_resolution_errors_total").increment(1);
    }
}
