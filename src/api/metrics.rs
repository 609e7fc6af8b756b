use actix_web::HttpResponse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);
static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Called once at startup so uptime has a baseline.
pub fn mark_started() {
    let _ = STARTED_AT.set(Instant::now());
}

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "Counters in Prometheus text format")
    )
)]
pub async fn get_metrics() -> HttpResponse {
    let requests = REQUEST_COUNT.load(Ordering::Relaxed);
    let errors = ERROR_COUNT.load(Ordering::Relaxed);
    let uptime = STARTED_AT
        .get()
        .map(|t| t.elapsed().as_secs())
        .unwrap_or(0);

    let metrics = format!(
        "# HELP siteboard_requests_total Total number of API requests\n\
         # TYPE siteboard_requests_total counter\n\
         siteboard_requests_total {}\n\
         \n\
         # HELP siteboard_errors_total Total number of API errors\n\
         # TYPE siteboard_errors_total counter\n\
         siteboard_errors_total {}\n\
         \n\
         # HELP siteboard_uptime_seconds Seconds since the service started\n\
         # TYPE siteboard_uptime_seconds gauge\n\
         siteboard_uptime_seconds {}\n",
        requests, errors, uptime
    );

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics)
}
