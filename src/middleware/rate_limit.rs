use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::rate_limit::RateLimitStatus;
use crate::state::AppState;

static RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
static RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
static RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

// Key used when the peer address is not available (e.g. in-process requests)
const UNKNOWN_CLIENT: &str = "unknown";

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    REQUEST_TOTAL.inc();

    let client = client_key(&request);
    let status = match state.rate_limiter.check(&client, Utc::now()) {
        Ok(status) => status,
        Err(err) => {
            RATE_LIMITED_TOTAL.inc();
            tracing::warn!(client = %client, "Rate limit exceeded");
            return err.into_response();
        }
    };

    let start_time = Instant::now();
    let mut response = next.run(request).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    apply_quota_headers(response.headers_mut(), &status);
    response
}

pub fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn apply_quota_headers(headers: &mut HeaderMap, status: &RateLimitStatus) {
    headers.insert(RATE_LIMIT_LIMIT.clone(), HeaderValue::from(status.limit));
    headers.insert(
        RATE_LIMIT_REMAINING.clone(),
        HeaderValue::from(status.remaining),
    );

    let reset = status.reset_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    if let Ok(value) = HeaderValue::from_str(&reset) {
        headers.insert(RATE_LIMIT_RESET.clone(), value);
    }
}
