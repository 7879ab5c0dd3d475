use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::ApiError;
use crate::state::AppState;

struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

/// Per-client-IP token bucket: `requests` per `window`, burst up to
/// `requests`. Buckets are created on first sight and never evicted, so a
/// long-running process accumulates one entry per distinct client.
pub struct RateLimiter {
    buckets: Mutex<HashMap<IpAddr, TokenBucket>>,
    capacity: f64,
    refill_per_second: f64,
}

impl RateLimiter {
    pub fn new(requests: u32, window: Duration) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            capacity: f64::from(requests),
            refill_per_second: f64::from(requests) / window.as_secs_f64().max(f64::MIN_POSITIVE),
        }
    }

    pub async fn allow(&self, client: IpAddr) -> bool {
        let now = Instant::now();
        let mut buckets = self.buckets.lock().await;
        let bucket = buckets.entry(client).or_insert(TokenBucket {
            tokens: self.capacity,
            last_refill: now,
        });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_second).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if state.rate_limiter.allow(addr.ip()).await {
        next.run(req).await
    } else {
        tracing::warn!(client = %addr.ip(), "rate limit exceeded");
        ApiError::RateLimited.into_response()
    }
}
