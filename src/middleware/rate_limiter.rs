use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::sync::RwLock;
use std::time::{Duration, Instant};
use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
};
use crate::utils::api_response::ResponseBuilder;
use crate::config::{AppState, Config};

struct Buckets {
    hits: HashMap<String, Vec<Instant>>,
    last_sweep: Instant,
}

/// Sliding-window limiter keyed by client identifier.
pub struct RateLimiter {
    buckets: RwLock<Buckets>,
    max_requests: usize,
    window: Duration,
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rate_limit_max, Duration::from_secs(config.rate_limit_window_secs))
            .trust_forwarded_for(config.trust_proxy)
    }

    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            buckets: RwLock::new(Buckets {
                hits: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            max_requests,
            window,
            trust_forwarded_for: false,
        }
    }

    /// Only honour `X-Forwarded-For` when a trusted proxy sets it.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub async fn check_rate_limit(&self, identifier: &str) -> bool {
        let mut buckets = self.buckets.write().await;
        let now = Instant::now();
        let cutoff = now.checked_sub(self.window).unwrap_or(now);

        // Once per window, drop every client whose timestamps have all expired.
        if now.duration_since(buckets.last_sweep) >= self.window {
            buckets.hits.retain(|_, stamps| {
                stamps.retain(|&t| t > cutoff);
                !stamps.is_empty()
            });
            buckets.last_sweep = now;
        }

        let entry = buckets.hits.entry(identifier.to_string()).or_default();
        entry.retain(|&timestamp| timestamp > cutoff);

        if entry.len() >= self.max_requests {
            return false;
        }

        entry.push(now);
        true
    }

    pub async fn tracked_clients(&self) -> usize {
        self.buckets.read().await.hits.len()
    }

    /// Peer address for direct clients; first `X-Forwarded-For` hop behind a trusted proxy.
    pub fn client_key(&self, request: &Request) -> String {
        if self.trust_forwarded_for {
            let forwarded = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').next())
                .map(str::trim)
                .filter(|s| !s.is_empty());
            if let Some(ip) = forwarded {
                return ip.to_string();
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let limiter = &state.rate_limiter;
    let identifier = limiter.client_key(&request);

    if !limiter.check_rate_limit(&identifier).await {
        tracing::warn!("Rate limit exceeded for {}", identifier);
        return ResponseBuilder::error::<()>(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMIT_EXCEEDED",
            "Too many requests. Please try again later.",
        ).into_response();
    }

    next.run(request).await
}
