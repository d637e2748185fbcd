use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::features::performance::models::RequestProfile;
use crate::shared::stats::round2;

const UNMATCHED: &str = "unmatched";

/// Per-route timing collected by the [`profile_requests`] middleware
pub struct RequestProfiler {
    profiles: RwLock<HashMap<String, RequestProfile>>,
    slow_threshold: Duration,
}

impl RequestProfiler {
    pub fn new(slow_threshold: Duration) -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            slow_threshold,
        }
    }

    pub async fn record(&self, name: &str, elapsed: Duration, status: u16) {
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let slow = elapsed > self.slow_threshold;
        if slow {
            warn!("Slow request {} took {:.2}ms", name, elapsed_ms);
        }

        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .entry(name.to_string())
            .or_insert_with(|| RequestProfile {
                name: name.to_string(),
                calls: 0,
                total_ms: 0.0,
                avg_ms: 0.0,
                min_ms: f64::MAX,
                max_ms: 0.0,
                slow_calls: 0,
                last_status: status,
                last_called_at: Utc::now(),
            });

        profile.calls += 1;
        profile.total_ms += elapsed_ms;
        profile.avg_ms = profile.total_ms / profile.calls as f64;
        profile.min_ms = profile.min_ms.min(elapsed_ms);
        profile.max_ms = profile.max_ms.max(elapsed_ms);
        if slow {
            profile.slow_calls += 1;
        }
        profile.last_status = status;
        profile.last_called_at = Utc::now();
    }

    /// All profiles, slowest average first
    pub async fn profiles(&self) -> Vec<RequestProfile> {
        let mut profiles: Vec<RequestProfile> = self
            .profiles
            .read()
            .await
            .values()
            .map(rounded)
            .collect();
        profiles.sort_by(|a, b| b.avg_ms.total_cmp(&a.avg_ms).then(a.name.cmp(&b.name)));
        profiles
    }

    pub async fn profile(&self, name: &str) -> Option<RequestProfile> {
        self.profiles.read().await.get(name).map(rounded)
    }

    /// Drop every profile, returning how many there were
    pub async fn clear(&self) -> usize {
        let mut profiles = self.profiles.write().await;
        let cleared = profiles.len();
        profiles.clear();
        cleared
    }
}

fn rounded(profile: &RequestProfile) -> RequestProfile {
    RequestProfile {
        total_ms: round2(profile.total_ms),
        avg_ms: round2(profile.avg_ms),
        min_ms: round2(profile.min_ms),
        max_ms: round2(profile.max_ms),
        ..profile.clone()
    }
}

/// Time every request and file it under its method and matched route
pub async fn profile_requests(
    State(profiler): State<Arc<RequestProfiler>>,
    req: Request,
    next: Next,
) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED.to_string());
    let name = format!("{} {}", req.method(), route);
    let start = Instant::now();

    let response = next.run(req).await;
    profiler
        .record(&name, start.elapsed(), response.status().as_u16())
        .await;

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_record_accumulates_timings() {
        let profiler = RequestProfiler::new(Duration::from_millis(100));
        profiler.record("GET /a", Duration::from_millis(10), 200).await;
        profiler.record("GET /a", Duration::from_millis(30), 200).await;
        profiler.record("GET /a", Duration::from_millis(250), 500).await;

        let profile = profiler.profile("GET /a").await.unwrap();
        assert_eq!(profile.calls, 3);
        assert_eq!(profile.min_ms, 10.0);
        assert_eq!(profile.max_ms, 250.0);
        assert_eq!(profile.total_ms, 290.0);
        assert_eq!(profile.avg_ms, 96.67);
        assert_eq!(profile.slow_calls, 1);
        assert_eq!(profile.last_status, 500);
        assert!(profiler.profile("GET /b").await.is_none());
    }

    #[tokio::test]
    async fn test_profiles_sorted_and_cleared() {
        let profiler = RequestProfiler::new(Duration::from_secs(1));
        profiler.record("GET /fast", Duration::from_millis(1), 200).await;
        profiler.record("POST /slow", Duration::from_millis(40), 201).await;

        let names: Vec<String> = profiler.profiles().await.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["POST /slow", "GET /fast"]);

        assert_eq!(profiler.clear().await, 2);
        assert!(profiler.profiles().await.is_empty());
    }

    #[tokio::test]
    async fn test_middleware_keys_by_matched_route() {
        let profiler = Arc::new(RequestProfiler::new(Duration::from_secs(1)));
        let app = Router::new()
            .route("/items/{id}", get(|| async { "item" }))
            .layer(from_fn_with_state(Arc::clone(&profiler), profile_requests));
        let server = TestServer::new(app).unwrap();

        server.get("/items/1").await.assert_status_ok();
        server.get("/items/2").await.assert_status_ok();
        server
            .get("/missing")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let item = profiler.profile("GET /items/{id}").await.unwrap();
        assert_eq!(item.calls, 2);
        assert_eq!(item.last_status, 200);

        let unmatched = profiler.profile("GET unmatched").await.unwrap();
        assert_eq!(unmatched.last_status, 404);
    }
}
