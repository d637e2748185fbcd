use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::performance::handlers;
use crate::features::performance::services::PerformanceService;

/// Create routes for database, profiling and host monitoring
pub fn routes(service: Arc<PerformanceService>) -> Router {
    Router::new()
        .route(
            "/api/performance/db/connections",
            get(handlers::get_connection_stats),
        )
        .route("/api/performance/db/stats", get(handlers::get_database_stats))
        .route(
            "/api/performance/profiling/profiles",
            get(handlers::list_profiles).delete(handlers::clear_profiles),
        )
        .route(
            "/api/performance/profiling/profile",
            get(handlers::get_profile),
        )
        .route(
            "/api/performance/monitoring/system",
            get(handlers::get_system_metrics),
        )
        .route(
            "/api/performance/monitoring/process",
            get(handlers::get_process_metrics),
        )
        .route(
            "/api/performance/monitoring/alerts",
            get(handlers::get_alerts),
        )
        .route(
            "/api/performance/monitoring/report",
            get(handlers::get_report),
        )
        .route(
            "/api/performance/monitoring/history",
            get(handlers::get_history),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PerformanceConfig;
    use crate::features::performance::services::profile_requests;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum_test::TestServer;
    use serde_json::Value;

    fn server() -> (TestServer, Arc<PerformanceService>) {
        let service = Arc::new(PerformanceService::new(
            lazy_pool(),
            PerformanceConfig::default(),
        ));
        let app = routes(Arc::clone(&service))
            .layer(from_fn_with_state(service.profiler(), profile_requests));
        (TestServer::new(app).unwrap(), service)
    }

    #[tokio::test]
    async fn test_connection_stats() {
        let (server, _) = server();
        let response = server.get("/api/performance/db/connections").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["max_connections"], 1);
        assert_eq!(body["data"]["active"], 0);
    }

    #[tokio::test]
    async fn test_requests_are_profiled() {
        let (server, _) = server();
        server
            .get("/api/performance/db/connections")
            .await
            .assert_status_ok();

        let listed = server
            .get("/api/performance/profiling/profiles")
            .await
            .json::<Value>();
        let names: Vec<&str> = listed["data"]["profiles"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert!(names.contains(&"GET /api/performance/db/connections"));

        let profile = server
            .get("/api/performance/profiling/profile")
            .add_query_param("name", "GET /api/performance/db/connections")
            .await;
        profile.assert_status_ok();
        assert_eq!(profile.json::<Value>()["data"]["calls"], 1);
    }

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let (server, _) = server();
        server
            .get("/api/performance/profiling/profile")
            .add_query_param("name", "GET /nowhere")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clear_profiles() {
        let (server, service) = server();
        server
            .get("/api/performance/db/connections")
            .await
            .assert_status_ok();

        let cleared = server.delete("/api/performance/profiling/profiles").await;
        cleared.assert_status_ok();
        assert_eq!(cleared.json::<Value>()["data"]["cleared"], 1);
        // The DELETE itself is recorded once the response is produced
        assert_eq!(service.profiler().profiles().await.len(), 1);
    }

    #[tokio::test]
    async fn test_system_and_process_metrics() {
        let (server, _) = server();

        let system = server.get("/api/performance/monitoring/system").await;
        system.assert_status_ok();
        assert!(system.json::<Value>()["data"]["cpu"]["count"].as_u64().unwrap() > 0);

        let process = server.get("/api/performance/monitoring/process").await;
        process.assert_status_ok();
        assert_eq!(
            process.json::<Value>()["data"]["pid"].as_u64().unwrap(),
            std::process::id() as u64
        );

        let alerts = server.get("/api/performance/monitoring/alerts").await;
        alerts.assert_status_ok();
        assert!(alerts.json::<Value>()["data"]["alerts"].is_array());
    }

    #[tokio::test]
    async fn test_history_and_report() {
        let (server, service) = server();

        let empty = server.get("/api/performance/monitoring/report").await;
        empty.assert_status_ok();
        let body = empty.json::<Value>();
        assert_eq!(body["data"]["data_points_count"], 0);
        assert_eq!(body["data"]["averages"], Value::Null);

        service.monitor().sample().await;
        service.monitor().sample().await;

        let history = server
            .get("/api/performance/monitoring/history")
            .add_query_param("limit", 1)
            .await;
        history.assert_status_ok();
        let body = history.json::<Value>();
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["meta"]["total"], 1);

        let report = server
            .get("/api/performance/monitoring/report")
            .await
            .json::<Value>();
        assert_eq!(report["data"]["averages"]["sample_size"], 2);
    }

    #[tokio::test]
    async fn test_history_limit_zero_is_bad_request() {
        let (server, _) = server();
        server
            .get("/api/performance/monitoring/history")
            .add_query_param("limit", 0)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
