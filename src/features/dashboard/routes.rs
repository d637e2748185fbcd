use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Create dashboard routes
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route("/api/dashboard/trends", get(handlers::get_trends))
        .route(
            "/api/dashboard/trends/analysis",
            get(handlers::get_trend_analysis),
        )
        .route(
            "/api/dashboard/verification-summary",
            get(handlers::get_verification_summary),
        )
        .route(
            "/api/dashboard/third-party-stats",
            get(handlers::get_third_party_stats),
        )
        .route("/api/dashboard/correlation", get(handlers::get_correlation))
        .route("/api/dashboard/insights", get(handlers::get_insights))
        .route("/api/dashboard/custom", get(handlers::get_custom_dashboard))
        .route("/api/dashboard/export", get(handlers::export_dashboard))
        .with_state(dashboard_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn server() -> TestServer {
        let service = Arc::new(DashboardService::new(lazy_pool()));
        TestServer::new(routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_trends_rejects_out_of_range_days() {
        let server = server();

        for days in ["0", "366", "-3"] {
            server
                .get("/api/dashboard/trends")
                .add_query_param("days", days)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_trends_rejects_non_numeric_days() {
        server()
            .get("/api/dashboard/trends")
            .add_query_param("days", "week")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_trend_analysis_rejects_out_of_range_days() {
        server()
            .get("/api/dashboard/trends/analysis")
            .add_query_param("days", "400")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_custom_dashboard_rejects_unknown_widget() {
        let response = server()
            .get("/api/dashboard/custom")
            .add_query_param("widgets", "summary,weather")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Unknown widget: weather"));
    }

    #[tokio::test]
    async fn test_export_rejects_unknown_format() {
        server()
            .get("/api/dashboard/export")
            .add_query_param("format", "xml")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_export_csv_download(pool: sqlx::PgPool) {
        let server = TestServer::new(routes(Arc::new(DashboardService::new(pool)))).unwrap();

        let response = server
            .get("/api/dashboard/export")
            .add_query_param("format", "csv")
            .await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "text/csv; charset=utf-8");
        let disposition = response.header("content-disposition");
        let disposition = disposition.to_str().unwrap();
        assert!(disposition.starts_with("attachment; filename=\"veritas_dashboard_export_"));
        assert!(disposition.ends_with(".csv\""));

        let body = response.text();
        assert!(body.starts_with("section,metric,value\n"));
        assert!(body.contains("summary,total_content,0\n"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_custom_dashboard_only_renders_requested_widgets(pool: sqlx::PgPool) {
        let server = TestServer::new(routes(Arc::new(DashboardService::new(pool)))).unwrap();

        let response = server
            .get("/api/dashboard/custom")
            .add_query_param("widgets", "summary,third_party")
            .await;

        response.assert_status_ok();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["data"]["widgets"]["summary"]["total_content"], 0);
        assert!(body["data"]["widgets"]["third_party"].is_object());
        assert!(body["data"]["widgets"].get("trends").is_none());
        assert_eq!(body["data"]["layout"].as_array().unwrap().len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insights_on_empty_database(pool: sqlx::PgPool) {
        let server = TestServer::new(routes(Arc::new(DashboardService::new(pool)))).unwrap();

        let response = server.get("/api/dashboard/insights").await;
        response.assert_status_ok();
        assert!(response.json::<serde_json::Value>()["data"]["insights"].is_array());
    }
}
