#[cfg(test)]
mod integration_tests {
    use crate::config::{ProviderSettings, Settings};
    use crate::schemas::HealthResponse;
    use crate::test_utils::test_utils::{init_test_tracing, setup_test_app, setup_test_app_with};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{ApiResponse, DashboardData, ErrorResponse, PipelineConfig, RiskLevel};
    use rust_decimal::Decimal;

    fn failing_settings() -> Settings {
        Settings {
            provider: ProviderSettings {
                failure: Some("forecast model is retraining".to_string()),
            },
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let _guard = init_test_tracing();
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.provider, "ready");
    }

    #[tokio::test]
    async fn test_health_reports_failing_provider() {
        let server = TestServer::new(setup_test_app_with(&failing_settings())).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.provider, "failing");
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        let _guard = init_test_tracing();
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<DashboardData> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Dashboard data retrieved successfully");

        let data = body.data;
        assert_eq!(data.series.len(), 12);
        assert_eq!(data.series[0].period, "Jan");
        assert_eq!(data.series[0].savings, Decimal::from(2000));
        assert_eq!(data.series[0].expenses, Decimal::from(1400));
        assert_eq!(data.series[11].period, "Dec");
        assert_eq!(data.series[11].savings, Decimal::from(4800));
        assert_eq!(data.risk_level, RiskLevel::Low);
        assert_eq!(data.risk_score, 22);
        assert!(data.insight.contains("utilities"));
    }

    #[tokio::test]
    async fn test_dashboard_amounts_are_strings_on_the_wire() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api/v1/dashboard").await;

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["series"][0]["savings"], "2000");
        assert_eq!(body["data"]["risk_level"], "Low");
    }

    #[tokio::test]
    async fn test_get_dashboard_provider_failure() {
        let _guard = init_test_tracing();
        let server = TestServer::new(setup_test_app_with(&failing_settings())).unwrap();

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "PROVIDER_UNAVAILABLE");
        assert_eq!(
            body.error,
            "Forecast provider unavailable: forecast model is retraining"
        );
    }

    #[tokio::test]
    async fn test_get_pipeline_defaults() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api/v1/dashboard/pipeline").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<PipelineConfig> = response.json();
        assert!(body.success);
        assert_eq!(body.data, PipelineConfig::default());
        let labels: Vec<_> = body.data.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Analyzing Trends", "Calculating Risk", "Generating Forecast"]
        );
    }

    #[tokio::test]
    async fn test_get_pipeline_from_settings() {
        let mut settings = Settings::default();
        settings.pipeline.labels = vec!["Warm up".to_string(), "Crunch".to_string()];
        settings.pipeline.stage_durations_ms = vec![200, 800];
        let server = TestServer::new(setup_test_app_with(&settings)).unwrap();

        let response = server.get("/api/v1/dashboard/pipeline").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<PipelineConfig> = response.json();
        assert_eq!(body.data.stages.len(), 2);
        assert_eq!(body.data.stages[1].label, "Crunch");
        assert_eq!(body.data.stages[1].duration_ms, 800);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api/v1/dashboards").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert!(body["paths"]["/api/v1/dashboard"].is_object());
    }
}
