use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::{Deserialize, Serialize};

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct HealthResponse {
    http: bool,
    /// `null` if email delivery is disabled
    email: Option<bool>,
    resume: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;
    let HealthStatus { email, resume } = status;

    let code = if status.ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let response = HealthResponse {
        http: true,
        email,
        resume,
    };

    (code, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_health_contracts::MockHealthFeatureService;

    use super::*;
    use crate::routes::test_utils::{body_json, call};

    fn request() -> Request<Body> {
        Request::get("/health").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn healthy_in_log_only_mode() {
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            email: None,
            resume: true,
        });

        let response = call(router(Arc::new(service)), request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json::<HealthResponse>(response).await,
            HealthResponse {
                http: true,
                email: None,
                resume: true
            }
        );
    }

    #[tokio::test]
    async fn unhealthy() {
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus {
            email: Some(false),
            resume: true,
        });

        let response = call(router(Arc::new(service)), request()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json::<HealthResponse>(response).await.email,
            Some(false)
        );
    }
}
