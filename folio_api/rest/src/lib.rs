use std::{net::IpAddr, sync::Arc};

use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use folio_core_resume_contracts::ResumeFeatureService;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact, Resume> {
    health: Health,
    contact: Contact,
    resume: Resume,
    config: Arc<RestServerConfig>,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl<Health, Contact, Resume> RestServer<Health, Contact, Resume>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
    Resume: ResumeFeatureService,
{
    pub fn new(health: Health, contact: Contact, resume: Resume, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            resume,
            config: config.into(),
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let (host, port) = (self.config.host, self.config.port);
        let router = self.router()?;
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    fn router(self) -> anyhow::Result<Router<()>> {
        let cors = middlewares::cors::layer(&self.config.allowed_origins)?;

        let router = Router::new()
            .merge(routes::health::router(Arc::new(self.health)))
            .merge(routes::contact::router(Arc::new(self.contact)))
            .merge(routes::resume::router(Arc::new(self.resume)));

        let router = middlewares::panic_handler::add(router).layer(cors);
        let router = middlewares::trace::add(router);
        Ok(middlewares::request_id::add(router))
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(err) => tracing::error!("Failed to listen for shutdown signal: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use folio_core_contact_contracts::{
        ContactDelivery, ContactSendMessageError, MockContactFeatureService,
    };
    use folio_core_health_contracts::MockHealthFeatureService;
    use folio_core_resume_contracts::MockResumeFeatureService;
    use folio_models::contact::{ContactForm, ContactMessage};
    use serde_json::json;

    use super::*;
    use crate::{
        middlewares::request_id,
        models::ApiResult,
        routes::test_utils::{body_json, call},
    };

    struct PanickingContactService;

    impl ContactFeatureService for PanickingContactService {
        async fn send_message(
            &self,
            _message: ContactMessage,
        ) -> Result<ContactDelivery, ContactSendMessageError> {
            panic!("boom")
        }
    }

    fn sut<Contact: ContactFeatureService>(
        contact: Contact,
        allowed_origins: Vec<String>,
    ) -> RestServer<MockHealthFeatureService, Contact, MockResumeFeatureService> {
        RestServer::new(
            MockHealthFeatureService::new(),
            contact,
            MockResumeFeatureService::new(),
            RestServerConfig {
                host: [127, 0, 0, 1].into(),
                port: 0,
                allowed_origins,
            },
        )
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Al".into(),
            email: "a@b.com".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
        }
    }

    fn contact_request() -> Request<Body> {
        let ContactForm {
            name,
            email,
            subject,
            message,
        } = form();
        let body = json!({"name": name, "email": email, "subject": subject, "message": message});

        Request::post("/api/contact")
            .header("content-type", "application/json")
            .header("origin", "https://portfolio.example.com")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn handler_panic() {
        let router = sut(PanickingContactService, Vec::new()).router().unwrap();

        let response = call(router, contact_request()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().contains_key(request_id::HEADER_NAME));
        let body: ApiResult = body_json(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn unknown_route() {
        let router = sut(MockContactFeatureService::new(), Vec::new())
            .router()
            .unwrap();
        let request = Request::get("/api/unknown").body(Body::empty()).unwrap();

        let response = call(router, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allowed_origin() {
        let message = ContactMessage::try_from(form()).unwrap();
        let contact = MockContactFeatureService::new()
            .with_send_message(message, Ok(ContactDelivery::Logged));
        let router = sut(contact, vec!["https://portfolio.example.com".into()])
            .router()
            .unwrap();

        let response = call(router, contact_request()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://portfolio.example.com"
        );
    }

    #[test]
    fn invalid_cors_origin() {
        let result = sut(MockContactFeatureService::new(), vec!["\n".into()]).router();
        assert!(result.is_err());
    }
}
