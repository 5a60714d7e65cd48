use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use folio_core_contact_contracts::{
    ContactDelivery, ContactFeatureService, ContactSendMessageError,
};
use folio_models::contact::{ContactForm, ContactMessage, ContactValidationError};
use tracing::debug;

use super::{error, error_with_details, internal_server_error, ok};
use crate::models::contact::{ApiContactFieldViolation, ApiContactForm};

pub const MESSAGE_SENT: &str = "Message sent successfully!";
pub const MESSAGE_RECEIVED: &str = "Message received. I'll get back to you soon!";
pub const INVALID_FORM: &str = "Invalid form data";
pub const INVALID_BODY: &str = "Invalid request body";
pub const SEND_FAILED: &str = "Failed to send message. Please try again later.";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    form: Result<Json<ApiContactForm>, JsonRejection>,
) -> Response {
    let Json(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            debug!("rejected contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, INVALID_BODY);
        }
    };

    let message = match ContactMessage::try_from(ContactForm::from(form)) {
        Ok(message) => message,
        Err(ContactValidationError(violations)) => {
            debug!(violations = violations.len(), "rejected invalid contact form");
            let violations = violations
                .into_iter()
                .map(ApiContactFieldViolation::from)
                .collect();
            return error_with_details(StatusCode::BAD_REQUEST, INVALID_FORM, violations);
        }
    };

    match service.send_message(message).await {
        Ok(ContactDelivery::Sent) => ok(MESSAGE_SENT),
        Ok(ContactDelivery::Logged) => ok(MESSAGE_RECEIVED),
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
