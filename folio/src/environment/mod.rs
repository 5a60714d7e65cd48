use std::sync::Arc;

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::EmailDelivery;
use folio_core_health_impl::HealthFeatureConfig;
use folio_core_resume_impl::ResumeFeatureConfig;
use tracing::info;
use types::{ContactFeature, Email, HealthFeature, RestServer, ResumeFeature};

pub mod types;

/// Wire all services into the http server.
///
/// Without an email service the contact feature runs in log-only mode and the
/// health check does not report on smtp.
pub fn build(config: &Config, email: Option<Email>) -> RestServer {
    let resume = ResumeFeature::new(ResumeFeatureConfig {
        path: Arc::new(config.resume.path.clone()),
        filename: config.resume.filename.as_str().into(),
    });

    let delivery = contact_delivery(config, email.clone());
    if let Some(delivery) = &delivery {
        info!("Forwarding contact messages to {}", delivery.recipient);
    }
    let contact = ContactFeature::new(delivery);

    let health = HealthFeature::new(
        email,
        resume.clone(),
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    RestServer::new(
        health,
        contact,
        resume,
        RestServerConfig {
            host: config.http.host,
            port: config.http.port,
            allowed_origins: config.http.allowed_origins.clone(),
        },
    )
}

/// Messages go to the configured recipient, or back to the sending account.
fn contact_delivery<E>(config: &Config, email: Option<E>) -> Option<EmailDelivery<E>> {
    let recipient = config
        .contact
        .recipient
        .as_ref()
        .or(config.email.username.as_ref())?
        .clone();

    email.map(|email| EmailDelivery {
        email,
        recipient: recipient.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use folio_utils::assert_matches;

    use super::*;

    const NO_PATHS: &[&str] = &[];

    fn config(env: &[(&str, &str)]) -> Config {
        let env = env.iter().copied().collect::<HashMap<_, _>>();
        folio_config::load_with(NO_PATHS, |var| env.get(var).map(|&x| x.into())).unwrap()
    }

    #[test]
    fn log_only_without_email() {
        let config = config(&[]);

        assert_matches!(contact_delivery::<()>(&config, None), None);
    }

    #[test]
    fn recipient_defaults_to_account() {
        let config = config(&[
            ("EMAIL_USER", "portfolio@example.com"),
            ("EMAIL_PASS", "hunter2"),
        ]);

        let delivery = contact_delivery(&config, Some(())).unwrap();

        assert_eq!(delivery.recipient.as_str(), "portfolio@example.com");
    }

    #[test]
    fn recipient_override() {
        let config = config(&[
            ("EMAIL_USER", "portfolio@example.com"),
            ("EMAIL_PASS", "hunter2"),
            ("CONTACT_EMAIL", "inbox@example.com"),
        ]);

        let delivery = contact_delivery(&config, Some(())).unwrap();

        assert_eq!(delivery.recipient.as_str(), "inbox@example.com");
    }

    #[tokio::test]
    async fn build_with_email() {
        let config = config(&[
            ("EMAIL_USER", "portfolio@example.com"),
            ("EMAIL_PASS", "hunter2"),
        ]);
        let email = crate::email::connect(&config.email).unwrap();
        assert!(email.is_some());

        build(&config, email);
    }
}
