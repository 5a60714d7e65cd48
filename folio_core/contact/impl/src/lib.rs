use std::sync::Arc;

use folio_core_contact_contracts::{
    ContactDelivery, ContactFeatureService, ContactSendMessageError,
};
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::{contact::ContactMessage, email_address::EmailAddress};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email> {
    delivery: Option<EmailDelivery<Email>>,
}

/// Where contact messages are sent when email delivery is enabled.
#[derive(Debug, Clone)]
pub struct EmailDelivery<Email> {
    pub email: Email,
    pub recipient: Arc<EmailAddress>,
}

impl<Email> ContactFeatureServiceImpl<Email> {
    pub fn new(delivery: Option<EmailDelivery<Email>>) -> Self {
        Self { delivery }
    }
}

impl<EmailS> ContactFeatureService for ContactFeatureServiceImpl<EmailS>
where
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        message: ContactMessage,
    ) -> Result<ContactDelivery, ContactSendMessageError> {
        let Some(EmailDelivery { email, recipient }) = &self.delivery else {
            info!(
                name = message.author.name.as_str(),
                email = message.author.email.as_str(),
                subject = message.subject.as_str(),
                content = message.content.as_str(),
                "received contact message (email delivery disabled)"
            );
            return Ok(ContactDelivery::Logged);
        };

        let ContactMessage {
            author,
            subject,
            content,
        } = message;

        let email_message = Email {
            sender_name: Some(author.name.clone().into_inner()),
            recipient: (**recipient).clone().into(),
            subject: format!("[Portfolio Contact] {}", *subject),
            body: format!(
                "Message from {} ({}):\n\nSubject: {}\n\n{}",
                *author.name, author.email, *subject, *content
            ),
            content_type: ContentType::Text,
            reply_to: Some(author.email),
        };

        if !email.send(email_message).await {
            warn!("contact message could not be delivered");
            return Err(ContactSendMessageError::Send);
        }

        Ok(ContactDelivery::Sent)
    }
}

#[cfg(test)]
mod tests {
    use folio_email_contracts::MockEmailService;
    use folio_models::contact::ContactMessageAuthor;
    use folio_utils::assert_matches;

    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            author: ContactMessageAuthor {
                name: "Max Mustermann".try_into().unwrap(),
                email: "max.mustermann@example.de".parse().unwrap(),
            },
            subject: "Hello there".try_into().unwrap(),
            content: "This is a test message.".try_into().unwrap(),
        }
    }

    fn expected_email(recipient: &EmailAddress) -> Email {
        Email {
            sender_name: Some("Max Mustermann".into()),
            recipient: recipient.clone().into(),
            subject: "[Portfolio Contact] Hello there".into(),
            body: "Message from Max Mustermann (max.mustermann@example.de):\n\nSubject: Hello \
                   there\n\nThis is a test message."
                .into(),
            content_type: ContentType::Text,
            reply_to: Some("max.mustermann@example.de".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn sent() {
        // Arrange
        let recipient = Arc::new("contact@example.com".parse::<EmailAddress>().unwrap());
        let email = MockEmailService::new().with_send(expected_email(&recipient), true);

        let sut = ContactFeatureServiceImpl::new(Some(EmailDelivery { email, recipient }));

        // Act
        let result = sut.send_message(message()).await;

        // Assert
        assert_matches!(result, Ok(ContactDelivery::Sent));
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let recipient = Arc::new("contact@example.com".parse::<EmailAddress>().unwrap());
        let email = MockEmailService::new().with_send(expected_email(&recipient), false);

        let sut = ContactFeatureServiceImpl::new(Some(EmailDelivery { email, recipient }));

        // Act
        let result = sut.send_message(message()).await;

        // Assert
        assert_matches!(result, Err(ContactSendMessageError::Send));
    }

    #[tokio::test]
    async fn log_only() {
        // Arrange
        let sut = ContactFeatureServiceImpl::<MockEmailService>::new(None);

        // Act
        let result = sut.send_message(message()).await;

        // Assert
        assert_matches!(result, Ok(ContactDelivery::Logged));
    }
}
