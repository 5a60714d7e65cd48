use anyhow::anyhow;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::email_address::EmailAddress;
use folio_utils::Apply;
use lettre::{
    message::{header, Mailbox, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, warn};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    account: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailServiceImpl {
    /// Create a pooled smtp transport authenticated as `account`.
    ///
    /// No connection is opened until the first email is sent or the server is
    /// pinged.
    pub fn new(url: &str, account: EmailAddress, password: String) -> anyhow::Result<Self> {
        let credentials = Credentials::new(account.as_str().into(), password);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?
            .credentials(credentials)
            .build();

        Ok(Self { account, transport })
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let from = Mailbox::new(email.sender_name, self.account.0.clone());

        Message::builder()
            .from(from)
            .to(email.recipient.0)
            .apply_map(
                email.reply_to.map(|x| Mailbox::new(None, x.0)),
                MessageBuilder::reply_to,
            )
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)
            .map_err(Into::into)
    }

    async fn try_send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> bool {
        match self.try_send(email).await {
            Ok(true) => true,
            Ok(false) => {
                warn!("smtp server did not accept the email");
                false
            }
            Err(err) => {
                error!("Failed to send email: {err:#}");
                false
            }
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
