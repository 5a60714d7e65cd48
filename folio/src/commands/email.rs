use anyhow::{ensure, Context};
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{ContentType, Email, EmailService};
use folio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?
        .context("Email credentials are not configured (set EMAIL_USER and EMAIL_PASS)")?;

    email_service
        .ping()
        .await
        .context("Failed to connect to SMTP server")?;

    let ok = email_service
        .send(Email {
            sender_name: Some("Portfolio".into()),
            recipient: recipient.clone(),
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await;

    ensure!(ok, "Failed to send email");
    info!("Sent test email to {recipient}");

    Ok(())
}
