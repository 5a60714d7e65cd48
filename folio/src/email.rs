use anyhow::Context;
use folio_config::EmailConfig;
use folio_email_impl::EmailServiceImpl;

/// Create the smtp client if an account and password are configured.
pub fn connect(config: &EmailConfig) -> anyhow::Result<Option<EmailServiceImpl>> {
    let Some((account, password)) = config.credentials() else {
        return Ok(None);
    };

    EmailServiceImpl::new(&config.smtp_url, account.clone(), password.into())
        .map(Some)
        .context("Failed to create SMTP client")
}
