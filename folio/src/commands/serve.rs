use folio_config::Config;
use folio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;

    match &email {
        Some(email) => {
            info!("Connecting to smtp server");
            if let Err(err) = email.ping().await {
                warn!("SMTP server is not reachable, sending messages may fail: {err:#}");
            }
        }
        None => warn!(
            "Email credentials are not configured, contact messages will only be logged"
        ),
    }

    if !config.resume.path.is_file() {
        warn!(path = %config.resume.path.display(), "Resume file does not exist");
    }

    let server = environment::build(&config, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
