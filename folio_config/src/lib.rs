use std::{
    fmt,
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context};
use config::{File, FileFormat};
use folio_models::email_address::EmailAddress;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

/// Built-in defaults, overridden by additional config files and the environment.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variables that override individual config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("EMAIL_USER", "email.username"),
    ("EMAIL_PASS", "email.password"),
    ("CONTACT_EMAIL", "contact.recipient"),
];

/// Load the config from the defaults, the files listed in `FOLIO_CONFIG`
/// (separated like `PATH`) and the environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var_os("FOLIO_CONFIG")
        .map(|paths| std::env::split_paths(&paths).collect::<Vec<_>>())
        .unwrap_or_default();

    load_with(&paths, |var| std::env::var(var).ok())
}

pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder =
        config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let config = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var).filter(|value| !value.is_empty());
            builder.set_override_option(key, value)
        })?
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.resume.validate()?;

    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub resume: ResumeConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub username: Option<EmailAddress>,
    pub password: Option<String>,
}

impl EmailConfig {
    /// Account and password, if both are configured.
    pub fn credentials(&self) -> Option<(&EmailAddress, &str)> {
        self.username.as_ref().zip(self.password.as_deref())
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_url", &self.smtp_url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    pub recipient: Option<EmailAddress>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeConfig {
    pub path: PathBuf,
    pub filename: String,
}

impl ResumeConfig {
    /// The filename ends up in a quoted `Content-Disposition` parameter.
    fn validate(&self) -> anyhow::Result<()> {
        let filename = &self.filename;
        ensure!(!filename.is_empty(), "resume.filename must not be empty");
        ensure!(
            !filename
                .chars()
                .any(|c| c == '"' || c == '\\' || c.is_control()),
            "resume.filename {filename:?} contains a quote, backslash or control character"
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
