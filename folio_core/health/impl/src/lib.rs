use std::{sync::Arc, time::Duration};

use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_core_resume_contracts::ResumeFeatureService;
use folio_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Email, Resume> {
    email: Option<Email>,
    resume: Resume,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email, Resume> HealthFeatureServiceImpl<Email, Resume> {
    pub fn new(email: Option<Email>, resume: Resume, config: HealthFeatureConfig) -> Self {
        Self {
            email,
            resume,
            config,
            state: Default::default(),
        }
    }
}

impl<Email, Resume> HealthFeatureService for HealthFeatureServiceImpl<Email, Resume>
where
    Email: EmailService,
    Resume: ResumeFeatureService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = match &self.email {
            Some(email) => Some(
                email
                    .ping()
                    .await
                    .inspect_err(|err| error!("Failed to ping smtp server: {err}"))
                    .is_ok(),
            ),
            None => None,
        };

        let resume = self.resume.available().await;
        if !resume {
            error!("Resume file is missing");
        }

        let status = HealthStatus { email, resume };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
