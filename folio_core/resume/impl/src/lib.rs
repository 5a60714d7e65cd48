use std::{io::ErrorKind, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context};
use folio_core_resume_contracts::{ResumeDownload, ResumeFeatureService, ResumeOpenError};
use tokio::fs::File;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ResumeFeatureServiceImpl {
    config: ResumeFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ResumeFeatureConfig {
    pub path: Arc<PathBuf>,
    pub filename: Arc<str>,
}

impl ResumeFeatureServiceImpl {
    pub fn new(config: ResumeFeatureConfig) -> Self {
        Self { config }
    }
}

impl ResumeFeatureService for ResumeFeatureServiceImpl {
    async fn open(&self) -> Result<ResumeDownload, ResumeOpenError> {
        let path = &*self.config.path;

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "resume file not found");
                return Err(ResumeOpenError::NotFound);
            }
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("Failed to open resume at {}", path.display()))
                    .into())
            }
        };

        let metadata = file
            .metadata()
            .await
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
        if !metadata.is_file() {
            return Err(anyhow!("Resume at {} is not a regular file", path.display()).into());
        }

        debug!(path = %path.display(), length = metadata.len(), "streaming resume");

        Ok(ResumeDownload {
            filename: self.config.filename.clone(),
            length: Some(metadata.len()),
            reader: Box::pin(file),
        })
    }

    async fn available(&self) -> bool {
        tokio::fs::metadata(&*self.config.path)
            .await
            .is_ok_and(|metadata| metadata.is_file())
    }
}
