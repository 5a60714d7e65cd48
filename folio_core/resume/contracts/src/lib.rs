use std::{fmt, future::Future, pin::Pin, sync::Arc};

use thiserror::Error;
use tokio::io::AsyncRead;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ResumeFeatureService: Send + Sync + 'static {
    /// Open the resume for streaming.
    fn open(&self) -> impl Future<Output = Result<ResumeDownload, ResumeOpenError>> + Send;

    /// Whether the resume file currently exists.
    fn available(&self) -> impl Future<Output = bool> + Send;
}

pub type ResumeReader = Pin<Box<dyn AsyncRead + Send>>;

pub struct ResumeDownload {
    /// Name presented to the client in the `Content-Disposition` header.
    pub filename: Arc<str>,
    /// Size in bytes, if known.
    pub length: Option<u64>,
    pub reader: ResumeReader,
}

impl fmt::Debug for ResumeDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeDownload")
            .field("filename", &self.filename)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
pub enum ResumeOpenError {
    #[error("The resume file does not exist.")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockResumeFeatureService {
    pub fn with_open(mut self, result: Result<ResumeDownload, ResumeOpenError>) -> Self {
        self.expect_open()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_available(mut self, result: bool) -> Self {
        self.expect_available()
            .once()
            .return_once(move || Box::pin(std::future::ready(result)));
        self
    }
}
