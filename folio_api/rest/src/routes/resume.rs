use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing, Router,
};
use folio_core_resume_contracts::{ResumeDownload, ResumeFeatureService, ResumeOpenError};
use futures::TryStreamExt;
use tokio_util::io::ReaderStream;
use tracing::error;

use super::{error, internal_server_error};

pub const NOT_FOUND: &str = "Resume not found";
pub const DOWNLOAD_FAILED: &str = "Error downloading resume";

pub fn router(service: Arc<impl ResumeFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/download-resume", routing::get(download))
        .with_state(service)
}

async fn download(service: State<Arc<impl ResumeFeatureService>>) -> Response {
    let ResumeDownload {
        filename,
        length,
        reader,
    } = match service.open().await {
        Ok(download) => download,
        Err(ResumeOpenError::NotFound) => return error(StatusCode::NOT_FOUND, NOT_FOUND),
        Err(ResumeOpenError::Other(err)) => {
            error!("Failed to open resume: {err:#}");
            return error(StatusCode::INTERNAL_SERVER_ERROR, DOWNLOAD_FAILED);
        }
    };

    let disposition =
        match HeaderValue::try_from(format!("attachment; filename=\"{filename}\"")) {
            Ok(disposition) => disposition,
            Err(err) => return internal_server_error(err),
        };

    // headers are already sent once streaming starts, so errors can only abort the body
    let stream = ReaderStream::new(reader)
        .inspect_err(|err| error!("Failed to stream resume: {err}"));

    let mut response = Body::from_stream(stream).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(CONTENT_DISPOSITION, disposition);
    if let Some(length) = length {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    }

    response
}
