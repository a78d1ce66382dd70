//! File retrieval routes.

use std::path::Path as FsPath;

use axum::{
    Router,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, Request, header::CONTENT_DISPOSITION},
    response::Response,
    routing::get,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use crate::{AppState, error::FileFailure};

/// Creates the file retrieval routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/files/{filename}", get(download_file))
        .route("/view/{filename}", get(view_file))
}

/// How the client should treat the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Attachment,
    Inline,
}

impl Disposition {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }

    fn header_value(self, path: &FsPath) -> HeaderValue {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| {
                HeaderValue::from_str(&format!("{}; filename=\"{name}\"", self.as_str())).ok()
            })
            .unwrap_or_else(|| HeaderValue::from_static(self.as_str()))
    }
}

/// GET `/files/{filename}`
/// Serve a stored file as an attachment.
async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, FileFailure> {
    serve(&state, &filename, Disposition::Attachment).await
}

/// GET `/view/{filename}`
/// Serve a stored file inline.
async fn view_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, FileFailure> {
    serve(&state, &filename, Disposition::Inline).await
}

async fn serve(
    state: &AppState,
    filename: &str,
    disposition: Disposition,
) -> Result<Response, FileFailure> {
    let path = state.storage.resolve(filename).await.inspect_err(|e| {
        warn!(filename = %filename, error = %e, "File request rejected");
    })?;

    // A bare request: range and conditional headers are not honoured.
    let request = Request::new(Body::empty());
    let mut response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    };

    response
        .headers_mut()
        .insert(CONTENT_DISPOSITION, disposition.header_value(&path));

    Ok(response)
}
