//! JSON error responses.
//!
//! Upload errors use the `{success: false, error}` envelope, retrieval
//! errors a bare `{error}` object.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relay_core::relay::RelayError;
use relay_core::storage::StorageError;
use relay_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Message for an upload request carrying neither a file nor a URL.
pub const NO_FILE_OR_URL: &str = "No file or URL provided";
/// Message for a name that resolves outside the storage directory.
pub const INVALID_FILENAME: &str = "Invalid filename";
/// Message for a name with no stored file.
pub const FILE_NOT_FOUND: &str = "File not found";

/// Map a relay failure onto the application error taxonomy.
#[must_use]
pub fn relay_error(err: RelayError) -> AppError {
    match err {
        RelayError::Fetch(e) => AppError::ExternalService(e.to_string()),
        RelayError::Storage(e) => storage_error(e),
    }
}

/// Map a storage failure onto the application error taxonomy.
#[must_use]
pub fn storage_error(err: StorageError) -> AppError {
    match err {
        StorageError::InvalidName { .. } => AppError::BadRequest(INVALID_FILENAME.to_string()),
        StorageError::NotFound { .. } => AppError::NotFound(FILE_NOT_FOUND.to_string()),
        StorageError::Io(e) => AppError::Storage(e.to_string()),
    }
}

fn status_of(err: &AppError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Error returned by `POST /upload`.
#[derive(Debug)]
pub struct UploadFailure(pub AppError);

impl UploadFailure {
    /// Neither a file nor a URL was supplied.
    #[must_use]
    pub fn missing_input() -> Self {
        Self(AppError::BadRequest(NO_FILE_OR_URL.to_string()))
    }
}

impl From<AppError> for UploadFailure {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<RelayError> for UploadFailure {
    fn from(err: RelayError) -> Self {
        Self(relay_error(err))
    }
}

impl IntoResponse for UploadFailure {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "Upload failed");
        } else {
            warn!(code = self.0.error_code(), error = %self.0, "Upload rejected");
        }

        (
            status,
            Json(json!({
                "success": false,
                "error": self.0.message(),
            })),
        )
            .into_response()
    }
}

/// Error returned by `GET /files/{name}` and `GET /view/{name}`.
#[derive(Debug)]
pub struct FileFailure(pub AppError);

impl From<StorageError> for FileFailure {
    fn from(err: StorageError) -> Self {
        Self(storage_error(err))
    }
}

impl IntoResponse for FileFailure {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if status.is_server_error() {
            error!(code = self.0.error_code(), error = %self.0, "File retrieval failed");
        }

        (status, Json(json!({ "error": self.0.message() }))).into_response()
    }
}
