//! Request extractors.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use relay_shared::AppError;
use serde::Deserialize;
use serde_json::Value;

use crate::error::UploadFailure;

/// Body of a URL upload sent as JSON.
///
/// `url` is kept untyped: a non-string value is a malformed URL, not a
/// malformed request.
#[derive(Debug, Deserialize)]
pub struct UrlUploadRequest {
    /// Remote URL to fetch.
    #[serde(default)]
    pub url: Value,
}

impl UrlUploadRequest {
    /// The URL to fetch, if one was given.
    ///
    /// Null, `false`, zero and the empty string count as absent. Any other
    /// non-string value is passed on in its JSON form and fails URL parsing.
    #[must_use]
    pub fn into_url(self) -> Option<String> {
        match self.url {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(url) => (!url.is_empty()).then_some(url),
            other => Some(other.to_string()),
        }
    }
}

/// What a `POST /upload` request asked for.
#[derive(Debug)]
pub enum UploadPayload {
    /// Fetch this URL.
    Url(String),
    /// Store these bytes.
    File {
        /// Filename given by the client, empty if none.
        filename: String,
        /// File content.
        bytes: Bytes,
    },
    /// Neither a file nor a URL.
    Empty,
}

impl<S> FromRequest<S> for UploadPayload
where
    S: Send + Sync,
{
    type Rejection = UploadFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(body) = Json::<UrlUploadRequest>::from_request(req, state)
                .await
                .map_err(|e| {
                    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                        AppError::PayloadTooLarge(e.body_text())
                    } else {
                        AppError::BadRequest(e.body_text())
                    }
                })?;
            return Ok(body.into_url().map_or(Self::Empty, Self::Url));
        }

        Ok(Self::Empty)
    }
}

impl UploadPayload {
    /// Read the `url` and `file` fields. A non-empty `url` wins over `file`.
    ///
    /// A `file` part without a filename is a plain text field and does not
    /// count as an attached file.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, UploadFailure> {
        let mut url: Option<String> = None;
        let mut file: Option<(String, Bytes)> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "url" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    if !text.is_empty() {
                        url = Some(text);
                    }
                }
                "file" if file.is_none() => {
                    let Some(filename) = field.file_name().map(ToString::to_string) else {
                        continue;
                    };
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    file = Some((filename, bytes));
                }
                _ => {
                    // Ignore unknown fields
                }
            }
        }

        Ok(match (url, file) {
            (Some(url), _) => Self::Url(url),
            (None, Some((filename, bytes))) => Self::File { filename, bytes },
            (None, None) => Self::Empty,
        })
    }
}

fn multipart_error(err: MultipartError) -> UploadFailure {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadFailure(AppError::PayloadTooLarge(err.body_text()))
    } else {
        UploadFailure(AppError::Internal(err.body_text()))
    }
}
