//! Upload route.

use axum::{Json, Router, extract::State, routing::post};
use relay_core::relay::PublicLinks;
use relay_core::storage::Artifact;
use serde::Serialize;

use crate::{AppState, error::UploadFailure, extractors::UploadPayload};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Response for a stored upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always `true`.
    pub success: bool,
    /// Human-readable status.
    pub message: &'static str,
    /// Name given by the uploader or derived from the URL.
    pub original_filename: String,
    /// Generated name under which the file is stored.
    pub saved_filename: String,
    /// Stored size in bytes.
    pub size: u64,
    /// Attachment link.
    pub download_url: String,
    /// Inline link.
    pub view_url: String,
}

impl UploadResponse {
    fn new(artifact: Artifact, links: &PublicLinks) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully",
            download_url: links.download_url(&artifact.stored_name),
            view_url: links.view_url(&artifact.stored_name),
            original_filename: artifact.original_name,
            saved_filename: artifact.stored_name,
            size: artifact.size_bytes,
        }
    }
}

/// POST `/upload`
///
/// Accepts a multipart `file`, or a `url` as JSON or multipart text field.
/// The URL is checked first.
async fn upload(
    State(state): State<AppState>,
    payload: UploadPayload,
) -> Result<Json<UploadResponse>, UploadFailure> {
    let artifact = match payload {
        UploadPayload::Url(url) => state.relay.store_from_url(&url).await?,
        UploadPayload::File { filename, bytes } => {
            state.relay.store_upload(&filename, &bytes).await?
        }
        UploadPayload::Empty => return Err(UploadFailure::missing_input()),
    };

    Ok(Json(UploadResponse::new(artifact, &state.links)))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use rstest::rstest;
    use tower::ServiceExt;

    use super::super::test_support::{
        TestApp, json_body, multipart_body, multipart_request, spawn_upstream,
    };

    #[tokio::test]
    async fn test_upload_binary_file() {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(multipart_request(&[("file", Some("a.bin"), &[0x01, 0x02, 0x03])]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "File uploaded successfully");
        assert_eq!(body["originalFilename"], "a.bin");
        assert_eq!(body["size"], 3);

        let saved = body["savedFilename"].as_str().unwrap();
        assert!(saved.ends_with(".bin"));
        assert_eq!(
            body["downloadUrl"],
            format!("http://hongyver.iptime.org:3090/files/{saved}")
        );
        assert_eq!(
            body["viewUrl"],
            format!("http://hongyver.iptime.org:3090/view/{saved}")
        );
        assert_eq!(app.read_stored(saved), vec![0x01, 0x02, 0x03]);
    }

    #[tokio::test]
    async fn test_upload_file_part_without_filename_is_400() {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(multipart_request(&[("file", None, b"just text")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No file or URL provided");
        assert!(app.stored_names().is_empty());
    }

    #[tokio::test]
    async fn test_upload_from_url() {
        let app = TestApp::new();
        let upstream = spawn_upstream().await;

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(r#"{{"url":"http://{upstream}/a.png"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["originalFilename"], "a.png");
        assert_eq!(body["size"], 5);

        let saved = body["savedFilename"].as_str().unwrap();
        assert!(saved.ends_with(".png"));
        assert_eq!(app.read_stored(saved), b"\x89PNG!".to_vec());
    }

    #[tokio::test]
    async fn test_upload_from_url_follows_redirects() {
        let app = TestApp::new();
        let upstream = spawn_upstream().await;

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(r#"{{"url":"http://{upstream}/hop1"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["originalFilename"], "hop1");
        let saved = body["savedFilename"].as_str().unwrap();
        assert_eq!(app.read_stored(saved), b"\x89PNG!".to_vec());
    }

    #[tokio::test]
    async fn test_upload_url_field_in_multipart_wins_over_file() {
        let app = TestApp::new();
        let upstream = spawn_upstream().await;
        let url = format!("http://{upstream}/a.png");

        let response = app
            .router()
            .oneshot(multipart_request(&[
                ("file", Some("ignored.txt"), b"ignored"),
                ("url", None, url.as_bytes()),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["originalFilename"], "a.png");
        assert_eq!(body["size"], 5);
    }

    #[tokio::test]
    async fn test_upload_from_url_upstream_error_is_500() {
        let app = TestApp::new();
        let upstream = spawn_upstream().await;

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", "application/json")
                    .body(Body::from(format!(r#"{{"url":"http://{upstream}/missing"}}"#)))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to download: 404");
        assert!(app.stored_names().is_empty());
    }

    #[tokio::test]
    async fn test_upload_from_malformed_url_is_500() {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"url":"definitely not a url"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Invalid URL"));
    }

    #[rstest]
    #[case::number(r#"{"url":123}"#)]
    #[case::object(r#"{"url":{"href":"http://a/b.png"}}"#)]
    #[tokio::test]
    async fn test_upload_non_string_url_is_500(#[case] json: &str) {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("Invalid URL"));
        assert!(app.stored_names().is_empty());
    }

    #[rstest]
    #[case::json_without_url("application/json", Body::from("{}"))]
    #[case::json_empty_url("application/json", Body::from(r#"{"url":""}"#))]
    #[case::plain_text("text/plain", Body::from("hello"))]
    #[case::multipart_without_file("multipart/form-data; boundary=X-RELAY-BOUNDARY", Body::from(multipart_body(&[("note", None, b"hi")])))]
    #[tokio::test]
    async fn test_upload_without_file_or_url_is_400(
        #[case] content_type: &str,
        #[case] body: Body,
    ) {
        let app = TestApp::new();

        let response = app
            .router()
            .oneshot(
                Request::post("/upload")
                    .header("Content-Type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No file or URL provided");
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let app = TestApp::with_limit(16);

        let response = app
            .router()
            .oneshot(multipart_request(&[("file", Some("big.bin"), &[0u8; 64])]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
    }
}
