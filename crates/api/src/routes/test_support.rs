//! Shared helpers for route tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::LOCATION},
    response::Response,
    routing::get,
};
use http_body_util::BodyExt;
use relay_core::fetch::{FetcherConfig, RemoteFetcher};
use relay_core::relay::{PublicLinks, RelayService};
use relay_core::storage::{StorageConfig, StorageService};
use tempfile::TempDir;
use tokio::net::TcpListener;

use crate::{AppState, create_router};

pub(crate) const BOUNDARY: &str = "X-RELAY-BOUNDARY";

/// Body served by the upstream at `/a.png`.
pub(crate) const UPSTREAM_PNG: &[u8] = b"\x89PNG!";

/// An app wired to a temporary storage directory.
pub(crate) struct TestApp {
    dir: TempDir,
    state: AppState,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self::with_limit(1024 * 1024)
    }

    pub(crate) fn with_limit(max_upload_bytes: usize) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let storage = Arc::new(StorageService::from_config(StorageConfig::new(dir.path())));
        let fetcher = RemoteFetcher::new(FetcherConfig::default()).expect("fetcher");
        let relay = RelayService::new(storage.clone(), Arc::new(fetcher));

        let state = AppState {
            relay: Arc::new(relay),
            storage,
            links: Arc::new(PublicLinks::new("http://hongyver.iptime.org:3090")),
            max_upload_bytes,
        };

        Self { dir, state }
    }

    pub(crate) fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    pub(crate) fn read_stored(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.dir.path().join(name)).expect("stored file")
    }

    pub(crate) fn write_stored(&self, name: &str, bytes: &[u8]) {
        std::fs::write(self.dir.path().join(name), bytes).expect("write stored file");
    }

    pub(crate) fn stored_names(&self) -> Vec<String> {
        std::fs::read_dir(self.dir.path())
            .expect("list storage")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

/// Encode `(field, filename, content)` parts as multipart/form-data.
pub(crate) fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, filename, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub(crate) fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
    Request::post("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub(crate) async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub(crate) async fn json_body(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

/// Start an upstream file server for URL uploads.
///
/// `/a.png` serves [`UPSTREAM_PNG`], `/hop1` redirects twice to it and
/// `/missing` answers 404.
pub(crate) async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/a.png", get(|| async { UPSTREAM_PNG }))
        .route(
            "/hop1",
            get(|| async { (StatusCode::FOUND, [(LOCATION, "/hop2")]) }),
        )
        .route(
            "/hop2",
            get(|| async { (StatusCode::SEE_OTHER, [(LOCATION, "/a.png")]) }),
        )
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });
    addr
}
