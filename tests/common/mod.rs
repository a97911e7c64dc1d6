//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which owns a temporary media directory, builds a
//! catalog config pointing into it, and exposes the router for
//! `tower::ServiceExt::oneshot` tests. [`TestHarness::serve`] starts Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vidstream::config::{Config, VideoEntry};
use vidstream::server::{create_router, AppContext};

/// Deterministic, non-repeating-at-chunk-size file contents.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Test harness wrapping a media directory and the config that lists it.
pub struct TestHarness {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl TestHarness {
    /// Create an empty library with default streaming settings.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut config = Config::default();
        config.library.media_dir = dir.path().to_path_buf();
        Self { dir, config }
    }

    /// Write `data` under the media dir and register it as `id`.
    pub fn add_video(&mut self, id: &str, destination: &str, data: &[u8]) -> PathBuf {
        let path = self
            .dir
            .path()
            .join(destination.trim_start_matches('/'));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, data).expect("failed to write video");
        self.register(id, destination);
        path
    }

    /// Register a catalog entry without creating a file.
    pub fn register(&mut self, id: &str, destination: &str) {
        self.config.library.videos.push(VideoEntry {
            id: id.parse().expect("invalid test id"),
            destination: destination.to_string(),
        });
    }

    pub fn context(&self) -> AppContext {
        AppContext::from_config(self.config.clone()).expect("failed to build context")
    }

    pub fn router(&self) -> Router {
        create_router(self.context())
    }

    /// Issue a GET through the router without a socket.
    pub async fn get(&self, uri: &str, range: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(range) = range {
            request = request.header("range", range);
        }
        self.router()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Start an Axum server on a random port and return its address.
    pub async fn serve(&self) -> SocketAddr {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes()
        .to_vec()
}

/// Read a header as a string.
pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
