//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::fs;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use site_gate::config::GateConfig;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ORIGIN: &str = "https://joiedamour.shop";
pub const BROWSER_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
pub const INDEX_HTML: &str = "<!doctype html><title>Joie d'Amour</title><div id=\"app\"></div>";
pub const SITE_CSS: &str = "body { margin: 0; }";
pub const ABOUT_HTML: &str = "<h1>About</h1>";
pub const APP_JS: &str = "console.log(\"ready\");";
pub const LOGO_SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"/>";

/// A throwaway static site: index, one file per asset directory, one extra page.
pub fn site_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    fs::write(dir.path().join("about.html"), ABOUT_HTML).unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css/site.css"), SITE_CSS).unwrap();
    fs::create_dir(dir.path().join("js")).unwrap();
    fs::write(dir.path().join("js/app.js"), APP_JS).unwrap();
    fs::create_dir(dir.path().join("images")).unwrap();
    fs::write(dir.path().join("images/logo.svg"), LOGO_SVG).unwrap();
    dir
}

/// Default configuration serving `dir`.
pub fn config_for(dir: &TempDir) -> GateConfig {
    let mut config = GateConfig::default();
    config.site.static_root = dir.path().to_string_lossy().into_owned();
    config
}

/// Send one request through the router and collect the response.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

/// `GET uri` with a browser user agent and the given extra headers.
pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .header("user-agent", BROWSER_UA);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}
