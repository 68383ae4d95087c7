#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use configs::{AppConfig, StorageLayout};
use std::path::PathBuf;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub data_dir: PathBuf,
}

impl TestApp {
    pub fn new(layout: StorageLayout) -> Self {
        let data_dir = std::env::temp_dir().join(format!("contact_book_it_{}", uuid::Uuid::new_v4()));
        let mut cfg = AppConfig::default();
        cfg.storage.data_dir = data_dir.to_string_lossy().to_string();
        cfg.storage.layout = layout;
        cfg.session.secret = "test-secret".into();
        Self { router: server::startup::build_app(&cfg), data_dir }
    }

    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.router.clone().oneshot(req).await?)
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> anyhow::Result<Response<Body>> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::empty())?).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> anyhow::Result<Response<Body>> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        self.send(builder.body(Body::from(form.to_string()))?).await
    }

    /// Register and log in, returning the `name=value` session cookie.
    pub async fn login_as(&self, username: &str, password: &str) -> anyhow::Result<String> {
        let form = format!("username={username}&password={password}");
        let resp = self.post_form("/register", &form, None).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let resp = self.post_form("/login", &form, None).await?;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        session_cookie(&resp).ok_or_else(|| anyhow::anyhow!("login did not set a session cookie"))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

/// `name=value` part of the `session` Set-Cookie header, if any.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

pub async fn body_text(resp: Response<Body>) -> anyhow::Result<String> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub fn contact_form(first: &str, last: &str) -> String {
    format!(
        "first_name={first}&last_name={last}&phone=555-0100&email={}%40example.com&address=1+Main+St&linkedin=&category=work",
        first.to_lowercase()
    )
}
