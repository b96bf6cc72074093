#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use spendcap_server::{
    api::app_router,
    build_state,
    config::{Config, LogFormat},
};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

#[derive(Clone)]
pub struct TestApp {
    router: Router,
    _tmp: Arc<TempDir>,
}

pub fn test_config(tmp: &TempDir) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        secret_key: Some(vec![9u8; 32]),
        token_ttl: Duration::from_secs(3600),
        log_format: LogFormat::Text,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let tmp = tempdir().unwrap();
        let config = test_config(&tmp);
        let state = build_state(&config).await.unwrap();
        TestApp {
            router: app_router(state, &config),
            _tmp: Arc::new(tmp),
        }
    }

    /// Sends a request and returns the status with the body parsed as JSON
    /// (plain text bodies come back as a JSON string, empty ones as null).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let raw = body.map(|b| b.to_string());
        self.send_raw(method, uri, token, raw).await
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };
        (status, value)
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers `username` and returns an access token for them.
    pub async fn user(&self, username: &str) -> String {
        let (status, _) = self.register(username, "password123").await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = self.login(username, "password123").await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn category(&self, token: &str, name: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/categories",
                Some(token),
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_budget(&self, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, "/api/v1/budgets", Some(token), Some(body))
            .await
    }
}
