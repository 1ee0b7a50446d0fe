// Shared helpers for in-process HTTP tests
// Each test builds its own router over a fresh in-memory backend.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use skillverify_control_plane::app::build_app;
use skillverify_control_plane::auth::config::{AdminConfig, AuthConfig, AuthMode, JwtConfig};
use skillverify_control_plane::config::ServerConfig;
use skillverify_control_plane::storage::StorageBackend;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@skillverify.test";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const STUDENT_PASSWORD: &str = "student-password";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// No-auth mode: every caller is an anonymous admin
    pub fn open() -> Self {
        Self::with_auth(AuthConfig::default())
    }

    /// JWT mode with a configured admin account
    pub fn secured() -> Self {
        Self::with_auth(AuthConfig {
            mode: AuthMode::Full,
            jwt: JwtConfig {
                secret: "integration-test-secret".to_string(),
                ..Default::default()
            },
            admin: Some(AdminConfig {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            }),
        })
    }

    fn with_auth(auth: AuthConfig) -> Self {
        let router = build_app(
            Arc::new(StorageBackend::in_memory()),
            auth,
            &ServerConfig::default(),
        );
        Self { router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// POST an arbitrary body, optionally without a content type
    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.send(request).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    /// Register a student and return its ID
    pub async fn register_student(&self, name: &str, email: &str, skills: &[&str]) -> String {
        let (status, body) = self
            .post(
                "/v1/students",
                json!({
                    "name": name,
                    "email": email,
                    "password": STUDENT_PASSWORD,
                    "skills": skills,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/v1/auth/login", json!({"email": email, "password": password}))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["accessToken"].as_str().unwrap().to_string()
    }

    /// Raise a verification request and return the notification ID
    pub async fn request_verification(&self, student_id: &str) -> String {
        let (status, body) = self
            .post("/v1/notification-request", json!({"studentId": student_id}))
            .await;
        assert_eq!(status, StatusCode::OK, "request failed: {body}");
        body["notification"]["id"].as_str().unwrap().to_string()
    }
}

pub fn schedule(notification_id: &str) -> Value {
    json!({
        "notificationId": notification_id,
        "interviewDate": "2026-11-02",
        "interviewTime": "10:30 IST",
        "meetingLink": "https://meet.example.com/abc-defg-hij",
        "adminMessage": "Please join five minutes early",
    })
}
