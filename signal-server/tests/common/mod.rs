//! Shared harness: in-memory storage, manual clock and a router driven with oneshot

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use signal_server::auth::JwtConfig;
use signal_server::utils::ManualClock;
use signal_server::{Config, ServerState, Storage, api};
use tower::ServiceExt;

pub const START_MILLIS: i64 = 1_700_000_000_000;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = Config::with_overrides("/tmp/table-signal-tests", 0);
        config.default_company_slug = "restaurant".into();
        config.public_rate_limit_max = 5;
        config.public_rate_limit_window_secs = 60;
        config.jwt = JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".into(),
            expiration_minutes: 60,
            issuer: "table-signal".into(),
            audience: "table-signal-staff".into(),
        };

        let storage = Storage::open_in_memory().expect("in-memory storage");
        let clock = Arc::new(ManualClock::new(START_MILLIS));
        let state = ServerState::new(config, storage, clock.clone());
        Self {
            app: api::build_app(state.clone()),
            state,
            clock,
        }
    }

    pub fn token(&self, user_id: &str) -> String {
        self.state
            .jwt_service
            .generate_token(user_id, user_id, "owner")
            .expect("token")
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_from(method, uri, token, body, None).await
    }

    pub async fn send_from(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
        client_ip: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(ip) = client_ip {
            builder = builder.header("x-forwarded-for", ip);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
