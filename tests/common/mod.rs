// Shared helpers for integration tests: a fake upstream token service.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use heygen_stt::{AppState, BrokerConfig, TokenBroker};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned response of the fake `streaming.create_token` endpoint
#[derive(Clone)]
pub struct FakeUpstream {
    status: StatusCode,
    body: String,
    calls: Arc<AtomicUsize>,
    headers: Arc<Mutex<Option<HeaderMap>>>,
}

impl FakeUpstream {
    pub fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: Arc::new(AtomicUsize::new(0)),
            headers: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Headers of the most recent request
    pub fn last_headers(&self) -> Option<HeaderMap> {
        self.headers.lock().unwrap().clone()
    }

    /// Serve on an ephemeral port; returns the base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/v1/streaming.create_token", post(create_token))
            .with_state(self.clone());

        serve(app).await
    }
}

async fn create_token(State(upstream): State<FakeUpstream>, headers: HeaderMap) -> (StatusCode, String) {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    *upstream.headers.lock().unwrap() = Some(headers);
    (upstream.status, upstream.body.clone())
}

/// Serve `app` on 127.0.0.1 with an ephemeral port; returns `http://addr`
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Base URL nothing is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn broker(api_key: Option<&str>, base_url: &str) -> TokenBroker {
    TokenBroker::new(BrokerConfig::new(api_key, base_url).unwrap())
}

/// Run the broker's own HTTP API; returns its base URL
pub async fn spawn_broker(api_key: Option<&str>, upstream_url: &str) -> String {
    let state = AppState::new(broker(api_key, upstream_url));
    serve(heygen_stt::create_router(state)).await
}
