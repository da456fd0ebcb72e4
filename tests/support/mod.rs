// In-process fake of the Cura auth API for driving the real reqwest transport.
#![allow(dead_code)]

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// How the fake answers the two auth endpoints.
#[derive(Clone, Copy, Debug)]
pub enum Mode {
    // Reply "pending" this many times, then "authorized".
    ApproveAfter(usize),
    // Keep replying "pending".
    NeverApprove,
    // Reply to the request call with a non-JSON body.
    GarbageRequest,
    // Reply to the request call with a 500 and an error envelope.
    RequestFails,
    // Hold every check open this long before answering "pending".
    SlowCheck(Duration),
}

pub struct FakeCura {
    mode: Mode,
    pub issued_id: String,
    pub request_bodies: Mutex<Vec<Value>>,
    pub content_types: Mutex<Vec<String>>,
    pub checked_ids: Mutex<Vec<String>>,
}

impl FakeCura {
    pub fn new(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            issued_id: uuid::Uuid::new_v4().to_string(),
            request_bodies: Mutex::new(Vec::new()),
            content_types: Mutex::new(Vec::new()),
            checked_ids: Mutex::new(Vec::new()),
        })
    }

    pub fn check_count(&self) -> usize {
        self.checked_ids.lock().expect("checks mutex poisoned").len()
    }
}

// Install a compact subscriber once per test binary; later calls are no-ops.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .compact()
        .try_init();
}

// Serve the fake on an ephemeral port and return its `host:port`.
pub async fn spawn(cura: Arc<FakeCura>) -> String {
    let app = Router::new()
        .route("/api/v1/auth/request", post(auth_request))
        .route("/api/v1/auth/check/{id}", get(auth_check))
        .with_state(cura);

    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake cura failed");
    });
    addr.to_string()
}

// Address of a port nothing is listening on.
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    addr.to_string()
}

async fn auth_request(
    State(cura): State<Arc<FakeCura>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    cura.content_types
        .lock()
        .expect("content types mutex poisoned")
        .push(content_type);
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    cura.request_bodies
        .lock()
        .expect("bodies mutex poisoned")
        .push(payload);

    match cura.mode {
        Mode::GarbageRequest => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        Mode::RequestFails => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "application not registered" })),
        )
            .into_response(),
        // Non-string extras must be ignored by the client.
        _ => Json(json!({ "id": cura.issued_id, "expires_in": 30 })).into_response(),
    }
}

async fn auth_check(State(cura): State<Arc<FakeCura>>, Path(id): Path<String>) -> Json<Value> {
    let seen = {
        let mut checked = cura.checked_ids.lock().expect("checks mutex poisoned");
        checked.push(id.clone());
        checked.len()
    };

    if let Mode::SlowCheck(delay) = cura.mode {
        tokio::time::sleep(delay).await;
    }

    if id != cura.issued_id {
        return Json(json!({ "message": "unknown authorization" }));
    }

    let approved = match cura.mode {
        Mode::ApproveAfter(pending) => seen > pending,
        _ => false,
    };
    if approved {
        Json(json!({ "message": "authorized" }))
    } else {
        Json(json!({ "message": "pending" }))
    }
}
