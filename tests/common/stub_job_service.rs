//! In-process stand-in for the job service that records every request.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tokio::net::TcpListener;

pub const CREATED_JOB_ID: &str = "0f4c6d2e-job";
pub const MISSING_JOB_ID: &str = "missing";
pub const GARBLED_JOB_ID: &str = "garbled";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Clone)]
struct StubState {
    prefix: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubJobService {
    pub base_uri: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubJobService {
    pub async fn start() -> Self {
        Self::start_with_prefix("").await
    }

    /// Serve the job routes under `prefix`, e.g. `/api`.
    pub async fn start_with_prefix(prefix: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            prefix: prefix.to_string(),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub job service");
        let addr = listener.local_addr().expect("Failed to get local address");
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Stub job service stopped");
        });

        Self {
            base_uri: format!("http://{addr}{prefix}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("Poisoned request log").clone()
    }
}

/// Address nothing is listening on.
pub async fn closed_base_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);
    format!("http://{addr}")
}

async fn handle(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state
        .requests
        .lock()
        .expect("Poisoned request log")
        .push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            content_type: headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(String::from),
            body,
        });

    let Some(route) = path.strip_prefix(&state.prefix) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    if route == "/jobs" && method == Method::GET {
        return Json(json!({
            "results": [
                { "jobId": "a1", "result": 12 },
                { "jobId": "b2", "result": 30 }
            ],
            "count": 2,
            "averageResult": 21.0
        }))
        .into_response();
    }
    if route == "/jobs" && method == Method::POST {
        return Json(json!({ "jobId": CREATED_JOB_ID })).into_response();
    }
    if method != Method::GET {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    match route.strip_prefix("/jobs/") {
        Some(MISSING_JOB_ID) => StatusCode::NOT_FOUND.into_response(),
        Some(GARBLED_JOB_ID) => "this is not json".into_response(),
        Some(job_id) => Json(json!({ "jobId": job_id, "result": 42 })).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
