// Stub leave service served by axum on an ephemeral local port.
//
// Records every application and every multipart upload it receives, and answers with
// the canned responses it was started with.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl StubResponse {
    pub fn ok() -> Self {
        Self::created(serde_json::json!({}))
    }

    pub fn created(body: Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }

    fn to_response(&self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body.clone()).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub leave_id: String,
    pub field_name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Clone)]
struct StubState {
    applications: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<ReceivedUpload>>>,
    apply_response: Arc<StubResponse>,
    upload_response: Arc<StubResponse>,
}

pub struct StubBackend {
    addr: SocketAddr,
    state: StubState,
    server: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start(apply_response: StubResponse, upload_response: StubResponse) -> Self {
        let state = StubState {
            applications: Arc::new(Mutex::new(Vec::new())),
            uploads: Arc::new(Mutex::new(Vec::new())),
            apply_response: Arc::new(apply_response),
            upload_response: Arc::new(upload_response),
        };
        let app = Router::new()
            .route("/leave/apply", post(apply))
            .route("/leave/{leave_id}/upload-mc", post(upload_mc))
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// A base url nobody listens on.
    pub async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn applications(&self) -> Vec<Value> {
        self.state.applications.lock().await.clone()
    }

    pub async fn uploads(&self) -> Vec<ReceivedUpload> {
        self.state.uploads.lock().await.clone()
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn apply(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.applications.lock().await.push(body);
    state.apply_response.to_response()
}

async fn upload_mc(
    State(state): State<StubState>,
    Path(leave_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let size = field.bytes().await.unwrap().len();
        state.uploads.lock().await.push(ReceivedUpload {
            leave_id: leave_id.clone(),
            field_name,
            file_name,
            content_type,
            size,
        });
    }
    state.upload_response.to_response()
}
