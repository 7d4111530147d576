#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;

use intake::api::{ApiClient, SubmissionApi};
use intake::error::RequestError;
use intake::form::{FormController, ValidationMode};
use intake::models::{SubmissionCreateResult, SubmissionDraft, SubmissionRecord};

// ── Stub backend ────────────────────────────────────────────────

/// In-memory stand-in for the submissions service.
#[derive(Default)]
pub struct Backend {
    base_url: OnceLock<String>,
    records: Mutex<Vec<Value>>,
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    /// When false, create reports DOCX only, like a backend whose PDF
    /// conversion is unavailable.
    pub pdf_enabled: AtomicBool,
    pub fail_create: Mutex<Option<(StatusCode, Value)>>,
    pub fail_list: Mutex<Option<StatusCode>>,
}

impl Backend {
    fn base(&self) -> &str {
        self.base_url.get().map(String::as_str).unwrap_or_default()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn fail_create_with(&self, status: StatusCode, body: Value) {
        *self.fail_create.lock().unwrap() = Some((status, body));
    }

    pub fn fail_list_with(&self, status: StatusCode) {
        *self.fail_list.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.fail_create.lock().unwrap() = None;
        *self.fail_list.lock().unwrap() = None;
    }
}

type SharedBackend = Arc<Backend>;

async fn create(State(backend): State<SharedBackend>, Json(payload): Json<Value>) -> Response {
    backend.create_calls.fetch_add(1, Ordering::SeqCst);

    if let Some((status, body)) = backend.fail_create.lock().unwrap().clone() {
        return (status, Json(body)).into_response();
    }

    let full_name = payload["FullName"].as_str().unwrap_or_default();
    if full_name.chars().count() < 2 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{ "loc": ["body", "FullName"], "msg": "String should have at least 2 characters" }]
            })),
        )
            .into_response();
    }

    let pdf = backend.pdf_enabled.load(Ordering::SeqCst);
    let mut records = backend.records.lock().unwrap();
    let id = (records.len() + 1).to_string();
    let base = backend.base();
    let pdf_url = pdf.then(|| format!("{base}/api/download/{id}/pdf"));
    let docx_url = format!("{base}/api/download/{id}/docx");

    let mut record = payload.clone();
    record["id"] = json!(id);
    record["createdAt"] = json!(chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string());
    record["pdfUrl"] = json!(pdf_url);
    record["docxUrl"] = json!(docx_url);
    // Newest first.
    records.insert(0, record);

    let message = if pdf {
        "Created and generated PDF"
    } else {
        "DOCX generated. PDF conversion unavailable; returning DOCX link"
    };

    Json(json!({
        "id": id,
        "pdfUrl": pdf_url,
        "docxUrl": docx_url,
        "message": message,
    }))
    .into_response()
}

async fn list(State(backend): State<SharedBackend>) -> Response {
    backend.list_calls.fetch_add(1, Ordering::SeqCst);

    if let Some(status) = *backend.fail_list.lock().unwrap() {
        return (status, "backend unavailable").into_response();
    }

    let items = backend.records.lock().unwrap().clone();
    Json(json!({ "items": items })).into_response()
}

async fn download(
    State(backend): State<SharedBackend>,
    Path((id, kind)): Path<(String, String)>,
) -> Response {
    if kind != "pdf" && kind != "docx" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid file type. Use 'pdf' or 'docx'." })),
        )
            .into_response();
    }

    let exists = backend
        .records
        .lock()
        .unwrap()
        .iter()
        .any(|r| r["id"] == json!(id) && !r[format!("{kind}Url")].is_null());
    if !exists {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("File not found: {id}.{kind}") })),
        )
            .into_response();
    }

    (
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={id}.{kind}"),
        )],
        format!("{kind} document {id}").into_bytes(),
    )
        .into_response()
}

/// Serves a document whose `Content-Disposition` carries a raw, possibly
/// hostile, file name taken from the query string.
async fn raw_disposition(
    Path(slug): Path<String>,
    axum::extract::Query(query): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Response {
    let name = query.get("name").cloned().unwrap_or_default();
    (
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={name}"),
        )],
        format!("file {slug}").into_bytes(),
    )
        .into_response()
}

async fn health() -> &'static str {
    "ok"
}

/// A running stub backend plus a client pointed at it.
pub struct TestBackend {
    pub addr: SocketAddr,
    pub state: SharedBackend,
    pub client: ApiClient,
}

impl TestBackend {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Plain HTTP client for inspecting the backend directly.
    pub fn client_raw(&self) -> reqwest::Client {
        reqwest::Client::new()
    }

    pub fn controller(&self, mode: ValidationMode) -> FormController<ApiClient> {
        FormController::new(self.client.clone(), mode)
    }
}

/// Spawn the stub backend on a random port.
pub async fn spawn_backend() -> TestBackend {
    let state: SharedBackend = Arc::new(Backend::default());
    state.pdf_enabled.store(true, Ordering::SeqCst);

    let app = Router::new()
        .route("/api/submissions", get(list).post(create))
        .route("/api/download/{id}/{kind}", get(download))
        .route("/files/{slug}", get(raw_disposition))
        .route("/health", get(health))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();
    state.base_url.set(format!("http://{addr}")).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestBackend {
        addr,
        state,
        client: ApiClient::new(&format!("http://{addr}")),
    }
}

/// A client pointed at a port nothing listens on.
pub async fn unreachable_client() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ApiClient::new(&format!("http://{addr}"))
}

// ── Scripted fake ───────────────────────────────────────────────

/// One scripted response. A gated step waits for its sender before
/// answering.
pub struct Step<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, Option<String>>,
}

impl<T> Step<T> {
    pub fn ok(value: T) -> Self {
        Self {
            gate: None,
            result: Ok(value),
        }
    }

    pub fn err(detail: Option<&str>) -> Self {
        Self {
            gate: None,
            result: Err(detail.map(str::to_string)),
        }
    }

    /// Returns the step and the sender that releases it.
    pub fn gated(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Some(rx),
                ..self
            },
            tx,
        )
    }
}

/// `SubmissionApi` that replays scripted responses. Unscripted calls
/// succeed with an empty body.
#[derive(Default)]
pub struct FakeApi {
    creates: Mutex<VecDeque<Step<SubmissionCreateResult>>>,
    lists: Mutex<VecDeque<Step<Vec<SubmissionRecord>>>>,
    pub create_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub last_draft: Mutex<Option<SubmissionDraft>>,
}

impl FakeApi {
    pub fn push_create(&self, step: Step<SubmissionCreateResult>) {
        self.creates.lock().unwrap().push_back(step);
    }

    pub fn push_list(&self, step: Step<Vec<SubmissionRecord>>) {
        self.lists.lock().unwrap().push_back(step);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

async fn play<T>(step: Option<Step<T>>, operation: &'static str) -> Result<T, RequestError>
where
    T: Default,
{
    let Some(step) = step else {
        return Ok(T::default());
    };
    if let Some(gate) = step.gate {
        let _ = gate.await;
    }
    step.result.map_err(|detail| RequestError::Status {
        operation,
        status: reqwest::StatusCode::BAD_GATEWAY,
        detail,
    })
}

#[async_trait]
impl SubmissionApi for FakeApi {
    async fn create(&self, draft: &SubmissionDraft) -> Result<SubmissionCreateResult, RequestError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_draft.lock().unwrap() = Some(draft.clone());
        let step = self.creates.lock().unwrap().pop_front();
        play(step, "Failed to submit").await
    }

    async fn list(&self) -> Result<Vec<SubmissionRecord>, RequestError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.lists.lock().unwrap().pop_front();
        play(step, "Failed to fetch submissions").await
    }
}

// ── Fixtures ────────────────────────────────────────────────────

pub fn valid_draft() -> SubmissionDraft {
    use intake::models::Field;

    SubmissionDraft::default()
        .with(Field::FullName, "Asha Rao")
        .with(Field::Email, "asha@example.in")
        .with(Field::Mobile, "9876543210")
}

pub fn complete_draft() -> SubmissionDraft {
    use intake::models::Field;

    valid_draft()
        .with(Field::Company, "Metrica")
        .with(Field::Role, "Intern")
        .with(Field::Address, "12 MG Road")
        .with(Field::City, "Bengaluru")
        .with(Field::State, "Karnataka")
        .with(Field::PinCode, "560001")
        .with(Field::Date, "2025-06-01")
        .with(Field::Remarks, "None")
}

pub fn record(id: &str, name: &str) -> SubmissionRecord {
    let mut fields = SubmissionDraft::default();
    fields.full_name = name.to_string();
    SubmissionRecord {
        id: id.to_string(),
        fields,
        created_at: "2025-06-01T10:00:00".to_string(),
        pdf_url: None,
        docx_url: Some(format!("http://backend/api/download/{id}/docx")),
    }
}
