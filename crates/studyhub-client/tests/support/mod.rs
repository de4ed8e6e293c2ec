//! In-process stub of the StudyHub backend.
//!
//! Serves the same `{data}`/`{error}` envelope as the real backend on an
//! ephemeral port; behavior flags let each test pick which step fails.

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use axum::{
  Json, Router,
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-123";
pub const USER_ID: &str = "2a7b44f0-9cf1-4a0d-a7a4-2f9a3a1b0c01";
pub const MODULE_ID: &str = "3f2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c11";

#[derive(Default)]
pub struct Behavior {
  /// `GET /users/me` answers 401 regardless of the token.
  pub reject_me:     bool,
  /// `POST /auth/login` answers with a structured error.
  pub fail_login:    bool,
  /// `POST /users` answers with a structured error.
  pub fail_register: bool,
  /// Every protected route answers 401.
  pub reject_all:    bool,
}

#[derive(Default)]
pub struct Counters {
  pub me_calls:       AtomicUsize,
  pub login_calls:    AtomicUsize,
  pub register_calls: AtomicUsize,
  /// Last Authorization header seen on a protected route.
  pub last_auth:      Mutex<Option<String>>,
}

impl Counters {
  pub fn me_calls(&self) -> usize {
    self.me_calls.load(Ordering::SeqCst)
  }

  pub fn login_calls(&self) -> usize {
    self.login_calls.load(Ordering::SeqCst)
  }

  pub fn last_auth(&self) -> Option<String> {
    self
      .last_auth
      .lock()
      .unwrap_or_else(std::sync::PoisonError::into_inner)
      .clone()
  }
}

#[derive(Clone)]
struct AppState {
  behavior: Arc<Behavior>,
  counters: Arc<Counters>,
}

pub struct Stub {
  pub base_url: String,
  pub counters: Arc<Counters>,
}

pub async fn spawn(behavior: Behavior) -> Stub {
  let state = AppState {
    behavior: Arc::new(behavior),
    counters: Arc::new(Counters::default()),
  };
  let counters = state.counters.clone();

  let router = Router::new()
    .route("/api/v1/auth/login", post(login))
    .route("/api/v1/users", post(register))
    .route("/api/v1/users/me", get(me))
    .route("/api/v1/users/{id}", get(user_legacy))
    .route("/api/v1/modules", get(modules))
    .route("/api/v1/modules/{id}", get(module_page))
    .route("/api/v1/academic-terms/current", get(current_term_unwrapped))
    .route("/api/v1/academic-terms/active", get(active_term_broken))
    .route("/api/v1/resources/file/{week_id}", post(upload))
    .with_state(state);

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
    .await
    .expect("bind stub listener");
  let addr = listener.local_addr().expect("stub addr");
  tokio::spawn(async move {
    axum::serve(listener, router).await.expect("serve stub");
  });

  Stub {
    base_url: format!("http://{addr}"),
    counters,
  }
}

// ─── Envelope helpers (same shapes as the real backend) ──────────────────────

fn data(payload: Value) -> Json<Value> {
  Json(json!({ "data": payload }))
}

fn envelope_err(status: StatusCode, message: &str) -> Response {
  (
    status,
    Json(json!({ "error": { "code": status.as_u16(), "message": message } })),
  )
    .into_response()
}

pub fn sample_user() -> Value {
  json!({
    "ID": USER_ID,
    "Email": "ada@studyhub.test",
    "FirstName": "Ada",
    "LastName": "Lovelace",
    "IsAdmin": false,
    "CreatedAt": "2025-01-01T00:00:00Z",
    "UpdatedAt": "2025-06-01T00:00:00Z"
  })
}

// ─── Handlers ────────────────────────────────────────────────────────────────

async fn login(State(state): State<AppState>) -> Response {
  state.counters.login_calls.fetch_add(1, Ordering::SeqCst);
  if state.behavior.fail_login {
    return envelope_err(StatusCode::UNPROCESSABLE_ENTITY, "bad credentials");
  }
  data(json!({ "token": TOKEN })).into_response()
}

async fn register(State(state): State<AppState>) -> Response {
  state.counters.register_calls.fetch_add(1, Ordering::SeqCst);
  if state.behavior.fail_register {
    return envelope_err(StatusCode::CONFLICT, "email already registered");
  }
  data(json!({ "id": USER_ID })).into_response()
}

async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
  state.counters.me_calls.fetch_add(1, Ordering::SeqCst);
  record_auth(&state, &headers);
  if state.behavior.reject_me || !bearer_ok(&headers) {
    return envelope_err(StatusCode::UNAUTHORIZED, "invalid token");
  }
  data(sample_user()).into_response()
}

/// Legacy handler shape: user marshalled with snake_case tags. Exercises the
/// gateway's recursive canonicalization end to end.
async fn user_legacy(
  State(state): State<AppState>,
  headers: HeaderMap,
  Path(id): Path<String>,
) -> Response {
  record_auth(&state, &headers);
  data(json!({
    "user_id": id,
    "email": "ada@studyhub.test",
    "first_name": "Ada",
    "last_name": "Lovelace",
    "is_admin": true,
    "created_at": "2025-01-01T00:00:00Z",
    "updated_at": "2025-06-01T00:00:00Z"
  }))
  .into_response()
}

async fn modules(State(state): State<AppState>, headers: HeaderMap) -> Response {
  record_auth(&state, &headers);
  if state.behavior.reject_all {
    return envelope_err(StatusCode::UNAUTHORIZED, "invalid token");
  }
  data(json!([
    {
      "ID": MODULE_ID,
      "Code": "CS101",
      "Name": "Intro to Computing",
      "Description": "",
      "DepartmentName": "Computer Science",
      "CreatedAt": "2024-09-01T00:00:00Z",
      "UpdatedAt": "2024-09-01T00:00:00Z"
    }
  ]))
  .into_response()
}

/// Module with no active run: zero-value `Run`, null `Weeks` — exactly what
/// the Go backend marshals.
async fn module_page(Path(id): Path<String>) -> Json<Value> {
  data(json!({
    "Module": {
      "ID": id,
      "Code": "CS101",
      "Name": "Intro to Computing",
      "DepartmentName": "Computer Science",
      "CreatedAt": "2024-09-01T00:00:00Z",
      "UpdatedAt": "2024-09-01T00:00:00Z"
    },
    "Run": {
      "ID": "00000000-0000-0000-0000-000000000000",
      "ModuleID": "00000000-0000-0000-0000-000000000000",
      "Year": 0,
      "Semester": "spring",
      "Weeks": 0,
      "IsActive": false,
      "CreatedAt": "0001-01-01T00:00:00Z"
    },
    "Weeks": null
  }))
}

/// Reply without the `{data}` envelope — must pass through raw.
async fn current_term_unwrapped() -> Json<Value> {
  Json(json!({
    "ID": "5d2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c55",
    "Year": 2025,
    "Semester": "fall",
    "IsActive": true
  }))
}

/// Non-2xx with no structured body — maps to a transport failure.
async fn active_term_broken() -> Response {
  (StatusCode::BAD_GATEWAY, "upstream down").into_response()
}

async fn upload(State(state): State<AppState>, headers: HeaderMap) -> Response {
  record_auth(&state, &headers);
  data(json!({ "id": USER_ID })).into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
  headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn record_auth(state: &AppState, headers: &HeaderMap) {
  let value = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);
  *state
    .counters
    .last_auth
    .lock()
    .unwrap_or_else(std::sync::PoisonError::into_inner) = value;
}
