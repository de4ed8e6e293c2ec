//! Request and response bodies for the StudyHub REST surface.
//!
//! Request bodies are snake_case — the backend decodes these with explicit
//! JSON tags, unlike the PascalCase read-models it marshals back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::module::Semester;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
  pub email:    String,
  pub password: String,
}

/// `POST /users` — account registration.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
  pub email:      String,
  pub password:   String,
  pub first_name: String,
  pub last_name:  String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewModule {
  pub code:            String,
  pub name:            String,
  #[serde(skip_serializing_if = "String::is_empty")]
  pub description:     String,
  pub department_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewModuleRun {
  pub year:      i32,
  pub semester:  Semester,
  pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAcademicTerm {
  pub year:     i32,
  pub semester: Semester,
}

/// `POST /resources/link/{weekId}`.
#[derive(Debug, Clone, Serialize)]
pub struct NewLink {
  pub name: String,
  pub url:  String,
}

/// `POST /auth/login` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
  pub token: String,
}

/// Standard creation reply carrying the new entity's id.
#[derive(Debug, Clone, Deserialize)]
pub struct Created {
  pub id: Uuid,
}

/// `GET /resources/{objectId}` — presigned download location.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadUrl {
  pub url: String,
}
