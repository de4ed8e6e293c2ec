//! User — the resolved profile behind an authenticated session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A StudyHub account as returned by `GET /users/{id}` and `GET /users/me`.
///
/// The `IsAdmin` flag only gates client-side affordances; the backend remains
/// the enforcement point for every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  #[serde(rename = "ID")]
  pub id:         Uuid,
  #[serde(rename = "Email")]
  pub email:      String,
  #[serde(rename = "FirstName")]
  pub first_name: String,
  #[serde(rename = "LastName")]
  pub last_name:  String,
  #[serde(rename = "IsAdmin")]
  pub is_admin:   bool,
  #[serde(rename = "CreatedAt")]
  pub created_at: DateTime<Utc>,
  #[serde(rename = "UpdatedAt")]
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Display name used in headers and resource cards.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}
