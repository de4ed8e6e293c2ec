//! Academic terms — global year/semester periods.
//!
//! Admins use terms to roll all modules over into a new set of runs; the
//! "at most one active term" rule is owned by the backend, never enforced
//! here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::module::Semester;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicTerm {
  #[serde(rename = "ID")]
  pub id:        Uuid,
  #[serde(rename = "Year")]
  pub year:      i32,
  #[serde(rename = "Semester")]
  pub semester:  Semester,
  #[serde(rename = "IsActive")]
  pub is_active: bool,
}

impl AcademicTerm {
  /// Short label like `fall 2025`.
  pub fn label(&self) -> String {
    format!("{} {}", self.semester, self.year)
  }
}
