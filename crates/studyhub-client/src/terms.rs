//! Academic-term endpoints.

use studyhub_core::{AcademicTerm, Created, NewAcademicTerm};
use uuid::Uuid;

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `GET /api/v1/academic-terms`
  pub async fn list_terms(&self) -> Result<Vec<AcademicTerm>> {
    self.get("/academic-terms").await
  }

  /// `GET /api/v1/academic-terms/active`
  pub async fn active_term(&self) -> Result<AcademicTerm> {
    self.get("/academic-terms/active").await
  }

  /// `GET /api/v1/academic-terms/current`
  pub async fn current_term(&self) -> Result<AcademicTerm> {
    self.get("/academic-terms/current").await
  }

  /// `POST /api/v1/academic-terms`
  pub async fn create_term(&self, fields: &NewAcademicTerm) -> Result<Created> {
    self.post("/academic-terms", fields).await
  }

  /// `POST /api/v1/academic-terms/new-term` — create a term and roll every
  /// module over into a run for it.
  pub async fn start_new_term(&self, fields: &NewAcademicTerm) -> Result<Created> {
    self.post("/academic-terms/new-term", fields).await
  }

  /// `PATCH /api/v1/academic-terms/{id}/activate`
  pub async fn activate_term(&self, id: Uuid) -> Result<()> {
    self.patch(&format!("/academic-terms/{id}/activate")).await
  }

  /// `PATCH /api/v1/academic-terms/{id}/deactivate`
  pub async fn deactivate_term(&self, id: Uuid) -> Result<()> {
    self.patch(&format!("/academic-terms/{id}/deactivate")).await
  }
}
