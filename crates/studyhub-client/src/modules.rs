//! Module endpoints.

use studyhub_core::{Created, Module, ModulePage, NewModule};
use uuid::Uuid;

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `GET /api/v1/modules`
  pub async fn list_modules(&self) -> Result<Vec<Module>> {
    self.get("/modules").await
  }

  /// `GET /api/v1/modules/{id}` — module plus active run and its weeks.
  pub async fn module_page(&self, id: Uuid) -> Result<ModulePage> {
    self.get(&format!("/modules/{id}")).await
  }

  /// `POST /api/v1/modules`
  pub async fn create_module(&self, fields: &NewModule) -> Result<Created> {
    self.post("/modules", fields).await
  }

  /// `PATCH /api/v1/modules/{id}`
  pub async fn update_module(&self, id: Uuid, fields: &NewModule) -> Result<()> {
    self.patch_json(&format!("/modules/{id}"), fields).await
  }

  /// `DELETE /api/v1/modules/{id}`
  pub async fn delete_module(&self, id: Uuid) -> Result<()> {
    self.delete(&format!("/modules/{id}")).await
  }
}
