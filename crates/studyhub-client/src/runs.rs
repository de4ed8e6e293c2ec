//! Module-run endpoints.

use studyhub_core::{Created, ModuleRun, ModuleRunPage, NewModuleRun};
use uuid::Uuid;

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `GET /api/v1/modules/{moduleId}/runs`
  pub async fn list_runs(&self, module_id: Uuid) -> Result<Vec<ModuleRun>> {
    self.get(&format!("/modules/{module_id}/runs")).await
  }

  /// `POST /api/v1/modules/{moduleId}/runs`
  pub async fn create_run(
    &self,
    module_id: Uuid,
    fields: &NewModuleRun,
  ) -> Result<Created> {
    self.post(&format!("/modules/{module_id}/runs"), fields).await
  }

  /// `GET /api/v1/module-runs/{id}` — run plus its weeks.
  pub async fn run_page(&self, id: Uuid) -> Result<ModuleRunPage> {
    self.get(&format!("/module-runs/{id}")).await
  }

  /// `DELETE /api/v1/module-runs/{id}`
  pub async fn delete_run(&self, id: Uuid) -> Result<()> {
    self.delete(&format!("/module-runs/{id}")).await
  }
}
