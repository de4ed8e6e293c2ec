//! User profile endpoints.

use studyhub_core::User;
use uuid::Uuid;

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `GET /api/v1/users/me` — resolve the identity behind the current
  /// credential.
  pub async fn me(&self) -> Result<User> {
    self.get("/users/me").await
  }

  /// `GET /api/v1/users/{id}`
  pub async fn user(&self, id: Uuid) -> Result<User> {
    self.get(&format!("/users/{id}")).await
  }

  /// `GET /api/v1/users`
  pub async fn list_users(&self) -> Result<Vec<User>> {
    self.get("/users").await
  }

  /// `DELETE /api/v1/users/{id}`
  pub async fn delete_user(&self, id: Uuid) -> Result<()> {
    self.delete(&format!("/users/{id}")).await
  }
}
