//! Authentication endpoints.

use studyhub_core::{Created, LoginRequest, NewUser, TokenResponse};

use crate::{error::Result, gateway::Gateway};

impl Gateway {
  /// `POST /api/v1/auth/login` — exchange credentials for a bearer token.
  pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
    self
      .post(
        "/auth/login",
        &LoginRequest {
          email:    email.to_owned(),
          password: password.to_owned(),
        },
      )
      .await
  }

  /// `POST /api/v1/users` — register a new account.
  pub async fn register(&self, fields: &NewUser) -> Result<Created> {
    self.post("/users", fields).await
  }
}
