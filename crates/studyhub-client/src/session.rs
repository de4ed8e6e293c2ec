//! Session store — the authenticated-identity state machine.
//!
//! Owns the in-memory identity and is, together with the gateway's
//! unauthorized handler, the only writer of the session vault. Constructed
//! per process (or per test); there is no ambient singleton.
//!
//! The identity is always resolved through `GET /users/me` — the token's
//! own claims are never trusted beyond being an opaque credential.

use std::sync::Arc;

use studyhub_core::{NewUser, User};

use crate::{
  error::Result,
  gateway::Gateway,
  vault::Vault,
};

pub struct Session {
  gateway:  Arc<Gateway>,
  vault:    Arc<dyn Vault>,
  identity: Option<User>,
}

impl Session {
  pub fn new(gateway: Arc<Gateway>, vault: Arc<dyn Vault>) -> Self {
    Self {
      gateway,
      vault,
      identity: None,
    }
  }

  /// Validate any persisted credential on process start.
  ///
  /// Without a credential this resolves immediately as logged out — no
  /// who-am-I call is issued. With one, the identity is re-fetched from the
  /// server rather than trusting the cached copy; a rejection clears both
  /// stores and still resolves `Ok` (landing on the login screen is not an
  /// error).
  pub async fn bootstrap(&mut self) -> Result<()> {
    self.gateway.take_session_revoked();
    if self.vault.credential().is_none() {
      self.identity = None;
      return Ok(());
    }
    match self.gateway.me().await {
      Ok(user) => {
        self.vault.store_identity(&user)?;
        self.identity = Some(user);
      }
      Err(err) => {
        tracing::info!(%err, "stored credential rejected, starting logged out");
        self.vault.clear();
        self.identity = None;
      }
    }
    Ok(())
  }

  /// Exchange credentials for a token, then resolve the identity.
  ///
  /// A failure anywhere mid-sequence rolls the vault and in-memory identity
  /// back to logged out before propagating.
  pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
    self.gateway.take_session_revoked();
    let token = self.gateway.login(email, password).await?.token;
    if let Err(err) = self.vault.store_credential(&token) {
      self.vault.clear();
      self.identity = None;
      return Err(err);
    }

    match self.gateway.me().await {
      Ok(user) => {
        if let Err(err) = self.vault.store_identity(&user) {
          self.vault.clear();
          self.identity = None;
          return Err(err);
        }
        self.identity = Some(user.clone());
        Ok(user)
      }
      Err(err) => {
        self.vault.clear();
        self.identity = None;
        Err(err)
      }
    }
  }

  /// Create an account, then log in with the same credentials. A creation
  /// failure short-circuits before any login attempt.
  pub async fn register(&mut self, fields: NewUser) -> Result<User> {
    self.gateway.register(&fields).await?;
    self.login(&fields.email, &fields.password).await
  }

  /// Clear credential and identity. Idempotent.
  pub fn logout(&mut self) {
    self.vault.clear();
    self.identity = None;
  }

  /// True iff an in-memory identity is present. Observes the gateway's
  /// revocation flag, so a 401 anywhere in the app reads as logged out on
  /// the next check.
  pub fn is_authenticated(&mut self) -> bool {
    if self.gateway.take_session_revoked() {
      self.identity = None;
    }
    self.identity.is_some()
  }

  pub fn identity(&self) -> Option<&User> {
    self.identity.as_ref()
  }

  pub fn is_admin(&self) -> bool {
    self.identity.as_ref().is_some_and(|u| u.is_admin)
  }
}
