//! Async HTTP gateway wrapping the StudyHub JSON API.
//!
//! All outbound traffic goes through [`Gateway::send`]: it attaches the
//! bearer credential from the vault, peels the `{data}`/`{error}` envelope,
//! runs [`crate::normalize::canonicalize`] over the payload, and maps
//! failures onto [`Error`]. An unauthorized reply clears the vault and
//! raises the revocation flag — the only global-logout side effect in the
//! crate.

use std::{
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
  time::Duration,
};

use reqwest::{Client, Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  error::{Error, Result},
  normalize,
  vault::Vault,
};

/// Connection settings for the StudyHub API.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
  pub base_url: String,
}

/// Single point of outbound communication with the backend.
pub struct Gateway {
  client:   Client,
  config:   GatewayConfig,
  vault:    Arc<dyn Vault>,
  /// Set when a reply came back unauthorized; consumed by the session on its
  /// next authentication check.
  revoked:  AtomicBool,
}

impl Gateway {
  pub fn new(config: GatewayConfig, vault: Arc<dyn Vault>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      config,
      vault,
      revoked: AtomicBool::new(false),
    })
  }

  pub fn vault(&self) -> &Arc<dyn Vault> {
    &self.vault
  }

  /// True once if an unauthorized reply cleared the session since the last
  /// call; reading resets the flag.
  pub fn take_session_revoked(&self) -> bool {
    self.revoked.swap(false, Ordering::SeqCst)
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api/v1{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Generic escape hatch: `request(method, path, body?) -> T`.
  ///
  /// The typed endpoint methods cover the whole API surface; this exists for
  /// callers (and tests) that need an endpoint the crate has no wrapper for.
  pub async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: Option<Value>,
  ) -> Result<T> {
    let value = self.send(method, path, body).await?;
    Ok(serde_json::from_value(value)?)
  }

  // ── Typed helpers used by the endpoint modules ────────────────────────────

  pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let value = self.send(Method::GET, path, None).await?;
    Ok(serde_json::from_value(value)?)
  }

  pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
  where
    T: DeserializeOwned,
    B: Serialize,
  {
    let body = serde_json::to_value(body)?;
    let value = self.send(Method::POST, path, Some(body)).await?;
    Ok(serde_json::from_value(value)?)
  }

  pub(crate) async fn patch(&self, path: &str) -> Result<()> {
    self.send(Method::PATCH, path, None).await.map(drop)
  }

  pub(crate) async fn patch_json<B: Serialize>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<()> {
    let body = serde_json::to_value(body)?;
    self.send(Method::PATCH, path, Some(body)).await.map(drop)
  }

  pub(crate) async fn delete(&self, path: &str) -> Result<()> {
    self.send(Method::DELETE, path, None).await.map(drop)
  }

  pub(crate) async fn post_multipart<T: DeserializeOwned>(
    &self,
    path: &str,
    form: reqwest::multipart::Form,
  ) -> Result<T> {
    let mut req = self.client.post(self.url(path)).multipart(form);
    if let Some(token) = self.vault.credential() {
      req = req.bearer_auth(token);
    }
    let resp = req.send().await?;
    let value = self.digest(Method::POST, path, resp).await?;
    Ok(serde_json::from_value(value)?)
  }

  // ── Core request path ─────────────────────────────────────────────────────

  /// `request(method, path, body?) -> payload | fails(Error)`.
  pub(crate) async fn send(
    &self,
    method: Method,
    path: &str,
    body: Option<Value>,
  ) -> Result<Value> {
    let mut req = self.client.request(method.clone(), self.url(path));
    if let Some(token) = self.vault.credential() {
      req = req.bearer_auth(token);
    }
    if let Some(body) = body {
      req = req.json(&body);
    }

    let resp = req.send().await?;
    self.digest(method, path, resp).await
  }

  /// Shared response handling: status mapping, envelope unwrap, and field
  /// normalization.
  async fn digest(
    &self,
    method: Method,
    path: &str,
    resp: reqwest::Response,
  ) -> Result<Value> {
    let status = resp.status();
    let text = resp.text().await?;
    let parsed = serde_json::from_str::<Value>(&text);

    if status == StatusCode::UNAUTHORIZED {
      // The one place allowed to force a global logout: drop the persisted
      // credential and identity, flag the session, and let the caller's
      // error handling route back to login.
      tracing::warn!(%method, path, "credential rejected, clearing session");
      self.vault.clear();
      self.revoked.store(true, Ordering::SeqCst);
      let message = error_message(parsed.as_ref().ok())
        .unwrap_or_else(|| "authentication rejected".to_owned());
      return Err(Error::AuthExpired { message });
    }

    if let Some(err) = parsed.as_ref().ok().and_then(|v| v.get("error")) {
      let code = err
        .get("code")
        .and_then(Value::as_u64)
        .map_or(status.as_u16(), |c| c as u16);
      let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed")
        .to_owned();
      tracing::debug!(%method, path, code, %message, "backend returned error");
      return Err(Error::Remote { code, message });
    }

    if !status.is_success() {
      return Err(Error::Transport(format!("{method} {path} → {status}")));
    }

    let body = match parsed {
      Ok(value) => value,
      Err(_) if text.trim().is_empty() => Value::Null,
      Err(err) => return Err(Error::Decode(err)),
    };

    // Unwrap the `{data}` envelope; bodies without one pass through raw.
    let payload = match body {
      Value::Object(mut map) => match map.remove("data") {
        Some(inner) => inner,
        None => Value::Object(map),
      },
      other => other,
    };

    Ok(normalize::canonicalize(payload))
  }
}

fn error_message(body: Option<&Value>) -> Option<String> {
  body
    .and_then(|v| v.get("error"))
    .and_then(|e| e.get("message"))
    .and_then(Value::as_str)
    .map(str::to_owned)
}
