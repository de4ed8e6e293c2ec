//! Durable session storage — the client-side analogue of browser
//! localStorage.
//!
//! The vault owns exactly two values: the bearer credential and the cached
//! identity. They live and die together; `clear` removes both so a
//! credential is never left behind without a validated identity (the one
//! exception is the window between `store_credential` and the who-am-I
//! fetch during login, which the session rolls back on failure).

use std::{
  fs,
  path::{Path, PathBuf},
  sync::Mutex,
};

use serde::{Deserialize, Serialize};
use studyhub_core::User;

use crate::error::Result;

/// Storage seam for the credential and cached identity.
///
/// Only the session layer and the gateway's unauthorized handler may write
/// through this trait; every other component treats session state as
/// read-only.
pub trait Vault: Send + Sync {
  /// The persisted bearer token, if any.
  fn credential(&self) -> Option<String>;

  /// The identity cached alongside the credential, if any.
  fn identity(&self) -> Option<User>;

  fn store_credential(&self, token: &str) -> Result<()>;

  fn store_identity(&self, user: &User) -> Result<()>;

  /// Remove credential and identity together.
  fn clear(&self);
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionState {
  token: Option<String>,
  user:  Option<User>,
}

// ─── File-backed vault ────────────────────────────────────────────────────────

/// Vault persisted as a JSON file, surviving process restarts.
pub struct FileVault {
  path:  PathBuf,
  state: Mutex<SessionState>,
}

impl FileVault {
  /// Open (or initialize) the vault at `path`. An unreadable or corrupt
  /// state file is treated as logged out rather than an error.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let state = fs::read_to_string(&path)
      .ok()
      .and_then(|raw| serde_json::from_str(&raw).ok())
      .unwrap_or_default();
    Self {
      path,
      state: Mutex::new(state),
    }
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
    self
      .state
      .lock()
      .unwrap_or_else(std::sync::PoisonError::into_inner)
  }

  /// Write the whole state file through a temp-file rename so credential
  /// and identity are never observed half-written.
  fn persist(&self, state: &SessionState) -> Result<()> {
    if let Some(dir) = self.path.parent() {
      fs::create_dir_all(dir)?;
    }
    let raw = serde_json::to_string_pretty(state)?;
    let tmp = self.path.with_extension("tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, &self.path)?;
    Ok(())
  }
}

impl Vault for FileVault {
  fn credential(&self) -> Option<String> {
    self.lock().token.clone()
  }

  fn identity(&self) -> Option<User> {
    self.lock().user.clone()
  }

  fn store_credential(&self, token: &str) -> Result<()> {
    let mut state = self.lock();
    state.token = Some(token.to_owned());
    self.persist(&state)
  }

  fn store_identity(&self, user: &User) -> Result<()> {
    let mut state = self.lock();
    state.user = Some(user.clone());
    self.persist(&state)
  }

  fn clear(&self) {
    let mut state = self.lock();
    *state = SessionState::default();
    // Removing the file outranks reporting the failure: a stale state file
    // must not resurrect a revoked session on the next start.
    if let Err(err) = fs::remove_file(&self.path) {
      if err.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(path = %self.path.display(), %err, "failed to remove session file");
      }
    }
  }
}

// ─── In-memory vault ──────────────────────────────────────────────────────────

/// Non-persistent vault for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryVault {
  state: Mutex<SessionState>,
}

impl MemoryVault {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
    self
      .state
      .lock()
      .unwrap_or_else(std::sync::PoisonError::into_inner)
  }
}

impl Vault for MemoryVault {
  fn credential(&self) -> Option<String> {
    self.lock().token.clone()
  }

  fn identity(&self) -> Option<User> {
    self.lock().user.clone()
  }

  fn store_credential(&self, token: &str) -> Result<()> {
    self.lock().token = Some(token.to_owned());
    Ok(())
  }

  fn store_identity(&self, user: &User) -> Result<()> {
    self.lock().user = Some(user.clone());
    Ok(())
  }

  fn clear(&self) {
    *self.lock() = SessionState::default();
  }
}

/// Default on-disk location: `$XDG_STATE_HOME/studyhub/session.json`, falling
/// back to `~/.local/state/studyhub/session.json`.
pub fn default_session_path() -> Option<PathBuf> {
  let base = std::env::var_os("XDG_STATE_HOME")
    .map(PathBuf::from)
    .or_else(|| {
      std::env::var_os("HOME")
        .map(|home| Path::new(&home).join(".local").join("state"))
    })?;
  Some(base.join("studyhub").join("session.json"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user() -> User {
    serde_json::from_value(serde_json::json!({
      "ID": "2a7b44f0-9cf1-4a0d-a7a4-2f9a3a1b0c01",
      "Email": "ada@studyhub.test",
      "FirstName": "Ada",
      "LastName": "Lovelace",
      "IsAdmin": false,
      "CreatedAt": "2025-01-01T00:00:00Z",
      "UpdatedAt": "2025-06-01T00:00:00Z"
    }))
    .unwrap()
  }

  #[test]
  fn file_vault_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let vault = FileVault::open(&path);
    vault.store_credential("tok").unwrap();
    vault.store_identity(&user()).unwrap();

    let reopened = FileVault::open(&path);
    assert_eq!(reopened.credential().as_deref(), Some("tok"));
    assert_eq!(reopened.identity().unwrap().email, "ada@studyhub.test");
  }

  #[test]
  fn clear_removes_state_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let vault = FileVault::open(&path);
    vault.store_credential("tok").unwrap();
    vault.clear();

    assert!(vault.credential().is_none());
    assert!(vault.identity().is_none());
    assert!(!path.exists());
    // Clearing again is a no-op, not an error.
    vault.clear();
  }

  #[test]
  fn corrupt_state_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    fs::write(&path, "{ not json").unwrap();

    let vault = FileVault::open(&path);
    assert!(vault.credential().is_none());
    assert!(vault.identity().is_none());
  }
}
