//! Session store lifecycle tests: bootstrap, login, register, logout.

mod support;

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use studyhub_client::{
  Error, FileVault, Gateway, GatewayConfig, MemoryVault, Session, Vault,
};
use studyhub_core::{NewUser, User};

use support::{Behavior, Stub, TOKEN};

/// Vault whose credential writes can be made to fail, for exercising the
/// login rollback path.
#[derive(Default)]
struct BrokenWriteVault {
  inner:       MemoryVault,
  fail_writes: AtomicBool,
}

impl Vault for BrokenWriteVault {
  fn credential(&self) -> Option<String> {
    self.inner.credential()
  }

  fn identity(&self) -> Option<User> {
    self.inner.identity()
  }

  fn store_credential(&self, token: &str) -> studyhub_client::Result<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(Error::Vault(std::io::Error::other("disk full")));
    }
    self.inner.store_credential(token)
  }

  fn store_identity(&self, user: &User) -> studyhub_client::Result<()> {
    self.inner.store_identity(user)
  }

  fn clear(&self) {
    self.inner.clear();
  }
}

fn session_with(stub: &Stub, vault: Arc<dyn Vault>) -> Session {
  let gateway = Gateway::new(
    GatewayConfig {
      base_url: stub.base_url.clone(),
    },
    vault.clone(),
  )
  .expect("gateway");
  Session::new(Arc::new(gateway), vault)
}

fn sample_user() -> User {
  serde_json::from_value(support::sample_user()).expect("sample user")
}

fn register_fields() -> NewUser {
  NewUser {
    email:      "ada@studyhub.test".into(),
    password:   "pw123456".into(),
    first_name: "Ada".into(),
    last_name:  "Lovelace".into(),
  }
}

// ─── Bootstrap ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_without_credential_stays_logged_out_silently() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault);

  session.bootstrap().await.unwrap();

  assert!(!session.is_authenticated());
  // The who-am-I call must not even be issued.
  assert_eq!(stub.counters.me_calls(), 0);
}

#[tokio::test]
async fn bootstrap_refetches_identity_instead_of_trusting_cache() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(MemoryVault::new());
  vault.store_credential(TOKEN).unwrap();
  // Stale cached identity with the wrong name.
  let mut stale = sample_user();
  stale.first_name = "Someone".into();
  stale.last_name = "Else".into();
  vault.store_identity(&stale).unwrap();

  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);
  session.bootstrap().await.unwrap();

  assert!(session.is_authenticated());
  assert_eq!(stub.counters.me_calls(), 1);
  let fresh = session.identity().expect("identity");
  assert_eq!(fresh.first_name, "Ada");
  // The persisted copy was refreshed too.
  assert_eq!(vault.identity().expect("vault identity").first_name, "Ada");
}

#[tokio::test]
async fn bootstrap_with_rejected_credential_clears_everything() {
  let stub = support::spawn(Behavior {
    reject_me: true,
    ..Behavior::default()
  })
  .await;
  let vault = Arc::new(MemoryVault::new());
  vault.store_credential("stale-token").unwrap();
  vault.store_identity(&sample_user()).unwrap();

  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);
  // Not an error: the user just lands on the login screen.
  session.bootstrap().await.unwrap();

  assert!(!session.is_authenticated());
  assert!(vault.credential().is_none());
  assert!(vault.identity().is_none());
}

#[tokio::test]
async fn bootstrap_survives_process_restart_via_file_vault() {
  let stub = support::spawn(Behavior::default()).await;
  let dir = tempfile::tempdir().expect("tempdir");
  let path = dir.path().join("session.json");

  {
    let vault = Arc::new(FileVault::open(&path));
    let mut session = session_with(&stub, vault as Arc<dyn Vault>);
    session.login("ada@studyhub.test", "pw123456").await.unwrap();
  }

  // "Restart": a fresh vault reading the same file.
  let vault = Arc::new(FileVault::open(&path));
  let mut session = session_with(&stub, vault as Arc<dyn Vault>);
  session.bootstrap().await.unwrap();
  assert!(session.is_authenticated());
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_persists_credential_and_resolves_identity() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);

  let user = session.login("ada@studyhub.test", "pw123456").await.unwrap();
  assert_eq!(user.email, "ada@studyhub.test");

  assert!(session.is_authenticated());
  assert_eq!(vault.credential().as_deref(), Some(TOKEN));
  assert!(vault.identity().is_some());
}

#[tokio::test]
async fn login_failure_at_token_exchange_propagates() {
  let stub = support::spawn(Behavior {
    fail_login: true,
    ..Behavior::default()
  })
  .await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);

  let err = session.login("ada@studyhub.test", "wrong").await.unwrap_err();
  assert!(matches!(err, Error::Remote { .. }), "got {err:?}");
  assert!(!session.is_authenticated());
  assert!(vault.credential().is_none());
}

#[tokio::test]
async fn login_rolls_back_identity_when_credential_persist_fails() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(BrokenWriteVault::default());
  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);

  // First sign-in succeeds and leaves an authenticated session behind.
  session.login("ada@studyhub.test", "pw123456").await.unwrap();
  assert!(session.is_authenticated());

  // Re-login while the vault cannot persist the new credential.
  vault.fail_writes.store(true, Ordering::SeqCst);
  let err = session.login("ada@studyhub.test", "pw123456").await.unwrap_err();
  assert!(matches!(err, Error::Vault(_)), "got {err:?}");

  // Rollback covers the in-memory identity too, not just the vault: a
  // session with no credential must not keep reporting authenticated.
  assert!(vault.credential().is_none());
  assert!(vault.identity().is_none());
  assert!(!session.is_authenticated());
}

#[tokio::test]
async fn login_rolls_back_when_who_am_i_fails() {
  let stub = support::spawn(Behavior {
    reject_me: true,
    ..Behavior::default()
  })
  .await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);

  let err = session.login("ada@studyhub.test", "pw123456").await.unwrap_err();
  assert!(matches!(err, Error::AuthExpired { .. }), "got {err:?}");

  // Full rollback: no credential, no identity, not authenticated.
  assert!(vault.credential().is_none());
  assert!(vault.identity().is_none());
  assert!(!session.is_authenticated());
}

// ─── Register ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_logs_in_with_same_credentials() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault);

  let user = session.register(register_fields()).await.unwrap();
  assert_eq!(user.first_name, "Ada");
  assert!(session.is_authenticated());
  assert_eq!(stub.counters.login_calls(), 1);
}

#[tokio::test]
async fn register_failure_short_circuits_before_login() {
  let stub = support::spawn(Behavior {
    fail_register: true,
    ..Behavior::default()
  })
  .await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault);

  let err = session.register(register_fields()).await.unwrap_err();
  assert!(matches!(err, Error::Remote { .. }), "got {err:?}");
  assert_eq!(stub.counters.login_calls(), 0);
  assert!(!session.is_authenticated());
}

// ─── Logout & revocation ─────────────────────────────────────────────────────

#[tokio::test]
async fn logout_twice_is_the_same_as_once() {
  let stub = support::spawn(Behavior::default()).await;
  let vault = Arc::new(MemoryVault::new());
  let mut session = session_with(&stub, vault.clone() as Arc<dyn Vault>);

  session.login("ada@studyhub.test", "pw123456").await.unwrap();
  session.logout();
  session.logout();

  assert!(!session.is_authenticated());
  assert!(vault.credential().is_none());
  assert!(vault.identity().is_none());
}

#[tokio::test]
async fn unauthorized_mid_flight_reads_as_logged_out_on_next_check() {
  let stub = support::spawn(Behavior {
    reject_all: true,
    ..Behavior::default()
  })
  .await;
  let vault = Arc::new(MemoryVault::new());
  let gateway = Arc::new(
    Gateway::new(
      GatewayConfig {
        base_url: stub.base_url.clone(),
      },
      vault.clone() as Arc<dyn Vault>,
    )
    .expect("gateway"),
  );
  let mut session = Session::new(gateway.clone(), vault);

  session.login("ada@studyhub.test", "pw123456").await.unwrap();
  assert!(session.is_authenticated());

  // Some view controller's fetch hits a 401.
  let err = gateway.list_modules().await.unwrap_err();
  assert!(matches!(err, Error::AuthExpired { .. }), "got {err:?}");

  assert!(!session.is_authenticated());
}
