//! Route table and the authorization gate.
//!
//! Every navigation goes through [`resolve`] before a screen change is
//! committed: while the session bootstrap is in flight nothing protected is
//! rendered, unauthenticated navigation to a protected route lands on login,
//! and authenticated navigation to the entry points bounces to the module
//! listing. Admin checks here only gate affordances — the backend is the
//! real enforcement point.

use studyhub_core::{Resource, User};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Login,
  Register,
  Modules,
  ModuleDetail(Uuid),
  Week(Uuid),
  Terms,
  Admin,
  Profile,
}

impl Route {
  /// Entry points reachable without a session.
  pub const fn is_public(self) -> bool {
    matches!(self, Self::Login | Self::Register)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
  /// Bootstrap still in flight — commit nothing.
  Resolving,
  Unauthenticated,
  Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
  /// Render a neutral loading frame and keep waiting.
  Wait,
  Allow,
  RedirectLogin,
  RedirectModules,
}

/// Decide whether `route` may be entered under `auth`.
pub fn resolve(route: Route, auth: AuthState) -> Verdict {
  match auth {
    AuthState::Resolving => Verdict::Wait,
    AuthState::Unauthenticated if route.is_public() => Verdict::Allow,
    AuthState::Unauthenticated => Verdict::RedirectLogin,
    AuthState::Authenticated if route.is_public() => Verdict::RedirectModules,
    AuthState::Authenticated => Verdict::Allow,
  }
}

/// Whether admin-only affordances (dashboard, term management, module/run
/// create + delete) are shown for `identity`.
pub fn can_manage(identity: Option<&User>) -> bool {
  identity.is_some_and(|u| u.is_admin)
}

/// Delete controls on a resource are shown to admins and to the uploader.
pub fn can_delete_resource(identity: Option<&User>, resource: &Resource) -> bool {
  identity.is_some_and(|u| u.is_admin || u.id == resource.user_id)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn user(id: Uuid, admin: bool) -> User {
    serde_json::from_value(serde_json::json!({
      "ID": id,
      "Email": "u@studyhub.test",
      "FirstName": "U",
      "LastName": "Ser",
      "IsAdmin": admin,
      "CreatedAt": "2025-01-01T00:00:00Z",
      "UpdatedAt": "2025-01-01T00:00:00Z"
    }))
    .unwrap()
  }

  #[test]
  fn nothing_commits_while_bootstrap_resolves() {
    assert_eq!(resolve(Route::Modules, AuthState::Resolving), Verdict::Wait);
    assert_eq!(resolve(Route::Login, AuthState::Resolving), Verdict::Wait);
  }

  #[test]
  fn protected_routes_redirect_to_login_when_unauthenticated() {
    for route in [
      Route::Modules,
      Route::ModuleDetail(Uuid::new_v4()),
      Route::Week(Uuid::new_v4()),
      Route::Terms,
      Route::Admin,
      Route::Profile,
    ] {
      assert_eq!(
        resolve(route, AuthState::Unauthenticated),
        Verdict::RedirectLogin,
        "{route:?}"
      );
    }
  }

  #[test]
  fn entry_points_are_open_when_unauthenticated() {
    assert_eq!(resolve(Route::Login, AuthState::Unauthenticated), Verdict::Allow);
    assert_eq!(
      resolve(Route::Register, AuthState::Unauthenticated),
      Verdict::Allow
    );
  }

  #[test]
  fn entry_points_bounce_to_modules_when_authenticated() {
    assert_eq!(
      resolve(Route::Login, AuthState::Authenticated),
      Verdict::RedirectModules
    );
    assert_eq!(
      resolve(Route::Register, AuthState::Authenticated),
      Verdict::RedirectModules
    );
    assert_eq!(resolve(Route::Modules, AuthState::Authenticated), Verdict::Allow);
  }

  #[test]
  fn admin_affordances_follow_the_admin_flag() {
    let plain = user(Uuid::new_v4(), false);
    let admin = user(Uuid::new_v4(), true);
    assert!(!can_manage(Some(&plain)));
    assert!(can_manage(Some(&admin)));
    assert!(!can_manage(None));
  }

  #[test]
  fn resource_delete_is_owner_or_admin() {
    let owner = user(Uuid::new_v4(), false);
    let stranger = user(Uuid::new_v4(), false);
    let admin = user(Uuid::new_v4(), true);
    let resource: Resource = serde_json::from_value(serde_json::json!({
      "ID": Uuid::new_v4(),
      "WeekID": Uuid::new_v4(),
      "UserID": owner.id,
      "UserName": "U Ser",
      "ResourceType": "link",
      "Name": "Lecture notes",
      "Url": "https://example.test/notes",
      "CreatedAt": "2025-01-01T00:00:00Z"
    }))
    .unwrap();

    assert!(can_delete_resource(Some(&owner), &resource));
    assert!(can_delete_resource(Some(&admin), &resource));
    assert!(!can_delete_resource(Some(&stranger), &resource));
    assert!(!can_delete_resource(None, &resource));
  }
}
