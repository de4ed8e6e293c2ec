//! Boundary normalization of legacy response shapes.
//!
//! Older backend handlers marshal user objects with snake_case JSON tags
//! (`user_id`, `first_name`, …) while the rest of the API uses the exported
//! Go field names (`ID`, `FirstName`, …). The read-models only know the
//! canonical names, so the gateway remaps every user object it sees —
//! recursively, so a user nested in an array or aggregate comes out canonical
//! too.

use serde_json::Value;

/// Key remaps applied to objects recognized as users.
const USER_KEYS: &[(&str, &str)] = &[
  ("user_id", "ID"),
  ("email", "Email"),
  ("first_name", "FirstName"),
  ("last_name", "LastName"),
  ("is_admin", "IsAdmin"),
  ("created_at", "CreatedAt"),
  ("updated_at", "UpdatedAt"),
];

/// Recursively rewrite legacy snake_case user objects to canonical field
/// names. Objects are recognized as users by the presence of a `user_id`
/// key, mirroring what the backend's legacy marshalling emits; all other
/// objects pass through with only their children rewritten.
pub fn canonicalize(value: Value) -> Value {
  match value {
    Value::Array(items) => {
      Value::Array(items.into_iter().map(canonicalize).collect())
    }
    Value::Object(map) => {
      let is_user = map.contains_key("user_id");
      let rewritten = map
        .into_iter()
        .map(|(key, child)| {
          let key = if is_user { canonical_key(key) } else { key };
          (key, canonicalize(child))
        })
        .collect();
      Value::Object(rewritten)
    }
    scalar => scalar,
  }
}

fn canonical_key(key: String) -> String {
  USER_KEYS
    .iter()
    .find(|(legacy, _)| *legacy == key)
    .map_or(key, |(_, canonical)| (*canonical).to_owned())
}
