//! Resources — files, links, and notes attached to a week.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;
use crate::module::Semester;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
  File,
  Link,
  Note,
}

impl ResourceType {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::File => "file",
      Self::Link => "link",
      Self::Note => "note",
    }
  }
}

impl std::fmt::Display for ResourceType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for ResourceType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "file" => Ok(Self::File),
      "link" => Ok(Self::Link),
      "note" => Ok(Self::Note),
      other => Err(Error::UnknownResourceType(other.to_owned())),
    }
  }
}

/// A resource as listed under its week (`GET /resources/weeks/{weekId}`).
///
/// `url` is set for links, `object_id` for uploaded files; a note carries
/// neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
  #[serde(rename = "ID")]
  pub id:            Uuid,
  #[serde(rename = "WeekID")]
  pub week_id:       Uuid,
  #[serde(rename = "UserID")]
  pub user_id:       Uuid,
  /// Uploader display name, denormalized by the backend.
  #[serde(rename = "UserName", default)]
  pub user_name:     String,
  #[serde(rename = "ResourceType")]
  pub resource_type: ResourceType,
  /// Content hash the backend uses for duplicate detection.
  #[serde(rename = "Hash", default)]
  pub hash:          String,
  #[serde(rename = "Name")]
  pub name:          String,
  #[serde(rename = "Url", default)]
  pub url:           Option<String>,
  #[serde(rename = "ObjectID", default)]
  pub object_id:     Option<Uuid>,
  #[serde(rename = "CreatedAt")]
  pub created_at:    DateTime<Utc>,
  #[serde(rename = "UpdatedAt", default)]
  pub updated_at:    Option<DateTime<Utc>>,
}

/// A resource joined with its module/run/week context, as shown on profile
/// pages (`GET /resources/users/{userId}`). Same entity as [`Resource`],
/// different projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResource {
  #[serde(rename = "ID")]
  pub id:            Uuid,
  #[serde(rename = "WeekID")]
  pub week_id:       Uuid,
  #[serde(rename = "UserID")]
  pub user_id:       Uuid,
  #[serde(rename = "ModuleName")]
  pub module_name:   String,
  #[serde(rename = "Semester")]
  pub semester:      Semester,
  #[serde(rename = "Year")]
  pub year:          i32,
  #[serde(rename = "WeekNumber")]
  pub week_number:   i32,
  #[serde(rename = "ObjectID", default)]
  pub object_id:     Option<Uuid>,
  #[serde(rename = "ExternalLink", default)]
  pub external_link: Option<String>,
  #[serde(rename = "ResourceType")]
  pub resource_type: ResourceType,
  #[serde(rename = "Name")]
  pub name:          String,
  #[serde(rename = "CreatedAt")]
  pub created_at:    DateTime<Utc>,
}
