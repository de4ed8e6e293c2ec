//! Modules, their per-term runs, and the composite page aggregates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Half of the academic year a run or term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
  Spring,
  Fall,
}

impl Semester {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Spring => "spring",
      Self::Fall => "fall",
    }
  }
}

impl std::fmt::Display for Semester {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Semester {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "spring" => Ok(Self::Spring),
      "fall" => Ok(Self::Fall),
      other => Err(Error::UnknownSemester(other.to_owned())),
    }
  }
}

/// A course module, independent of any particular term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
  #[serde(rename = "ID")]
  pub id:              Uuid,
  #[serde(rename = "Code")]
  pub code:            String,
  #[serde(rename = "Name")]
  pub name:            String,
  #[serde(rename = "Description", default)]
  pub description:     String,
  #[serde(rename = "DepartmentName")]
  pub department_name: String,
  #[serde(rename = "CreatedAt")]
  pub created_at:      DateTime<Utc>,
  #[serde(rename = "UpdatedAt")]
  pub updated_at:      DateTime<Utc>,
}

/// One offering of a module in a specific year/semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRun {
  #[serde(rename = "ID")]
  pub id:         Uuid,
  #[serde(rename = "ModuleID")]
  pub module_id:  Uuid,
  #[serde(rename = "Year")]
  pub year:       i32,
  #[serde(rename = "Semester")]
  pub semester:   Semester,
  /// Planned number of weeks for the run.
  #[serde(rename = "Weeks", default)]
  pub weeks:      i32,
  #[serde(rename = "IsActive")]
  pub is_active:  bool,
  #[serde(rename = "CreatedAt")]
  pub created_at: DateTime<Utc>,
}

/// One week of teaching within a module run, ordered by `number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
  #[serde(rename = "ID")]
  pub id:            Uuid,
  #[serde(rename = "ModuleRunID")]
  pub module_run_id: Uuid,
  #[serde(rename = "Number")]
  pub number:        i32,
  #[serde(rename = "Topic", default)]
  pub topic:         String,
}

/// `GET /modules/{id}` — the module, its active run (if any), and that run's
/// weeks.
///
/// The backend serializes a zero-value run when the module has no active run;
/// that decodes to `run: None` here so callers branch on absence instead of
/// rendering a run that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePage {
  #[serde(rename = "Module")]
  pub module: Module,
  #[serde(rename = "Run", default, deserialize_with = "absent_as_none")]
  pub run:    Option<ModuleRun>,
  #[serde(rename = "Weeks", default, deserialize_with = "null_as_empty")]
  pub weeks:  Vec<Week>,
}

/// `GET /module-runs/{id}` — a run together with its weeks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRunPage {
  #[serde(rename = "Run")]
  pub run:   ModuleRun,
  #[serde(rename = "Weeks", default, deserialize_with = "null_as_empty")]
  pub weeks: Vec<Week>,
}

/// Treat a missing, null, or zero-value (nil-ID) run as absent.
fn absent_as_none<'de, D>(de: D) -> Result<Option<ModuleRun>, D::Error>
where
  D: Deserializer<'de>,
{
  let run = Option::<ModuleRun>::deserialize(de)?;
  Ok(run.filter(|r| !r.id.is_nil()))
}

/// Go encodes a nil slice as JSON `null`; decode that as an empty list.
fn null_as_empty<'de, D>(de: D) -> Result<Vec<Week>, D::Error>
where
  D: Deserializer<'de>,
{
  let weeks = Option::<Vec<Week>>::deserialize(de)?;
  Ok(weeks.unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn module_page_with_active_run() {
    let page: ModulePage = serde_json::from_value(serde_json::json!({
      "Module": {
        "ID": "3f2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c11",
        "Code": "CS101",
        "Name": "Intro to Computing",
        "DepartmentName": "Computer Science",
        "CreatedAt": "2024-09-01T00:00:00Z",
        "UpdatedAt": "2024-09-01T00:00:00Z"
      },
      "Run": {
        "ID": "7c8a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c22",
        "ModuleID": "3f2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c11",
        "Year": 2025,
        "Semester": "fall",
        "Weeks": 12,
        "IsActive": true,
        "CreatedAt": "2025-08-01T00:00:00Z"
      },
      "Weeks": [
        {
          "ID": "aa8a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c33",
          "ModuleRunID": "7c8a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c22",
          "Number": 1,
          "Topic": "Foundations"
        }
      ]
    }))
    .unwrap();

    let run = page.run.expect("active run");
    assert_eq!(run.semester, Semester::Fall);
    assert_eq!(page.weeks.len(), 1);
    assert_eq!(page.weeks[0].number, 1);
  }

  #[test]
  fn module_page_zero_value_run_is_absent() {
    // What the backend sends for a module with no active run: a zero-value
    // run struct and a null weeks slice.
    let page: ModulePage = serde_json::from_value(serde_json::json!({
      "Module": {
        "ID": "3f2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c11",
        "Code": "CS101",
        "Name": "Intro to Computing",
        "DepartmentName": "Computer Science",
        "CreatedAt": "2024-09-01T00:00:00Z",
        "UpdatedAt": "2024-09-01T00:00:00Z"
      },
      "Run": {
        "ID": "00000000-0000-0000-0000-000000000000",
        "ModuleID": "00000000-0000-0000-0000-000000000000",
        "Year": 0,
        "Semester": "spring",
        "Weeks": 0,
        "IsActive": false,
        "CreatedAt": "0001-01-01T00:00:00Z"
      },
      "Weeks": null
    }))
    .unwrap();

    assert!(page.run.is_none());
    assert!(page.weeks.is_empty());
  }

  #[test]
  fn module_page_missing_run_field_is_absent() {
    let page: ModulePage = serde_json::from_value(serde_json::json!({
      "Module": {
        "ID": "3f2a44f0-9cf1-4a0d-a7a4-2f9a3a1b0c11",
        "Code": "CS101",
        "Name": "Intro to Computing",
        "DepartmentName": "Computer Science",
        "CreatedAt": "2024-09-01T00:00:00Z",
        "UpdatedAt": "2024-09-01T00:00:00Z"
      }
    }))
    .unwrap();

    assert!(page.run.is_none());
    assert!(page.weeks.is_empty());
  }

  #[test]
  fn semester_round_trips_lowercase() {
    assert_eq!(
      serde_json::to_string(&Semester::Spring).unwrap(),
      "\"spring\""
    );
    assert_eq!("fall".parse::<Semester>().unwrap(), Semester::Fall);
    assert!("summer".parse::<Semester>().is_err());
  }
}
