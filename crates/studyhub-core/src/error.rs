//! Error types for `studyhub-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown semester: {0:?}")]
  UnknownSemester(String),

  #[error("unknown resource type: {0:?}")]
  UnknownResourceType(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
