//! Shared types for the StudyHub client.
//!
//! This crate holds the read-model shapes returned by the StudyHub backend
//! and the request bodies the client sends to it. It is deliberately free of
//! HTTP dependencies; the `studyhub-client` crate owns all transport.
//!
//! Field names on the wire follow the backend's JSON (`ID`, `ModuleID`,
//! `FirstName`, …); request bodies are snake_case, matching what the backend
//! decodes.

pub mod error;
pub mod module;
pub mod request;
pub mod resource;
pub mod term;
pub mod user;

pub use error::{Error, Result};
pub use module::{Module, ModulePage, ModuleRun, ModuleRunPage, Semester, Week};
pub use request::{
  Created, DownloadUrl, LoginRequest, NewAcademicTerm, NewLink, NewModule,
  NewModuleRun, NewUser, TokenResponse,
};
pub use resource::{Resource, ResourceType, UserResource};
pub use term::AcademicTerm;
pub use user::User;
