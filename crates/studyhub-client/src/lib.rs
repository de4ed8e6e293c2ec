//! HTTP client for the StudyHub backend.
//!
//! Three layers, bottom up:
//!
//! - [`vault`] — durable storage for the bearer credential and the cached
//!   identity, always cleared together.
//! - [`gateway`] — the single point of outbound HTTP: attaches the
//!   credential, strips the `{data}`/`{error}` envelope, normalizes legacy
//!   field names, and maps failures onto [`Error`]. An unauthorized reply
//!   clears the vault as a side effect; nothing else is allowed to do that.
//! - [`session`] — the authenticated-identity state machine
//!   (bootstrap/login/register/logout).
//!
//! Endpoint methods live in one module per API area (`auth`, `modules`,
//! `runs`, `terms`, `resources`, `users`) as `impl Gateway` blocks.

pub mod error;
pub mod gateway;
pub mod normalize;
pub mod session;
pub mod vault;

mod auth;
mod modules;
mod resources;
mod runs;
mod terms;
mod users;

pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use session::Session;
pub use vault::{FileVault, MemoryVault, Vault};
