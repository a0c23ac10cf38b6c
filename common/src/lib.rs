//! # identr-common
//!
//! Shared vocabulary of the workspace: host descriptors, the identity
//! record, the error taxonomy, collaborator traits and diagnostics macros.

pub mod config;
pub mod credential;
pub mod error;
pub mod logging;
pub mod record;
pub mod sources;
pub mod target;

#[doc(hidden)]
pub use tracing as __tracing;
