//! Domain models, shared types, and error definitions.
//!
//! Foundation crate -- no I/O dependencies.

pub mod error;
pub mod types;

pub use error::{GuardError, GuardResult};
pub use types::{Decision, FailureCode, GuardConfig, QueryValue, RequestView};
