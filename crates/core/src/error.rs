//! Centralized error types for the cookieguard workspace.

use crate::types::FailureCode;
use thiserror::Error;

/// Top-level error enum. Variants map to where the failure happens:
/// construction, per-request decision, or the HTTP boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GuardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The client did not return the probe cookie after a full redirect round trip.
    #[error("Client did not persist cookies ({})", FailureCode::NoCookies)]
    NoCookies,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GuardError {
    /// Machine-readable code for per-request failures.
    ///
    /// Only [`GuardError::NoCookies`] carries one; configuration and boundary
    /// errors never reach the surrounding error-handling layer as request codes.
    pub fn code(&self) -> Option<FailureCode> {
        match self {
            GuardError::NoCookies => Some(FailureCode::NoCookies),
            _ => None,
        }
    }
}

impl From<FailureCode> for GuardError {
    fn from(code: FailureCode) -> Self {
        match code {
            FailureCode::NoCookies => GuardError::NoCookies,
        }
    }
}

pub type GuardResult<T> = Result<T, GuardError>;
