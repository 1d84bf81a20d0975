//! Boundary adapter between the cookie support guard and the `http` crate's
//! request/response types.

pub mod request;
pub mod response;

pub use request::{view_from_parts, view_from_request};
pub use response::{render, respond, HttpResponseActions, Outcome};
