//! Cookie support guard: decision logic, redirect construction, and the
//! continuation adapter used by hosting pipelines.

pub mod exempt;
pub mod guard;
pub mod redirect;

pub use guard::{CookieSupportGuard, ResponseActions, PROBE_COOKIE_VALUE};
pub use redirect::redirect_target;
