//! Cookie support detection.
//!
//! Decision order per request:
//!   1. Any cookie returned (the probe cookie included) -> proceed.
//!   2. No cookie, no retry marker -> set probe cookie and redirect to self.
//!   3. No cookie, marker present -> proceed on exempt paths, else `NO_COOKIES`.
//!
//! Nothing is retained between invocations; the retry is the client
//! following the redirect.

use crate::exempt::is_exempt;
use crate::redirect::redirect_target;
use cookieguard_core::{Decision, FailureCode, GuardConfig, GuardError, GuardResult, RequestView};

/// Value of the probe cookie. Only its existence is checked.
pub const PROBE_COOKIE_VALUE: &str = "1";

/// Response instructions issued by the guard when it redirects.
///
/// Implemented by the hosting pipeline; the guard performs no I/O itself.
pub trait ResponseActions {
    fn set_cookie(&mut self, name: &str, value: &str);
    fn redirect(&mut self, target: &str);
}

/// Verifies that a client persists cookies before it enters a
/// session-dependent flow.
#[derive(Debug, Clone)]
pub struct CookieSupportGuard {
    config: GuardConfig,
}

impl CookieSupportGuard {
    /// Validates `config`; an invalid configuration never yields a guard.
    pub fn new(config: GuardConfig) -> GuardResult<Self> {
        config.validate()?;
        tracing::debug!(
            cookie_name = %config.cookie_name,
            param_name = %config.param_name,
            "cookie support guard installed"
        );
        Ok(Self { config })
    }

    /// Pure decision for one request.
    pub fn decide(&self, request: &RequestView) -> Decision {
        // The probe cookie is one of these; any cookie shows the client keeps them.
        if request.has_cookies() {
            tracing::debug!(path = %request.path, "cookies present");
            return Decision::Proceed;
        }

        if !request.has_query_param(&self.config.param_name) {
            let target = redirect_target(&request.url, &self.config.param_name);
            tracing::debug!(path = %request.path, target = %target, "probing cookie support");
            return Decision::Redirect { target };
        }

        if is_exempt(&request.path) {
            tracing::info!(path = %request.path, "no cookies on exempt path, bypassing");
            return Decision::Proceed;
        }

        tracing::warn!(path = %request.path, "client did not return probe cookie");
        Decision::Fail {
            code: FailureCode::NoCookies,
        }
    }

    /// Runs [`decide`](Self::decide) and hands the outcome to [`apply`](Self::apply).
    pub fn handle<R, F>(&self, request: &RequestView, response: &mut R, proceed: F)
    where
        R: ResponseActions + ?Sized,
        F: FnOnce(GuardResult<()>),
    {
        self.apply(self.decide(request), response, proceed);
    }

    /// Translates a decision into calls on the pipeline's response and
    /// continuation.
    ///
    /// Exactly one of these happens:
    /// - `proceed(Ok(()))`
    /// - `proceed(Err(GuardError::NoCookies))`
    /// - `response.set_cookie(..)` followed by `response.redirect(..)`
    pub fn apply<R, F>(&self, decision: Decision, response: &mut R, proceed: F)
    where
        R: ResponseActions + ?Sized,
        F: FnOnce(GuardResult<()>),
    {
        match decision {
            Decision::Proceed => proceed(Ok(())),
            Decision::Redirect { target } => {
                response.set_cookie(&self.config.cookie_name, PROBE_COOKIE_VALUE);
                response.redirect(&target);
            }
            Decision::Fail { code } => proceed(Err(GuardError::from(code))),
        }
    }
}
