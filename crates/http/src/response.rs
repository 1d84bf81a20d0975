//! Renders guard outcomes as `http` responses.

use crate::request::view_from_parts;
use cookie::Cookie;
use cookieguard_core::{Decision, GuardError, GuardResult};
use cookieguard_guard::{CookieSupportGuard, ResponseActions};
use http::header::{LOCATION, SET_COOKIE};
use http::request::Parts;
use http::{Response, StatusCode};

/// Collects the guard's response instructions.
#[derive(Debug, Default, Clone)]
pub struct HttpResponseActions {
    set_cookies: Vec<Cookie<'static>>,
    location: Option<String>,
}

impl ResponseActions for HttpResponseActions {
    fn set_cookie(&mut self, name: &str, value: &str) {
        let cookie = Cookie::build((name.to_owned(), value.to_owned()))
            .path("/")
            .build();
        self.set_cookies.push(cookie);
    }

    fn redirect(&mut self, target: &str) {
        self.location = Some(target.to_string());
    }
}

impl HttpResponseActions {
    /// `302 Found` with every collected `Set-Cookie`, or `None` when no
    /// redirect was issued.
    pub fn into_response(self) -> GuardResult<Option<Response<()>>> {
        let Some(location) = self.location else {
            return Ok(None);
        };
        let mut builder = Response::builder()
            .status(StatusCode::FOUND)
            .header(LOCATION, location);
        for cookie in self.set_cookies {
            builder = builder.header(SET_COOKIE, cookie.encoded().to_string());
        }
        builder
            .body(())
            .map(Some)
            .map_err(|e| GuardError::InvalidRequest(e.to_string()))
    }
}

/// What the hosting server should do with the request.
#[derive(Debug)]
pub enum Outcome {
    /// Hand the request to the next handler.
    Continue,
    /// Send this response instead.
    Respond(Response<()>),
}

/// Runs the guard against an inbound request.
///
/// `NO_COOKIES` is returned as `Err(GuardError::NoCookies)` so the
/// surrounding error layer decides how to present it.
pub fn respond(guard: &CookieSupportGuard, parts: &Parts) -> GuardResult<Outcome> {
    let view = view_from_parts(parts)?;
    render(guard, guard.decide(&view))
}

/// Turns an already-made decision into an [`Outcome`].
pub fn render(guard: &CookieSupportGuard, decision: Decision) -> GuardResult<Outcome> {
    let mut actions = HttpResponseActions::default();
    let mut proceeded = None;
    guard.apply(decision, &mut actions, |result| proceeded = Some(result));

    if let Some(result) = proceeded {
        result?;
        return Ok(Outcome::Continue);
    }

    match actions.into_response()? {
        Some(response) => {
            tracing::debug!(status = %response.status(), "guard responded");
            Ok(Outcome::Respond(response))
        }
        None => Err(GuardError::InvalidRequest(
            "guard neither proceeded nor redirected".into(),
        )),
    }
}
