//! Domain types for the cookie support guard.

use crate::error::{GuardError, GuardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Names the guard works with. Built once at startup and shared read-only.
///
/// Accepts both `cookie-name`/`param-name` and the snake_case spellings
/// when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Name of the probe cookie set before redirecting.
    #[serde(alias = "cookie-name")]
    pub cookie_name: String,
    /// Query key appended to the redirect target to mark a retry.
    #[serde(alias = "param-name")]
    pub param_name: String,
}

impl GuardConfig {
    pub fn new(cookie_name: impl Into<String>, param_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            param_name: param_name.into(),
        }
    }

    /// Rejects empty names and cookie names that are not an HTTP token.
    pub fn validate(&self) -> GuardResult<()> {
        if self.cookie_name.trim().is_empty() {
            return Err(GuardError::InvalidConfig(
                "cookie-name must be a non-empty string".into(),
            ));
        }
        if let Some(c) = self.cookie_name.chars().find(|c| !is_token_char(*c)) {
            return Err(GuardError::InvalidConfig(format!(
                "cookie-name {:?} contains {c:?}, which is not allowed in a cookie name",
                self.cookie_name
            )));
        }
        if self.param_name.trim().is_empty() {
            return Err(GuardError::InvalidConfig(
                "param-name must be a non-empty string".into(),
            ));
        }
        Ok(())
    }
}

/// RFC 6265 cookie-name: visible ASCII minus separators.
fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}

// ---------------------------------------------------------------------------
// Request view
// ---------------------------------------------------------------------------

/// A query parameter value. A bare `?key` token is a [`QueryValue::Flag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Flag,
    Text(String),
}

/// Read-only snapshot of the parts of a request the guard looks at.
///
/// `cookies` is `None` when the request carried no cookie header at all,
/// which is treated the same as an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestView {
    pub cookies: Option<BTreeMap<String, String>>,
    pub query: BTreeMap<String, QueryValue>,
    pub path: String,
    /// Path plus the raw query string, exactly as received.
    pub url: String,
}

impl RequestView {
    /// View with `path` derived from the part of `url` before `?`.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let path = url.split('?').next().unwrap_or_default().to_string();
        Self {
            cookies: None,
            query: BTreeMap::new(),
            path,
            url,
        }
    }

    pub fn with_cookies(mut self, cookies: Option<BTreeMap<String, String>>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: QueryValue) -> Self {
        self.query.insert(key.into(), value);
        self
    }

    pub fn with_query_flag(self, key: impl Into<String>) -> Self {
        self.with_query(key, QueryValue::Flag)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// `true` when at least one cookie came back with the request.
    pub fn has_cookies(&self) -> bool {
        self.cookies.as_ref().map_or(false, |c| !c.is_empty())
    }

    /// Key membership only; the value is ignored.
    pub fn has_query_param(&self, name: &str) -> bool {
        self.query.contains_key(name)
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Machine-readable failure code handed to the surrounding error layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureCode {
    #[serde(rename = "NO_COOKIES")]
    NoCookies,
}

impl FailureCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::NoCookies => "NO_COOKIES",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one guard invocation. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    Proceed,
    /// Set the probe cookie, then redirect to `target`.
    Redirect { target: String },
    Fail { code: FailureCode },
}
