//! Redirect target construction.
//!
//! The target always points back at the requesting path on the same host.
//! Protocol-relative input (`//host/...`) would let a browser resolve the
//! `Location` against an attacker-chosen host, so it collapses to `/`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single URI component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Builds the redirect target for `url` with the retry marker appended.
///
/// The existing query string is kept verbatim; the marker is added as a
/// bare token (no `=value`) after it. An empty query after `?` counts as no
/// query.
pub fn redirect_target(url: &str, param_name: &str) -> String {
    if is_protocol_relative(url) {
        return "/".to_string();
    }

    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let marker = encode_component(param_name);

    if query.is_empty() {
        format!("{path}?{marker}")
    } else {
        format!("{path}?{query}&{marker}")
    }
}

/// `//host` and `/\host` both resolve to another origin in browsers.
fn is_protocol_relative(url: &str) -> bool {
    url.starts_with("//") || url.starts_with("/\\")
}
