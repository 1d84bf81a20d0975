//! Builds a [`RequestView`] from `http` request types.
//!
//! Parsing is deliberately small: the guard only needs cookie names, query
//! keys, and the raw path + query.
//!   - `Cookie` headers are split into percent-decoded cookies. Pairs that do
//!     not parse are skipped, values have surrounding quotes removed, and the
//!     first occurrence of a name wins.
//!   - Query segments are form-url-decoded. A segment with no `=` is a flag.
//!
//! No `Cookie` header at all yields `cookies: None`.

use cookie::Cookie;
use cookieguard_core::{GuardError, GuardResult, QueryValue, RequestView};
use http::header::COOKIE;
use http::request::Parts;
use http::{HeaderMap, Request};
use std::collections::BTreeMap;
use url::form_urlencoded;

pub fn view_from_request<B>(request: &Request<B>) -> GuardResult<RequestView> {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .ok_or_else(|| GuardError::InvalidRequest(format!("no path in {}", request.uri())))?;
    Ok(build_view(path_and_query, request.headers()))
}

pub fn view_from_parts(parts: &Parts) -> GuardResult<RequestView> {
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .ok_or_else(|| GuardError::InvalidRequest(format!("no path in {}", parts.uri)))?;
    Ok(build_view(path_and_query, &parts.headers))
}

fn build_view(path_and_query: &str, headers: &HeaderMap) -> RequestView {
    let mut view = RequestView::new(path_and_query).with_cookies(parse_cookies(headers));
    if let Some((_, raw)) = path_and_query.split_once('?') {
        view.query = parse_query(raw);
    }
    view
}

pub fn parse_cookies(headers: &HeaderMap) -> Option<BTreeMap<String, String>> {
    let mut values = headers.get_all(COOKIE).iter().peekable();
    values.peek()?;

    let mut cookies = BTreeMap::new();
    for value in values {
        let Ok(header) = value.to_str() else {
            tracing::debug!("skipping non-UTF-8 Cookie header");
            continue;
        };
        for cookie in Cookie::split_parse_encoded(header).flatten() {
            cookies
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value_trimmed().to_string());
        }
    }
    Some(cookies)
}

pub fn parse_query(raw: &str) -> BTreeMap<String, QueryValue> {
    let mut query = BTreeMap::new();
    for segment in raw.split('&').filter(|s| !s.is_empty()) {
        let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() else {
            continue;
        };
        let value = if segment.contains('=') {
            QueryValue::Text(value.into_owned())
        } else {
            QueryValue::Flag
        };
        query.entry(key.into_owned()).or_insert(value);
    }
    query
}
