//! Shared HTTP utilities for request extraction and log redaction.
//!
//! The engine never sees raw headers; these helpers turn the transport's
//! `Cookie` headers into the single session cookie value, and keep ticket
//! identifiers out of log output.

use http::header::COOKIE;
use http::HeaderMap;

/// Placeholder written in place of redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Find a cookie value by name across every `Cookie` header.
///
/// Cookie pairs are separated by `;`. Names are matched exactly
/// (case-sensitive) after trimming surrounding whitespace, and the first
/// matching pair wins. Surrounding double quotes on the value are removed.
/// Header values that are not visible ASCII are skipped.
///
/// # Arguments
///
/// * `headers` - Request headers
/// * `name` - Cookie name to look for
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key.trim() != name {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some(value.to_string())
        })
}

/// Redact the `ticket` query parameter from a redirect target.
///
/// Only the parameter value is replaced so the target service stays visible
/// in logs.
///
/// # Example
///
/// ```
/// use cas_login::shared::http_utils::redact_ticket;
///
/// assert_eq!(
///     redact_ticket("http://example.com/app?a=1&ticket=ST-123#top"),
///     "http://example.com/app?a=1&ticket=[REDACTED]#top"
/// );
/// ```
pub fn redact_ticket(url: &str) -> String {
    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    let Some((path, query)) = base.split_once('?') else {
        return url.to_string();
    };

    let query = query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some(("ticket", _)) => format!("ticket={}", REDACTED),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}{}", path, query, fragment)
}
