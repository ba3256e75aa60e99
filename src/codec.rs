//! Cookie string codec
//!
//! Serializes cookie attributes into the write-string a cookie store consumes
//! (`name=value; expires=...; path=...`) and parses the store's concatenated
//! read-string (`a=1; b=2`) back into entries.

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::options::{CookieOptions, Expires};

/// Value of a parsed cookie
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CookieValue {
    Text(String),
    Json(serde_json::Value),
}

impl CookieValue {
    /// The decoded text, if the value was not parsed as JSON.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CookieValue::Text(text) => Some(text),
            CookieValue::Json(_) => None,
        }
    }
}

impl std::fmt::Display for CookieValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookieValue::Text(text) => write!(f, "{}", text),
            CookieValue::Json(value) => write!(f, "{}", value),
        }
    }
}

/// One `name=value` segment of a cookie string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookieEntry {
    pub name: String,
    pub value: CookieValue,
}

/// Build the string written to the cookie store.
///
/// `name` and `value` are interpolated without escaping.
pub fn serialize(name: &str, value: &str, options: Option<&CookieOptions>) -> String {
    let mut cookie = format!("{}={}", name, value);

    let Some(options) = options else {
        return cookie;
    };

    if let Some(expires) = &options.expires {
        cookie.push_str("; expires=");
        cookie.push_str(&expires.to_http_date());
    }

    if let Some(domain) = options.domain.as_deref().filter(|d| !d.is_empty()) {
        cookie.push_str("; domain=");
        cookie.push_str(domain);
    }

    if let Some(path) = options.path.as_deref().filter(|p| !p.is_empty()) {
        cookie.push_str("; path=");
        cookie.push_str(path);
    }

    if options.secure {
        cookie.push_str("; secure");
    }

    if options.http_only {
        cookie.push_str("; HttpOnly");
    }

    if let Some(same_site) = options.same_site {
        cookie.push_str("; SameSite=");
        cookie.push_str(&same_site.to_string());
    }

    cookie
}

/// The write-string that evicts `name` from the default scope.
pub fn deletion_string(name: &str) -> String {
    deletion_string_scoped(name, None)
}

/// The write-string that evicts `name`, carrying the domain/path of `scope`.
pub fn deletion_string_scoped(name: &str, scope: Option<&CookieOptions>) -> String {
    let options = CookieOptions {
        expires: Some(Expires::epoch()),
        ..scope
            .map(|s| CookieOptions::scoped(s.domain.clone(), s.path.clone()))
            .unwrap_or_default()
    };
    serialize(name, "0", Some(&options))
}

/// Split a cookie store read-string into entries, in order of appearance.
///
/// Values are percent-decoded, and replaced by their JSON parse when
/// `parse_values` is set and the decoded text is valid JSON.
pub fn deserialize(raw: &str, parse_values: bool) -> Vec<CookieEntry> {
    segments(raw)
        .map(|(name, value)| CookieEntry {
            name: name.to_string(),
            value: decode_value(value, parse_values),
        })
        .collect()
}

/// Raw `(name, value)` pairs of a read-string, values left encoded.
///
/// Segments are split on `;` with leading whitespace trimmed, so both
/// `a=1;b=2` and `a=1; b=2` parse the same. Only the first `=` separates
/// name from value; a segment without `=` is a name with an empty value.
pub fn segments(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split(';')
        .map(str::trim_start)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
}

/// First entry called `name`, if any.
pub fn find_by_name(raw: &str, name: &str, parse_values: bool) -> Option<CookieEntry> {
    deserialize(raw, parse_values)
        .into_iter()
        .find(|entry| entry.name == name)
}

/// Percent-decode a value and, if asked, replace it with its JSON parse.
pub fn decode_value(value: &str, parse_values: bool) -> CookieValue {
    let decoded = if value.contains('%') {
        percent_decode_str(value).decode_utf8_lossy().into_owned()
    } else {
        value.to_string()
    };

    if parse_values {
        if let Some(json) = try_parse_json(&decoded) {
            return CookieValue::Json(json);
        }
    }

    CookieValue::Text(decoded)
}

/// JSON parse that reports failure as `None`.
pub fn try_parse_json(value: &str) -> Option<serde_json::Value> {
    match serde_json::from_str(value) {
        Ok(json) => Some(json),
        Err(err) => {
            log::trace!("Cookie value is not JSON: {}", err);
            None
        }
    }
}
