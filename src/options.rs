//! Cookie write attributes
//!
//! The attribute bag accepted by [`crate::codec::serialize`]. Nothing here is
//! validated: values are handed to the cookie store exactly as given.

use std::fmt;
use std::str::FromStr;

use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{CookieError, Result};

/// SameSite attribute values, rendered with their canonical casing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for SameSite {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(()),
        }
    }
}

/// Expiry of a cookie, either a point in time or a caller-supplied date string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expires {
    At(OffsetDateTime),
    /// ISO-8601, RFC 2822 or HTTP-date text. Anything else is emitted verbatim.
    Text(String),
}

impl Expires {
    /// The epoch-zero expiry used to evict cookies.
    pub fn epoch() -> Self {
        Expires::At(OffsetDateTime::UNIX_EPOCH)
    }

    /// Render as an RFC 1123 HTTP date, e.g. `Thu, 01 Jan 1970 00:00:00 GMT`.
    pub fn to_http_date(&self) -> String {
        match self {
            Expires::At(at) => format_http_date(*at).unwrap_or_else(|err| {
                log::warn!("Cannot format expiry {}: {}", at, err);
                at.to_string()
            }),
            Expires::Text(text) => match parse_date(text) {
                Ok(at) => Expires::At(at).to_http_date(),
                Err(_) => {
                    log::debug!("Passing unrecognised expiry through verbatim: {}", text);
                    text.clone()
                }
            },
        }
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(at: OffsetDateTime) -> Self {
        Expires::At(at)
    }
}

impl From<&str> for Expires {
    fn from(text: &str) -> Self {
        Expires::Text(text.to_string())
    }
}

/// Optional attributes appended after `name=value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires: Option<Expires>,
    pub domain: Option<String>,
    pub path: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    /// Options carrying only a domain/path scope.
    pub fn scoped(domain: Option<String>, path: Option<String>) -> Self {
        CookieOptions {
            domain,
            path,
            ..Default::default()
        }
    }
}

/// Format a timestamp as an HTTP date in GMT.
pub fn format_http_date(at: OffsetDateTime) -> Result<String> {
    at.to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ))
        .map_err(|e| CookieError::InvalidDate(format!("{}: {}", at, e)))
}

/// Parse the date notations accepted for expiry: RFC 3339, a bare
/// `YYYY-MM-DD` (midnight UTC), an HTTP date or RFC 2822.
pub fn parse_date(input: &str) -> Result<OffsetDateTime> {
    let input = input.trim();

    if let Ok(at) = OffsetDateTime::parse(input, &Rfc3339) {
        return Ok(at);
    }

    if let Ok(date) = Date::parse(input, format_description!("[year]-[month]-[day]")) {
        return Ok(date.midnight().assume_utc());
    }

    if let Ok(at) = PrimitiveDateTime::parse(
        input,
        format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        ),
    ) {
        return Ok(at.assume_utc());
    }

    OffsetDateTime::parse(input, &Rfc2822)
        .map_err(|e| CookieError::InvalidDate(format!("'{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::{format_http_date, parse_date, CookieOptions, Expires, SameSite};
    use crate::error::CookieError;
    use time::macros::datetime;

    #[test]
    fn same_site_parses_case_insensitive() {
        assert_eq!("strict".parse::<SameSite>(), Ok(SameSite::Strict));
        assert_eq!("LAX".parse::<SameSite>(), Ok(SameSite::Lax));
        assert_eq!("None".parse::<SameSite>(), Ok(SameSite::None));
        assert!("sometimes".parse::<SameSite>().is_err());
    }

    #[test]
    fn same_site_displays_canonical_casing() {
        assert_eq!(SameSite::Strict.to_string(), "Strict");
        assert_eq!(SameSite::Lax.to_string(), "Lax");
        assert_eq!(SameSite::None.to_string(), "None");
    }

    #[test]
    fn epoch_renders_as_http_date() {
        assert_eq!(Expires::epoch().to_http_date(), "Thu, 01 Jan 1970 00:00:00 GMT");
    }

    #[test]
    fn http_date_is_rendered_in_gmt() {
        let at = datetime!(2024-03-05 10:30:00 +02:00);
        assert_eq!(
            format_http_date(at).expect("formatted"),
            "Tue, 05 Mar 2024 08:30:00 GMT"
        );
    }

    #[test]
    fn text_expiry_accepts_iso_strings() {
        let expires = Expires::from("2024-03-05T08:30:00Z");
        assert_eq!(expires.to_http_date(), "Tue, 05 Mar 2024 08:30:00 GMT");

        let expires = Expires::from("2024-03-05");
        assert_eq!(expires.to_http_date(), "Tue, 05 Mar 2024 00:00:00 GMT");
    }

    #[test]
    fn text_expiry_passes_garbage_through() {
        let expires = Expires::from("next tuesday");
        assert_eq!(expires.to_http_date(), "next tuesday");
    }

    #[test]
    fn parse_date_reads_http_dates() {
        let at = parse_date("Thu, 01 Jan 1970 00:00:00 GMT").expect("http date");
        assert_eq!(at.unix_timestamp(), 0);

        let err = parse_date("yesterday").expect_err("invalid");
        assert!(matches!(err, CookieError::InvalidDate(_)));
    }

    #[test]
    fn scoped_sets_only_domain_and_path() {
        let options = CookieOptions::scoped(Some("example.com".into()), Some("/app".into()));
        assert_eq!(options.domain.as_deref(), Some("example.com"));
        assert_eq!(options.path.as_deref(), Some("/app"));
        assert!(options.expires.is_none());
        assert!(!options.secure);
    }
}
