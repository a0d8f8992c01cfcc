//! Cookie record and the HTTP date format used by the `expires` attribute.
//!
//! ```rust
//! use time::macros::datetime;
//! use web_storage::cookies::{format_http_date, parse_http_date};
//!
//! let at = datetime!(1970-01-01 0:00:01 UTC);
//! assert_eq!(format_http_date(at), "Thu, 01 Jan 1970 00:00:01 GMT");
//! assert_eq!(parse_http_date("Thu, 01 Jan 1970 00:00:01 GMT"), Some(at));
//! ```

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// IMF-fixdate, e.g. `Thu, 01 Jan 1970 00:00:01 GMT`.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// A cookie as kept by [`InMemoryCookieJar`](super::InMemoryCookieJar).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name (case-sensitive). Empty for entries assigned without a `=`.
    pub name: String,

    /// Raw cookie value.
    pub value: String,

    /// Path attribute, if one was given.
    pub path: Option<String>,

    /// Absolute expiry. Session cookies have `None`.
    pub expires: Option<OffsetDateTime>,
}

impl Cookie {
    /// Returns `true` when the cookie has an expiry at or before `now`.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// The pair as it shows up in `document.cookie`.
    pub fn pair(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }
}

/// Formats `at` as an HTTP date in GMT.
pub fn format_http_date(at: OffsetDateTime) -> String {
    let at = at.to_offset(UtcOffset::UTC);
    match at.format(HTTP_DATE) {
        Ok(s) => s,
        // Only reachable for years outside 0..=9999; fall back to RFC 2822 which cookie parsers
        // also accept.
        Err(_) => at
            .format(&time::format_description::well_known::Rfc2822)
            .unwrap_or_default(),
    }
}

/// Parses an HTTP date. Returns `None` for anything else.
pub fn parse_http_date(s: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(s.trim(), HTTP_DATE)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
        .or_else(|| {
            OffsetDateTime::parse(s.trim(), &time::format_description::well_known::Rfc2822).ok()
        })
}
