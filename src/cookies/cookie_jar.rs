//! The `document.cookie` substrate and an in-memory implementation of it.
//!
//! [`InMemoryCookieJar`] follows the parts of the browser behaviour that scripts can observe:
//!
//! - Assigning `name=value[; attr...]` adds the cookie, or replaces the one with the same name
//!   and path.
//! - `expires=<http date>` and `max-age=<seconds>` set an absolute expiry (`max-age` wins when
//!   both are present). An expiry at or before "now" deletes the cookie instead.
//! - An assignment without `=` creates a cookie with an empty name; it is read back as the bare
//!   value.
//! - Reading skips (and forgets) expired cookies and joins the rest with `"; "`.
//!
//! `Domain`, `Secure`, `SameSite` and friends are accepted and ignored; there is only one
//! document here. Size limits are not enforced.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use time::{Duration, OffsetDateTime};

use crate::clock::{Clock, SystemClock};
use crate::cookies::cookies::{parse_http_date, Cookie};

/// Script-visible cookie surface of a document.
pub trait DocumentCookie: Send + Sync {
    /// The current value of `document.cookie`.
    fn cookie_string(&self) -> String;

    /// Assigns one entry to `document.cookie`.
    fn set_cookie(&self, entry: &str);

    /// `navigator.cookieEnabled`, or `None` when the host does not expose the flag.
    fn cookie_enabled(&self) -> Option<bool> {
        None
    }
}

/// A shared handle to a cookie substrate.
pub type DocumentCookieHandle = Arc<dyn DocumentCookie>;

/// In-memory `document.cookie`.
pub struct InMemoryCookieJar {
    cookies: Mutex<Vec<Cookie>>,
    enabled_flag: Option<bool>,
    /// When set, assignments are silently dropped, as a browser does with cookies turned off.
    blocked: bool,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryCookieJar {
    fn default() -> Self {
        Self {
            cookies: Mutex::new(Vec::new()),
            enabled_flag: None,
            blocked: false,
            clock: Arc::new(SystemClock),
        }
    }
}

impl InMemoryCookieJar {
    /// Creates an empty jar that accepts cookies and exposes no `cookieEnabled` flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what [`DocumentCookie::cookie_enabled`] reports.
    pub fn with_enabled_flag(mut self, flag: Option<bool>) -> Self {
        self.enabled_flag = flag;
        self
    }

    /// Makes the jar drop every assignment.
    pub fn blocking(mut self) -> Self {
        self.blocked = true;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Snapshot of the cookies that are still alive.
    pub fn cookies(&self) -> Vec<Cookie> {
        let now = self.clock.now();
        let mut cookies = self.lock();
        cookies.retain(|c| !c.is_expired(now));
        cookies.clone()
    }

    /// Returns the live cookie called `name`, if any.
    pub fn find(&self, name: &str) -> Option<Cookie> {
        self.cookies().into_iter().find(|c| c.name == name)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Cookie>> {
        self.cookies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn parse_entry(&self, entry: &str) -> Cookie {
        let mut parts = entry.split(';');
        let pair = parts.next().unwrap_or_default().trim();

        let (name, value) = match pair.split_once('=') {
            Some((n, v)) => (n.trim().to_string(), v.trim().to_string()),
            None => (String::new(), pair.to_string()),
        };

        let mut cookie = Cookie { name, value, path: None, expires: None };
        let mut max_age: Option<i64> = None;

        for attr in parts {
            let Some((k, v)) = attr.trim().split_once('=') else {
                continue;
            };
            match k.trim().to_ascii_lowercase().as_str() {
                "expires" => {
                    if let Some(at) = parse_http_date(v) {
                        cookie.expires = Some(at);
                    } else {
                        log::debug!("ignoring unparsable expires attribute: {}", v);
                    }
                }
                "max-age" => max_age = v.trim().parse().ok(),
                "path" => cookie.path = Some(v.trim().to_string()),
                _ => {}
            }
        }

        if let Some(secs) = max_age {
            // out-of-range max-age keeps whatever expires said
            if let Some(at) = self.clock.now().checked_add(Duration::seconds(secs)) {
                cookie.expires = Some(at);
            }
        }

        cookie
    }
}

impl DocumentCookie for InMemoryCookieJar {
    fn cookie_string(&self) -> String {
        self.cookies()
            .iter()
            .map(Cookie::pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&self, entry: &str) {
        if self.blocked {
            log::trace!("cookie jar is blocking, dropped: {}", entry);
            return;
        }

        let cookie = self.parse_entry(entry);
        let now: OffsetDateTime = self.clock.now();
        let mut cookies = self.lock();

        let existing = cookies
            .iter()
            .position(|c| c.name == cookie.name && c.path == cookie.path);

        if cookie.is_expired(now) {
            if let Some(idx) = existing {
                cookies.remove(idx);
            }
            return;
        }

        match existing {
            Some(idx) => cookies[idx] = cookie,
            None => cookies.push(cookie),
        }
    }

    fn cookie_enabled(&self) -> Option<bool> {
        self.enabled_flag
    }
}
