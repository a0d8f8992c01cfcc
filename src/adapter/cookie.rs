use std::sync::Arc;

use serde_json::Value;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::adapter::{codec, StorageAdapter, WriteOutcome};
use crate::clock::Clock;
use crate::cookies::{format_http_date, DocumentCookieHandle};
use crate::diagnostics::{Diagnostic, DiagnosticSinkHandle};
use crate::storage::Backend;

/// Expiry that makes the browser drop a cookie right away.
const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Latest expiry that can be written as an HTTP date.
const FAR_FUTURE: OffsetDateTime = datetime!(9999-12-31 23:59:59 UTC);

/// Adapter over `document.cookie`.
///
/// Values are written as `key=<json>`. Nothing escapes `;` inside the JSON text, so values
/// whose encoding contains one do not read back intact.
pub struct CookieAdapter {
    jar: DocumentCookieHandle,
    clock: Arc<dyn Clock>,
    sink: DiagnosticSinkHandle,
}

impl CookieAdapter {
    pub fn new(jar: DocumentCookieHandle, clock: Arc<dyn Clock>, sink: DiagnosticSinkHandle) -> Self {
        Self { jar, clock, sink }
    }
}

impl StorageAdapter for CookieAdapter {
    fn backend(&self) -> Backend {
        Backend::Cookie
    }

    /// First cookie whose pair starts with `key=`, as written, without decoding.
    fn get_raw(&self, key: &str) -> Option<String> {
        let prefix = format!("{}=", key);
        self.jar
            .cookie_string()
            .split(';')
            .map(|c| c.trim_start_matches(' '))
            .find_map(|c| c.strip_prefix(prefix.as_str()).map(str::to_string))
    }

    fn set_with_expiry(&self, key: &str, value: &Value, expiry_days: Option<u32>) -> WriteOutcome {
        let encoded = match codec::encode(value) {
            Ok(s) => s,
            Err(e) => {
                self.sink.emit(Diagnostic::error(
                    Backend::Cookie,
                    format!("Item {} cannot be encoded: {}", key, e),
                ));
                return WriteOutcome::Rejected;
            }
        };

        let mut entry = format!("{}={}", key, encoded);
        if let Some(days) = expiry_days {
            let at = self
                .clock
                .now()
                .checked_add(Duration::days(i64::from(days)))
                .map_or(FAR_FUTURE, |at| at.min(FAR_FUTURE));
            entry.push_str("; expires=");
            entry.push_str(&format_http_date(at));
        }

        log::trace!("document.cookie = {}", entry);
        self.jar.set_cookie(&entry);
        WriteOutcome::Stored(Some(encoded))
    }

    fn remove(&self, key: &str) -> bool {
        self.jar.set_cookie(&format!("{}=; expires={};", key, EXPIRED));
        true
    }
}
