//! Cookies: the [`DocumentCookie`] substrate and an in-memory implementation.
//!
//! Scripts only see cookies through `document.cookie`: reading it yields every visible cookie as
//! `name=value` pairs joined by `"; "`, and assigning to it adds, replaces, or (with an expiry in
//! the past) deletes a single cookie. [`DocumentCookie`] captures exactly that surface plus the
//! optional `navigator.cookieEnabled` flag.

mod cookies;
mod cookie_jar;

pub use cookies::{format_http_date, parse_http_date, Cookie};
pub use cookie_jar::{DocumentCookie, DocumentCookieHandle, InMemoryCookieJar};
