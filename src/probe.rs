//! Capability probes.
//!
//! Each probe answers "can this backend be used right now?" and never fails: anything that goes
//! wrong while probing simply means "no".
//!
//! The probes are not equally strict. The durable probe does a trial write, so storage that
//! exists but refuses writes (private browsing, a zero quota) is reported unsupported. The
//! session probe only checks that the substrate exists, so a session store that refuses writes
//! still counts as supported; its adapter then reports the failure on the first `set`.

use crate::config::StorageConfig;
use crate::cookies::DocumentCookie;
use crate::environment::Environment;
use crate::storage::{Backend, StorageArea};

/// What the probes found for each backend.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Capabilities {
    pub durable: bool,
    pub session: bool,
    pub cookie: bool,
}

impl Capabilities {
    /// Runs all three probes against `env`.
    ///
    /// The durable probe writes and removes `config.durable_probe_key`. When the cookie
    /// substrate has no enabled flag, the cookie probe leaves `config.cookie_probe_name` behind
    /// as a nameless cookie.
    pub fn probe(env: &Environment, config: &StorageConfig) -> Self {
        let caps = Self {
            durable: probe_durable(env.local().map(|a| &**a), &config.durable_probe_key),
            session: probe_session(env.session().map(|a| &**a)),
            cookie: probe_cookies(env.cookies().map(|c| &**c), &config.cookie_probe_name),
        };
        log::debug!("probed storage capabilities: {:?}", caps);
        caps
    }

    pub fn supports(&self, backend: Backend) -> bool {
        match backend {
            Backend::Durable => self.durable,
            Backend::Session => self.session,
            Backend::Cookie => self.cookie,
        }
    }
}

/// Supported when the area exists and a write plus delete of `probe_key` both succeed.
pub fn probe_durable(area: Option<&dyn StorageArea>, probe_key: &str) -> bool {
    let Some(area) = area else {
        return false;
    };

    let trial = area
        .set_item(probe_key, probe_key)
        .and_then(|_| area.remove_item(probe_key));

    match trial {
        Ok(()) => true,
        Err(e) => {
            log::debug!("durable storage present but not writable: {:#}", e);
            false
        }
    }
}

/// Supported when the area exists.
pub fn probe_session(area: Option<&dyn StorageArea>) -> bool {
    area.is_some()
}

/// Trusts the substrate's enabled flag if it has one, otherwise writes `probe_name` and checks
/// that it shows up in the cookie string.
pub fn probe_cookies(jar: Option<&dyn DocumentCookie>, probe_name: &str) -> bool {
    let Some(jar) = jar else {
        return false;
    };

    match jar.cookie_enabled() {
        Some(enabled) => enabled,
        None => {
            jar.set_cookie(probe_name);
            jar.cookie_string().contains(probe_name)
        }
    }
}
