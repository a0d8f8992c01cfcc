//! Adapter selection.
//!
//! The factory probes every backend, then walks them in priority order (durable, session,
//! cookie) and binds an adapter to the first one that is both admitted by the preference and
//! supported. Probing happens on every call; nothing is cached between calls.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use web_storage::environment::Environment;
//! use web_storage::factory::StorageFactory;
//! use web_storage::storage::{Backend, Preference};
//!
//! let factory = StorageFactory::new(Environment::in_memory());
//!
//! let storage = factory.create(Preference::Any).expect("in-memory host supports everything");
//! assert_eq!(storage.backend(), Backend::Durable);
//!
//! storage.set("visits", &json!(3));
//! assert_eq!(storage.get("visits").unwrap(), Some(json!(3)));
//!
//! let cookies = factory.create(Preference::Only(Backend::Cookie)).unwrap();
//! assert_eq!(cookies.backend(), Backend::Cookie);
//! ```

use std::sync::Arc;

use crate::adapter::{AreaAdapter, CookieAdapter, StorageAdapter};
use crate::config::StorageConfig;
use crate::diagnostics::{DiagnosticSinkHandle, LogSink};
use crate::environment::Environment;
use crate::probe::Capabilities;
use crate::storage::{Backend, Preference};

pub struct StorageFactory {
    env: Environment,
    config: StorageConfig,
    sink: DiagnosticSinkHandle,
}

impl StorageFactory {
    /// Factory with the default configuration, reporting diagnostics through `log`.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            config: StorageConfig::default(),
            sink: Arc::new(LogSink),
        }
    }

    pub fn with_config(mut self, config: StorageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(mut self, sink: DiagnosticSinkHandle) -> Self {
        self.sink = sink;
        self
    }

    /// Runs the probes against the environment.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::probe(&self.env, &self.config)
    }

    /// Returns an adapter for the first supported backend that `preference` admits, or `None`
    /// when there is none.
    pub fn create(&self, preference: Preference) -> Option<Box<dyn StorageAdapter>> {
        let caps = self.capabilities();
        let Some(backend) = select_backend(preference, &caps) else {
            log::info!("no usable storage backend for {:?} (capabilities: {:?})", preference, caps);
            return None;
        };

        log::debug!("selected {} for {:?}", backend, preference);
        self.bind(backend)
    }

    fn bind(&self, backend: Backend) -> Option<Box<dyn StorageAdapter>> {
        let guard = self.config.size_guard.clone();
        let sink = self.sink.clone();

        let adapter: Box<dyn StorageAdapter> = match backend {
            Backend::Durable => Box::new(AreaAdapter::durable(self.env.area(backend)?.clone(), guard, sink)),
            Backend::Session => Box::new(AreaAdapter::session(self.env.area(backend)?.clone(), guard, sink)),
            Backend::Cookie => Box::new(CookieAdapter::new(
                self.env.cookies()?.clone(),
                self.env.clock().clone(),
                sink,
            )),
        };
        Some(adapter)
    }
}

/// First backend in priority order that `preference` admits and `caps` supports.
pub fn select_backend(preference: Preference, caps: &Capabilities) -> Option<Backend> {
    Backend::PRIORITY
        .into_iter()
        .find(|&b| preference.admits(b) && caps.supports(b))
}

/// Probes `env` and returns an adapter for the preference token (`"localStorage"`,
/// `"sessionStorage"`, `"cookies"`, or `None` for no preference).
///
/// An unrecognized token selects nothing, the same as a host without usable storage.
pub fn open_storage(env: Environment, preference: Option<&str>) -> Option<Box<dyn StorageAdapter>> {
    let preference = match Preference::from_token(preference) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("{}, no storage selected", e);
            return None;
        }
    };
    StorageFactory::new(env).create(preference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::{DocumentCookie, InMemoryCookieJar};
    use crate::diagnostics::RecordingSink;
    use crate::errors::StorageError;
    use crate::storage::{InMemoryLocalStore, InMemorySessionStore, StorageArea};
    use log::Level;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    fn caps(durable: bool, session: bool, cookie: bool) -> Capabilities {
        Capabilities { durable, session, cookie }
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn select_follows_priority_without_preference() {
        assert_eq!(select_backend(Preference::Any, &caps(true, true, true)), Some(Backend::Durable));
        assert_eq!(select_backend(Preference::Any, &caps(false, true, true)), Some(Backend::Session));
        assert_eq!(select_backend(Preference::Any, &caps(false, false, true)), Some(Backend::Cookie));
        assert_eq!(select_backend(Preference::Any, &caps(false, false, false)), None);
    }

    #[test]
    fn select_honours_preference() {
        let all = caps(true, true, true);
        assert_eq!(select_backend(Backend::Cookie.into(), &all), Some(Backend::Cookie));
        assert_eq!(select_backend(Backend::Session.into(), &all), Some(Backend::Session));
        // a preferred backend that is unsupported does not fall back to another one
        assert_eq!(select_backend(Backend::Durable.into(), &caps(false, true, true)), None);
    }

    #[test]
    fn preference_overrides_priority() {
        init_logger();
        let factory = StorageFactory::new(Environment::in_memory());
        let adapter = factory.create(Preference::Only(Backend::Cookie)).unwrap();
        assert_eq!(adapter.backend(), Backend::Cookie);
    }

    #[test]
    fn falls_back_to_session_when_durable_is_disabled() {
        init_logger();
        let env = Environment::builder()
            .local(Arc::new(InMemoryLocalStore::with_quota(0)))
            .session(Arc::new(InMemorySessionStore::new()))
            .cookies(Arc::new(InMemoryCookieJar::new().with_enabled_flag(Some(true))))
            .build();

        let adapter = StorageFactory::new(env).create(Preference::Any).unwrap();
        assert_eq!(adapter.backend(), Backend::Session);
    }

    #[test]
    fn falls_back_to_cookies_when_only_cookies_exist() {
        let env = Environment::builder()
            .cookies(Arc::new(InMemoryCookieJar::new()))
            .build();
        let adapter = StorageFactory::new(env).create(Preference::Any).unwrap();
        assert_eq!(adapter.backend(), Backend::Cookie);
    }

    #[test]
    fn nothing_supported_yields_none() {
        let env = Environment::builder()
            .local(Arc::new(InMemoryLocalStore::with_quota(0)))
            .cookies(Arc::new(InMemoryCookieJar::new().with_enabled_flag(Some(false))))
            .build();
        assert!(StorageFactory::new(env).create(Preference::Any).is_none());
        assert!(StorageFactory::new(Environment::builder().build()).create(Preference::Any).is_none());
    }

    #[test]
    fn probing_runs_every_time_and_cleans_up_durable_sentinel() {
        let local = Arc::new(InMemoryLocalStore::new());
        let jar = Arc::new(InMemoryCookieJar::new());
        let env = Environment::builder().local(local.clone()).cookies(jar.clone()).build();
        let factory = StorageFactory::new(env);

        // cookie preferred, but the durable probe still ran and left nothing behind
        let adapter = factory.create(Backend::Cookie.into()).unwrap();
        assert_eq!(adapter.backend(), Backend::Cookie);
        assert!(local.is_empty());
        assert_eq!(jar.cookie_string(), "testForCookieSupport");

        // each call builds a fresh adapter over the same data
        let a = factory.create(Preference::Any).unwrap();
        a.set("k", &json!(1));
        let b = factory.create(Preference::Any).unwrap();
        assert_eq!(b.get("k").unwrap(), Some(json!(1)));
    }

    #[test]
    fn failing_writes_do_not_migrate_to_another_backend() {
        // quota large enough for the probe sentinel, too small for real data
        let local = Arc::new(InMemoryLocalStore::with_quota(24));
        let session = Arc::new(InMemorySessionStore::new());
        let sink = Arc::new(RecordingSink::new());
        let env = Environment::builder().local(local.clone()).session(session.clone()).build();

        let adapter = StorageFactory::new(env).with_sink(sink.clone()).create(Preference::Any).unwrap();
        assert_eq!(adapter.backend(), Backend::Durable);

        assert!(adapter.set("k", &json!("v")).is_stored());
        assert!(!adapter.set("big", &json!("well over the twenty four unit quota")).is_stored());
        assert_eq!(sink.at_level(Level::Error).len(), 1);

        assert_eq!(local.get_item("k").as_deref(), Some("\"v\""));
        assert!(session.is_empty());
        assert_eq!(adapter.backend(), Backend::Durable);
    }

    #[test]
    fn size_guard_diagnostics_reach_the_configured_sink() {
        let local = Arc::new(InMemoryLocalStore::new());
        let sink = Arc::new(RecordingSink::new());
        let factory = StorageFactory::new(Environment::builder().local(local.clone()).build())
            .with_sink(sink.clone());
        let adapter = factory.create(Preference::Any).unwrap();

        // puts the estimate just over 3000
        local.set_item("filler", &"x".repeat(1_534_500)).unwrap();
        assert!(adapter.set("a", &json!("v")).is_stored());
        assert_eq!(sink.at_level(Level::Warn).len(), 1);

        // past 5000: error, yet the value is still there afterwards
        local.set_item("filler", &"x".repeat(2_560_000)).unwrap();
        assert!(adapter.set("b", &json!("w")).is_stored());
        assert_eq!(sink.at_level(Level::Error).len(), 1);
        assert_eq!(adapter.get("b").unwrap(), Some(json!("w")));
    }

    #[test]
    fn cookie_round_trip_with_expiry_and_removal() {
        let factory = StorageFactory::new(Environment::in_memory());
        let cookies = factory.create(Backend::Cookie.into()).unwrap();

        assert_eq!(cookies.set_with_expiry("a", &json!("v"), Some(1)).stored_text(), Some("\"v\""));
        assert_eq!(cookies.get("a").unwrap(), Some(json!("v")));
        assert!(cookies.remove("a"));
        assert_eq!(cookies.get("a").unwrap(), None);
    }

    #[test]
    fn custom_probe_names_are_used() {
        let config = StorageConfig {
            cookie_probe_name: "probe".into(),
            ..Default::default()
        };
        let jar = Arc::new(InMemoryCookieJar::new());
        let env = Environment::builder().cookies(jar.clone()).build();
        let factory = StorageFactory::new(env).with_config(config);

        assert!(factory.capabilities().cookie);
        assert_eq!(jar.cookie_string(), "probe");
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        font_size: u8,
    }

    #[test]
    fn typed_helpers() {
        for backend in Backend::PRIORITY {
            let storage = StorageFactory::new(Environment::in_memory()).create(backend.into()).unwrap();
            let settings = Settings { theme: "dark".into(), font_size: 14 };

            assert!(storage.set_as("settings", &settings).unwrap().is_stored());
            assert_eq!(storage.get_as::<Settings>("settings").unwrap(), Some(settings));

            // shape mismatch surfaces as a decode error
            storage.set("settings", &json!({"theme": 1}));
            assert!(matches!(storage.get_as::<Settings>("settings"), Err(StorageError::Decode { .. })));
        }
    }

    #[test]
    fn open_storage_parses_tokens() {
        let adapter = open_storage(Environment::in_memory(), Some("sessionStorage")).unwrap();
        assert_eq!(adapter.backend(), Backend::Session);

        let adapter = open_storage(Environment::in_memory(), None).unwrap();
        assert_eq!(adapter.backend(), Backend::Durable);

        assert!(open_storage(Environment::builder().build(), Some("cookies")).is_none());
    }

    #[test]
    fn open_storage_with_unknown_token_selects_nothing() {
        init_logger();
        // every backend is usable, the token still matches none of them
        assert!(open_storage(Environment::in_memory(), Some("indexedDB")).is_none());
        assert!(open_storage(Environment::in_memory(), Some("LocalStorage")).is_none());
    }
}
