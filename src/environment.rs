//! The host environment the adapters run against.
//!
//! An [`Environment`] bundles the three substrates a browser would offer (each one may be
//! missing) together with the clock used for cookie expiry. Nothing in this crate reaches for
//! ambient globals; everything comes through here.
//!
//! ```rust
//! use std::sync::Arc;
//! use web_storage::environment::Environment;
//! use web_storage::storage::InMemorySessionStore;
//!
//! // A host with session storage only.
//! let env = Environment::builder()
//!     .session(Arc::new(InMemorySessionStore::new()))
//!     .build();
//! assert!(env.local().is_none());
//! assert!(env.cookies().is_none());
//! ```

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::cookies::{DocumentCookieHandle, InMemoryCookieJar};
use crate::storage::{Backend, InMemoryLocalStore, InMemorySessionStore, StorageAreaHandle};

#[derive(Clone)]
pub struct Environment {
    local: Option<StorageAreaHandle>,
    session: Option<StorageAreaHandle>,
    cookies: Option<DocumentCookieHandle>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("local", &self.local.is_some())
            .field("session", &self.session.is_some())
            .field("cookies", &self.cookies.is_some())
            .finish_non_exhaustive()
    }
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// A host where all three substrates exist and live in memory.
    pub fn in_memory() -> Self {
        Self::builder()
            .local(Arc::new(InMemoryLocalStore::new()))
            .session(Arc::new(InMemorySessionStore::new()))
            .cookies(Arc::new(InMemoryCookieJar::new()))
            .build()
    }

    pub fn local(&self) -> Option<&StorageAreaHandle> {
        self.local.as_ref()
    }

    pub fn session(&self) -> Option<&StorageAreaHandle> {
        self.session.as_ref()
    }

    pub fn cookies(&self) -> Option<&DocumentCookieHandle> {
        self.cookies.as_ref()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The key/value area behind `backend`; always `None` for cookies.
    pub fn area(&self, backend: Backend) -> Option<&StorageAreaHandle> {
        match backend {
            Backend::Durable => self.local(),
            Backend::Session => self.session(),
            Backend::Cookie => None,
        }
    }
}

pub struct EnvironmentBuilder {
    local: Option<StorageAreaHandle>,
    session: Option<StorageAreaHandle>,
    cookies: Option<DocumentCookieHandle>,
    clock: Arc<dyn Clock>,
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self {
            local: None,
            session: None,
            cookies: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl EnvironmentBuilder {
    pub fn local(mut self, area: StorageAreaHandle) -> Self {
        self.local = Some(area);
        self
    }

    pub fn session(mut self, area: StorageAreaHandle) -> Self {
        self.session = Some(area);
        self
    }

    pub fn cookies(mut self, jar: DocumentCookieHandle) -> Self {
        self.cookies = Some(jar);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Environment {
        Environment {
            local: self.local,
            session: self.session,
            cookies: self.cookies,
            clock: self.clock,
        }
    }
}
