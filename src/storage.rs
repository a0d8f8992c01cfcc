//! Key/value storage substrates.
//!
//! This module defines the [`StorageArea`] trait that models the DOM `Storage` interface, the
//! [`Backend`] and [`Preference`] types used during adapter selection, and the substrate
//! implementations shipped with the crate.
//!
//! # Concepts
//!
//! - **Local storage** (the durable backend) keeps data across sessions until it is cleared.
//!   Backed by [`InMemoryLocalStore`] or, with the `sqlite_local_store` feature, by
//!   [`SqliteLocalStore`].
//! - **Session storage** keeps data for one browsing session. Backed by
//!   [`InMemorySessionStore`].
//!
//! Cookies live in [`crate::cookies`]; they do not implement [`StorageArea`].
//!
//! # Choosing a substrate
//!
//! - Inside a real browser host, wrap the host's `localStorage`/`sessionStorage` objects in a
//!   [`StorageArea`] implementation and hand them to the
//!   [`Environment`](crate::environment::Environment).
//! - For tests and headless use, the in-memory stores are enough.
//! - [`InMemoryLocalStore::with_quota`] models a browser that refuses writes past a limit; a
//!   quota of zero models a browser where storage is present but disabled.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use web_storage::storage::{InMemoryLocalStore, StorageArea};
//!
//! let area: Arc<dyn StorageArea> = Arc::new(InMemoryLocalStore::new());
//! area.set_item("greeting", "\"hello\"").unwrap();
//! assert_eq!(area.get_item("greeting").as_deref(), Some("\"hello\""));
//! ```

/// Storage area module, defining the key/value storage interface.
pub mod area;
/// Backend identity and preference.
pub mod types;

/// Durable storage implementations.
pub mod local {
    /// In-memory local storage implementation.
    pub mod in_memory;
    /// SQLite-backed local storage implementation.
    #[cfg(feature = "sqlite_local_store")]
    pub mod sqlite_store;
}

/// Session storage implementations.
pub mod session {
    /// In-memory session storage implementation.
    pub mod in_memory;
}

pub use area::{StorageArea, StorageAreaHandle};
pub use local::in_memory::InMemoryLocalStore;
#[cfg(feature = "sqlite_local_store")]
pub use local::sqlite_store::SqliteLocalStore;
pub use session::in_memory::InMemorySessionStore;
pub use types::{Backend, Preference};
