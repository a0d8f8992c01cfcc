//! Browser storage with automatic fallback.
//!
//! [`StorageFactory`] picks one of `localStorage`, `sessionStorage` or cookies (in that order,
//! or the one asked for) depending on what the host [`Environment`](environment::Environment)
//! supports, and hands back a [`StorageAdapter`] with the same `get`/`set`/`remove` contract
//! for all three.

pub mod adapter;
pub mod clock;
pub mod config;
pub mod cookies;
pub mod diagnostics;
pub mod environment;
pub mod errors;
pub mod factory;
pub mod probe;
pub mod size_guard;
pub mod storage;

pub use adapter::{StorageAdapter, WriteOutcome};
pub use config::{SizeGuardConfig, StorageConfig};
pub use environment::Environment;
pub use errors::StorageError;
pub use factory::{open_storage, StorageFactory};
pub use storage::{Backend, Preference};
