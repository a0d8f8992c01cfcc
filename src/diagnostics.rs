//! Diagnostics side channel.
//!
//! Warnings and errors produced by the size guard and by failed writes are not part of the
//! functional return values. They are handed to a [`DiagnosticSink`] instead. The default sink
//! forwards to the `log` facade; [`RecordingSink`] keeps them around so callers (and tests) can
//! inspect what was reported.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use log::Level;

use crate::storage::Backend;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "web_storage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Backend the diagnostic is about, if any
    pub backend: Option<Backend>,
    pub message: String,
}

impl Diagnostic {
    pub fn warn(backend: Backend, message: impl Into<String>) -> Self {
        Self { level: Level::Warn, backend: Some(backend), message: message.into() }
    }

    pub fn error(backend: Backend, message: impl Into<String>) -> Self {
        Self { level: Level::Error, backend: Some(backend), message: message.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.backend {
            Some(backend) => write!(f, "[{}] {}", backend.storage_name(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Shared handle to a diagnostic sink.
pub type DiagnosticSinkHandle = Arc<dyn DiagnosticSink>;

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        log::log!(target: LOG_TARGET, diagnostic.level, "{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the recorded diagnostics of exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<Diagnostic> {
        self.diagnostics().into_iter().filter(|d| d.level == level).collect()
    }

    pub fn clear(&self) {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        log::trace!(target: LOG_TARGET, "recording diagnostic: {}", diagnostic);
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).push(diagnostic);
    }
}
