use serde_json::Value;

use crate::adapter::{codec, StorageAdapter, WriteOutcome};
use crate::config::SizeGuardConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSinkHandle};
use crate::size_guard::{SizeGuard, SizeLevel};
use crate::storage::{Backend, StorageAreaHandle};

/// Adapter over a key/value area: `localStorage` or `sessionStorage`.
pub struct AreaAdapter {
    backend: Backend,
    area: StorageAreaHandle,
    guard: SizeGuardConfig,
    sink: DiagnosticSinkHandle,
}

impl AreaAdapter {
    /// Adapter for the durable backend.
    pub fn durable(area: StorageAreaHandle, guard: SizeGuardConfig, sink: DiagnosticSinkHandle) -> Self {
        Self { backend: Backend::Durable, area, guard, sink }
    }

    /// Adapter for the session backend.
    pub fn session(area: StorageAreaHandle, guard: SizeGuardConfig, sink: DiagnosticSinkHandle) -> Self {
        Self { backend: Backend::Session, area, guard, sink }
    }
}

impl StorageAdapter for AreaAdapter {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        self.area.get_item(key)
    }

    fn set_with_expiry(&self, key: &str, value: &Value, expiry_days: Option<u32>) -> WriteOutcome {
        if expiry_days.is_some() {
            log::debug!("{} does not expire entries, ignoring expiry for '{}'", self.backend, key);
        }

        let report = SizeGuard::new(&self.guard).check(self.backend, self.area.as_ref(), self.sink.as_ref());
        if self.guard.enforce_limit && report.level == SizeLevel::Exceeded {
            return WriteOutcome::Rejected;
        }

        let encoded = match codec::encode(value) {
            Ok(s) => s,
            Err(e) => {
                self.sink.emit(Diagnostic::error(
                    self.backend,
                    format!("Item {} cannot be encoded: {}", key, e),
                ));
                return WriteOutcome::Rejected;
            }
        };

        match self.area.set_item(key, &encoded) {
            // read back from our own area
            Ok(()) => WriteOutcome::Stored(self.area.get_item(key)),
            Err(e) => {
                self.sink.emit(Diagnostic::error(
                    self.backend,
                    format!("Item {} of value {} cannot be added because of: {:#}", key, encoded, e),
                ));
                WriteOutcome::Rejected
            }
        }
    }

    fn remove(&self, key: &str) -> bool {
        if let Err(e) = self.area.remove_item(key) {
            log::warn!("{}: removing '{}' failed: {:#}", self.backend, key, e);
        }
        true
    }
}
