//! Size guard for the key/value backends.
//!
//! Browsers cap `localStorage`/`sessionStorage` at roughly 5 MB per origin. Before every write
//! the area adapters estimate how much is stored and report when that number gets close to the
//! cap. The estimate is crude on purpose: concatenate every stored value, count UTF‑16 code
//! units, and convert to kilobytes with a small fixed overhead:
//!
//! ```text
//! estimate = baseline + (units * 16) / (8 * 1024)
//! ```
//!
//! Keys are not counted. An area without any value text estimates to zero.
//!
//! The guard only reports; whether a write goes ahead is up to the caller (see
//! [`SizeGuardConfig::enforce_limit`]).

use crate::config::SizeGuardConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::storage::{Backend, StorageArea};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeLevel {
    /// Below the first threshold.
    Ok,
    /// `[warn_at, high_at)`
    Approaching,
    /// `[high_at, limit_at)`
    High,
    /// `>= limit_at`
    Exceeded,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeReport {
    pub estimate: f64,
    pub level: SizeLevel,
}

/// Computes the size estimate of everything currently stored in `area`.
pub fn size_estimate(area: &dyn StorageArea, baseline: f64) -> f64 {
    let units: usize = area
        .keys()
        .iter()
        .filter_map(|k| area.get_item(k))
        .map(|v| v.encode_utf16().count())
        .sum();

    if units == 0 {
        return 0.0;
    }
    baseline + (units as f64 * 16.0) / (8.0 * 1024.0)
}

pub struct SizeGuard<'a> {
    config: &'a SizeGuardConfig,
}

impl<'a> SizeGuard<'a> {
    pub fn new(config: &'a SizeGuardConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, estimate: f64) -> SizeLevel {
        let c = self.config;
        if estimate >= c.limit_at {
            SizeLevel::Exceeded
        } else if estimate >= c.high_at {
            SizeLevel::High
        } else if estimate >= c.warn_at {
            SizeLevel::Approaching
        } else {
            SizeLevel::Ok
        }
    }

    /// Estimates the size of `area`, reports to `sink` when a threshold is crossed, and returns
    /// the result.
    pub fn check(&self, backend: Backend, area: &dyn StorageArea, sink: &dyn DiagnosticSink) -> SizeReport {
        let estimate = size_estimate(area, self.config.baseline);
        let level = self.classify(estimate);
        let c = self.config;

        match level {
            SizeLevel::Ok => {}
            SizeLevel::Approaching => sink.emit(Diagnostic::warn(
                backend,
                format!(
                    "{} has exceeded the {} mark. You have about {} left, careful.",
                    backend, c.warn_at, c.limit_at - c.warn_at
                ),
            )),
            SizeLevel::High => sink.emit(Diagnostic::warn(
                backend,
                format!("{} has exceeded the {} mark.", backend, c.high_at),
            )),
            SizeLevel::Exceeded => sink.emit(Diagnostic::error(
                backend,
                format!(
                    "{} has exceeded the {} mark. Your item cannot be added.",
                    backend, c.limit_at
                ),
            )),
        }

        log::trace!("{} size estimate {:.1} ({:?})", backend, estimate, level);
        SizeReport { estimate, level }
    }
}
