use serde::Deserialize;

use crate::errors::StorageError;

const DEFAULT_DURABLE_PROBE_KEY: &str = "isSupported";
const DEFAULT_COOKIE_PROBE_NAME: &str = "testForCookieSupport";

/// Thresholds for the size guard, in the estimate's kilobyte-like units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizeGuardConfig {
    /// Fixed overhead added to every non-empty estimate
    pub baseline: f64,
    /// Estimate at which the "approaching the limit" warning starts
    pub warn_at: f64,
    /// Estimate at which the second warning starts
    pub high_at: f64,
    /// Estimate at which an error is reported
    pub limit_at: f64,
    /// When set, area adapters refuse writes once `limit_at` is reached. Off by default: the
    /// guard only reports.
    pub enforce_limit: bool,
}

impl Default for SizeGuardConfig {
    fn default() -> Self {
        Self {
            baseline: 3.0,
            warn_at: 3000.0,
            high_at: 4000.0,
            limit_at: 5000.0,
            enforce_limit: false,
        }
    }
}

/// Main storage configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Size guard thresholds for the durable and session backends
    pub size_guard: SizeGuardConfig,
    /// Key written and removed again when probing the durable store
    pub durable_probe_key: String,
    /// Cookie written when the environment has no "cookies enabled" flag
    pub cookie_probe_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            size_guard: SizeGuardConfig::default(),
            durable_probe_key: DEFAULT_DURABLE_PROBE_KEY.to_string(),
            cookie_probe_name: DEFAULT_COOKIE_PROBE_NAME.to_string(),
        }
    }
}

impl StorageConfig {
    /// Parses a JSON configuration document. Missing fields fall back to their defaults.
    pub fn from_json(doc: &str) -> Result<Self, StorageError> {
        let config: StorageConfig =
            serde_json::from_str(doc).map_err(|e| StorageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        let g = &self.size_guard;
        if !(g.baseline >= 0.0 && g.warn_at <= g.high_at && g.high_at <= g.limit_at) {
            return Err(StorageError::Config(format!(
                "size guard thresholds must ascend (warn_at={}, high_at={}, limit_at={})",
                g.warn_at, g.high_at, g.limit_at
            )));
        }
        if self.durable_probe_key.is_empty() {
            return Err(StorageError::Config("durable_probe_key must not be empty".into()));
        }
        if self.cookie_probe_name.is_empty() || self.cookie_probe_name.contains([';', '=']) {
            return Err(StorageError::Config(format!(
                "cookie_probe_name '{}' is not a valid cookie token",
                self.cookie_probe_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.durable_probe_key, "isSupported");
        assert_eq!(config.cookie_probe_name, "testForCookieSupport");
        assert!(!config.size_guard.enforce_limit);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = StorageConfig::from_json(r#"{ "size_guard": { "warn_at": 10.0, "high_at": 20.0 } }"#).unwrap();
        assert_eq!(config.size_guard.warn_at, 10.0);
        assert_eq!(config.size_guard.high_at, 20.0);
        assert_eq!(config.size_guard.limit_at, 5000.0);
        assert_eq!(config.durable_probe_key, "isSupported");
    }

    #[test]
    fn descending_thresholds_are_rejected() {
        let err = StorageConfig::from_json(r#"{ "size_guard": { "warn_at": 6000.0 } }"#).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = StorageConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn cookie_probe_name_must_be_a_token() {
        let err = StorageConfig::from_json(r#"{ "cookie_probe_name": "a=b" }"#).unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }
}
