#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Stored value for key '{key}' is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Value cannot be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Unknown storage preference: {0}")]
    UnknownPreference(String),

    #[error("Quota exceeded: {needed} units needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
