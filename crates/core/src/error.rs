/// Failures of a remote lookup.
///
/// "Nothing found" is not an error: providers return empty results or a
/// `MetadataResult` without metadata instead.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Lookup cancelled")]
    Cancelled,

    #[error("Base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),

    /// Transport failures and non-success statuses, passed through as-is.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl LookupError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LookupError::Cancelled)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
