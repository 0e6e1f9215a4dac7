use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// No stable version could be resolved from the catalog. Not retryable.
    #[error("Corrupted version data: no stable version could be resolved")]
    CorruptedVersionData,

    #[error("Local version {0} has no local path")]
    MissingLocalPath(String),

    #[error("Local version at {0} has a blank version")]
    BlankVersion(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl RegistryError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, RegistryError::CorruptedVersionData)
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        RegistryError::Parse(err.to_string())
    }
}
