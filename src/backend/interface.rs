use thiserror::Error;

/// Failures of the underlying persistence layer itself, before any
/// interpretation of the stored payload.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a valid key-value map: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// The opaque get/set string API the ledger persists through. Values
/// are UTF-8 text; a missing key reads back as `None`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
