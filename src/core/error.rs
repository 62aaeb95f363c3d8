use thiserror::Error;

use crate::backend::BackendError;

/// Occurs when the stored transaction sequence cannot be loaded,
/// either because the persistence layer is unreachable or because
/// the payload under the storage key is not valid structured data.
#[derive(Debug, Error)]
pub enum StorageReadError {
    #[error("storage backend unreachable: {0}")]
    Backend(#[from] BackendError),
    #[error("stored transactions are malformed: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Occurs when the transaction sequence cannot be written back.
#[derive(Debug, Error)]
pub enum StorageWriteError {
    #[error("storage backend unreachable: {0}")]
    Backend(#[from] BackendError),
    #[error("could not encode transactions: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Occurs when `add_transaction` input is rejected before anything
/// touches storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount is not a finite number: {0:?}")]
    InvalidAmount(String),
}

/// Everything the ledger can report to its caller. Nothing here is
/// retried automatically and nothing panics; a failed write leaves
/// both the cache and the persisted sequence as they were.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Read(#[from] StorageReadError),
    #[error(transparent)]
    Write(#[from] StorageWriteError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
