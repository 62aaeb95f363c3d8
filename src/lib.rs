mod backend;
mod core;

pub use crate::backend::{json_store, memory};
pub use crate::backend::{BackendError, JsonFileStore, KeyValueStore, MemoryStore};
pub use crate::core::{error, ledger, store, transaction};
pub use crate::core::{total_balance, Amount, Ledger, Transaction, TransactionStore, STORAGE_KEY};
pub use crate::core::{LedgerError, StorageReadError, StorageWriteError, ValidationError};
