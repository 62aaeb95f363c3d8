pub mod error;
pub mod ledger;
pub mod store;
pub mod transaction;

pub use error::{LedgerError, StorageReadError, StorageWriteError, ValidationError};
pub use ledger::{total_balance, Ledger};
pub use store::{TransactionStore, STORAGE_KEY};
pub use transaction::{Amount, Transaction};
