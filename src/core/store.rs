use crate::backend::KeyValueStore;
use crate::core::error::{StorageReadError, StorageWriteError};
use crate::core::transaction::Transaction;

/// The fixed slot the whole transaction sequence lives under.
pub const STORAGE_KEY: &str = "transactions";

/// Durable persistence of the transaction sequence. Every mutation a
/// caller makes goes through a full read-modify-write of the sequence;
/// there are no partial updates. Fine at personal-use scale, a known
/// ceiling beyond it.
pub struct TransactionStore<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> TransactionStore<B> {
    pub fn new(backend: B) -> Self {
        TransactionStore { backend }
    }

    /// Read the stored sequence. An absent key is an empty ledger, not
    /// an error; a present but unparsable payload is surfaced as
    /// [StorageReadError::MalformedPayload] rather than discarded.
    pub fn load(&self) -> Result<Vec<Transaction>, StorageReadError> {
        match self.backend.get(STORAGE_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                let transactions: Vec<Transaction> = serde_json::from_str(&raw)?;
                log::debug!("loaded {} transactions", transactions.len());
                Ok(transactions)
            }
        }
    }

    /// Serialize the full sequence and overwrite the slot.
    pub fn save(&mut self, transactions: &[Transaction]) -> Result<(), StorageWriteError> {
        let payload = serde_json::to_string(transactions)?;
        self.backend.set(STORAGE_KEY, &payload)?;
        log::debug!("saved {} transactions", transactions.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::backend::MemoryStore;

    #[fixture]
    fn records() -> Vec<Transaction> {
        vec![
            Transaction::new(
                "1".to_string(),
                "Groceries".to_string(),
                -50.0,
                Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap(),
            ),
            Transaction::new(
                "2".to_string(),
                "Refund".to_string(),
                200.0,
                Utc.with_ymd_and_hms(2024, 1, 4, 18, 45, 0).unwrap(),
            ),
        ]
    }

    #[rstest]
    fn load_of_empty_backend_is_empty() {
        let store = TransactionStore::new(MemoryStore::new());
        assert!(store.load().unwrap().is_empty());
    }

    #[rstest]
    fn save_then_load_round_trips(records: Vec<Transaction>) {
        let mut store = TransactionStore::new(MemoryStore::new());
        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[rstest]
    fn read_then_write_cycle_is_idempotent(records: Vec<Transaction>) {
        let mut store = TransactionStore::new(MemoryStore::new());
        store.save(&records).unwrap();

        let first = store.load().unwrap();
        store.save(&first).unwrap();
        let payload_one = store.backend.raw(STORAGE_KEY).unwrap().to_owned();

        let second = store.load().unwrap();
        store.save(&second).unwrap();
        let payload_two = store.backend.raw(STORAGE_KEY).unwrap().to_owned();

        assert_eq!(payload_one, payload_two);
    }

    #[rstest]
    fn malformed_payload_is_surfaced() {
        let backend = MemoryStore::with_value(STORAGE_KEY, "{not a list");
        let store = TransactionStore::new(backend);
        assert!(matches!(
            store.load(),
            Err(StorageReadError::MalformedPayload(_))
        ));
    }

    #[rstest]
    fn string_amounts_survive_loading() {
        let payload = json!([
            {"id": "1", "description": "typed in", "amount": "12.5", "date": "2024-03-01T00:00:00Z"}
        ]);
        let backend = MemoryStore::with_value(STORAGE_KEY, &payload.to_string());
        let store = TransactionStore::new(backend);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, 12.5);
    }
}
