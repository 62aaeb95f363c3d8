use chrono::{DateTime, Utc};

use crate::backend::KeyValueStore;
use crate::core::error::{LedgerError, ValidationError};
use crate::core::store::TransactionStore;
use crate::core::transaction::{Amount, Transaction};

/// Display-ready view over the stored transaction sequence.
///
/// The ledger owns the store and a cached copy of the sequence. The cache
/// only ever changes after a persisted write succeeds: a mutation either
/// applies-and-persists or is rejected with no effect, so the caller can
/// render the cache at any point without wondering about half-applied
/// state. Single caller, no interleaving; cross-process writers are
/// last-write-wins and out of scope.
pub struct Ledger<B: KeyValueStore> {
    store: TransactionStore<B>,
    entries: Vec<Transaction>,
}

impl<B: KeyValueStore> Ledger<B> {
    /// Wrap a backend with an empty cache. Call [Ledger::refresh] to pick
    /// up whatever is already persisted.
    pub fn new(backend: B) -> Self {
        Ledger {
            store: TransactionStore::new(backend),
            entries: Vec::new(),
        }
    }

    /// The cached sequence, in stored (insertion) order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn store(&self) -> &TransactionStore<B> {
        &self.store
    }

    /// Reload the cache from storage. On a read failure the previous
    /// cache is kept as-is, so a transient error does not blank out an
    /// already-rendered list.
    pub fn refresh(&mut self) -> Result<&[Transaction], LedgerError> {
        match self.store.load() {
            Ok(loaded) => {
                self.entries = loaded;
                Ok(&self.entries)
            }
            Err(err) => {
                log::warn!("refresh failed, keeping cached transactions: {err}");
                Err(err.into())
            }
        }
    }

    /// Formatted balance of the cached sequence.
    pub fn balance(&self) -> String {
        total_balance(&self.entries)
    }

    /// Validate, persist and cache a new transaction.
    ///
    /// `amount` arrives as raw form text and must parse as a finite
    /// number; `description` must be non-empty. Validation failures never
    /// reach storage. A storage failure leaves the cache (and the
    /// persisted sequence) at its pre-append state.
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: &str,
        date: DateTime<Utc>,
    ) -> Result<Transaction, LedgerError> {
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription.into());
        }
        let parsed: Amount = amount
            .trim()
            .parse()
            .ok()
            .filter(|value: &Amount| value.is_finite())
            .ok_or_else(|| ValidationError::InvalidAmount(amount.to_owned()))?;

        let transaction = Transaction::new(
            next_id(&self.entries, Utc::now()),
            description.to_owned(),
            parsed,
            date,
        );

        let mut updated = self.entries.clone();
        updated.push(transaction.clone());
        self.store.save(&updated)?;
        self.entries = updated;
        Ok(transaction)
    }

    /// Drop the transaction with the given id and persist the result.
    ///
    /// Removing an id that is not in the sequence is a success no-op: the
    /// unchanged sequence is written back and the call reports Ok. A
    /// storage failure discards the filtered sequence entirely.
    pub fn remove_transaction(&mut self, id: &str) -> Result<(), LedgerError> {
        let filtered: Vec<Transaction> = self
            .entries
            .iter()
            .filter(|transaction| transaction.id != id)
            .cloned()
            .collect();
        if filtered.len() == self.entries.len() {
            log::debug!("remove of unknown id {id:?} is a no-op");
        }
        self.store.save(&filtered)?;
        self.entries = filtered;
        Ok(())
    }
}

/// Sum of all amounts, formatted to exactly two decimal places. A
/// non-finite amount (a record whose stored amount was not numeric)
/// counts as zero. An empty or exactly-zero sum renders "0.00", never
/// "-0.00".
pub fn total_balance(transactions: &[Transaction]) -> String {
    let total: Amount = transactions
        .iter()
        .map(|transaction| {
            if transaction.amount.is_finite() {
                transaction.amount
            } else {
                0.0
            }
        })
        .sum();
    if total == 0.0 {
        return "0.00".to_owned();
    }
    format!("{total:.2}")
}

/// Millisecond timestamp as an opaque token, suffixed on collision so
/// ids stay unique even when two records land in the same millisecond.
fn next_id(existing: &[Transaction], now: DateTime<Utc>) -> String {
    let base = now.timestamp_millis().to_string();
    let mut id = base.clone();
    let mut bump = 0;
    while existing.iter().any(|transaction| transaction.id == id) {
        bump += 1;
        id = format!("{base}-{bump}");
    }
    id
}
