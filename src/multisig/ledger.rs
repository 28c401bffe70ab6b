//! Append-only transaction ledger
//!
//! Each entry pairs a transaction with its confirmation set behind its own
//! mutex. The outer lock only guards the vector itself, so work on
//! different transaction ids never contends beyond the brief lookup.

use crate::crypto::Address;
use crate::multisig::confirmation::ConfirmationSet;
use crate::multisig::error::MultisigError;
use crate::multisig::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// A transaction together with its confirmations
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    pub transaction: Transaction,
    pub confirmations: ConfirmationSet,
}

/// Shared handle to a single ledger entry
pub type RecordHandle = Arc<Mutex<TransactionRecord>>;

/// Lock a record, recovering from poisoning
///
/// Records are only mutated after validation succeeds, and execution
/// commits the executed flag before dispatching, so a panic while the lock
/// was held cannot leave a dispatched transaction pending.
pub fn lock_record(handle: &RecordHandle) -> MutexGuard<'_, TransactionRecord> {
    handle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Ordered collection of proposed transactions
#[derive(Debug, Default)]
pub struct TransactionLedger {
    entries: RwLock<Vec<RecordHandle>>,
}

impl TransactionLedger {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously saved records
    ///
    /// Records must be dense and zero-based.
    pub fn from_records(records: Vec<TransactionRecord>) -> Result<Self, MultisigError> {
        for (index, record) in records.iter().enumerate() {
            if record.transaction.id != index as u64 {
                return Err(MultisigError::NotFound(index as u64));
            }
        }

        let entries = records
            .into_iter()
            .map(|record| Arc::new(Mutex::new(record)))
            .collect();
        Ok(Self {
            entries: RwLock::new(entries),
        })
    }

    /// Append a new transaction and return its id
    pub fn propose(
        &self,
        proposer: Address,
        destination: Address,
        value: u128,
        payload: Vec<u8>,
    ) -> u64 {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let id = entries.len() as u64;
        let record = TransactionRecord {
            transaction: Transaction::new(id, proposer, destination, value, payload),
            confirmations: ConfirmationSet::new(),
        };
        entries.push(Arc::new(Mutex::new(record)));
        id
    }

    /// Handle to the entry for `id`
    pub fn entry(&self, id: u64) -> Result<RecordHandle, MultisigError> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        usize::try_from(id)
            .ok()
            .and_then(|index| entries.get(index))
            .cloned()
            .ok_or(MultisigError::NotFound(id))
    }

    /// Snapshot of the transaction with `id`
    pub fn get(&self, id: u64) -> Result<Transaction, MultisigError> {
        let handle = self.entry(id)?;
        let record = lock_record(&handle);
        Ok(record.transaction.clone())
    }

    /// Number of transactions ever proposed
    pub fn count(&self) -> u64 {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len() as u64
    }

    /// Flag the transaction as executed
    pub fn mark_executed(&self, id: u64) -> Result<(), MultisigError> {
        let handle = self.entry(id)?;
        let mut record = lock_record(&handle);
        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }
        record.transaction.mark_executed();
        Ok(())
    }

    /// All entry handles, in id order
    fn handles(&self) -> Vec<RecordHandle> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Ids in `[from, to)` filtered by execution state
    pub fn transaction_ids(
        &self,
        from: u64,
        to: u64,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<u64> {
        self.handles()
            .iter()
            .map(|handle| lock_record(handle).transaction.clone())
            .filter(|tx| tx.id >= from && tx.id < to)
            .filter(|tx| (include_pending && !tx.executed) || (include_executed && tx.executed))
            .map(|tx| tx.id)
            .collect()
    }

    /// Count of transactions filtered by execution state
    pub fn transaction_count(&self, include_pending: bool, include_executed: bool) -> u64 {
        self.handles()
            .iter()
            .filter(|handle| {
                let executed = lock_record(handle).transaction.executed;
                (include_pending && !executed) || (include_executed && executed)
            })
            .count() as u64
    }

    /// Clone every record, in id order
    pub fn records(&self) -> Vec<TransactionRecord> {
        self.handles()
            .iter()
            .map(|handle| lock_record(handle).clone())
            .collect()
    }
}
