//! Multi-signature authorization engine
//!
//! Coordinates the owner registry, the transaction ledger and the
//! confirmation sets, and dispatches approved transactions to the executor
//! exactly once.
//!
//! All state transitions for a given transaction id (confirm, revoke,
//! execute) run while holding that transaction's record lock, so two
//! concurrent `execute_transaction` calls can never both observe
//! `executed == false`. Different ids proceed independently.

use crate::crypto::{recover_signer, verify_batch, Address};
use crate::multisig::digest::Digest;
use crate::multisig::error::MultisigError;
use crate::multisig::events::{EventBroadcaster, WalletEvent};
use crate::multisig::executor::{ExecutionOutcome, Executor};
use crate::multisig::ledger::{lock_record, TransactionLedger, TransactionRecord};
use crate::multisig::owners::{OwnerRegistry, WalletConfig};
use crate::multisig::transaction::Transaction;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Serializable copy of the full wallet state
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletSnapshot {
    pub config: WalletConfig,
    pub transactions: Vec<TransactionRecord>,
}

/// An M-of-N wallet guarding arbitrary actions
pub struct MultisigWallet {
    config: WalletConfig,
    owners: OwnerRegistry,
    ledger: TransactionLedger,
    executor: Arc<dyn Executor>,
    events: EventBroadcaster,
}

impl std::fmt::Debug for MultisigWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultisigWallet")
            .field("owners", &self.owners)
            .field("transactions", &self.ledger.count())
            .finish_non_exhaustive()
    }
}

impl MultisigWallet {
    /// Create a new wallet with an empty ledger
    pub fn new(config: WalletConfig, executor: Arc<dyn Executor>) -> Result<Self, MultisigError> {
        let owners = OwnerRegistry::from_config(&config)?;

        log::info!(
            "Created {} wallet{}",
            owners.description(),
            config
                .label
                .as_deref()
                .map(|l| format!(" '{}'", l))
                .unwrap_or_default()
        );

        Ok(Self {
            config,
            owners,
            ledger: TransactionLedger::new(),
            executor,
            events: EventBroadcaster::new(),
        })
    }

    /// Restore a wallet from a snapshot, re-validating the owner set
    pub fn from_snapshot(
        snapshot: WalletSnapshot,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, MultisigError> {
        let owners = OwnerRegistry::from_config(&snapshot.config)?;
        let ledger = TransactionLedger::from_records(snapshot.transactions)?;

        Ok(Self {
            config: snapshot.config,
            owners,
            ledger,
            executor,
            events: EventBroadcaster::new(),
        })
    }

    /// Copy the current state for persistence
    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            config: self.config.clone(),
            transactions: self.ledger.records(),
        }
    }

    fn ensure_owner(&self, address: &Address) -> Result<(), MultisigError> {
        if self.owners.is_owner(address) {
            Ok(())
        } else {
            Err(MultisigError::Unauthorized(*address))
        }
    }

    /// Apply a confirmation to a locked, unexecuted record
    fn apply_confirmation(&self, record: &mut TransactionRecord, owner: Address) {
        let id = record.transaction.id;
        if record.confirmations.confirm(owner) {
            log::info!(
                "Transaction {} confirmed by {} ({}/{})",
                id,
                owner,
                record.confirmations.count(&self.owners),
                self.owners.threshold()
            );
            self.events.broadcast(WalletEvent::Confirmed {
                owner,
                id,
                timestamp: Utc::now(),
            });
        }
    }

    // =========================================================================
    // Mutating operations
    // =========================================================================

    /// Propose a new transaction. Does not confirm it.
    pub fn submit_transaction(
        &self,
        caller: &Address,
        destination: Address,
        value: u128,
        payload: Vec<u8>,
    ) -> Result<u64, MultisigError> {
        self.ensure_owner(caller)?;

        let id = self
            .ledger
            .propose(*caller, destination, value, payload.clone());

        log::info!(
            "Transaction {} submitted by {} (destination {}, value {})",
            id,
            caller,
            destination,
            value
        );
        self.events.broadcast(WalletEvent::Submitted {
            proposer: *caller,
            id,
            destination,
            value,
            payload,
            timestamp: Utc::now(),
        });

        Ok(id)
    }

    /// Confirm a transaction as `caller`. Repeat confirmations are no-ops.
    pub fn confirm_transaction(&self, caller: &Address, id: u64) -> Result<(), MultisigError> {
        self.ensure_owner(caller)?;
        let handle = self.ledger.entry(id)?;
        let mut record = lock_record(&handle);

        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        self.apply_confirmation(&mut record, *caller);
        Ok(())
    }

    /// Withdraw `caller`'s confirmation
    ///
    /// Rejected once the transaction has executed. Revoking a confirmation
    /// that was never given is a no-op.
    pub fn revoke_confirmation(&self, caller: &Address, id: u64) -> Result<(), MultisigError> {
        self.ensure_owner(caller)?;
        let handle = self.ledger.entry(id)?;
        let mut record = lock_record(&handle);

        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        if record.confirmations.revoke(caller) {
            log::info!("Transaction {} confirmation revoked by {}", id, caller);
            self.events.broadcast(WalletEvent::Revoked {
                owner: *caller,
                id,
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    /// Confirm on behalf of whoever signed the transaction's digest
    ///
    /// Anyone may relay the signature; the confirmation is credited to the
    /// recovered signer. Returns that signer.
    pub fn confirm_transaction_by_signature(
        &self,
        id: u64,
        signature: &[u8],
    ) -> Result<Address, MultisigError> {
        let handle = self.ledger.entry(id)?;
        let digest = lock_record(&handle).transaction.digest();

        let signer = recover_signer(digest.as_bytes(), signature)?;
        self.ensure_owner(&signer)?;

        let mut record = lock_record(&handle);
        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        self.apply_confirmation(&mut record, signer);
        Ok(signer)
    }

    /// Confirm with a packed batch of signatures
    ///
    /// Chunks that fail to recover and signers that are not owners are
    /// skipped. Returns the distinct owner signers found in the batch, in
    /// order of first appearance.
    pub fn confirm_transaction_by_packed_signatures(
        &self,
        id: u64,
        packed: &[u8],
    ) -> Result<Vec<Address>, MultisigError> {
        let handle = self.ledger.entry(id)?;
        let digest = lock_record(&handle).transaction.digest();

        let signers = verify_batch(digest.as_bytes(), packed)?;

        let mut record = lock_record(&handle);
        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        let mut accepted: Vec<Address> = Vec::new();
        for (index, recovered) in signers.into_iter().enumerate() {
            let signer = match recovered {
                Ok(signer) => signer,
                Err(e) => {
                    log::debug!(
                        "Skipping unrecoverable signature {} on transaction {}: {}",
                        index,
                        id,
                        e
                    );
                    continue;
                }
            };
            if !self.owners.is_owner(&signer) {
                log::debug!("Skipping signature from non-owner {} on transaction {}", signer, id);
                continue;
            }
            self.apply_confirmation(&mut record, signer);
            if !accepted.contains(&signer) {
                accepted.push(signer);
            }
        }

        Ok(accepted)
    }

    /// Dispatch a transaction that has reached the threshold
    ///
    /// The transaction is marked executed whatever the executor reports;
    /// the outcome is returned and published for observers.
    pub fn execute_transaction(
        &self,
        caller: &Address,
        id: u64,
    ) -> Result<ExecutionOutcome, MultisigError> {
        self.ensure_owner(caller)?;
        let handle = self.ledger.entry(id)?;
        let mut record = lock_record(&handle);

        if record.transaction.executed {
            return Err(MultisigError::AlreadyExecuted(id));
        }

        let have = record.confirmations.count(&self.owners);
        let need = self.owners.threshold();
        if have < need {
            return Err(MultisigError::InsufficientConfirmations { have, need });
        }

        // Committed before dispatch so a panicking executor cannot leave the
        // transaction executable again.
        record.transaction.mark_executed();
        let tx = &record.transaction;
        let outcome = self.executor.invoke(&tx.destination, tx.value, &tx.payload);

        match &outcome {
            ExecutionOutcome::Success => {
                log::info!("Transaction {} executed by {}", id, caller)
            }
            ExecutionOutcome::Failure(reason) => {
                log::warn!("Transaction {} executed by {} but failed: {}", id, caller, reason)
            }
        }
        self.events.broadcast(WalletEvent::Executed {
            caller: *caller,
            id,
            outcome: outcome.clone(),
            timestamp: Utc::now(),
        });

        Ok(outcome)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn registry(&self) -> &OwnerRegistry {
        &self.owners
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn owners(&self) -> &[Address] {
        self.owners.owners()
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        self.owners.is_owner(address)
    }

    pub fn required_confirmations(&self) -> usize {
        self.owners.threshold()
    }

    /// Get human-readable description like "4-of-6"
    pub fn description(&self) -> String {
        self.owners.description()
    }

    pub fn transaction_count(&self) -> u64 {
        self.ledger.count()
    }

    pub fn transaction(&self, id: u64) -> Result<Transaction, MultisigError> {
        self.ledger.get(id)
    }

    /// Whether `owner` has confirmed `id`. Unknown ids report `false`.
    pub fn is_confirmed(&self, id: u64, owner: &Address) -> bool {
        self.ledger
            .entry(id)
            .map(|handle| lock_record(&handle).confirmations.is_confirmed(owner))
            .unwrap_or(false)
    }

    pub fn confirmation_count(&self, id: u64) -> Result<usize, MultisigError> {
        let handle = self.ledger.entry(id)?;
        let count = lock_record(&handle).confirmations.count(&self.owners);
        Ok(count)
    }

    /// Owners that currently confirm `id`
    pub fn confirmations(&self, id: u64) -> Result<Vec<Address>, MultisigError> {
        let handle = self.ledger.entry(id)?;
        let owners = lock_record(&handle).confirmations.confirmed_by(&self.owners);
        Ok(owners)
    }

    /// Whether `id` currently has enough confirmations to execute
    pub fn is_approved(&self, id: u64) -> Result<bool, MultisigError> {
        Ok(self.confirmation_count(id)? >= self.owners.threshold())
    }

    /// Digest owners must sign to confirm `id` off-line
    pub fn message_hash(&self, id: u64) -> Result<Digest, MultisigError> {
        Ok(self.ledger.get(id)?.digest())
    }

    pub fn transaction_ids(
        &self,
        from: u64,
        to: u64,
        include_pending: bool,
        include_executed: bool,
    ) -> Vec<u64> {
        self.ledger
            .transaction_ids(from, to, include_pending, include_executed)
    }

    pub fn filtered_count(&self, include_pending: bool, include_executed: bool) -> u64 {
        self.ledger
            .transaction_count(include_pending, include_executed)
    }

    /// Subscribe to wallet events
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
