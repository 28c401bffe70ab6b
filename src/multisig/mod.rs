//! Multi-signature authorization
//!
//! A fixed set of N owners jointly controls arbitrary proposed actions.
//! Each action needs M distinct owner confirmations before it can be
//! dispatched, and it is dispatched at most once.
//!
//! # Example
//!
//! ```rust
//! use multisig_wallet::crypto::KeyPair;
//! use multisig_wallet::multisig::{LoggingExecutor, MultisigError, MultisigWallet, WalletConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), MultisigError> {
//! let (alice, bob, carol) = (KeyPair::generate(), KeyPair::generate(), KeyPair::generate());
//!
//! // Create a 2-of-3 wallet
//! let owners = vec![alice.address(), bob.address(), carol.address()];
//! let wallet = MultisigWallet::new(WalletConfig::new(owners, 2, None), Arc::new(LoggingExecutor))?;
//!
//! // Propose and collect confirmations
//! let id = wallet.submit_transaction(&alice.address(), carol.address(), 0, vec![0x01])?;
//! wallet.confirm_transaction(&alice.address(), id)?;
//! let bob_signature = bob.sign_digest(wallet.message_hash(id)?.as_bytes())?;
//! wallet.confirm_transaction_by_signature(id, &bob_signature)?;
//!
//! // Threshold met, dispatch
//! wallet.execute_transaction(&carol.address(), id)?;
//! # Ok(())
//! # }
//! ```

pub mod confirmation;
pub mod digest;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod ledger;
pub mod owners;
pub mod transaction;

pub use confirmation::ConfirmationSet;
pub use digest::{build_digest, encode_packed, Digest};
pub use engine::{MultisigWallet, WalletSnapshot};
pub use error::MultisigError;
pub use events::{EventBroadcaster, WalletEvent};
pub use executor::{ExecutionOutcome, Executor, Invocation, LoggingExecutor, RecordingExecutor};
pub use ledger::{TransactionLedger, TransactionRecord};
pub use owners::{OwnerRegistry, WalletConfig};
pub use transaction::Transaction;
