//! Multisig Wallet: an M-of-N authorization engine in Rust
//!
//! This crate provides a multi-party wallet featuring:
//! - A fixed owner set with an approval threshold
//! - Sequential, append-only transaction proposals
//! - Interactive confirmations and revocations
//! - Off-line confirmations from recoverable secp256k1 signatures,
//!   single or packed in batches
//! - Replay protection by binding each digest to its transaction id
//! - Threshold-gated, exactly-once dispatch to a pluggable executor
//! - Event notifications and JSON snapshots
//!
//! # Example
//!
//! ```rust
//! use multisig_wallet::crypto::KeyPair;
//! use multisig_wallet::multisig::{MultisigWallet, RecordingExecutor, WalletConfig};
//! use std::sync::Arc;
//!
//! let keys: Vec<KeyPair> = (0..3).map(|_| KeyPair::generate()).collect();
//! let owners = keys.iter().map(|k| k.address()).collect();
//!
//! // Create a 2-of-3 wallet
//! let wallet = MultisigWallet::new(
//!     WalletConfig::new(owners, 2, None),
//!     Arc::new(RecordingExecutor::new()),
//! )
//! .unwrap();
//!
//! // Propose an action
//! let id = wallet
//!     .submit_transaction(&keys[0].address(), keys[2].address(), 0, vec![0xca, 0xfe])
//!     .unwrap();
//!
//! // One owner confirms directly, another signs off-line
//! wallet.confirm_transaction(&keys[0].address(), id).unwrap();
//! let digest = wallet.message_hash(id).unwrap();
//! let signature = keys[1].sign_digest(digest.as_bytes()).unwrap();
//! wallet.confirm_transaction_by_signature(id, &signature).unwrap();
//!
//! // Threshold met
//! wallet.execute_transaction(&keys[2].address(), id).unwrap();
//! assert!(wallet.transaction(id).unwrap().executed);
//! ```

pub mod cli;
pub mod crypto;
pub mod multisig;
pub mod storage;

// Re-export commonly used types
pub use crypto::{Address, KeyPair};
pub use multisig::{
    build_digest, Digest, ExecutionOutcome, Executor, MultisigError, MultisigWallet,
    OwnerRegistry, Transaction, WalletConfig, WalletEvent,
};
pub use storage::{StorageConfig, WalletStore};
