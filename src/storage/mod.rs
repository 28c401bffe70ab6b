//! Wallet storage
//!
//! JSON snapshots with atomic writes and rotating backups.

pub mod persistence;

pub use persistence::{load_from_file, StorageConfig, StorageError, WalletStore};
