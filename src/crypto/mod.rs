//! Cryptographic utilities for the wallet
//!
//! This module provides:
//! - Keccak-256 hashing
//! - ECDSA key management (secp256k1)
//! - Owner addresses
//! - Recoverable signature verification

pub mod address;
pub mod hash;
pub mod keys;
pub mod signature;

pub use address::{Address, ADDRESS_LENGTH};
pub use hash::{keccak256, keccak256_hex, personal_message_hash, SIGNED_MESSAGE_PREFIX};
pub use keys::{sign_digest, KeyError, KeyPair};
pub use signature::{recover_signer, verify_batch, SIGNATURE_LENGTH};
