//! Errors surfaced by the authorization engine

use crate::crypto::{Address, KeyError};
use thiserror::Error;

/// Errors related to multisig operations
#[derive(Error, Debug)]
pub enum MultisigError {
    #[error("Caller is not an owner: {0}")]
    Unauthorized(Address),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Transaction already executed: {0}")]
    AlreadyExecuted(u64),
    #[error("Insufficient confirmations: have {have}, need {need}")]
    InsufficientConfirmations { have: usize, need: usize },
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Malformed signature batch: length {length} is not a multiple of 65")]
    MalformedBatch { length: usize },
    #[error("Owner set must not be empty")]
    EmptyOwnerSet,
    #[error("Invalid threshold: {required} of {owners} owners")]
    InvalidThreshold { required: usize, owners: usize },
    #[error("Duplicate owner: {0}")]
    DuplicateOwner(Address),
    #[error("Crypto error: {0}")]
    Crypto(KeyError),
}

impl From<KeyError> for MultisigError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidSignature => MultisigError::InvalidSignature,
            KeyError::MalformedBatch { length } => MultisigError::MalformedBatch { length },
            other => MultisigError::Crypto(other),
        }
    }
}
