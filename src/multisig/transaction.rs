//! Proposed wallet transactions
//!
//! A transaction is an opaque action (destination, value, payload) waiting
//! for enough owner confirmations to be dispatched exactly once.

use crate::crypto::Address;
use crate::multisig::digest::{build_digest, Digest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serde helper storing payload bytes as a hex string
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(serde::de::Error::custom)
    }
}

/// A proposed action and its lifecycle flag
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Sequential ledger position, doubles as the replay nonce
    pub id: u64,
    /// Target of the action
    pub destination: Address,
    /// Amount forwarded with the action
    pub value: u128,
    /// Opaque call data
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,
    /// Set once, when the action is dispatched
    pub executed: bool,
    /// Owner who submitted the proposal
    pub proposer: Address,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
    /// Dispatch timestamp
    #[serde(default)]
    pub executed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a new, unexecuted transaction
    pub fn new(
        id: u64,
        proposer: Address,
        destination: Address,
        value: u128,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id,
            destination,
            value,
            payload,
            executed: false,
            proposer,
            submitted_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Digest owners sign to confirm this transaction
    pub fn digest(&self) -> Digest {
        build_digest(&self.destination, self.value, &self.payload, self.id)
    }

    /// Check if the transaction is still awaiting execution
    pub fn is_pending(&self) -> bool {
        !self.executed
    }

    /// Record dispatch. The flag never reverts.
    pub(crate) fn mark_executed(&mut self) {
        self.executed = true;
        self.executed_at = Some(Utc::now());
    }
}
