//! Owner registry and wallet configuration
//!
//! The registry is the fixed set of addresses allowed to act on the wallet
//! together with the number of confirmations (M) required to execute.

use crate::crypto::Address;
use crate::multisig::error::MultisigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Configuration used to construct a wallet
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WalletConfig {
    /// Authorized owner addresses (N)
    pub owners: Vec<Address>,
    /// Minimum confirmations required (M in M-of-N)
    pub required_confirmations: usize,
    /// Optional human-readable label
    #[serde(default)]
    pub label: Option<String>,
}

impl WalletConfig {
    pub fn new(owners: Vec<Address>, required_confirmations: usize, label: Option<String>) -> Self {
        Self {
            owners,
            required_confirmations,
            label,
        }
    }
}

/// Immutable set of owners plus the approval threshold
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerRegistry {
    owners: Vec<Address>,
    members: BTreeSet<Address>,
    required: usize,
}

impl OwnerRegistry {
    /// Create a registry
    ///
    /// # Errors
    /// `EmptyOwnerSet` for no owners, `DuplicateOwner` for repeats and
    /// `InvalidThreshold` unless `1 <= required <= owners.len()`.
    pub fn new(owners: Vec<Address>, required: usize) -> Result<Self, MultisigError> {
        if owners.is_empty() {
            return Err(MultisigError::EmptyOwnerSet);
        }

        let mut members = BTreeSet::new();
        for owner in &owners {
            if !members.insert(*owner) {
                return Err(MultisigError::DuplicateOwner(*owner));
            }
        }

        if required == 0 || required > owners.len() {
            return Err(MultisigError::InvalidThreshold {
                required,
                owners: owners.len(),
            });
        }

        Ok(Self {
            owners,
            members,
            required,
        })
    }

    /// Create a registry from a wallet configuration
    pub fn from_config(config: &WalletConfig) -> Result<Self, MultisigError> {
        Self::new(config.owners.clone(), config.required_confirmations)
    }

    /// Check if an address is an owner
    pub fn is_owner(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// All owners, in the order they were configured
    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    /// Required confirmations (M)
    pub fn threshold(&self) -> usize {
        self.required
    }

    /// Total owner count (N)
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Get description like "4-of-6"
    pub fn description(&self) -> String {
        format!("{}-of-{}", self.required, self.owners.len())
    }
}
