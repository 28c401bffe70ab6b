//! Per-transaction confirmation bookkeeping

use crate::crypto::Address;
use crate::multisig::owners::OwnerRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which owners have approved a single transaction
///
/// A missing entry and a `false` entry both mean "not confirmed".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfirmationSet {
    confirmations: BTreeMap<Address, bool>,
}

impl ConfirmationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_confirmed(&self, owner: &Address) -> bool {
        self.confirmations.get(owner).copied().unwrap_or(false)
    }

    /// Mark `owner` as confirmed. Returns `true` if the state changed.
    pub fn confirm(&mut self, owner: Address) -> bool {
        let previous = self.confirmations.insert(owner, true);
        previous != Some(true)
    }

    /// Clear `owner`'s confirmation. Returns `true` if the state changed.
    pub fn revoke(&mut self, owner: &Address) -> bool {
        match self.confirmations.get_mut(owner) {
            Some(state) if *state => {
                *state = false;
                true
            }
            _ => false,
        }
    }

    /// Number of registry owners currently confirmed
    pub fn count(&self, registry: &OwnerRegistry) -> usize {
        registry
            .owners()
            .iter()
            .filter(|owner| self.is_confirmed(owner))
            .count()
    }

    /// Confirmed owners, in registry order
    pub fn confirmed_by(&self, registry: &OwnerRegistry) -> Vec<Address> {
        registry
            .owners()
            .iter()
            .filter(|owner| self.is_confirmed(owner))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;

    fn registry(n: usize, m: usize) -> OwnerRegistry {
        let owners = (0..n).map(|_| KeyPair::generate().address()).collect();
        OwnerRegistry::new(owners, m).unwrap()
    }

    #[test]
    fn test_defaults_to_unconfirmed() {
        let set = ConfirmationSet::new();
        assert!(!set.is_confirmed(&Address::ZERO));
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let reg = registry(3, 2);
        let owner = reg.owners()[0];
        let mut set = ConfirmationSet::new();

        assert!(set.confirm(owner));
        assert!(!set.confirm(owner));
        assert_eq!(set.count(&reg), 1);
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let reg = registry(3, 2);
        let owner = reg.owners()[1];
        let mut set = ConfirmationSet::new();

        assert!(!set.revoke(&owner));
        set.confirm(owner);
        assert!(set.revoke(&owner));
        assert!(!set.revoke(&owner));
        assert!(!set.is_confirmed(&owner));
        assert_eq!(set.count(&reg), 0);
    }

    #[test]
    fn test_count_ignores_non_owners() {
        let reg = registry(3, 2);
        let mut set = ConfirmationSet::new();

        set.confirm(reg.owners()[0]);
        set.confirm(KeyPair::generate().address());
        assert_eq!(set.count(&reg), 1);
    }

    #[test]
    fn test_confirmed_by_follows_registry_order() {
        let reg = registry(4, 2);
        let mut set = ConfirmationSet::new();

        set.confirm(reg.owners()[3]);
        set.confirm(reg.owners()[1]);
        assert_eq!(set.confirmed_by(&reg), vec![reg.owners()[1], reg.owners()[3]]);
    }
}
