//! Transaction digest construction
//!
//! The digest binds a transaction's parameters to its ledger position.
//! Encoding is `destination (20) || value (32, big-endian) || payload ||
//! id (32, big-endian)`, identical to Solidity's
//! `abi.encodePacked(address, uint256, bytes, uint256)`, then Keccak-256.
//!
//! Both trailers are fixed width so the payload boundaries are implied by
//! the total length, which keeps the encoding injective.

use crate::crypto::{keccak256, Address};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a packed `uint256`
const WORD: usize = 32;

/// 32-byte message digest that owners sign
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl AsRef<[u8; 32]> for Digest {
    fn as_ref(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Left-pad a big-endian integer into a 32-byte word
fn word(be_bytes: &[u8]) -> [u8; WORD] {
    let mut out = [0u8; WORD];
    out[WORD - be_bytes.len()..].copy_from_slice(be_bytes);
    out
}

/// Serialize the signed fields in their packed layout
pub fn encode_packed(destination: &Address, value: u128, payload: &[u8], id: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(20 + WORD + payload.len() + WORD);
    data.extend_from_slice(destination.as_bytes());
    data.extend_from_slice(&word(&value.to_be_bytes()));
    data.extend_from_slice(payload);
    data.extend_from_slice(&word(&id.to_be_bytes()));
    data
}

/// Build the digest for a transaction
pub fn build_digest(destination: &Address, value: u128, payload: &[u8], id: u64) -> Digest {
    Digest(keccak256(&encode_packed(destination, value, payload, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest() -> Address {
        "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".parse().unwrap()
    }

    #[test]
    fn test_packed_layout() {
        let data = encode_packed(&dest(), 0x0102, &[0xaa, 0xbb], 5);

        assert_eq!(data.len(), 20 + 32 + 2 + 32);
        assert_eq!(&data[..20], dest().as_bytes());
        assert!(data[20..50].iter().all(|b| *b == 0));
        assert_eq!(&data[50..52], &[0x01, 0x02]);
        assert_eq!(&data[52..54], &[0xaa, 0xbb]);
        assert!(data[54..85].iter().all(|b| *b == 0));
        assert_eq!(data[85], 5);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = build_digest(&dest(), 10, b"call", 3);
        let b = build_digest(&dest(), 10, b"call", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_changes_digest() {
        let a = build_digest(&dest(), 0, b"same", 5);
        let b = build_digest(&dest(), 0, b"same", 6);
        assert_ne!(a, b);
    }

    #[test]
    fn test_every_field_is_bound() {
        let base = build_digest(&dest(), 1, b"x", 0);
        assert_ne!(base, build_digest(&Address::ZERO, 1, b"x", 0));
        assert_ne!(base, build_digest(&dest(), 2, b"x", 0));
        assert_ne!(base, build_digest(&dest(), 1, b"y", 0));
        assert_ne!(base, build_digest(&dest(), 1, b"", 0));
    }

    #[test]
    fn test_display_is_prefixed_hex() {
        let digest = build_digest(&dest(), 0, &[], 0);
        let shown = digest.to_string();
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.len(), 66);
    }
}
