//! Cryptographic hashing utilities for the wallet
//!
//! Provides Keccak-256 based hashing used for transaction digests,
//! owner addresses and signed-message prefixes.

use tiny_keccak::{Hasher, Keccak};

/// Prefix applied to a 32-byte digest before it is signed.
///
/// Matches the `personal_sign` convention so signatures produced by common
/// wallet tooling verify here without conversion.
pub const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Computes Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}

/// Computes Keccak-256 hash and returns it as a hex string
pub fn keccak256_hex(data: &[u8]) -> String {
    hex::encode(keccak256(data))
}

/// Hash that is actually signed for a given 32-byte digest
pub fn personal_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(digest);
    hasher.finalize(&mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            keccak256_hex(b""),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak256_hello() {
        let hash = keccak256(b"hello world");
        assert_eq!(hash.len(), 32);
        assert_eq!(
            hex::encode(hash),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        );
    }

    #[test]
    fn test_personal_message_hash_uses_prefix() {
        let digest = keccak256(b"payload");

        let mut prefixed = SIGNED_MESSAGE_PREFIX.to_vec();
        prefixed.extend_from_slice(&digest);

        assert_eq!(personal_message_hash(&digest), keccak256(&prefixed));
        assert_ne!(personal_message_hash(&digest), digest);
    }
}
