//! Recoverable signature verification
//!
//! Signatures are 65 bytes: `r (32) || s (32) || v (1)`. A batch is a raw
//! concatenation of such signatures with no separators.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1};

use super::address::Address;
use super::hash::personal_message_hash;
use super::keys::KeyError;

/// Length of a single packed signature in bytes
pub const SIGNATURE_LENGTH: usize = 65;

/// Recover the address that signed `digest`
///
/// The signed message is the personal-message hash of the digest. Accepts
/// `v` encoded either as `{0, 1}` or `{27, 28}`.
pub fn recover_signer(digest: &[u8; 32], signature: &[u8]) -> Result<Address, KeyError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(KeyError::InvalidSignature);
    }

    let v = match signature[64] {
        v @ (0 | 1) => v,
        v @ (27 | 28) => v - 27,
        _ => return Err(KeyError::InvalidSignature),
    };
    let recovery_id = RecoveryId::from_i32(v as i32).map_err(|_| KeyError::InvalidSignature)?;
    let recoverable = RecoverableSignature::from_compact(&signature[..64], recovery_id)
        .map_err(|_| KeyError::InvalidSignature)?;

    let message = Message::from_digest_slice(&personal_message_hash(digest))?;
    let public_key = Secp256k1::verification_only()
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| KeyError::InvalidSignature)?;

    Ok(Address::from_public_key(&public_key))
}

/// Split a packed batch and recover every signer in order
///
/// Only the batch length is validated up front. Each chunk gets its own
/// recovery result, so one unusable signature does not hide the others.
/// Duplicates are preserved. Membership filtering is left to the caller.
pub fn verify_batch(
    digest: &[u8; 32],
    packed: &[u8],
) -> Result<Vec<Result<Address, KeyError>>, KeyError> {
    if packed.len() % SIGNATURE_LENGTH != 0 {
        return Err(KeyError::MalformedBatch {
            length: packed.len(),
        });
    }

    Ok(packed
        .chunks_exact(SIGNATURE_LENGTH)
        .map(|chunk| recover_signer(digest, chunk))
        .collect())
}
