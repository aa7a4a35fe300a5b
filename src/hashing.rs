//! Content digests for deduplication and chain-of-custody integrity.
//!
//! Digests are computed over the complete buffer and always populated,
//! independent of classification or quality outcome: corrupted or
//! encrypted evidence must still be deduplicable.

use sha2::{Digest, Sha256};

/// Computes the MD5 digest of the given data and returns it as a hex string.
///
/// MD5 is kept for interoperability with legacy review platforms that key
/// deduplication on it; it is not used as an integrity guarantee.
pub fn md5_digest(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

/// Computes the SHA-256 digest of the given data and returns it as a hex string.
pub fn sha256_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
