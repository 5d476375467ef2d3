//! Checksum calculation for snapshot versioning.

use sha2::{Digest, Sha256};

/// Calculate the SHA-256 checksum of serialized document content.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checksum over several documents, each prefixed by its name.
///
/// The same documents in the same order always give the same version.
pub fn snapshot_checksum<'a, I>(documents: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut hasher = Sha256::new();
    for (name, content) in documents {
        hasher.update(name.as_bytes());
        hasher.update([0u8]);
        hasher.update(content.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
