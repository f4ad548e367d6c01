//! Stable identifier derivation for features.

use sha2::Digest;
use sha2::Sha256;

/// Length, in hex characters, of a feature id.
pub const FEATURE_ID_LEN: usize = 16;

/// Derives a stable id for a root feature from its title.
pub fn root_feature_id(title: &str) -> String {
    hash_to_id(title.as_bytes())
}

/// Derives a stable id for a child feature from its parent id and title.
pub fn child_feature_id(parent_id: &str, title: &str) -> String {
    let joined = format!("{parent_id}:{title}");
    hash_to_id(joined.as_bytes())
}

fn hash_to_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let hex = hex_encode(&digest);
    hex[..FEATURE_ID_LEN].to_string()
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
#[path = "ids.test.rs"]
mod tests;
