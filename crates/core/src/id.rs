// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note identifier generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Prefix shared by all note ids.
pub const NOTE_ID_PREFIX: &str = "n";

/// Generate a note ID from owner, title, and creation time.
/// Format: n-{hash} where hash is first 8 hex chars of SHA256(owner + title + timestamp)
pub fn generate_id(owner: &str, title: &str, created_at: &DateTime<Utc>) -> String {
    let nanos = created_at.timestamp_nanos_opt().unwrap_or_default();
    let input = format!("{}\u{1f}{}\u{1f}{}", owner, title, nanos);
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", NOTE_ID_PREFIX, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_id<F>(
    owner: &str,
    title: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> String
where
    F: FnMut(&str) -> bool,
{
    let base_id = generate_id(owner, title, created_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
