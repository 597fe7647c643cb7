// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_support::fast_hasher;

#[test]
fn hash_verifies_only_its_password() {
    let hasher = fast_hasher();
    let hash = hasher.generate_hash("hunter22").unwrap();

    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.check_hash(&hash, "hunter22"));
    assert!(!hasher.check_hash(&hash, "hunter23"));
}

#[test]
fn same_password_gets_a_fresh_salt() {
    let hasher = fast_hasher();
    assert_ne!(hasher.generate_hash("pw").unwrap(), hasher.generate_hash("pw").unwrap());
}

#[test]
fn unparseable_hash_never_matches() {
    assert!(!fast_hasher().check_hash("plain-text", "plain-text"));
}

#[test]
fn zero_cost_config_is_rejected() {
    let config = HasherConfig { argon2_t_cost: 0, ..HasherConfig::default() };
    assert!(matches!(Argon2Hasher::from_config(&config), Err(Error::Config(_))));
}
