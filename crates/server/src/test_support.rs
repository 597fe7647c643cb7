// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for server tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use argon2::Params;
use nk_core::Database;

use crate::hasher::Argon2Hasher;
use crate::state::ServerState;
use crate::token::TokenIssuer;

/// Argon2 at minimum cost so tests stay fast.
pub fn fast_hasher() -> Argon2Hasher {
    Argon2Hasher::new(Params::new(8, 1, 1, None).unwrap())
}

pub fn test_tokens() -> TokenIssuer {
    TokenIssuer::from_secret(&[7u8; 32], Duration::from_secs(3600)).unwrap()
}

pub fn test_state(db: Database, require_token: bool) -> ServerState {
    ServerState::new(db, Arc::new(fast_hasher()), test_tokens(), require_token)
}
