// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Password hashing.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::config::HasherConfig;
use crate::error::{Error, Result};

/// Turns passwords into stored hashes and checks them later.
pub trait Hasher: Send + Sync {
    fn generate_hash(&self, password: &str) -> Result<String>;

    /// False for a wrong password and for a hash that cannot be parsed.
    fn check_hash(&self, hash: &str, password: &str) -> bool;
}

/// Argon2id with configurable cost.
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(params: Params) -> Self {
        Argon2Hasher { params }
    }

    pub fn from_config(config: &HasherConfig) -> Result<Self> {
        let params = Params::new(
            config.argon2_m_cost,
            config.argon2_t_cost,
            config.argon2_p_cost,
            None,
        )
        .map_err(|e| Error::Config(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self::new(params))
    }

    fn hasher(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    fn make_salt() -> Result<SaltString> {
        let bytes: [u8; 16] = rand::random();
        SaltString::encode_b64(&bytes).map_err(|e| Error::Hash(e.to_string()))
    }
}

impl Hasher for Argon2Hasher {
    fn generate_hash(&self, password: &str) -> Result<String> {
        let salt = Self::make_salt()?;
        let hash = self
            .hasher()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Hash(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn check_hash(&self, hash: &str, password: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.hasher().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "hasher_tests.rs"]
mod tests;
