// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Signed access tokens.
//!
//! Tokens are HS256 JWTs whose subject is the account email. They expire
//! after a fixed lifetime and are not revocable.

use std::time::{Duration, SystemTime};

use josekit::jws::alg::hmac::{HmacJwsAlgorithm, HmacJwsSigner, HmacJwsVerifier};
use josekit::jws::JwsHeader;
use josekit::jwt::{self, JwtPayload};
use tracing::debug;

use crate::error::{Error, Result};

/// Shortest accepted signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Issues and checks access tokens with one shared secret.
pub struct TokenIssuer {
    signer: HmacJwsSigner,
    verifier: HmacJwsVerifier,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(Error::Config(format!(
                "token secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Ok(TokenIssuer {
            signer: HmacJwsAlgorithm::Hs256
                .signer_from_bytes(secret)
                .map_err(|e| Error::Token(e.to_string()))?,
            verifier: HmacJwsAlgorithm::Hs256
                .verifier_from_bytes(secret)
                .map_err(|e| Error::Token(e.to_string()))?,
            ttl,
        })
    }

    /// An issuer with a random secret. Its tokens die with the process.
    pub fn random(ttl: Duration) -> Result<Self> {
        let secret: [u8; MIN_SECRET_LEN] = rand::random();
        Self::from_secret(&secret, ttl)
    }

    pub fn issue(&self, email: &str, now: SystemTime) -> Result<String> {
        let mut payload = JwtPayload::new();
        payload.set_subject(email);
        payload.set_issued_at(&now);
        payload.set_expires_at(&(now + self.ttl));

        let mut header = JwsHeader::new();
        header.set_token_type("JWT");
        jwt::encode_with_signer(&payload, &header, &self.signer).map_err(|e| Error::Token(e.to_string()))
    }

    /// Returns the email a valid, unexpired token was issued for.
    pub fn verify(&self, token: &str, now: SystemTime) -> Result<String> {
        let (payload, _) = jwt::decode_with_verifier(token, &self.verifier).map_err(|e| {
            debug!("rejected token: {}", e);
            invalid_token()
        })?;

        match payload.expires_at() {
            Some(expires_at) if expires_at > now => {}
            _ => return Err(invalid_token()),
        }
        payload.subject().map(str::to_string).ok_or_else(invalid_token)
    }
}

fn invalid_token() -> Error {
    Error::Unauthorized("Invalid or expired token".to_string())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
