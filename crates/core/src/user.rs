// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Accounts that own notes.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// A registered account. The email is the owner key on every note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    /// PHC-format password hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        User { email, password_hash, created_at }
    }
}

/// Trims an email and checks it looks like one.
pub fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(Error::validation("A valid email is required"));
    }
    Ok(email.to_string())
}

/// Passwords must not be blank. Nothing else is enforced.
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().is_empty() {
        return Err(Error::validation("Password is required"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
