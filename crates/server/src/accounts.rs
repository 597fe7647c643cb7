// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Account registration, login and password changes.

use std::time::SystemTime;

use chrono::Utc;
use tracing::{debug, info};

use nk_core::protocol::{ChangePasswordRequest, Credentials};
use nk_core::user::{normalize_email, validate_password};
use nk_core::User;

use crate::error::{Error, Result};
use crate::state::ServerState;

/// Creates an account. Fails with a conflict when the email is taken.
pub async fn register(state: &ServerState, credentials: Credentials) -> Result<()> {
    let email = normalize_email(&credentials.email)?;
    validate_password(&credentials.password)?;

    let password_hash = state.hash_password(credentials.password).await?;
    let user = User::new(email, password_hash, Utc::now());
    state.with_db(|db| db.create_user(&user)).await?;
    info!(email = %user.email, "account registered");
    Ok(())
}

/// Checks credentials and returns a fresh token.
pub async fn login(state: &ServerState, credentials: Credentials) -> Result<String> {
    let email = normalize_email(&credentials.email)?;
    let user = match state.with_db(|db| db.get_user(&email)).await {
        Ok(user) => user,
        Err(nk_core::Error::UserNotFound(_)) => return Err(invalid_credentials()),
        Err(e) => return Err(e.into()),
    };

    if !state.check_password(user.password_hash, credentials.password).await? {
        debug!(email = %email, "login rejected");
        return Err(invalid_credentials());
    }
    state.tokens().issue(&email, SystemTime::now())
}

/// Exchanges a valid token for one with a new expiry.
pub async fn refresh(state: &ServerState, token: &str) -> Result<String> {
    let now = SystemTime::now();
    let email = state.tokens().verify(token, now)?;
    if !state.with_db(|db| db.user_exists(&email)).await? {
        return Err(nk_core::Error::UserNotFound(email).into());
    }
    state.tokens().issue(&email, now)
}

pub async fn change_password(
    state: &ServerState,
    email: &str,
    request: ChangePasswordRequest,
) -> Result<()> {
    validate_password(&request.new_password)?;
    let user = state.with_db(|db| db.get_user(email)).await?;
    if !state.check_password(user.password_hash, request.current_password).await? {
        return Err(Error::Unauthorized("Current password does not match".to_string()));
    }

    let password_hash = state.hash_password(request.new_password).await?;
    state.with_db(|db| db.set_password_hash(email, &password_hash)).await?;
    info!(email, "password changed");
    Ok(())
}

fn invalid_credentials() -> Error {
    Error::Unauthorized("Invalid credentials".to_string())
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
