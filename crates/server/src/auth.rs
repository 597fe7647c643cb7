// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request owner identity.
//!
//! The owner is the `email` query parameter. A request may also carry a
//! bearer token; when it does, the token must be valid and issued for that
//! same email. Servers configured with `require_token` reject requests
//! without one.

use std::time::SystemTime;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Deserialize;

use crate::error::Error;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
struct OwnerQuery {
    #[serde(default)]
    email: Option<String>,
}

/// Email of the account a request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<ServerState> for Owner {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<OwnerQuery>::try_from_uri(&parts.uri)
            .map_err(|e| Error::MalformedQuery(e.body_text()))?;

        let email = match query.email.map(|email| email.trim().to_string()) {
            Some(email) if !email.is_empty() => email,
            _ => return Err(nk_core::Error::validation("Email parameter is required").into()),
        };

        match bearer_token(&parts.headers)? {
            Some(token) => {
                let subject = state.tokens().verify(token, SystemTime::now())?;
                if subject != email {
                    return Err(Error::Forbidden("Token does not match email".to_string()));
                }
            }
            None if state.require_token() => {
                return Err(Error::Unauthorized("Authorization token is required".to_string()));
            }
            None => {}
        }

        Ok(Owner(email))
    }
}

/// The token from an `Authorization: Bearer` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, Error> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Unauthorized("Malformed authorization header".to_string()))?;
    Ok(Some(token))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
