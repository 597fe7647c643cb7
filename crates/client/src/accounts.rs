// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Account requests: register, login and password change.

use std::time::Duration;

use reqwest::Client;

use nk_core::protocol::{ChangePasswordRequest, Credentials, TokenResponse};

use crate::session::Session;
use crate::transport::{decode, send, TransportError, TransportFuture, TransportResult};

/// Account operations against the note service.
pub trait Accounts: Send + Sync {
    fn register(&self, credentials: Credentials) -> TransportFuture<'_, ()>;

    /// Returns a bearer token for the account.
    fn login(&self, credentials: Credentials) -> TransportFuture<'_, String>;

    /// Acts for the signed-in `session`, sending its token when it has one.
    fn change_password(
        &self,
        session: &Session,
        request: ChangePasswordRequest,
    ) -> TransportFuture<'_, ()>;
}

/// Account requests over HTTP.
pub struct HttpAccounts {
    client: Client,
    base_url: String,
}

impl HttpAccounts {
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(HttpAccounts { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A 404 on an account route is about the user, never a note.
fn user_not_found(e: TransportError) -> TransportError {
    match e {
        TransportError::NotFound(_) => {
            TransportError::Rejected { status: 404, message: "User not found".to_string() }
        }
        other => other,
    }
}

impl Accounts for HttpAccounts {
    fn register(&self, credentials: Credentials) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            let builder = self.client.post(self.url("/users")).json(&credentials);
            send(builder, "users").await.map_err(user_not_found)?;
            Ok(())
        })
    }

    fn login(&self, credentials: Credentials) -> TransportFuture<'_, String> {
        Box::pin(async move {
            let builder = self.client.post(self.url("/login")).json(&credentials);
            let response = send(builder, "login").await.map_err(user_not_found)?;
            let body: TokenResponse = decode(response).await?;
            Ok(body.token)
        })
    }

    fn change_password(
        &self,
        session: &Session,
        request: ChangePasswordRequest,
    ) -> TransportFuture<'_, ()> {
        let session = session.clone();
        Box::pin(async move {
            let mut builder = self
                .client
                .post(self.url("/change-password"))
                .query(&[("email", session.email.as_str())])
                .json(&request);
            if let Some(token) = &session.token {
                builder = builder.bearer_auth(token);
            }
            send(builder, "change-password").await.map_err(user_not_found)?;
            Ok(())
        })
    }
}
