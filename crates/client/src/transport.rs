// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for talking to the note service.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use nk_core::protocol::{
    CreateNoteRequest, CreateNoteResponse, ErrorBody, ListQuery, UpdateNoteResponse,
};
use nk_core::{ListFilter, Note, NotePatch};

use crate::session::Session;

/// Error type for transport operations.
///
/// Cloneable so a single in-flight result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server answered 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server answered with any other error status.
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The answer could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by transport calls.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// Note operations against a remote store.
///
/// Every call acts for the session the transport was built with.
pub trait Transport: Send + Sync {
    /// Lists notes matching `filter`, newest first.
    fn list_notes(&self, filter: &ListFilter) -> TransportFuture<'_, Vec<Note>>;

    fn get_note(&self, id: &str) -> TransportFuture<'_, Note>;

    /// Creates a note and returns its id.
    fn create_note(&self, request: CreateNoteRequest) -> TransportFuture<'_, String>;

    /// Applies a patch and returns the updated note.
    fn update_note(&self, id: &str, patch: NotePatch) -> TransportFuture<'_, Note>;

    fn delete_note(&self, id: &str) -> TransportFuture<'_, ()>;
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpTransport {
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(HttpTransport { client, base_url: base_url.trim_end_matches('/').to_string(), session })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder =
            self.client.request(method, url).query(&[("email", self.session.email.as_str())]);
        match &self.session.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

pub(crate) async fn send(builder: RequestBuilder, what: &str) -> TransportResult<Response> {
    let response =
        builder.send().await.map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
    let status = response.status();
    debug!("{} -> {}", what, status);
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    if status == StatusCode::NOT_FOUND {
        Err(TransportError::NotFound(what.to_string()))
    } else {
        Err(TransportError::Rejected { status: status.as_u16(), message })
    }
}

pub(crate) async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> TransportResult<T> {
    response.json().await.map_err(|e| TransportError::Decode(e.to_string()))
}

impl Transport for HttpTransport {
    fn list_notes(&self, filter: &ListFilter) -> TransportFuture<'_, Vec<Note>> {
        let query = ListQuery::from(filter);
        Box::pin(async move {
            let builder = self.request(reqwest::Method::GET, "/notes").query(&query);
            decode(send(builder, "notes").await?).await
        })
    }

    fn get_note(&self, id: &str) -> TransportFuture<'_, Note> {
        let id = id.to_string();
        Box::pin(async move {
            let builder = self.request(reqwest::Method::GET, &format!("/notes/{id}"));
            decode(send(builder, &id).await?).await
        })
    }

    fn create_note(&self, request: CreateNoteRequest) -> TransportFuture<'_, String> {
        Box::pin(async move {
            let builder = self.request(reqwest::Method::POST, "/notes").json(&request);
            let created: CreateNoteResponse = decode(send(builder, "notes").await?).await?;
            Ok(created.inserted_id)
        })
    }

    fn update_note(&self, id: &str, patch: NotePatch) -> TransportFuture<'_, Note> {
        let id = id.to_string();
        Box::pin(async move {
            let builder = self.request(reqwest::Method::PATCH, &format!("/notes/{id}")).json(&patch);
            let updated: UpdateNoteResponse = decode(send(builder, &id).await?).await?;
            updated
                .note
                .ok_or_else(|| TransportError::Decode("update response carried no note".to_string()))
        })
    }

    fn delete_note(&self, id: &str) -> TransportFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            let builder = self.request(reqwest::Method::DELETE, &format!("/notes/{id}"));
            send(builder, &id).await?;
            Ok(())
        })
    }
}
