// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP routes.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use tower_http::trace::TraceLayer;

use nk_core::protocol::{
    format_uptime, parse_body, AccountResponse, ChangePasswordRequest, CreateNoteRequest,
    CreateNoteResponse, Credentials, DeleteNoteResponse, HealthResponse, ListQuery, TokenResponse,
    UpdateNoteResponse,
};
use nk_core::{Note, NotePatch};

use crate::auth::{bearer_token, Owner};
use crate::error::{Error, Result};
use crate::{accounts, service};
use crate::state::ServerState;

/// Builds the application router over `state`.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", post(register))
        .route("/login", post(login))
        .route("/jwt", post(refresh_token))
        .route("/change-password", post(change_password))
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).patch(update_note).delete(delete_note))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: format_uptime(state.uptime().as_secs()),
    })
}

async fn register(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let credentials: Credentials = parse_body(&body)?;
    accounts::register(&state, credentials).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::ok("User created"))))
}

async fn login(State(state): State<ServerState>, body: Bytes) -> Result<Json<TokenResponse>> {
    let credentials: Credentials = parse_body(&body)?;
    let token = accounts::login(&state, credentials).await?;
    Ok(Json(TokenResponse { token }))
}

async fn refresh_token(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>> {
    let token = bearer_token(&headers)?
        .ok_or_else(|| Error::Unauthorized("Authorization token is required".to_string()))?;
    let token = accounts::refresh(&state, token).await?;
    Ok(Json(TokenResponse { token }))
}

async fn change_password(
    State(state): State<ServerState>,
    owner: Owner,
    body: Bytes,
) -> Result<Json<AccountResponse>> {
    let request: ChangePasswordRequest = parse_body(&body)?;
    accounts::change_password(&state, owner.as_str(), request).await?;
    Ok(Json(AccountResponse::ok("Password changed successfully")))
}

async fn create_note(
    State(state): State<ServerState>,
    owner: Owner,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateNoteResponse>)> {
    let request: CreateNoteRequest = parse_body(&body)?;
    let note = state
        .with_db(|db| service::create_note(db, owner.as_str(), request, Utc::now()))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteResponse { acknowledged: true, inserted_id: note.id }),
    ))
}

async fn list_notes(
    State(state): State<ServerState>,
    owner: Owner,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>> {
    let Query(query) = query.map_err(|e| Error::MalformedQuery(e.body_text()))?;
    let filter = query.into_filter()?;
    let notes = state.with_db(|db| service::list_notes(db, owner.as_str(), &filter)).await?;
    Ok(Json(notes))
}

async fn get_note(
    State(state): State<ServerState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<Note>> {
    let note = state.with_db(|db| service::get_note(db, owner.as_str(), &id)).await?;
    Ok(Json(note))
}

async fn update_note(
    State(state): State<ServerState>,
    owner: Owner,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UpdateNoteResponse>> {
    let patch: NotePatch = parse_body(&body)?;
    let note = state
        .with_db(|db| service::update_note(db, owner.as_str(), &id, patch, Utc::now()))
        .await?;

    Ok(Json(UpdateNoteResponse {
        success: true,
        message: Some("Note updated successfully".to_string()),
        note: Some(note),
    }))
}

async fn delete_note(
    State(state): State<ServerState>,
    owner: Owner,
    Path(id): Path<String>,
) -> Result<Json<DeleteNoteResponse>> {
    state.with_db(|db| service::delete_note(db, owner.as_str(), &id)).await?;
    Ok(Json(DeleteNoteResponse {
        success: true,
        message: Some("Note deleted successfully".to_string()),
    }))
}
