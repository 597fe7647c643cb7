// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! nk-core: Shared library for the notekeep note service
//!
//! This crate provides the note model, the status lifecycle, checklist
//! editing, accounts, the SQLite store, and the wire protocol used by both
//! the notekeep server and its clients.

pub mod checklist;
pub mod db;
pub mod error;
pub mod id;
pub mod item_id;
pub mod note;
pub mod protocol;
pub mod status;
pub mod user;

pub use checklist::{Checklist, ChecklistItem};
pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use note::Note;
pub use protocol::{ListFilter, NotePatch};
pub use status::{Status, StatusAction};
pub use user::User;
