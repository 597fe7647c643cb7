// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    empty = { "" },
    blank = { "   " },
    no_at = { "ann.example.com" },
)]
fn new_rejects_bad_email(email: &str) {
    assert!(matches!(Session::new(email, None), Err(Error::InvalidEmail(_))));
}

#[test]
fn new_trims_email() {
    let session = Session::new("  ann@example.com ", None).unwrap();
    assert_eq!(session.email, "ann@example.com");
}

#[test]
fn load_without_file_is_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    assert_eq!(store.load().unwrap(), None);
    assert!(matches!(store.require(), Err(Error::NotLoggedIn)));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(&dir.path().join("nested"));
    let session = Session::new("ann@example.com", Some("tok".into())).unwrap();

    store.save(&session).unwrap();
    assert_eq!(store.require().unwrap(), session);
}

#[test]
fn token_is_omitted_when_absent() {
    let session = Session::new("ann@example.com", None).unwrap();
    let json = serde_json::to_string(&session).unwrap();
    assert_eq!(json, r#"{"email":"ann@example.com"}"#);
}

#[test]
fn clear_removes_session() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path());
    store.save(&Session::new("ann@example.com", None).unwrap()).unwrap();

    assert!(store.clear().unwrap());
    assert!(!store.path().exists());
    assert!(!store.clear().unwrap());
}
