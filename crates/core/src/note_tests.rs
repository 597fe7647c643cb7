// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::checklist::ChecklistItem;
use chrono::TimeZone;
use yare::parameterized;

fn sample() -> Note {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
    let mut note = Note::new("n-0a1b2c3d".into(), "ann@example.com".into(), "Groceries".into(), created);
    note.is_checklist = true;
    note.todos = Checklist::from_items(vec![ChecklistItem::new("1", "Milk")]);
    note
}

#[test]
fn new_note_is_home() {
    let note = sample();
    assert_eq!(note.status, Status::Home);
    assert_eq!(note.created_at, note.updated_at);
    assert!(!note.is_archived());
    assert!(!note.is_trashed());
}

#[test]
fn serializes_status_as_flags() {
    let mut note = sample();
    note.status = Status::Archived;
    let json = serde_json::to_value(&note).unwrap();

    assert_eq!(json["isArchived"], true);
    assert_eq!(json["isTrashed"], false);
    assert_eq!(json["isChecklist"], true);
    assert_eq!(json["todos"][0]["text"], "Milk");
    assert!(json.get("status").is_none());
}

#[test]
fn deserializes_from_wire_json() {
    let note: Note = serde_json::from_str(
        r#"{
            "id": "n-1",
            "email": "ann@example.com",
            "title": "Plan",
            "content": "Write the plan",
            "isTodo": false,
            "isArchived": false,
            "isTrashed": true,
            "createdAt": "2026-03-01T09:30:00Z",
            "updatedAt": "2026-03-02T10:00:00Z"
        }"#,
    )
    .unwrap();

    assert_eq!(note.owner, "ann@example.com");
    assert_eq!(note.status, Status::Trashed);
    assert!(note.todos.is_empty());
}

#[test]
fn rejects_both_flags_on_input() {
    let result = serde_json::from_str::<Note>(
        r#"{"id":"n-1","owner":"a","title":"t","isArchived":true,"isTrashed":true,
            "createdAt":"2026-03-01T09:30:00Z","updatedAt":"2026-03-01T09:30:00Z"}"#,
    );
    assert!(result.is_err());
}

#[parameterized(
    title_match = { "groc", true },
    title_case = { "GROCERIES", true },
    content_match = { "urgent", true },
    item_only = { "milk", false },
    miss = { "bank", false },
)]
fn matches_search(term: &str, expected: bool) {
    let mut note = sample();
    note.content = "Urgent: before Friday".into();
    assert_eq!(note.matches_search(term), expected);
}

#[test]
fn body_follows_note_kind() {
    let mut note = sample();
    assert!(note.has_body());

    note.content = "stray text".into();
    note.todos = Checklist::new();
    assert!(!note.has_body());

    note.is_checklist = false;
    assert!(note.has_body());
    note.content = "  ".into();
    assert!(!note.has_body());
}
