// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn groceries() -> Checklist {
    Checklist::from_items(vec![
        ChecklistItem::new("1", "Milk"),
        ChecklistItem::new("2", "Eggs"),
        ChecklistItem::new("3", "Bread"),
    ])
}

#[test]
fn add_item_appends_blank_item() {
    let list = groceries();
    let (added, id) = list.add_item();

    assert_eq!(added.len(), list.len() + 1);
    let last = added.items().last().unwrap();
    assert_eq!(last.id, id);
    assert_eq!(last.text, "");
    assert!(!last.is_completed);
    // Receiver is untouched.
    assert_eq!(list, groceries());
}

#[test]
fn rapid_adds_produce_distinct_ids() {
    let mut list = Checklist::new();
    for _ in 0..200 {
        list = list.add_item().0;
    }
    assert!(list.validate(false).is_ok());
    assert_eq!(list.len(), 200);
}

#[test]
fn add_then_remove_round_trips() {
    let list = groceries();
    let (added, id) = list.add_item();
    assert_eq!(added.remove_item(&id), list);
}

#[test]
fn remove_unknown_id_is_noop() {
    assert_eq!(groceries().remove_item("missing"), groceries());
}

#[test]
fn set_text_changes_only_target() {
    let list = groceries().set_text("2", "Free-range eggs");

    let texts: Vec<&str> = list.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["Milk", "Free-range eggs", "Bread"]);
    assert!(list.items().iter().all(|i| !i.is_completed));
}

#[test]
fn toggle_flips_only_target() {
    let list = groceries().toggle_completed("3");
    let flags: Vec<bool> = list.items().iter().map(|i| i.is_completed).collect();
    assert_eq!(flags, [false, false, true]);

    let back = list.toggle_completed("3");
    assert_eq!(back, groceries());
}

#[test]
fn completed_count() {
    let list = groceries().toggle_completed("1").toggle_completed("2");
    assert_eq!(list.completed_count(), 2);
}

#[parameterized(
    empty = { "" },
    spaces = { "   " },
    tab_newline = { "\t\n" },
)]
fn validate_rejects_blank_text(text: &str) {
    let list = groceries().set_text("2", text);
    let err = list.validate(true).unwrap_err();
    assert_eq!(err.to_string(), "empty item");
}

#[test]
fn validate_accepts_non_blank_text() {
    assert!(groceries().validate(true).is_ok());
}

#[test]
fn validate_ignores_blank_text_for_plain_notes() {
    let list = groceries().set_text("1", "");
    assert!(list.validate(false).is_ok());
}

#[test]
fn validate_rejects_duplicate_ids() {
    let list = Checklist::from_items(vec![
        ChecklistItem::new("a", "one"),
        ChecklistItem::new("a", "two"),
    ]);
    assert!(matches!(list.validate(true), Err(Error::Validation(_))));
}

#[test]
fn validate_rejects_missing_id() {
    let list = Checklist::from_items(vec![ChecklistItem::new("", "one")]);
    assert!(matches!(list.validate(true), Err(Error::Validation(_))));
}

#[test]
fn serializes_as_plain_array() {
    let list = Checklist::from_items(vec![ChecklistItem::new("1", "Milk")]);
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, r#"[{"id":"1","text":"Milk","isCompleted":false}]"#);
}

#[test]
fn deserializes_with_missing_optional_fields() {
    let list: Checklist = serde_json::from_str(r#"[{"id":"x"}]"#).unwrap();
    assert_eq!(list.items()[0], ChecklistItem::new("x", ""));
}

#[test]
fn fill_missing_ids_keeps_existing_ids() {
    let list: Checklist =
        serde_json::from_str(r#"[{"text":"Milk"},{"id":"7","text":"Eggs"},{"text":"Tea"}]"#).unwrap();
    let filled = list.fill_missing_ids();

    assert_eq!(filled.items()[1].id, "7");
    assert!(!filled.items()[0].id.is_empty());
    assert_ne!(filled.items()[0].id, filled.items()[2].id);
    assert!(filled.validate(true).is_ok());
}
