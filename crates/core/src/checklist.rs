// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Checklist items embedded in a note.
//!
//! A [`Checklist`] is an immutable value: every edit returns a new list and
//! leaves the receiver untouched. Item text may be empty while it is being
//! edited; [`Checklist::validate`] is the gate applied when the note is
//! submitted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::item_id::{ClockSource, ItemIdClock, ITEM_IDS};

/// One entry in a checklist note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Unique within the owning note.
    #[serde(default)]
    pub id: String,
    /// Item label.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl ChecklistItem {
    /// Creates an open item with the given id and text.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        ChecklistItem { id: id.into(), text: text.into(), is_completed: false }
    }
}

/// Ordered list of checklist items. Order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new() -> Self {
        Checklist::default()
    }

    pub fn from_items(items: Vec<ChecklistItem>) -> Self {
        Checklist { items }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ChecklistItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed).count()
    }

    /// Appends a blank, open item with a fresh id.
    ///
    /// Returns the new list and the id of the added item.
    pub fn add_item(&self) -> (Checklist, String) {
        self.add_item_with(&ITEM_IDS)
    }

    /// Like [`Checklist::add_item`], drawing ids from the given clock.
    pub fn add_item_with<C: ClockSource>(&self, ids: &ItemIdClock<C>) -> (Checklist, String) {
        let mut id = ids.next_id();
        while self.contains(&id) {
            id = ids.next_id();
        }
        let mut items = self.items.clone();
        items.push(ChecklistItem::new(id.clone(), ""));
        (Checklist { items }, id)
    }

    /// Removes the item with `id`. Unknown ids leave the list unchanged.
    pub fn remove_item(&self, id: &str) -> Checklist {
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Checklist { items }
    }

    /// Replaces the text of the item with `id`.
    pub fn set_text(&self, id: &str, text: &str) -> Checklist {
        self.map_item(id, |item| item.text = text.to_string())
    }

    /// Flips the completion flag of the item with `id`.
    pub fn toggle_completed(&self, id: &str) -> Checklist {
        self.map_item(id, |item| item.is_completed = !item.is_completed)
    }

    fn map_item(&self, id: &str, f: impl Fn(&mut ChecklistItem)) -> Checklist {
        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut item| {
                if item.id == id {
                    f(&mut item);
                }
                item
            })
            .collect();
        Checklist { items }
    }

    /// Assigns fresh ids to items that arrived without one.
    pub fn fill_missing_ids(&self) -> Checklist {
        let mut list = self.clone();
        for index in 0..list.items.len() {
            if list.items[index].id.trim().is_empty() {
                let mut id = ITEM_IDS.next_id();
                while list.contains(&id) {
                    id = ITEM_IDS.next_id();
                }
                list.items[index].id = id;
            }
        }
        list
    }

    /// Checks the list is fit to persist.
    ///
    /// Ids must be present and unique regardless of note kind. Item text must
    /// be non-blank only when the note is a checklist note.
    pub fn validate(&self, is_checklist: bool) -> Result<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if item.id.trim().is_empty() {
                return Err(Error::validation("Invalid todo items format"));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(Error::validation(format!("duplicate item id: {}", item.id)));
            }
        }

        if is_checklist && self.items.iter().any(|item| item.text.trim().is_empty()) {
            return Err(Error::validation("empty item"));
        }
        Ok(())
    }
}

impl From<Vec<ChecklistItem>> for Checklist {
    fn from(items: Vec<ChecklistItem>) -> Self {
        Checklist::from_items(items)
    }
}

impl<'a> IntoIterator for &'a Checklist {
    type Item = &'a ChecklistItem;
    type IntoIter = std::slice::Iter<'a, ChecklistItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "checklist_tests.rs"]
mod tests;
