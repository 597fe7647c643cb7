// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use nk_core::{Note, Status};

/// Maximum line width for wrapped text content (excluding 4-space indent).
const WRAP_WIDTH: usize = 96;

/// Wrap text at word boundaries if it's a single line.
///
/// - If content contains newlines: return as-is (preserve user formatting)
/// - If content is single line >width: wrap at word boundaries
/// - If content is single line <=width: return as-is
pub fn wrap_text(content: &str, width: usize) -> String {
    if content.contains('\n') || content.chars().count() <= width {
        return content.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in content.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// One-line summary used by `list`.
///
/// ```text
/// n-1a2b3c4d  Groceries  [1/2 done]
/// n-5e6f7a8b  Plan  (archived)
/// ```
pub fn format_note_line(note: &Note) -> String {
    let mut line = format!("{}  {}", note.id, note.title);
    if note.is_checklist {
        line.push_str(&format!("  [{}/{} done]", note.todos.completed_count(), note.todos.len()));
    }
    if note.status != Status::Home {
        line.push_str(&format!("  ({})", note.status));
    }
    line
}

/// Full rendering used by `show`.
pub fn format_note_detail(note: &Note) -> Vec<String> {
    let mut lines = vec![
        format!("[{}] {}", note.status, note.title),
        format!("  id: {}", note.id),
        format!("  created: {}", note.created_at.format("%Y-%m-%d %H:%M")),
    ];
    if note.updated_at != note.created_at {
        lines.push(format!("  updated: {}", note.updated_at.format("%Y-%m-%d %H:%M")));
    }
    lines.push(String::new());

    if note.is_checklist {
        for item in &note.todos {
            let mark = if item.is_completed { "x" } else { " " };
            lines.push(format!("    [{}] {}  ({})", mark, item.text, item.id));
        }
    } else {
        for line in wrap_text(&note.content, WRAP_WIDTH).lines() {
            lines.push(format!("    {}", line));
        }
    }
    lines
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
