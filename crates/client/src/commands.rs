// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command implementations.
//!
//! Each command writes its output to the given writer so it can be driven
//! from tests against a mock transport.

use std::io::Write;
use std::sync::Arc;

use nk_core::protocol::{ChangePasswordRequest, CreateNoteRequest, Credentials};
use nk_core::{Checklist, Note, NotePatch};

use crate::accounts::Accounts;
use crate::cache::{Page, QueryCache, ViewKey};
use crate::cli::{Command, OutputFormat, Targets, TodoCommand};
use crate::dispatcher::{Dispatched, Dispatcher, NoteAction};
use crate::display::{format_note_detail, format_note_line};
use crate::error::{Error, Result};
use crate::session::{Session, SessionStore};
use crate::transport::Transport;

/// Everything a signed-in command needs.
pub struct App {
    transport: Arc<dyn Transport>,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let cache = Arc::new(QueryCache::new(Arc::clone(&transport)));
        let dispatcher = Dispatcher::new(Arc::clone(&transport), cache);
        App { transport, dispatcher }
    }

    pub fn cache(&self) -> &QueryCache {
        self.dispatcher.cache()
    }

    /// The page a note currently appears on, as the server reports it.
    async fn page_of(&self, id: &str) -> Result<Page> {
        let note = self.transport.get_note(id).await?;
        Ok(Page::for_status(note.status))
    }
}

pub async fn register(
    accounts: &dyn Accounts,
    email: &str,
    password: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let email = Session::new(email, None)?.email;
    accounts.register(Credentials::new(email.as_str(), password)).await?;
    writeln!(out, "Registered {email}")?;
    Ok(())
}

/// Exchanges the password for a token and saves the session.
pub async fn login(
    accounts: &dyn Accounts,
    store: &SessionStore,
    email: &str,
    password: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let email = Session::new(email, None)?.email;
    let token = accounts.login(Credentials::new(email.as_str(), password)).await?;
    let session = Session::new(&email, Some(token))?;
    store.save(&session)?;
    writeln!(out, "Logged in as {}", session.email)?;
    Ok(())
}

pub async fn passwd(
    accounts: &dyn Accounts,
    store: &SessionStore,
    current: String,
    new_password: String,
    out: &mut dyn Write,
) -> Result<()> {
    let session = store.require()?;
    let request = ChangePasswordRequest { current_password: current, new_password };
    accounts.change_password(&session, request).await?;
    writeln!(out, "Password changed")?;
    Ok(())
}

pub fn logout(store: &SessionStore, out: &mut dyn Write) -> Result<()> {
    if store.clear()? {
        writeln!(out, "Logged out")?;
    } else {
        writeln!(out, "Not logged in")?;
    }
    Ok(())
}

pub fn whoami(store: &SessionStore, out: &mut dyn Write) -> Result<()> {
    let session = store.require()?;
    writeln!(out, "{}", session.email)?;
    Ok(())
}

/// Runs a command that needs the server.
pub async fn execute(app: &App, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::List { page, search, output } => list(app, page, search.as_deref(), output, out).await,
        Command::Show { id, output } => show(app, &id, output, out).await,
        Command::New { title, content, items, output } => {
            new(app, &title, content, &items, output, out).await
        }
        Command::Edit { id, title, content } => edit(app, &id, title, content, out).await,
        Command::Archive(targets) => apply(app, targets, NoteAction::Archive, out).await,
        Command::Trash(targets) => apply(app, targets, NoteAction::Trash, out).await,
        Command::Restore(targets) => apply(app, targets, NoteAction::Restore, out).await,
        Command::Delete(targets) => apply(app, targets, NoteAction::Delete, out).await,
        Command::Todo { command } => todo(app, command, out).await,
        Command::EmptyTrash => empty_trash(app, out).await,
        Command::Register { .. }
        | Command::Login { .. }
        | Command::Passwd { .. }
        | Command::Logout
        | Command::Whoami => Ok(()),
    }
}

fn print_notes(notes: &[Note], output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match output {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(notes)?)?,
        OutputFormat::Text => {
            for note in notes {
                writeln!(out, "{}", format_note_line(note))?;
            }
        }
    }
    Ok(())
}

pub async fn list(
    app: &App,
    page: Page,
    search: Option<&str>,
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let notes = match (page, search) {
        (Page::Home, Some(term)) => app.cache().get(&ViewKey::search(term)).await?,
        // Only the home view is searched server-side.
        (_, Some(term)) if !term.trim().is_empty() => app
            .cache()
            .get(&ViewKey::for_page(page))
            .await?
            .into_iter()
            .filter(|note| note.matches_search(term.trim()))
            .collect(),
        _ => app.cache().get(&ViewKey::for_page(page)).await?,
    };

    if notes.is_empty() && output == OutputFormat::Text {
        writeln!(out, "No notes in {}", page)?;
        return Ok(());
    }
    print_notes(&notes, output, out)
}

pub async fn show(app: &App, id: &str, output: OutputFormat, out: &mut dyn Write) -> Result<()> {
    let note = app.transport.get_note(id).await?;
    match output {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&note)?)?,
        OutputFormat::Text => {
            for line in format_note_detail(&note) {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// Builds a checklist from item texts, assigning fresh ids.
fn checklist_from(items: &[String]) -> Checklist {
    items.iter().fold(Checklist::new(), |list, text| {
        let (list, id) = list.add_item();
        list.set_text(&id, text)
    })
}

pub async fn new(
    app: &App,
    title: &str,
    content: Option<String>,
    items: &[String],
    output: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    let request = if items.is_empty() {
        let content = content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(Error::Validation("Title and content/todos are required".to_string()));
        }
        CreateNoteRequest::plain(title, content)
    } else {
        let todos = checklist_from(items);
        todos.validate(true)?;
        CreateNoteRequest::checklist(title, todos)
    };

    let id = app.transport.create_note(request).await?;
    app.cache().invalidate(Page::Home);

    match output {
        OutputFormat::Json => writeln!(out, "{}", serde_json::json!({ "id": id }))?,
        OutputFormat::Text => writeln!(out, "Created {}", id)?,
    }
    Ok(())
}

pub async fn edit(
    app: &App,
    id: &str,
    title: Option<String>,
    content: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    if title.is_none() && content.is_none() {
        return Err(Error::EmptyEdit);
    }
    let patch = NotePatch { title, content, ..Default::default() };
    let origin = app.page_of(id).await?;
    app.dispatcher.dispatch(id, origin, NoteAction::Edit(patch)).await?;
    writeln!(out, "Updated {}", id)?;
    Ok(())
}

fn past_tense(action: &NoteAction) -> &'static str {
    match action {
        NoteAction::Archive => "Archived",
        NoteAction::Trash => "Trashed",
        NoteAction::Restore => "Restored",
        NoteAction::Delete => "Deleted",
        NoteAction::Edit(_) => "Updated",
    }
}

fn describe(action: &NoteAction, id: &str, note: Option<&Note>) -> String {
    match note {
        Some(note) => format!("{} {} (now in {})", past_tense(action), id, Page::for_status(note.status)),
        None => format!("{} {}", past_tense(action), id),
    }
}

/// Runs a status or delete action over every target.
///
/// With several targets every note is attempted, including when looking up
/// one note's page fails.
pub async fn apply(app: &App, targets: Targets, action: NoteAction, out: &mut dyn Write) -> Result<()> {
    if let [id] = targets.ids.as_slice() {
        let origin = match targets.from {
            Some(page) => page,
            None => app.page_of(id).await?,
        };
        let done = app.dispatcher.dispatch(id, origin, action.clone()).await?;
        writeln!(out, "{}", describe(&action, id, done.note.as_ref()))?;
        return Ok(());
    }

    let mut resolved = Vec::with_capacity(targets.ids.len());
    let mut not_found = Vec::new();
    let mut failures = Vec::new();
    for id in targets.ids {
        let origin = match targets.from {
            Some(page) => Ok(page),
            None => app.page_of(&id).await,
        };
        match origin {
            Ok(page) => resolved.push((id, page)),
            Err(Error::NoteNotFound(_)) => not_found.push(id),
            Err(e) => failures.push((id, e.to_string())),
        }
    }

    let result = app.dispatcher.dispatch_all(&resolved, action.clone()).await;
    match merge_bulk(result, not_found, failures) {
        Ok(done) => {
            for ((id, _), dispatched) in resolved.iter().zip(&done) {
                writeln!(out, "{}", describe(&action, id, dispatched.note.as_ref()))?;
            }
            Ok(())
        }
        Err(e) => report_partial(e, out),
    }
}

/// Folds notes that were never dispatched into a bulk result.
fn merge_bulk(
    result: Result<Vec<Dispatched>>,
    mut not_found: Vec<String>,
    mut failures: Vec<(String, String)>,
) -> Result<Vec<Dispatched>> {
    let succeeded = match result {
        Ok(done) if not_found.is_empty() && failures.is_empty() => return Ok(done),
        Ok(done) => done.len(),
        Err(Error::PartialBulkFailure { succeeded, not_found: gone, failures: failed, .. }) => {
            not_found.extend(gone);
            failures.extend(failed);
            succeeded
        }
        Err(e) => return Err(e),
    };
    Err(Error::PartialBulkFailure {
        succeeded,
        failed: not_found.len() + failures.len(),
        not_found,
        failures,
    })
}

/// Lists each note a bulk action missed, then returns the error.
fn report_partial(error: Error, out: &mut dyn Write) -> Result<()> {
    if let Error::PartialBulkFailure { not_found, failures, .. } = &error {
        for id in not_found {
            writeln!(out, "{}: already gone", id)?;
        }
        for (id, reason) in failures {
            writeln!(out, "{}: {}", id, reason)?;
        }
    }
    Err(error)
}

async fn checklist_note(app: &App, id: &str) -> Result<Note> {
    let note = app.transport.get_note(id).await?;
    if !note.is_checklist {
        return Err(Error::NotAChecklist(id.to_string()));
    }
    Ok(note)
}

fn require_item(note: &Note, item: &str) -> Result<()> {
    if note.todos.contains(item) {
        Ok(())
    } else {
        Err(Error::ItemNotFound { note: note.id.clone(), item: item.to_string() })
    }
}

pub async fn todo(app: &App, command: TodoCommand, out: &mut dyn Write) -> Result<()> {
    let (note, todos, message) = match command {
        TodoCommand::Add { id, text } => {
            let note = checklist_note(app, &id).await?;
            let (list, item) = note.todos.add_item();
            let todos = list.set_text(&item, &text);
            (note, todos, format!("Added item {}", item))
        }
        TodoCommand::Check { id, item } => {
            let note = checklist_note(app, &id).await?;
            require_item(&note, &item)?;
            let todos = note.todos.toggle_completed(&item);
            let state = match todos.get(&item) {
                Some(entry) if entry.is_completed => "done",
                _ => "open",
            };
            (note, todos, format!("Item {} is {}", item, state))
        }
        TodoCommand::Text { id, item, text } => {
            let note = checklist_note(app, &id).await?;
            require_item(&note, &item)?;
            let todos = note.todos.set_text(&item, &text);
            (note, todos, format!("Updated item {}", item))
        }
        TodoCommand::Remove { id, item } => {
            let note = checklist_note(app, &id).await?;
            require_item(&note, &item)?;
            let todos = note.todos.remove_item(&item);
            (note, todos, format!("Removed item {}", item))
        }
    };

    todos.validate(true)?;
    let origin = Page::for_status(note.status);
    let patch = NotePatch::default().todos(todos);
    app.dispatcher.dispatch(&note.id, origin, NoteAction::Edit(patch)).await?;
    writeln!(out, "{}", message)?;
    Ok(())
}

pub async fn empty_trash(app: &App, out: &mut dyn Write) -> Result<()> {
    let trash = app.cache().get(&ViewKey::Trash).await?;
    if trash.is_empty() {
        writeln!(out, "Trash is already empty")?;
        return Ok(());
    }

    let targets: Vec<(String, Page)> = trash.into_iter().map(|n| (n.id, Page::Trash)).collect();
    match app.dispatcher.dispatch_all(&targets, NoteAction::Delete).await {
        Ok(done) => {
            writeln!(out, "Deleted {} notes", done.len())?;
            Ok(())
        }
        Err(e) => report_partial(e, out),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
