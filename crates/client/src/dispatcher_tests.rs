// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::cache::ViewKey;
use crate::test_support::MockTransport;
use crate::transport::TransportError;
use nk_core::Status;
use yare::parameterized;

fn pages(list: &[Page]) -> BTreeSet<Page> {
    list.iter().copied().collect()
}

fn setup(mock: MockTransport) -> (Arc<MockTransport>, Dispatcher) {
    let mock = Arc::new(mock);
    let transport = Arc::clone(&mock) as Arc<dyn Transport>;
    let cache = Arc::new(QueryCache::new(Arc::clone(&transport)));
    (mock, Dispatcher::new(transport, cache))
}

async fn warm(dispatcher: &Dispatcher) {
    for page in Page::ALL {
        dispatcher.cache().get(&ViewKey::for_page(page)).await.unwrap();
    }
}

fn stale_pages(dispatcher: &Dispatcher) -> BTreeSet<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| dispatcher.cache().is_stale(&ViewKey::for_page(*page)))
        .collect()
}

#[parameterized(
    home_archive = { Page::Home, NoteAction::Archive, &[Page::Home, Page::Archive] },
    home_trash = { Page::Home, NoteAction::Trash, &[Page::Home, Page::Trash] },
    archive_trash = { Page::Archive, NoteAction::Trash, &[Page::Archive, Page::Trash] },
    archive_restore = { Page::Archive, NoteAction::Restore, &[Page::Home, Page::Archive] },
    trash_archive = { Page::Trash, NoteAction::Archive, &[Page::Archive, Page::Trash] },
    trash_restore = { Page::Trash, NoteAction::Restore, &[Page::Home, Page::Trash] },
    home_delete = { Page::Home, NoteAction::Delete, &[Page::Home] },
    archive_delete = { Page::Archive, NoteAction::Delete, &[Page::Archive] },
    trash_delete = { Page::Trash, NoteAction::Delete, &[Page::Trash] },
    home_edit = { Page::Home, NoteAction::Edit(NotePatch::default().title("x")), &[Page::Home] },
    trash_edit = { Page::Trash, NoteAction::Edit(NotePatch::default().title("x")), &[Page::Trash] },
)]
fn invalidation_table(origin: Page, action: NoteAction, expected: &[Page]) {
    assert_eq!(invalidation_set(origin, &action), pages(expected));
}

#[parameterized(
    archive_from_archive = { Page::Archive, NoteAction::Archive, &[Page::Home, Page::Archive] },
    trash_from_trash = { Page::Trash, NoteAction::Trash, &[Page::Home, Page::Trash] },
    restore_from_home = { Page::Home, NoteAction::Restore, &[Page::Home] },
)]
fn invalidation_for_unlisted_combinations(origin: Page, action: NoteAction, expected: &[Page]) {
    assert_eq!(invalidation_set(origin, &action), pages(expected));
}

#[test]
fn edit_with_raw_flags_invalidates_every_page() {
    let patch = NotePatch { is_trashed: Some(true), ..Default::default() };
    assert_eq!(invalidation_set(Page::Home, &NoteAction::Edit(patch)), pages(&Page::ALL));
}

#[tokio::test]
async fn trash_from_home_marks_exactly_home_and_trash() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let id = mock.seed("Receipt");
    warm(&dispatcher).await;

    let done = dispatcher.dispatch(&id, Page::Home, NoteAction::Trash).await.unwrap();

    assert_eq!(done.note.unwrap().status, Status::Trashed);
    assert_eq!(stale_pages(&dispatcher), pages(&[Page::Home, Page::Trash]));
}

#[tokio::test]
async fn groceries_scenario_refreshes_only_affected_views() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let id = mock.seed("Groceries");
    let cache = dispatcher.cache();
    let titles = |page: Page| async move {
        let notes = cache.get(&ViewKey::for_page(page)).await.unwrap();
        notes.into_iter().map(|n| n.title).collect::<Vec<_>>()
    };

    assert_eq!(titles(Page::Home).await, ["Groceries"]);
    assert!(titles(Page::Archive).await.is_empty());
    assert!(titles(Page::Trash).await.is_empty());

    dispatcher.dispatch(&id, Page::Home, NoteAction::Archive).await.unwrap();
    assert!(titles(Page::Home).await.is_empty());
    assert_eq!(titles(Page::Archive).await, ["Groceries"]);
    assert!(titles(Page::Trash).await.is_empty());

    dispatcher.dispatch(&id, Page::Archive, NoteAction::Trash).await.unwrap();
    assert!(titles(Page::Archive).await.is_empty());
    assert_eq!(titles(Page::Trash).await, ["Groceries"]);

    dispatcher.dispatch(&id, Page::Trash, NoteAction::Restore).await.unwrap();
    assert_eq!(titles(Page::Home).await, ["Groceries"]);
    assert!(titles(Page::Archive).await.is_empty());
    assert!(titles(Page::Trash).await.is_empty());
}

#[tokio::test]
async fn failed_action_leaves_cache_untouched() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let id = mock.seed("Stuck");
    mock.fail(&id, TransportError::Rejected { status: 500, message: "store down".into() });
    warm(&dispatcher).await;

    let err = dispatcher.dispatch(&id, Page::Home, NoteAction::Archive).await.unwrap_err();

    assert!(matches!(err, Error::Rejected { status: 500, .. }));
    assert!(stale_pages(&dispatcher).is_empty());
    assert_eq!(mock.note(&id).unwrap().status, Status::Home);
    assert!(!dispatcher.is_pending(&id));
}

#[tokio::test]
async fn vanished_note_is_reported_as_not_found() {
    let (_mock, dispatcher) = setup(MockTransport::new());
    let err = dispatcher.dispatch("n-gone", Page::Trash, NoteAction::Delete).await.unwrap_err();
    assert!(matches!(err, Error::NoteNotFound(_)));
}

#[tokio::test]
async fn second_action_on_pending_note_is_busy() {
    let (mock, dispatcher) = setup(MockTransport::gated_updates());
    let id = mock.seed("Slow");

    let (first, second) = tokio::join!(
        dispatcher.dispatch(&id, Page::Home, NoteAction::Archive),
        async {
            tokio::task::yield_now().await;
            let second = dispatcher.dispatch(&id, Page::Home, NoteAction::Trash).await;
            mock.release_updates(1);
            second
        }
    );

    assert_eq!(first.unwrap().note.unwrap().status, Status::Archived);
    assert!(matches!(second, Err(Error::Busy(_))));
    assert_eq!(mock.update_calls(), 1);
    assert!(!dispatcher.is_pending(&id));
}

#[tokio::test]
async fn other_notes_are_not_blocked_by_a_pending_one() {
    let (mock, dispatcher) = setup(MockTransport::gated_updates());
    let a = mock.seed("A");
    let b = mock.seed("B");

    let (first, second) = tokio::join!(
        dispatcher.dispatch(&a, Page::Home, NoteAction::Archive),
        async {
            tokio::task::yield_now().await;
            mock.release_updates(2);
            dispatcher.dispatch(&b, Page::Home, NoteAction::Archive).await
        }
    );

    first.unwrap();
    second.unwrap();
    assert_eq!(mock.update_calls(), 2);
}

#[tokio::test]
async fn edit_sends_patch_and_invalidates_origin() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let id = mock.seed("Draft");
    warm(&dispatcher).await;

    let action = NoteAction::Edit(NotePatch::default().title("Final"));
    let done = dispatcher.dispatch(&id, Page::Home, action).await.unwrap();

    assert_eq!(done.note.unwrap().title, "Final");
    assert_eq!(stale_pages(&dispatcher), pages(&[Page::Home]));
}

#[tokio::test]
async fn delete_from_trash_removes_note() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let id = mock.seed("Junk");
    dispatcher.dispatch(&id, Page::Home, NoteAction::Trash).await.unwrap();

    let done = dispatcher.dispatch(&id, Page::Trash, NoteAction::Delete).await.unwrap();
    assert_eq!(done.note, None);
    assert!(mock.note(&id).is_none());
    assert!(dispatcher.cache().get(&ViewKey::Trash).await.unwrap().is_empty());
}

#[tokio::test]
async fn bulk_success_returns_every_outcome() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let targets = vec![(mock.seed("A"), Page::Home), (mock.seed("B"), Page::Home)];

    let done = dispatcher.dispatch_all(&targets, NoteAction::Trash).await.unwrap();
    assert_eq!(done.len(), 2);
    assert!(targets.iter().all(|(id, _)| mock.note(id).unwrap().status == Status::Trashed));
}

#[tokio::test]
async fn bulk_separates_not_found_from_other_failures() {
    let (mock, dispatcher) = setup(MockTransport::new());
    let ok = mock.seed("Fine");
    let broken = mock.seed("Broken");
    mock.fail(&broken, TransportError::ConnectionFailed("reset".into()));
    let targets: Vec<(String, Page)> = [ok.clone(), "n-missing".to_string(), broken.clone()]
        .into_iter()
        .map(|id| (id, Page::Trash))
        .collect();

    let err = dispatcher.dispatch_all(&targets, NoteAction::Delete).await.unwrap_err();

    match err {
        Error::PartialBulkFailure { succeeded, failed, not_found, failures } => {
            assert_eq!(succeeded, 1);
            assert_eq!(failed, 2);
            assert_eq!(not_found, vec!["n-missing".to_string()]);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, broken);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(mock.note(&ok).is_none());
    assert!(mock.note(&broken).is_some());
}
