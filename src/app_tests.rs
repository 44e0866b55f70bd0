use tempfile::TempDir;

use crate::app::App;
use crate::autoplay::Action;
use crate::db::Db;
use crate::error::Error;
use crate::models::{Direction, Mode, ReviewRecord};

async fn test_app() -> (App, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}/tutor.db?mode=rwc", dir.path().display());
    let db = Db::new(&url).await.unwrap();
    let app = App::new(db).await.unwrap();
    (app, dir)
}

#[tokio::test]
async fn rating_writes_through_to_store() {
    let (mut app, _dir) = test_app().await;
    app.set_selection(1, 1, Mode::Quiz, false);
    app.rebuild_deck();

    let item_id = app.current_item().unwrap().id.clone();
    let record = app.submit_rating(5).await.unwrap();
    assert_eq!(record.repetitions, 1);
    assert_eq!(record.interval_days, 1);
    assert!((record.ease_factor - 2.6).abs() < 1e-9);

    // Durable, not just in-memory: a fresh load sees the same record.
    let stored = app.db.load_all().await.unwrap();
    assert_eq!(stored.get(&item_id), Some(&record));
}

#[tokio::test]
async fn rating_with_empty_deck_fails() {
    let (mut app, _dir) = test_app().await;
    // No rebuild: the session starts empty.
    assert!(matches!(
        app.submit_rating(4).await,
        Err(Error::NoCurrentItem)
    ));
}

#[tokio::test]
async fn invalid_quality_propagates_and_writes_nothing() {
    let (mut app, _dir) = test_app().await;
    app.set_selection(1, 1, Mode::Quiz, false);
    app.rebuild_deck();

    assert!(matches!(
        app.submit_rating(9).await,
        Err(Error::InvalidQuality(9))
    ));
    assert!(app.db.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn quiz_rating_advances_without_shrinking() {
    let (mut app, _dir) = test_app().await;
    app.set_selection(1, 1, Mode::Quiz, false);
    app.rebuild_deck();

    let total = app.deck.len();
    let first = app.current_item().unwrap().id.clone();
    app.submit_rating(3).await.unwrap();

    assert_eq!(app.deck.len(), total);
    assert_eq!(app.deck.position().unwrap(), (2, total));
    assert_ne!(app.current_item().unwrap().id, first);
}

#[tokio::test]
async fn review_session_consumes_each_item_once() {
    let (mut app, _dir) = test_app().await;
    let today = App::today();

    // Seed three due records in chapter 1.
    let due = ReviewRecord {
        repetitions: 1,
        ease_factor: 2.5,
        interval_days: 1,
        due_date: today,
    };
    let seeded: Vec<String> = app.catalog.items()[..3]
        .iter()
        .map(|item| item.id.clone())
        .collect();
    for id in &seeded {
        app.db.put(id, &due).await.unwrap();
    }
    app.records = app.db.load_all().await.unwrap();

    app.set_selection(1, 1, Mode::Review, false);
    app.rebuild_deck();
    assert_eq!(app.deck.len(), 3);
    assert_eq!(app.due_count(), 3);

    let mut rated = Vec::new();
    while let Some(item) = app.current_item() {
        let id = item.id.clone();
        assert!(!rated.contains(&id), "review item shown twice");
        let before = app.deck.len();
        app.submit_rating(4).await.unwrap();
        assert_eq!(app.deck.len(), before - 1);
        rated.push(id);
    }

    assert_eq!(rated.len(), 3);
    assert!(app.deck.is_empty());
    assert_eq!(app.due_today, 0);

    // Everything was pushed at least a day out, so a fresh review is empty.
    app.rebuild_deck();
    assert!(app.deck.is_empty());
}

#[tokio::test]
async fn autoplay_locks_out_manual_input() {
    let (mut app, _dir) = test_app().await;
    app.set_selection(1, 1, Mode::Flashcard, false);
    app.rebuild_deck();

    app.toggle_autoplay();
    assert!(app.autoplay.is_active());
    assert!(app.take_pending_autoplay().is_some());

    let position = app.deck.position();
    app.advance(Direction::Next);
    assert_eq!(app.deck.position(), position);

    app.flip();
    assert!(!app.flipped);

    assert!(matches!(
        app.submit_rating(4).await,
        Err(Error::AutoplayActive)
    ));
}

#[tokio::test]
async fn stale_autoplay_ticket_cannot_move_the_cursor() {
    let (mut app, _dir) = test_app().await;
    app.set_selection(1, 1, Mode::Flashcard, false);
    app.rebuild_deck();

    app.toggle_autoplay();
    let old_ticket = app.take_pending_autoplay().unwrap();
    app.toggle_autoplay(); // stop

    let position = app.deck.position();
    assert!(!app.autoplay_apply(old_ticket, Action::Advance));
    assert_eq!(app.deck.position(), position);

    // A fresh run works and the old ticket stays dead.
    app.toggle_autoplay();
    let ticket = app.take_pending_autoplay().unwrap();
    assert!(app.autoplay_apply(ticket, Action::Flip));
    assert!(app.flipped);
    assert!(app.autoplay_apply(ticket, Action::Advance));
    assert_eq!(app.deck.position().unwrap().0, 2);
    assert!(!app.flipped);
    assert!(!app.autoplay_apply(old_ticket, Action::Advance));
}

#[tokio::test]
async fn autoplay_does_not_start_on_an_empty_deck() {
    let (mut app, _dir) = test_app().await;
    app.toggle_autoplay();
    assert!(!app.autoplay.is_active());
    assert!(app.take_pending_autoplay().is_none());
}

#[tokio::test]
async fn chapter_bounds_stay_ordered() {
    let (mut app, _dir) = test_app().await;
    assert_eq!((app.chapter_start, app.chapter_end), (3, 3));

    app.adjust_chapter_start(1);
    assert_eq!((app.chapter_start, app.chapter_end), (4, 4));

    app.adjust_chapter_end(-1);
    assert_eq!((app.chapter_start, app.chapter_end), (3, 3));

    app.set_selection(5, 2, Mode::Quiz, false);
    assert_eq!((app.chapter_start, app.chapter_end), (2, 5));
}
