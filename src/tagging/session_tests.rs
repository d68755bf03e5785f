use super::*;
use crate::db::{DataKind, JsonFileStore};
use std::fs;
use tempfile::TempDir;

fn photos(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

fn session(names: &[&str]) -> TaggingSession {
    TaggingSession::new(photos(names), TagTable::new(), Normalizer::default())
}

#[test]
fn test_suggestions_carry_over_from_previous_photo() {
    let mut s = session(&["0.jpg", "1.jpg", "2.jpg"]);
    s.toggle("/avatars/a.png");

    assert!(s.next());
    assert_eq!(s.position(), 1);
    assert_eq!(s.suggestions(), ["/avatars/a.png"]);
    assert!(s.current_draft().is_empty());
}

#[test]
fn test_suggestions_are_only_the_immediately_previous_photo() {
    let mut s = session(&["0.jpg", "1.jpg", "2.jpg"]);
    s.toggle("a.png");
    s.next();
    s.toggle("b.png");
    s.next();

    assert_eq!(s.suggestions(), ["/avatars/b.png"]);

    s.previous();
    assert_eq!(s.suggestions(), ["/avatars/a.png"]);
    s.previous();
    assert!(s.suggestions().is_empty());
}

#[test]
fn test_navigation_is_clamped() {
    let mut s = session(&["0.jpg", "1.jpg"]);

    assert!(!s.previous());
    assert!(s.next());
    assert!(!s.next());
    assert_eq!(s.current_photo(), Some("1.jpg"));
}

#[test]
fn test_go_to() {
    let mut s = session(&["0.jpg", "1.jpg", "2.jpg"]);
    s.toggle("a.png");
    s.next();
    s.toggle("b.png");

    assert!(s.go_to("2.jpg"));
    assert_eq!(s.position(), 2);
    assert_eq!(s.suggestions(), ["/avatars/b.png"]);
    assert!(!s.go_to("missing.jpg"));
    assert_eq!(s.position(), 2);
}

#[test]
fn test_double_toggle_is_clean() {
    let mut tags = TagTable::new();
    tags.insert("0.jpg".into(), vec!["/avatars/x.png".into()]);
    let mut s = TaggingSession::new(photos(&["0.jpg"]), tags, Normalizer::default());

    assert!(s.toggle("y.png"));
    assert!(s.has_unsaved_changes());
    assert!(!s.toggle("/avatars/y.png"));

    assert_eq!(s.current_draft(), ["/avatars/x.png"]);
    assert!(!s.has_unsaved_changes());
}

#[test]
fn test_double_toggle_of_saved_avatar_is_clean() {
    let mut tags = TagTable::new();
    tags.insert(
        "0.jpg".into(),
        vec!["/avatars/a.png".into(), "/avatars/b.png".into(), "/avatars/c.png".into()],
    );
    let mut s = TaggingSession::new(photos(&["0.jpg"]), tags, Normalizer::default());

    assert!(!s.toggle("a.png"));
    assert!(s.has_unsaved_changes());
    assert!(s.toggle("a.png"));
    assert_eq!(s.current_draft(), ["/avatars/a.png", "/avatars/b.png", "/avatars/c.png"]);
    assert!(!s.has_unsaved_changes());

    s.toggle("b.png");
    s.toggle("c.png");
    s.toggle("c.png");
    s.toggle("b.png");
    assert_eq!(s.current_draft(), ["/avatars/a.png", "/avatars/b.png", "/avatars/c.png"]);
    assert!(!s.has_unsaved_changes());
}

#[test]
fn test_dirty_check_is_order_sensitive() {
    let mut tags = TagTable::new();
    tags.insert("0.jpg".into(), vec!["/avatars/b.png".into(), "/avatars/a.png".into()]);
    tags.insert("1.jpg".into(), vec!["/avatars/a.png".into(), "/avatars/b.png".into()]);
    let mut s = TaggingSession::new(photos(&["0.jpg", "1.jpg"]), tags, Normalizer::default());

    s.next();
    s.clear_all();
    assert_eq!(s.apply_suggestions(), 2);

    assert_eq!(s.current_draft(), ["/avatars/b.png", "/avatars/a.png"]);
    assert!(s.has_unsaved_changes());
}

#[test]
fn test_moved_edits_are_unpersisted_until_saved() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut s = session(&["0.jpg", "1.jpg", "2.jpg"]);
    assert!(!s.has_unpersisted_changes());

    s.next();
    s.next();
    assert!(!s.has_unpersisted_changes());

    s.previous();
    s.previous();
    s.toggle("a.png");
    s.next();
    assert!(!s.has_unsaved_changes());
    assert!(s.has_unpersisted_changes());

    s.save(&store).unwrap();
    assert!(!s.has_unpersisted_changes());

    s.toggle("b.png");
    assert!(s.has_unpersisted_changes());
    s.toggle("b.png");
    assert!(!s.has_unpersisted_changes());
}

#[test]
fn test_failed_save_stays_unpersisted() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let store = JsonFileStore::new(blocker.join("data"));

    let mut s = session(&["0.jpg", "1.jpg"]);
    s.toggle("a.png");
    s.next();

    assert!(s.save(&store).is_err());
    assert!(s.has_unpersisted_changes());
}

#[test]
fn test_save_marks_clean_and_writes_table() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut s = session(&["0.jpg", "1.jpg"]);
    s.toggle("a.png");
    s.next();
    s.toggle("b.png");

    assert!(s.has_unsaved_changes());
    assert_eq!(s.save(&store).unwrap(), 2);
    assert!(!s.has_unsaved_changes());

    let written = store.load_tags().unwrap().unwrap();
    assert_eq!(written["0.jpg"], vec!["/avatars/a.png".to_string()]);
    assert_eq!(written["1.jpg"], vec!["/avatars/b.png".to_string()]);
}

#[test]
fn test_failed_save_keeps_draft() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let store = JsonFileStore::new(blocker.join("data"));

    let mut s = session(&["0.jpg"]);
    s.toggle("a.png");

    assert!(s.save(&store).is_err());
    assert_eq!(s.current_draft(), ["/avatars/a.png"]);
    assert!(s.has_unsaved_changes());
}

#[test]
fn test_moving_does_not_persist() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut s = session(&["0.jpg", "1.jpg"]);

    s.toggle("a.png");
    s.apply(TagAction::Next, &store).unwrap();

    assert!(!store.path(DataKind::Tags).exists());
    assert!(!s.is_dirty("0.jpg"));
}

#[test]
fn test_apply_suggestions_appends_missing_only() {
    let mut s = session(&["0.jpg", "1.jpg"]);
    s.toggle("a.png");
    s.toggle("b.png");
    s.next();
    s.toggle("b.png");

    assert_eq!(s.apply_suggestions(), 1);
    assert_eq!(s.current_draft(), ["/avatars/b.png", "/avatars/a.png"]);
}

#[test]
fn test_clear_suggestions_keeps_draft() {
    let mut s = session(&["0.jpg", "1.jpg"]);
    s.toggle("a.png");
    s.next();
    s.toggle("c.png");

    s.clear_suggestions();
    assert!(s.suggestions().is_empty());
    assert_eq!(s.current_draft(), ["/avatars/c.png"]);
    assert_eq!(s.apply_suggestions(), 0);
}

#[test]
fn test_remove_and_clear_all() {
    let mut s = session(&["0.jpg"]);
    s.toggle("a.png");
    s.toggle("b.png");

    assert!(s.remove("/avatars/a.png"));
    assert!(!s.remove("a.png"));
    s.clear_all();
    assert!(s.current_draft().is_empty());
}

#[test]
fn test_processed_count() {
    let mut tags = TagTable::new();
    tags.insert("0.jpg".into(), vec!["/avatars/a.png".into()]);
    tags.insert("elsewhere.jpg".into(), vec!["/avatars/a.png".into()]);
    let mut s = TaggingSession::new(photos(&["0.jpg", "1.jpg", "2.jpg"]), tags, Normalizer::default());

    assert_eq!(s.processed_count(), 1);
    s.next();
    s.toggle("b.png");
    assert_eq!(s.processed_count(), 2);
}

#[test]
fn test_export_writes_saved_table() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("data"));
    let export = dir.path().join("export.json");
    let mut s = session(&["0.jpg"]);
    s.toggle("a.png");

    let outcome = s.apply(TagAction::Export(export.clone()), &store).unwrap();
    assert_eq!(outcome, ActionOutcome::Exported(export.clone()));

    let exported: TagTable = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(exported["0.jpg"], vec!["/avatars/a.png".to_string()]);
    assert!(store.path(DataKind::Tags).exists());
}

#[test]
fn test_apply_outcomes() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut s = session(&["0.jpg", "1.jpg"]);

    assert_eq!(s.apply(TagAction::Previous, &store).unwrap(), ActionOutcome::Continue);
    assert_eq!(s.apply(TagAction::Next, &store).unwrap(), ActionOutcome::Moved);
    assert_eq!(
        s.apply(TagAction::Toggle("a.png".into()), &store).unwrap(),
        ActionOutcome::Continue
    );
    assert_eq!(s.apply(TagAction::Save, &store).unwrap(), ActionOutcome::Saved(2));
    assert_eq!(s.apply(TagAction::Quit, &store).unwrap(), ActionOutcome::Quit);
}

#[test]
fn test_empty_session_is_inert() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path());
    let mut s = session(&[]);

    assert_eq!(s.current_photo(), None);
    assert!(!s.next());
    assert!(!s.previous());
    assert!(!s.toggle("a.png"));
    assert_eq!(s.apply_suggestions(), 0);
    assert!(!s.has_unsaved_changes());
    assert_eq!(s.save(&store).unwrap(), 0);
    s.export(&dir.path().join("out.json"), &store).unwrap();
    assert!(!dir.path().join("out.json").exists());
    assert!(!store.path(DataKind::Tags).exists());
}
