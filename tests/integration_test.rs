//! Integration tests for albumtag
//!
//! These tests lay out an album in a temporary directory and drive the
//! library end to end: loading, filtering, tagging, saving and the
//! maintenance reports.

use albumtag::Album;
use albumtag::config::{AlbumConfig, PhotoSource};
use albumtag::db::file::write_json;
use albumtag::db::{DataKind, Store, TagTable};
use albumtag::manifest::ConsistencyReport;
use albumtag::save::handle_save;
use albumtag::search::{GallerySelection, SelectionQuery, page_count, paginate};
use albumtag::stats::AvatarStats;
use albumtag::tagging::{ActionOutcome, TagAction};
use std::fs;
use tempfile::TempDir;

/// Write photos, tags and a manifest under `dir` and return a config for them
fn setup_album(dir: &TempDir, photos: &[(&str, &[&str])], manifest: &[&str], cache: bool) -> AlbumConfig {
    let photos_dir = dir.path().join("photos");
    fs::create_dir_all(&photos_dir).unwrap();

    let mut tags = TagTable::new();
    for (photo, avatars) in photos {
        fs::write(photos_dir.join(photo), photo.as_bytes()).unwrap();
        tags.insert(
            (*photo).to_string(),
            avatars.iter().map(|a| (*a).to_string()).collect(),
        );
    }

    let config = AlbumConfig {
        data_dir: dir.path().join("data"),
        photo_source: PhotoSource::Local { photos_dir },
        avatars_dir: dir.path().join("avatars"),
        cache_enabled: cache,
        download_delay_ms: 0,
        ..AlbumConfig::default()
    };
    write_json(&config.data_dir.join(DataKind::Tags.file_name()), &tags).unwrap();
    write_json(&config.manifest_path(), manifest).unwrap();
    config
}

#[test]
fn test_filter_by_search_and_avatars() {
    let dir = TempDir::new().unwrap();
    let config = setup_album(
        &dir,
        &[
            ("0.jpg", &["/avatars/tran_an.png", "/avatars/le_binh.png"]),
            ("1.jpg", &["/avatars/tran_an.png"]),
            ("2.jpg", &["/avatars/le_binh.png"]),
            ("3.jpg", &[]),
        ],
        &["tran_an.png", "le_binh.png", "pham_chi.png"],
        false,
    );
    let album = Album::open(config).unwrap();

    assert_eq!(album.photos(), ["0.jpg", "1.jpg", "2.jpg", "3.jpg"]);
    assert_eq!(album.filter(&SelectionQuery::default()), album.photos());

    let by_name = album.filter(&SelectionQuery::search("AN"));
    assert_eq!(by_name, vec!["0.jpg", "1.jpg"]);

    let by_photo_name = album.filter(&SelectionQuery::search("3.jp"));
    assert_eq!(by_photo_name, vec!["3.jpg"]);

    let either = album.filter(&SelectionQuery::avatars(["tran_an.png", "/avatars/le_binh.png"]));
    assert_eq!(either, vec!["0.jpg", "1.jpg", "2.jpg"]);

    let both = album.filter(&SelectionQuery {
        search_term: "binh".into(),
        selected_avatars: vec!["tran_an.png".into()],
    });
    assert_eq!(both, vec!["0.jpg"]);

    let untagged = album.filter(&SelectionQuery::avatars(["pham_chi.png"]));
    assert!(untagged.is_empty());
}

#[test]
fn test_gallery_selection_and_pages() {
    let dir = TempDir::new().unwrap();
    let photos: Vec<String> = (0..130).map(|i| format!("{i:03}.jpg")).collect();
    let entries: Vec<(&str, &[&str])> = photos
        .iter()
        .map(|p| (p.as_str(), &["/avatars/x.png"][..]))
        .collect();
    let config = setup_album(&dir, &entries, &["x.png"], false);
    let album = Album::open(config).unwrap();

    let mut selection = GallerySelection::new(album.normalizer().clone());
    selection.set_search_term("zzz");
    selection.toggle_avatar("x.png");
    assert_eq!(selection.search_term(), "");

    let visible = album.filter(&selection.query());
    assert_eq!(visible.len(), 130);
    assert_eq!(page_count(visible.len(), album.config().per_page), 3);
    assert_eq!(paginate(&visible, 3, album.config().per_page).len(), 10);
}

#[test]
fn test_tagging_session_saves_through_cache() {
    let dir = TempDir::new().unwrap();
    let config = setup_album(
        &dir,
        &[("0.jpg", &["a.png"]), ("1.jpg", &[])],
        &["a.png", "b.png"],
        true,
    );

    {
        let album = Album::open(config.clone()).unwrap();
        assert!(album.store().cache().is_some());
        let mut session = album.tagging_session(album.photos().to_vec());

        assert_eq!(session.current_draft(), ["/avatars/a.png"]);
        session.apply(TagAction::Next, album.store()).unwrap();
        assert_eq!(session.suggestions(), ["/avatars/a.png"]);
        session.apply(TagAction::ApplySuggestions, album.store()).unwrap();
        session
            .apply(TagAction::Toggle("b.png".into()), album.store())
            .unwrap();

        let outcome = session.apply(TagAction::Save, album.store()).unwrap();
        assert_eq!(outcome, ActionOutcome::Saved(2));
        assert!(!session.has_unsaved_changes());
    }

    let on_disk = albumtag::db::JsonFileStore::new(&config.data_dir)
        .load_tags()
        .unwrap()
        .unwrap();
    assert_eq!(
        on_disk["1.jpg"],
        vec!["/avatars/a.png".to_string(), "/avatars/b.png".to_string()]
    );

    let reopened = Album::open(config).unwrap();
    assert_eq!(reopened.index().photo_count("/avatars/a.png"), 2);
    assert_eq!(reopened.index().photo_count("/avatars/b.png"), 1);
}

#[test]
fn test_save_request_then_reload() {
    let dir = TempDir::new().unwrap();
    let config = setup_album(&dir, &[("0.jpg", &[])], &["x.png"], false);

    {
        let album = Album::open(config.clone()).unwrap();
        let response = handle_save(
            album.store(),
            r#"{"type": "tags", "data": {"0.jpg": ["x.png"]}}"#,
        );
        assert!(response.success);
        assert_eq!(response.message, "tags data saved successfully");
    }

    let album = Album::open(config).unwrap();
    assert_eq!(album.tags()["0.jpg"], vec!["/avatars/x.png".to_string()]);
}

#[test]
fn test_stats_and_consistency() {
    let dir = TempDir::new().unwrap();
    let config = setup_album(
        &dir,
        &[("0.jpg", &["a.png", "ghost.png"]), ("1.jpg", &["a.png"])],
        &["a.png", "unused.png"],
        false,
    );
    let album = Album::open(config).unwrap();

    let stats = AvatarStats::from_tags(album.tags(), album.normalizer());
    assert_eq!(stats.avatar_counts["/avatars/a.png"], 2);
    assert_eq!(stats.total_photos, 2);
    stats.save(&album.config().stats_path()).unwrap();

    let loaded = AvatarStats::load(&album.config().stats_path()).unwrap();
    assert!(!loaded.is_stale(album.tags(), album.normalizer()));

    let report = ConsistencyReport::build(album.manifest(), album.index(), Some(&loaded));
    assert!(!report.is_consistent());
    assert!(report.missing_in_manifest.contains("/avatars/ghost.png"));
    assert_eq!(report.unused_in_tags, vec!["/avatars/unused.png".to_string()]);
    assert!(report.missing_in_stats.is_empty());
}
