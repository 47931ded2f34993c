use super::*;
use crate::config::{EntryDisplayField, Settings};
use crate::discovery::{DiscoveredEntry, LoadOptions, SessionId};
use crate::location::Location;
use crate::testing::{FakeDownloader, RejectAll};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn track(raw: &str) -> PlaylistItem {
    PlaylistItem::Track(DiscoveredEntry::new(Location::parse(raw)))
}

fn settings() -> Settings {
    let mut s = Settings::default();
    s.network.pump_interval_ms = 5;
    s
}

fn loader(downloader: Arc<FakeDownloader>) -> Loader {
    Loader::new(&settings(), downloader, Arc::new(RejectAll))
}

fn locations(model: &PlaylistModel) -> Vec<String> {
    model.tracks().map(|e| e.location.to_string()).collect()
}

fn names(model: &PlaylistModel) -> Vec<String> {
    model
        .tracks()
        .filter_map(|e| e.location.file_name())
        .collect()
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"not real audio").unwrap();
}

const TWO_ENTRY_PLS: &str = "[playlist]\n\
File1=http://radio.test/a.mp3\n\
Title1=Station A\n\
Length1=10\n\
File2=http://radio.test/b.ogg\n\
NumberOfEntries=2\n";

#[test]
fn insert_after_none_goes_to_the_front_and_unknown_ids_append() {
    let mut model = PlaylistModel::new();
    let a = model.push(track("/music/a.mp3"));
    let b = model.insert_after(None, track("/music/b.mp3"));
    assert_eq!(model.position(b), Some(0));
    assert_eq!(model.position(a), Some(1));

    model.remove(b);
    let c = model.insert_after(Some(b), track("/music/c.mp3"));
    assert_eq!(model.position(c), Some(1));
    assert_eq!(model.last_id(), Some(c));
}

#[test]
fn replace_swaps_one_item_for_many_in_place() {
    let mut model = PlaylistModel::new();
    let a = model.push(track("/music/a.mp3"));
    let pending = model.push(PlaylistItem::Pending {
        session: SessionId(7),
        location: Location::parse("http://radio.test/list.pls"),
    });
    let d = model.push(track("/music/d.mp3"));
    assert!(model.has_pending());

    let ids = model.replace(pending, vec![track("/music/b.mp3"), track("/music/c.mp3")]);
    assert_eq!(ids.len(), 2);
    assert!(!model.has_pending());
    assert_eq!(names(&model), vec!["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);
    assert_eq!(model.predecessor(ids[0]), Some(a));
    assert_eq!(model.predecessor(d), Some(ids[1]));
    assert_eq!(model.predecessor(a), None);

    // Gone ids are left alone.
    assert!(model.replace(pending, vec![track("/music/x.mp3")]).is_empty());
    assert_eq!(model.len(), 4);
}

#[test]
fn display_uses_configured_fields_and_skips_missing_ones() {
    let mut entry = DiscoveredEntry::new(Location::parse("/music/Some Song.flac"));
    entry.title = Some("Some Title".to_string());
    entry.duration = Some(Duration::from_secs(125));

    let fields = [EntryDisplayField::Length, EntryDisplayField::Title];
    assert_eq!(display_from_fields(&entry, &fields, " | "), "02:05 | Some Title");
    assert_eq!(
        display_from_fields(&entry, &[EntryDisplayField::Filename], " - "),
        "Some Song"
    );

    let bare = DiscoveredEntry::new(Location::parse("/music/x.mp3"));
    assert_eq!(display_from_fields(&bare, &fields, " | "), "/music/x.mp3");

    let pending = PlaylistItem::Pending {
        session: SessionId(1),
        location: Location::parse("http://radio.test/list.pls"),
    };
    assert!(display_item(&pending, &fields, " | ").contains("http://radio.test/list.pls"));
}

#[test]
fn directory_contents_come_before_later_arguments() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("d/b.mp3"));
    touch(&dir.path().join("d/a.mp3"));
    touch(&dir.path().join("c.mp3"));

    let mut loader = loader(Arc::new(FakeDownloader::default()));
    loader.insert_media(
        vec![
            Location::local(dir.path().join("d")),
            Location::local(dir.path().join("c.mp3")),
        ],
        None,
    );
    loader.wait_until_idle(&mut || {});

    assert!(loader.is_idle());
    assert_eq!(names(loader.model()), vec!["a.mp3", "b.mp3", "c.mp3"]);
}

#[test]
fn local_playlist_titles_and_lengths_reach_the_model() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("mix.m3u");
    fs::write(&list, "#EXTM3U\n#EXTINF:61,First\none.mp3\ntwo.mp3\n").unwrap();

    let mut loader = loader(Arc::new(FakeDownloader::default()));
    loader.insert_media(vec![Location::local(&list)], None);
    loader.wait_until_idle(&mut || {});

    let entries: Vec<&DiscoveredEntry> = loader.model().tracks().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title.as_deref(), Some("First"));
    assert_eq!(entries[0].duration, Some(Duration::from_secs(61)));
    assert_eq!(entries[1].title, None);
    assert_eq!(entries[1].location, Location::local(dir.path().join("two.mp3")));

    let resolved = loader.resolved_playlists();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].source, Location::local(&list));
}

#[test]
fn remote_playlist_entries_land_where_the_playlist_was_listed() {
    let downloader =
        Arc::new(FakeDownloader::default().with("http://radio.test/list.pls", TWO_ENTRY_PLS));
    let mut loader = loader(downloader.clone());

    loader.insert_media(
        vec![
            Location::parse("http://radio.test/first.mp3"),
            Location::parse("http://radio.test/list.pls"),
            Location::parse("http://radio.test/last.mp3"),
        ],
        None,
    );
    loader.wait_until_idle(&mut || {});

    assert_eq!(
        locations(loader.model()),
        vec![
            "http://radio.test/first.mp3",
            "http://radio.test/a.mp3",
            "http://radio.test/b.ogg",
            "http://radio.test/last.mp3",
        ]
    );
    assert!(!loader.model().has_pending());

    let a = loader.model().tracks().nth(1).unwrap();
    assert_eq!(a.title.as_deref(), Some("Station A"));
    assert_eq!(a.duration, Some(Duration::from_secs(10)));

    let resolved = loader.resolved_playlists();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].source, Location::parse("http://radio.test/list.pls"));
    assert_eq!(resolved[0].urls.len(), 2);
    assert!(loader.take_notices().is_empty());
}

#[test]
fn consecutive_remote_playlists_keep_their_order() {
    let downloader = Arc::new(
        FakeDownloader::default()
            .with(
                "http://radio.test/one.pls",
                "[playlist]\nFile1=http://radio.test/1.mp3\n",
            )
            .with(
                "http://radio.test/two.m3u",
                "http://radio.test/2.mp3\nhttp://radio.test/3.mp3\n",
            )
            .delayed(Duration::from_millis(20)),
    );
    let mut loader = loader(downloader);

    loader.insert_media(
        vec![
            Location::parse("http://radio.test/one.pls"),
            Location::parse("http://radio.test/two.m3u"),
            Location::parse("http://radio.test/4.mp3"),
        ],
        None,
    );
    loader.wait_until_idle(&mut || {});

    assert_eq!(names(loader.model()), vec!["1.mp3", "2.mp3", "3.mp3", "4.mp3"]);
}

#[test]
fn downloaded_playlists_are_deleted_after_loading() {
    let downloader =
        Arc::new(FakeDownloader::default().with("http://radio.test/list.pls", TWO_ENTRY_PLS));
    let mut loader = loader(downloader.clone());

    loader.insert_media(vec![Location::parse("http://radio.test/list.pls")], None);
    loader.wait_until_idle(&mut || {});

    let destinations = downloader.destinations.lock().unwrap();
    assert_eq!(destinations.len(), 1);
    assert!(destinations[0].to_string_lossy().ends_with(".pls"));
    assert!(!destinations[0].exists());
}

#[test]
fn failed_download_reports_and_keeps_the_play_request_for_later_items() {
    let mut loader = loader(Arc::new(FakeDownloader::default()));
    let options = LoadOptions {
        play_first_item: true,
        ..LoadOptions::default()
    };

    loader.insert_media_with(
        vec![
            Location::parse("http://radio.test/missing.pls"),
            Location::parse("http://radio.test/next.mp3"),
        ],
        None,
        options,
    );
    loader.wait_until_idle(&mut || {});

    assert_eq!(locations(loader.model()), vec!["http://radio.test/next.mp3"]);
    assert_eq!(loader.model().len(), 1);

    let notices = loader.take_notices();
    assert_eq!(notices.len(), 1);
    let Notice::DownloadFailed { location, .. } = &notices[0];
    assert_eq!(location, &Location::parse("http://radio.test/missing.pls"));
    assert!(notices[0].to_string().contains("could not be downloaded"));

    let first = loader.model().last_id();
    assert_eq!(loader.take_play_request(), first);
    assert_eq!(loader.take_play_request(), None);
}

#[test]
fn play_request_points_at_first_entry_of_a_downloaded_playlist() {
    let downloader =
        Arc::new(FakeDownloader::default().with("http://radio.test/list.pls", TWO_ENTRY_PLS));
    let mut loader = loader(downloader);
    let options = LoadOptions {
        play_first_item: true,
        ..LoadOptions::default()
    };

    loader.insert_media_with(vec![Location::parse("http://radio.test/list.pls")], None, options);
    loader.wait_until_idle(&mut || {});

    let id = loader.take_play_request().unwrap();
    let Some(PlaylistItem::Track(entry)) = loader.model().get(id) else {
        panic!("play request does not point at a track");
    };
    assert_eq!(entry.location, Location::parse("http://radio.test/a.mp3"));
}

#[test]
fn no_play_request_without_the_option() {
    let mut loader = loader(Arc::new(FakeDownloader::default()));
    loader.insert_media(vec![Location::parse("http://radio.test/a.mp3")], None);
    loader.wait_until_idle(&mut || {});
    assert_eq!(loader.model().len(), 1);
    assert_eq!(loader.take_play_request(), None);
}

#[test]
fn later_runs_insert_after_the_given_item() {
    let mut loader = loader(Arc::new(FakeDownloader::default()));
    loader.insert_media(
        vec![
            Location::parse("http://radio.test/a.mp3"),
            Location::parse("http://radio.test/d.mp3"),
        ],
        None,
    );
    loader.wait_until_idle(&mut || {});

    let a = loader.model().iter().next().map(|(id, _)| id);
    loader.insert_media(
        vec![
            Location::parse("http://radio.test/b.mp3"),
            Location::parse("http://radio.test/c.mp3"),
        ],
        a,
    );
    loader.wait_until_idle(&mut || {});

    assert_eq!(names(loader.model()), vec!["a.mp3", "b.mp3", "c.mp3", "d.mp3"]);
}

#[test]
fn host_is_pumped_during_slow_downloads() {
    let downloader = Arc::new(
        FakeDownloader::default()
            .with("http://radio.test/list.pls", TWO_ENTRY_PLS)
            .delayed(Duration::from_millis(100)),
    );
    let mut loader = loader(downloader);
    loader.insert_media(vec![Location::parse("http://radio.test/list.pls")], None);

    let mut pumped = 0;
    loader.wait_until_idle(&mut || pumped += 1);

    assert!(pumped > 0);
    assert_eq!(loader.model().len(), 2);
}

#[test]
fn empty_run_finishes_without_items() {
    let mut loader = loader(Arc::new(FakeDownloader::default()));
    loader.insert_media(Vec::new(), None);
    assert!(!loader.is_idle());
    loader.wait_until_idle(&mut || {});
    assert!(loader.is_idle());
    assert!(loader.model().is_empty());
    assert_eq!(loader.process_events(&mut || {}), 0);
}
