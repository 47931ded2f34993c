use super::*;
use crate::config::NetworkSettings;
use crate::location::Location;
use crate::testing::FakeDownloader;
use std::sync::Arc;
use std::time::Duration;

const STATION: &str = "http://radio.example/station.pls";

#[test]
fn fetch_keeps_extension_and_content() {
    let downloader = FakeDownloader::default().with(STATION, "[playlist]\nFile1=http://radio.example/live\n");
    let fetch = RemotePlaylistFetch::new(Arc::new(downloader), Duration::from_millis(5));

    let temp = fetch
        .fetch(&Location::parse(STATION), &mut || {})
        .unwrap();
    assert_eq!(temp.extension().and_then(|e| e.to_str()), Some("pls"));
    assert!(std::fs::read_to_string(&temp).unwrap().contains("File1="));

    let path = temp.to_path_buf();
    drop(temp);
    assert!(!path.exists());
}

#[test]
fn failed_fetch_removes_the_temporary_file() {
    let downloader = Arc::new(FakeDownloader::default());
    let fetch = RemotePlaylistFetch::new(downloader.clone(), Duration::from_millis(5));

    let err = fetch
        .fetch(&Location::parse("http://radio.example/missing.m3u"), &mut || {})
        .unwrap_err();
    assert!(matches!(err, FetchError::Io(_)));

    let dests = downloader.destinations.lock().unwrap();
    assert_eq!(dests.len(), 1);
    assert!(!dests[0].exists());
}

#[test]
fn host_is_pumped_while_waiting() {
    let downloader = FakeDownloader::default()
        .with(STATION, "File1=x.mp3\n")
        .delayed(Duration::from_millis(120));
    let fetch = RemotePlaylistFetch::new(Arc::new(downloader), Duration::from_millis(5));

    let mut pumps = 0;
    let temp = fetch
        .fetch(&Location::parse(STATION), &mut || pumps += 1)
        .unwrap();
    assert!(pumps > 0);
    drop(temp);
}

#[test]
fn local_locations_are_not_fetched() {
    let fetch = RemotePlaylistFetch::new(Arc::new(FakeDownloader::default()), Duration::from_millis(5));
    let err = fetch
        .fetch(&Location::local("/tmp/list.pls"), &mut || {})
        .unwrap_err();
    assert!(matches!(err, FetchError::NotRemote(_)));
}

#[test]
fn http_downloader_reports_connection_failures() {
    let settings = NetworkSettings {
        connect_timeout_ms: 500,
        read_timeout_ms: 500,
        ..NetworkSettings::default()
    };
    let downloader = HttpDownloader::new(&settings);
    let dir = tempfile::tempdir().unwrap();
    let url = url::Url::parse("http://127.0.0.1:1/list.pls").unwrap();

    let err = downloader
        .download(&url, &dir.path().join("out.pls"))
        .unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}
