//! Test doubles shared by unit tests.

use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use url::Url;

use crate::fetch::{Downloader, FetchError};
use crate::media::DecodeProbe;

/// Serves canned bodies by URL; unknown URLs fail.
#[derive(Default)]
pub(crate) struct FakeDownloader {
    bodies: HashMap<String, String>,
    delay: Duration,
    pub(crate) destinations: Mutex<Vec<PathBuf>>,
}

impl FakeDownloader {
    pub(crate) fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Downloader for FakeDownloader {
    fn download(&self, url: &Url, dest: &Path) -> Result<(), FetchError> {
        self.destinations.lock().unwrap().push(dest.to_path_buf());
        thread::sleep(self.delay);
        match self.bodies.get(url.as_str()) {
            Some(body) => {
                fs::write(dest, body)?;
                Ok(())
            }
            None => Err(FetchError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such resource: {url}"),
            ))),
        }
    }
}

pub(crate) struct RejectAll;

impl DecodeProbe for RejectAll {
    fn can_decode(&self, _path: &Path, _metadata: Option<&Metadata>) -> bool {
        false
    }
}
