use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use tempfile::TempPath;

use crate::location::Location;

use super::FetchError;
use super::downloader::Downloader;

/// Synchronous, host-cooperative download of a remote playlist.
pub struct RemotePlaylistFetch {
    downloader: Arc<dyn Downloader>,
    pump_interval: Duration,
}

impl RemotePlaylistFetch {
    pub fn new(downloader: Arc<dyn Downloader>, pump_interval: Duration) -> Self {
        Self {
            downloader,
            pump_interval,
        }
    }

    /// Download `location` into a fresh temporary file and return its path.
    ///
    /// Blocks until the download finishes, calling `pump` every
    /// `pump_interval` so the host can keep its event loop alive. The
    /// returned `TempPath` deletes the file when dropped; on failure the file
    /// is removed before returning.
    pub fn fetch(
        &self,
        location: &Location,
        pump: &mut dyn FnMut(),
    ) -> Result<TempPath, FetchError> {
        let url = location
            .as_remote()
            .ok_or_else(|| FetchError::NotRemote(location.to_string()))?
            .clone();

        let suffix = location
            .extension()
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let temp = tempfile::Builder::new()
            .prefix("playloader-")
            .suffix(&suffix)
            .tempfile()
            .map_err(FetchError::TempFile)?
            .into_temp_path();

        log::info!("downloading {location}");

        let (tx, rx) = mpsc::channel();
        let downloader = Arc::clone(&self.downloader);
        let dest = temp.to_path_buf();
        let spawned = thread::Builder::new()
            .name("playlist-download".to_string())
            .spawn(move || {
                let _ = tx.send(downloader.download(&url, &dest));
            });
        if let Err(e) = spawned {
            discard(temp);
            return Err(FetchError::Io(e));
        }

        let result = loop {
            match rx.recv_timeout(self.pump_interval) {
                Ok(result) => break result,
                Err(RecvTimeoutError::Timeout) => pump(),
                Err(RecvTimeoutError::Disconnected) => break Err(FetchError::Interrupted),
            }
        };

        match result {
            Ok(()) => Ok(temp),
            Err(e) => {
                log::warn!("download of {location} failed: {e}");
                discard(temp);
                Err(e)
            }
        }
    }
}

/// Delete a temporary file, logging (never propagating) failures.
pub(crate) fn discard(temp: TempPath) {
    let path = temp.to_path_buf();
    if let Err(e) = temp.close() {
        log::warn!("could not remove temporary file {}: {e}", path.display());
    }
}
