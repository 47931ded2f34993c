use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::config::NetworkSettings;

use super::FetchError;

/// Blocking download of `url` into the file at `dest`.
pub trait Downloader: Send + Sync {
    fn download(&self, url: &Url, dest: &Path) -> Result<(), FetchError>;
}

/// HTTP(S) downloader backed by a shared `ureq` agent.
pub struct HttpDownloader {
    agent: ureq::Agent,
}

impl HttpDownloader {
    pub fn new(settings: &NetworkSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(settings.connect_timeout_ms))
            .timeout_read(Duration::from_millis(settings.read_timeout_ms))
            .user_agent(&settings.user_agent)
            .build();
        Self { agent }
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &Url, dest: &Path) -> Result<(), FetchError> {
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        let mut reader = response.into_reader();
        let mut out = BufWriter::new(File::create(dest)?);
        let written = io::copy(&mut reader, &mut out)?;
        out.flush()?;

        log::debug!("downloaded {written} bytes from {url}");
        Ok(())
    }
}
