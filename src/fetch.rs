//! Remote playlist fetching.
//!
//! Workers cannot download; they post `DownloadRequested` and the consumer
//! uses `RemotePlaylistFetch` to pull the playlist into a temporary file
//! that keeps the original extension, then starts a new session on it.

mod downloader;
mod remote;

use std::io;

pub use downloader::{Downloader, HttpDownloader};
pub use remote::RemotePlaylistFetch;
pub(crate) use remote::discard;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("not a remote location: {0}")]
    NotRemote(String),

    #[error("could not create temporary file: {0}")]
    TempFile(#[source] io::Error),

    #[error("request failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    #[error("could not save download: {0}")]
    Io(#[from] io::Error),

    #[error("download worker stopped unexpectedly")]
    Interrupted,
}

#[cfg(test)]
mod tests;
