//! Turns files, directories, playlists and URLs into an ordered playlist.
//!
//! Discovery runs on worker threads (`discovery`) and reports through a
//! channel; the host thread applies those reports to a `PlaylistModel` via
//! the `app::Loader`, downloading remote playlists on the way (`fetch`).

pub mod app;
pub mod config;
pub mod discovery;
pub mod fetch;
pub mod location;
pub mod media;
pub mod playlist;
pub mod runtime;

#[cfg(test)]
mod testing;
