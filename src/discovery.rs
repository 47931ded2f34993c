//! Background discovery: turns user supplied locations into an ordered
//! stream of `LoaderEvent`s.
//!
//! A `LoadSession` runs on its own thread, walks directories with the
//! `DirectoryWalker`, parses top-level playlists and posts one event per
//! discovered unit of work. It never touches consumer-owned state.

mod event;
mod model;
mod session;
mod walker;

pub use event::LoaderEvent;
pub use model::{DiscoveredEntry, LoadOptions, SessionId};
pub use session::{LoadSession, SessionState, spawn_session};
pub use crate::config::SortOrder;
pub use walker::{AcceptedFile, DirectoryWalker, Expansion, sort_files};
