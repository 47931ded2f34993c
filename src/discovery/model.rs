//! Discovery data model: entries, per-run options and session ids.

use std::fmt;
use std::time::Duration;

use crate::config::{LoaderSettings, SortOrder};
use crate::location::Location;

/// One resolved playback candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredEntry {
    pub location: Location,
    pub title: Option<String>,
    /// `None` means undetermined; `Some(Duration::ZERO)` is a real zero length.
    pub duration: Option<Duration>,
}

impl DiscoveredEntry {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            title: None,
            duration: None,
        }
    }
}

/// Immutable configuration snapshot for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub recurse: bool,
    pub follow_symlinks: bool,
    pub sort_order: SortOrder,
    pub sort_reversed: bool,
    pub max_depth: Option<usize>,
    /// One-shot: the first item inserted by the chain of runs started with
    /// these options is handed to the host to play.
    pub play_first_item: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&LoaderSettings::default())
    }
}

impl From<&LoaderSettings> for LoadOptions {
    fn from(s: &LoaderSettings) -> Self {
        Self {
            recurse: s.recurse,
            follow_symlinks: s.follow_symlinks,
            sort_order: s.sort_order,
            sort_reversed: s.sort_reversed,
            max_depth: s.max_depth,
            play_first_item: s.play_first_item,
        }
    }
}

/// Stable id of a discovery run, unique per `Loader`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
