use crate::location::Location;

/// Playlist formats recognized by file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaylistFormat {
    M3u,
    Pls,
}

impl PlaylistFormat {
    /// Extension including the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::M3u => ".m3u",
            Self::Pls => ".pls",
        }
    }

    pub fn of(location: &Location) -> Option<Self> {
        classify(&location.path_str())
    }
}

/// Classify `path` by its (case-insensitive) suffix. No I/O.
pub fn classify(path: &str) -> Option<PlaylistFormat> {
    [PlaylistFormat::M3u, PlaylistFormat::Pls]
        .into_iter()
        .find(|format| ends_with_ignore_case(path, format.suffix()))
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s
            .get(s.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
