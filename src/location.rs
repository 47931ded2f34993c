//! Locations: where a playable resource lives.
//!
//! A `Location` is either a path on the local filesystem or a remote URL.
//! User input, playlist lines and directory entries all end up here.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Local(PathBuf),
    Remote(Url),
}

impl Location {
    /// Parse a user/playlist supplied string as either a path or a URL.
    ///
    /// Absolute paths and anything not written as `scheme://...` are local,
    /// so `disc1:track.mp3` stays a relative path. `file://` URLs are
    /// converted back to paths. Single-letter schemes are treated as Windows
    /// drive letters, not URLs.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('/') || !raw.contains("://") {
            return Self::Local(PathBuf::from(raw));
        }

        match Url::parse(raw) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::Local(path),
                Err(()) => Self::Remote(url),
            },
            Ok(url) if url.scheme().len() > 1 => Self::Remote(url),
            _ => Self::Local(PathBuf::from(raw)),
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    pub fn as_local_path(&self) -> Option<&Path> {
        match self {
            Self::Local(p) => Some(p),
            Self::Remote(_) => None,
        }
    }

    pub fn as_remote(&self) -> Option<&Url> {
        match self {
            Self::Local(_) => None,
            Self::Remote(u) => Some(u),
        }
    }

    /// The path component used for format detection (the URL path for remote
    /// locations, so query strings do not hide the extension).
    pub fn path_str(&self) -> std::borrow::Cow<'_, str> {
        match self {
            Self::Local(p) => p.to_string_lossy(),
            Self::Remote(u) => std::borrow::Cow::Borrowed(u.path()),
        }
    }

    /// Final path segment, if any.
    pub fn file_name(&self) -> Option<String> {
        match self {
            Self::Local(p) => p.file_name().map(|s| s.to_string_lossy().into_owned()),
            Self::Remote(u) => u
                .path_segments()
                .and_then(|mut segs| segs.next_back())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name()?;
        Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(p) => write!(f, "{}", p.display()),
            Self::Remote(u) => write!(f, "{u}"),
        }
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::Local(path.to_path_buf())
    }
}
