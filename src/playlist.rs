//! Legacy playlist formats.
//!
//! `.m3u` and `.pls` files are recognized by extension and read as a
//! stream of `DiscoveredEntry` values in document order. Readers never fail
//! on a malformed line; an I/O error mid-stream ends the stream with
//! whatever was read so far.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::discovery::DiscoveredEntry;
use crate::location::Location;

mod format;
mod m3u;
mod pls;
mod text;

pub use format::{PlaylistFormat, classify};
pub use m3u::M3uReader;
pub use pls::PlsReader;

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("failed to open playlist {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Open the playlist at `path` and return a reader over its entries.
///
/// Relative references inside the playlist are resolved against the
/// directory that contains it.
pub fn open_playlist(
    path: &Path,
    format: PlaylistFormat,
) -> Result<Box<dyn Iterator<Item = DiscoveredEntry>>, PlaylistError> {
    let file = File::open(path).map_err(|source| PlaylistError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(match format {
        PlaylistFormat::M3u => Box::new(M3uReader::new(reader, base_dir)),
        PlaylistFormat::Pls => Box::new(PlsReader::new(reader, base_dir)),
    })
}

/// Read every entry of the playlist at `path`.
pub fn read_playlist(
    path: &Path,
    format: PlaylistFormat,
) -> Result<Vec<DiscoveredEntry>, PlaylistError> {
    Ok(open_playlist(path, format)?.collect())
}

/// Resolve a playlist reference: relative local paths are taken relative
/// to the playlist's own directory.
fn resolve_reference(reference: &str, base_dir: &Path) -> Location {
    match Location::parse(reference) {
        Location::Local(path) if path.is_relative() => Location::Local(base_dir.join(path)),
        other => other,
    }
}
