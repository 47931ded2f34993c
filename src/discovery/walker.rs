use std::cmp::Ordering;
use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SortOrder;
use crate::location::Location;
use crate::media::MediaValidator;
use crate::playlist::classify;

use super::model::LoadOptions;

/// A regular file that passed validation, with the metadata used to accept it.
#[derive(Debug, Clone)]
pub struct AcceptedFile {
    pub path: PathBuf,
    pub metadata: Metadata,
}

/// Result of expanding one directory level.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Accepted media files, sorted by the configured order.
    pub files: Vec<AcceptedFile>,
    /// Subdirectories to visit next, in name order.
    pub subdirs: Vec<PathBuf>,
}

/// Expands a single directory level.
///
/// Special files are skipped, playlists found inside directories are ignored
/// (only top-level playlists are honored) and everything else goes through
/// the `MediaValidator`. An unreadable directory expands to nothing.
pub struct DirectoryWalker<'a> {
    options: &'a LoadOptions,
    validator: &'a MediaValidator,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(options: &'a LoadOptions, validator: &'a MediaValidator) -> Self {
        Self { options, validator }
    }

    pub fn expand(&self, dir: &Path) -> Expansion {
        let mut expansion = Expansion::default();

        // Always stat through links so symlinked files behave like regular
        // files; symlinked directories are gated below.
        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry in {}: {e}", dir.display());
                    continue;
                }
            };

            let file_type = entry.file_type();
            if is_special(&file_type) {
                log::debug!("skipping special file {}", entry.path().display());
                continue;
            }

            if file_type.is_dir() {
                if self.options.recurse && (self.options.follow_symlinks || !entry.path_is_symlink())
                {
                    expansion.subdirs.push(entry.into_path());
                }
                continue;
            }

            if !file_type.is_file() {
                continue;
            }

            if classify(&entry.path().to_string_lossy()).is_some() {
                log::debug!("ignoring nested playlist {}", entry.path().display());
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::debug!("cannot stat {}: {e}", entry.path().display());
                    continue;
                }
            };

            let location = Location::local(entry.path());
            if self.validator.is_valid_media(&location, Some(&metadata)) {
                expansion.files.push(AcceptedFile {
                    path: entry.into_path(),
                    metadata,
                });
            }
        }

        sort_files(
            &mut expansion.files,
            self.options.sort_order,
            self.options.sort_reversed,
        );
        expansion.subdirs.sort_by(|a, b| compare_names(a, b));
        expansion
    }
}

/// Sort accepted files in place. Ties fall back to name order so the result
/// never depends on the order the filesystem returned.
pub fn sort_files(files: &mut [AcceptedFile], order: SortOrder, reversed: bool) {
    match order {
        SortOrder::Name => files.sort_by(|a, b| compare_names(&a.path, &b.path)),
        SortOrder::NameCaseSensitive => files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name())),
        SortOrder::Modified => files.sort_by(|a, b| {
            a.metadata
                .modified()
                .ok()
                .cmp(&b.metadata.modified().ok())
                .then_with(|| compare_names(&a.path, &b.path))
        }),
        SortOrder::Size => files.sort_by(|a, b| {
            a.metadata
                .len()
                .cmp(&b.metadata.len())
                .then_with(|| compare_names(&a.path, &b.path))
        }),
        SortOrder::Unsorted => {}
    }

    if reversed {
        files.reverse();
    }
}

/// Case-insensitive file name order, case-sensitive on ties.
///
/// Names are compared by lowercased code point, not by locale collation:
/// `Émile` sorts after `zeta`.
fn compare_names(a: &Path, b: &Path) -> Ordering {
    let a = a.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
    let b = b.file_name().map(|s| s.to_string_lossy()).unwrap_or_default();
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(&b))
}

#[cfg(unix)]
fn is_special(file_type: &FileType) -> bool {
    use std::os::unix::fs::FileTypeExt;

    file_type.is_char_device()
        || file_type.is_block_device()
        || file_type.is_fifo()
        || file_type.is_socket()
}

#[cfg(not(unix))]
fn is_special(_file_type: &FileType) -> bool {
    false
}
