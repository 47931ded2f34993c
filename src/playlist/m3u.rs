//! M3U / extended M3U.
//!
//! ```text
//! #EXTM3U
//! #EXTINF:180,Artist - Title
//! relative/or/absolute/path.mp3
//! http://host/stream.ogg
//! ```

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use crate::discovery::DiscoveredEntry;

use super::text::Lines;

/// Streaming M3U reader. Yields one entry per reference line, carrying the
/// title/length of the `#EXTINF` line that preceded it (if any).
pub struct M3uReader<R> {
    lines: Lines<R>,
    base_dir: PathBuf,
    title: Option<String>,
    duration: Option<Duration>,
}

impl<R: BufRead> M3uReader<R> {
    pub fn new(reader: R, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            lines: Lines::new(reader),
            base_dir: base_dir.into(),
            title: None,
            duration: None,
        }
    }
}

impl<R: BufRead> Iterator for M3uReader<R> {
    type Item = DiscoveredEntry;

    fn next(&mut self) -> Option<DiscoveredEntry> {
        for line in self.lines.by_ref() {
            if line.starts_with("#EXTINF") {
                let (duration, title) = parse_extinf(&line);
                self.duration = duration;
                self.title = title;
                continue;
            }

            let reference = line.trim();
            if reference.is_empty() || reference.starts_with('#') {
                continue;
            }

            return Some(DiscoveredEntry {
                location: super::resolve_reference(reference, &self.base_dir),
                title: self.title.take(),
                duration: self.duration.take(),
            });
        }
        None
    }
}

/// Split `#EXTINF:<length>,<title>`.
///
/// A length of 0, a negative length or garbage is undetermined (`None`).
pub(super) fn parse_extinf(line: &str) -> (Option<Duration>, Option<String>) {
    let Some((_, info)) = line.split_once(':') else {
        return (None, None);
    };
    let (length, title) = info.split_once(',').unwrap_or((info, ""));

    let duration = length
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map(|n| Duration::from_secs(n as u64));

    let title = title.trim();
    let title = (!title.is_empty()).then(|| title.to_string());

    (duration, title)
}
