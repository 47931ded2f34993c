//! PLS (`[playlist]` / `FileN=` / `TitleN=` / `LengthN=`).

use std::io::BufRead;
use std::iter::Peekable;
use std::path::PathBuf;
use std::time::Duration;

use crate::discovery::DiscoveredEntry;

use super::text::{Lines, value_of};

/// Streaming PLS reader.
///
/// Each `File` line starts a record. An immediately following `Title` line
/// and then a `Length` line are folded into it; any other line is left for
/// the next record. Unlike M3U, a missing length is 0 seconds rather than
/// undetermined.
pub struct PlsReader<R: BufRead> {
    lines: Peekable<Lines<R>>,
    base_dir: PathBuf,
}

impl<R: BufRead> PlsReader<R> {
    pub fn new(reader: R, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            lines: Lines::new(reader).peekable(),
            base_dir: base_dir.into(),
        }
    }
}

impl<R: BufRead> Iterator for PlsReader<R> {
    type Item = DiscoveredEntry;

    fn next(&mut self) -> Option<DiscoveredEntry> {
        loop {
            let line = self.lines.next()?;
            if !line.starts_with("File") {
                continue;
            }

            let target = value_of(&line);
            if target.is_empty() {
                log::debug!("pls: skipping record without a target: {line:?}");
                continue;
            }

            let mut title = None;
            let mut duration = Some(Duration::ZERO);

            if let Some(line) = self.lines.next_if(|l| l.starts_with("Title")) {
                let value = value_of(&line);
                if !value.is_empty() {
                    title = Some(value.to_string());
                }
            }
            if let Some(line) = self.lines.next_if(|l| l.starts_with("Length")) {
                duration = parse_length(value_of(&line));
            }

            return Some(DiscoveredEntry {
                location: super::resolve_reference(target, &self.base_dir),
                title,
                duration,
            });
        }
    }
}

/// `-1` marks a stream of unknown length; unparsable values count as 0.
fn parse_length(value: &str) -> Option<Duration> {
    match value.parse::<i64>() {
        Ok(n) if n < 0 => None,
        Ok(n) => Some(Duration::from_secs(n as u64)),
        Err(_) => Some(Duration::ZERO),
    }
}
