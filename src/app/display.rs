use std::path::Path;
use std::time::Duration;

use crate::config::EntryDisplayField;
use crate::discovery::DiscoveredEntry;

use super::model::PlaylistItem;

/// Build a display string for an entry according to the provided `fields` and separator.
///
/// Fields that are missing (no title, undetermined length) are skipped; when
/// nothing was produced the location itself is shown.
pub fn display_from_fields(
    entry: &DiscoveredEntry,
    fields: &[EntryDisplayField],
    sep: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            EntryDisplayField::Title => {
                if let Some(t) = entry.title.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    parts.push(t.to_string());
                }
            }
            EntryDisplayField::Filename => {
                let name = entry.location.file_name();
                let stem = name
                    .as_deref()
                    .and_then(|n| Path::new(n).file_stem())
                    .and_then(|s| s.to_str())
                    .filter(|s| !s.trim().is_empty());
                if let Some(stem) = stem {
                    parts.push(stem.to_string());
                }
            }
            EntryDisplayField::Location => {
                parts.push(entry.location.to_string());
            }
            EntryDisplayField::Length => {
                if let Some(d) = entry.duration {
                    parts.push(format_mmss(d));
                }
            }
        }
    }

    if parts.is_empty() {
        entry.location.to_string()
    } else {
        parts.join(sep)
    }
}

/// Same as `display_from_fields`, with a marker for unresolved remote playlists.
pub fn display_item(item: &PlaylistItem, fields: &[EntryDisplayField], sep: &str) -> String {
    match item {
        PlaylistItem::Track(entry) => display_from_fields(entry, fields, sep),
        PlaylistItem::Pending { location, .. } => format!("[loading] {location}"),
    }
}

pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
