use serde::{Deserialize, Serialize};

use crate::media::DEFAULT_EXTENSIONS;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playloader/config.toml` or `~/.config/playloader/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYLOADER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub loader: LoaderSettings,
    pub network: NetworkSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Whether to descend into subdirectories of an expanded directory.
    pub recurse: bool,
    /// Whether symlinked directories are expanded.
    pub follow_symlinks: bool,
    /// Order of the files collected from one directory.
    pub sort_order: SortOrder,
    /// Reverse `sort_order`.
    pub sort_reversed: bool,
    /// Optional cap on directory levels (1 = only the directory's own files).
    pub max_depth: Option<usize>,
    /// File extensions accepted as media without probing (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Ask the host to start playing the first inserted item.
    pub play_first_item: bool,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            recurse: true,
            follow_symlinks: false,
            sort_order: SortOrder::Name,
            sort_reversed: false,
            max_depth: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            play_first_item: false,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Case-insensitive file name order (code point order, not locale collation).
    #[default]
    #[serde(alias = "alpha", alias = "alphabetical")]
    Name,
    #[serde(alias = "name_case_sensitive")]
    NameCaseSensitive,
    #[serde(alias = "mtime", alias = "time")]
    Modified,
    Size,
    /// Whatever order the filesystem returned.
    #[serde(alias = "none")]
    Unsorted,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// TCP connect timeout for remote playlist downloads (milliseconds).
    pub connect_timeout_ms: u64,
    /// Read timeout for remote playlist downloads (milliseconds).
    pub read_timeout_ms: u64,
    pub user_agent: String,
    /// How often a blocked download hands control back to the host's event
    /// loop (milliseconds).
    pub pump_interval_ms: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            read_timeout_ms: 15_000,
            user_agent: concat!("playloader/", env!("CARGO_PKG_VERSION")).to_string(),
            pump_interval_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Which entry fields to print, and in what order.
    ///
    /// Example: ["length", "title"]
    pub display_fields: Vec<EntryDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            display_fields: vec![EntryDisplayField::Location],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryDisplayField {
    Title,
    Filename,
    Location,
    Length,
}
