use std::collections::HashSet;
use std::fs::Metadata;
use std::sync::Arc;

use crate::location::Location;

use super::probe::{DecodeProbe, LoftyProbe};

/// Extensions accepted without asking the probe.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "ogg", "m3u", "pls", "mod", "wav", "flac"];

pub struct MediaValidator {
    extensions: HashSet<String>,
    probe: Arc<dyn DecodeProbe>,
}

impl MediaValidator {
    /// `extensions` are matched case-insensitively; a leading dot is allowed.
    pub fn new(extensions: &[String], probe: Arc<dyn DecodeProbe>) -> Self {
        let extensions = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { extensions, probe }
    }

    pub fn with_default_probe(extensions: &[String]) -> Self {
        Self::new(extensions, Arc::new(LoftyProbe))
    }

    pub fn is_valid_media(&self, location: &Location, metadata: Option<&Metadata>) -> bool {
        let Some(path) = location.as_local_path() else {
            return true;
        };

        if location
            .extension()
            .is_some_and(|ext| self.extensions.contains(&ext))
        {
            return true;
        }

        let accepted = self.probe.can_decode(path, metadata);
        if !accepted {
            log::debug!("rejected {location}");
        }
        accepted
    }
}

impl Default for MediaValidator {
    fn default() -> Self {
        let extensions: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        Self::with_default_probe(&extensions)
    }
}
