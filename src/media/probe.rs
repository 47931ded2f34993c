use std::fs::Metadata;
use std::path::Path;

use lofty::probe::Probe;

/// "Can this be decoded?" check used when the extension is not on the
/// allow-list. `metadata` is passed when the caller already stat'ed the
/// file so implementations can avoid a second stat.
pub trait DecodeProbe: Send + Sync {
    fn can_decode(&self, path: &Path, metadata: Option<&Metadata>) -> bool;
}

/// Content sniffing via `lofty`: accepts readable, non-empty regular files
/// whose audio container can be identified.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProbe;

impl DecodeProbe for LoftyProbe {
    fn can_decode(&self, path: &Path, metadata: Option<&Metadata>) -> bool {
        if let Some(meta) = metadata {
            if !meta.is_file() || meta.len() == 0 || !is_readable(meta) {
                return false;
            }
        }

        let probe = match Probe::open(path) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("probe: cannot open {}: {e}", path.display());
                return false;
            }
        };

        match probe.guess_file_type() {
            Ok(p) => p.file_type().is_some(),
            Err(e) => {
                log::debug!("probe: cannot sniff {}: {e}", path.display());
                false
            }
        }
    }
}

#[cfg(unix)]
pub(super) fn is_readable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o444 != 0
}

#[cfg(not(unix))]
pub(super) fn is_readable(_meta: &Metadata) -> bool {
    true
}
