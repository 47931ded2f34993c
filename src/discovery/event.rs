use std::path::PathBuf;

use crate::location::Location;

use super::model::{DiscoveredEntry, SessionId};

/// Messages posted from a worker to the consumer, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEvent {
    /// A playable item to insert at the run's cursor.
    MediaFound {
        session: SessionId,
        entry: DiscoveredEntry,
    },
    /// A local playlist was parsed; its entries were already posted as
    /// `MediaFound` in document order.
    PlaylistResolved {
        session: SessionId,
        path: PathBuf,
        urls: Vec<Location>,
    },
    /// A remote playlist must be downloaded on the consumer side.
    DownloadRequested {
        session: SessionId,
        location: Location,
    },
    /// Last message of every run.
    RunFinished { session: SessionId },
}

impl LoaderEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::MediaFound { session, .. }
            | Self::PlaylistResolved { session, .. }
            | Self::DownloadRequested { session, .. }
            | Self::RunFinished { session } => *session,
        }
    }
}
