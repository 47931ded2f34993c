use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use tempfile::TempPath;

use crate::config::Settings;
use crate::discovery::{DiscoveredEntry, LoadOptions, LoadSession, LoaderEvent, SessionId, spawn_session};
use crate::fetch::{self, Downloader, HttpDownloader, RemotePlaylistFetch};
use crate::location::Location;
use crate::media::{DecodeProbe, LoftyProbe, MediaValidator};

use super::model::{ItemId, PlaylistItem, PlaylistModel};

/// Something the host should show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DownloadFailed { location: Location, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DownloadFailed { location, reason } => write!(
                f,
                "The playlist, '{location}', could not be downloaded: {reason}"
            ),
        }
    }
}

/// A playlist that was parsed during a run, keyed by where it came from
/// (the remote URL for downloaded playlists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlaylist {
    pub source: Location,
    pub urls: Vec<Location>,
}

struct SessionRecord {
    root: SessionId,
    /// Remote location this session was started for.
    origin: Option<Location>,
    /// Set for child sessions: entries are buffered and swapped in here.
    placeholder: Option<ItemId>,
    temp_file: Option<TempPath>,
    buffered: Vec<DiscoveredEntry>,
    /// Events that arrived while a child session was being applied.
    backlog: VecDeque<LoaderEvent>,
    worker: Option<JoinHandle<()>>,
}

impl Drop for SessionRecord {
    fn drop(&mut self) {
        if let Some(temp) = self.temp_file.take() {
            fetch::discard(temp);
        }
    }
}

/// A root session and the children it spawned for remote playlists.
/// Only the top of `stack` has its events applied.
struct Chain {
    cursor: Option<ItemId>,
    options: LoadOptions,
    play_first_item: bool,
    stack: Vec<SessionId>,
}

/// Consumer side of discovery. Owns the playlist model and applies worker
/// events to it on the host thread, in the order the locations were given.
pub struct Loader {
    validator: Arc<MediaValidator>,
    fetch: RemotePlaylistFetch,
    defaults: LoadOptions,
    tx: Sender<LoaderEvent>,
    rx: Receiver<LoaderEvent>,
    pump_interval: Duration,
    model: PlaylistModel,
    sessions: HashMap<SessionId, SessionRecord>,
    chains: HashMap<SessionId, Chain>,
    next_session: u64,
    notices: Vec<Notice>,
    resolved: Vec<ResolvedPlaylist>,
    play_request: Option<ItemId>,
}

impl Loader {
    pub fn new(
        settings: &Settings,
        downloader: Arc<dyn Downloader>,
        probe: Arc<dyn DecodeProbe>,
    ) -> Self {
        let pump_interval = Duration::from_millis(settings.network.pump_interval_ms.max(1));
        let (tx, rx) = mpsc::channel();
        Self {
            validator: Arc::new(MediaValidator::new(&settings.loader.extensions, probe)),
            fetch: RemotePlaylistFetch::new(downloader, pump_interval),
            defaults: LoadOptions::from(&settings.loader),
            tx,
            rx,
            pump_interval,
            model: PlaylistModel::new(),
            sessions: HashMap::new(),
            chains: HashMap::new(),
            next_session: 0,
            notices: Vec::new(),
            resolved: Vec::new(),
            play_request: None,
        }
    }

    /// HTTP downloads and lofty probing, configured from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings,
            Arc::new(HttpDownloader::new(&settings.network)),
            Arc::new(LoftyProbe),
        )
    }

    pub fn model(&self) -> &PlaylistModel {
        &self.model
    }

    pub fn defaults(&self) -> &LoadOptions {
        &self.defaults
    }

    /// No session is running or waiting to be applied.
    pub fn is_idle(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Start a run over `locations` with the configured options. Results are
    /// inserted after `after` (`None` = at the front) in the given order.
    pub fn insert_media(&mut self, locations: Vec<Location>, after: Option<ItemId>) -> SessionId {
        let options = self.defaults.clone();
        self.insert_media_with(locations, after, options)
    }

    pub fn insert_media_with(
        &mut self,
        locations: Vec<Location>,
        after: Option<ItemId>,
        options: LoadOptions,
    ) -> SessionId {
        let id = self.allocate_session();
        self.chains.insert(
            id,
            Chain {
                cursor: after,
                play_first_item: options.play_first_item,
                options: options.clone(),
                stack: vec![id],
            },
        );
        self.start_session(id, id, locations, options, None, None, None);
        id
    }

    /// Apply every event already queued. Returns how many were received.
    pub fn process_events(&mut self, pump: &mut dyn FnMut()) -> usize {
        let mut count = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    count += 1;
                    self.apply(event, pump);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return count,
            }
        }
    }

    /// Block until every run has finished, calling `pump` whenever no event
    /// arrived within the pump interval.
    pub fn wait_until_idle(&mut self, pump: &mut dyn FnMut()) {
        while !self.is_idle() {
            match self.rx.recv_timeout(self.pump_interval) {
                Ok(event) => self.apply(event, pump),
                Err(RecvTimeoutError::Timeout) => pump(),
                // Unreachable while we hold `tx`.
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }
    }

    /// The item the host should start playing, once.
    pub fn take_play_request(&mut self) -> Option<ItemId> {
        self.play_request.take()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn resolved_playlists(&self) -> &[ResolvedPlaylist] {
        &self.resolved
    }

    fn allocate_session(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        id
    }

    #[allow(clippy::too_many_arguments)]
    fn start_session(
        &mut self,
        id: SessionId,
        root: SessionId,
        locations: Vec<Location>,
        options: LoadOptions,
        origin: Option<Location>,
        placeholder: Option<ItemId>,
        temp_file: Option<TempPath>,
    ) {
        let session = LoadSession::new(
            id,
            locations,
            options,
            Arc::clone(&self.validator),
            self.tx.clone(),
        );

        let worker = match spawn_session(session) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("could not start session {id}: {e}");
                let _ = self.tx.send(LoaderEvent::RunFinished { session: id });
                None
            }
        };

        self.sessions.insert(
            id,
            SessionRecord {
                root,
                origin,
                placeholder,
                temp_file,
                buffered: Vec::new(),
                backlog: VecDeque::new(),
                worker,
            },
        );
    }

    fn apply(&mut self, event: LoaderEvent, pump: &mut dyn FnMut()) {
        let session = event.session();
        let Some(record) = self.sessions.get_mut(&session) else {
            log::debug!("dropping event from unknown session {session}");
            return;
        };

        let on_top = self
            .chains
            .get(&record.root)
            .and_then(|chain| chain.stack.last())
            == Some(&session);
        if !on_top {
            record.backlog.push_back(event);
            return;
        }

        self.dispatch(event, pump);
    }

    fn dispatch(&mut self, event: LoaderEvent, pump: &mut dyn FnMut()) {
        match event {
            LoaderEvent::MediaFound { session, entry } => self.on_media_found(session, entry),
            LoaderEvent::PlaylistResolved { session, path, urls } => {
                self.on_playlist_resolved(session, path, urls)
            }
            LoaderEvent::DownloadRequested { session, location } => {
                self.on_download_requested(session, location, pump)
            }
            LoaderEvent::RunFinished { session } => self.on_run_finished(session, pump),
        }
    }

    fn on_media_found(&mut self, session: SessionId, entry: DiscoveredEntry) {
        let Some(record) = self.sessions.get_mut(&session) else {
            return;
        };
        if record.placeholder.is_some() {
            record.buffered.push(entry);
            return;
        }

        let Some(chain) = self.chains.get_mut(&record.root) else {
            return;
        };
        let id = self.model.insert_after(chain.cursor, PlaylistItem::Track(entry));
        chain.cursor = Some(id);
        if std::mem::take(&mut chain.play_first_item) {
            self.play_request = Some(id);
        }
    }

    fn on_playlist_resolved(&mut self, session: SessionId, path: PathBuf, urls: Vec<Location>) {
        let source = self
            .sessions
            .get(&session)
            .and_then(|record| record.origin.clone())
            .unwrap_or(Location::Local(path));
        log::debug!("playlist {source} resolved to {} entries", urls.len());
        self.resolved.push(ResolvedPlaylist { source, urls });
    }

    fn on_download_requested(
        &mut self,
        session: SessionId,
        location: Location,
        pump: &mut dyn FnMut(),
    ) {
        let Some(record) = self.sessions.get(&session) else {
            return;
        };
        if record.placeholder.is_some() {
            log::warn!("ignoring remote playlist {location} referenced from a downloaded playlist");
            return;
        }
        let root = record.root;

        let child = self.allocate_session();
        let Some(chain) = self.chains.get_mut(&root) else {
            return;
        };
        let placeholder = self.model.insert_after(
            chain.cursor,
            PlaylistItem::Pending {
                session: child,
                location: location.clone(),
            },
        );
        chain.cursor = Some(placeholder);
        let options = LoadOptions {
            recurse: false,
            play_first_item: false,
            ..chain.options.clone()
        };

        match self.fetch.fetch(&location, pump) {
            Ok(temp) => {
                let path = temp.to_path_buf();
                log::debug!("session {child} loads {location} from {}", path.display());
                if let Some(chain) = self.chains.get_mut(&root) {
                    chain.stack.push(child);
                }
                self.start_session(
                    child,
                    root,
                    vec![Location::Local(path)],
                    options,
                    Some(location),
                    Some(placeholder),
                    Some(temp),
                );
            }
            Err(e) => {
                let previous = self.model.predecessor(placeholder);
                self.model.remove(placeholder);
                if let Some(chain) = self.chains.get_mut(&root) {
                    if chain.cursor == Some(placeholder) {
                        chain.cursor = previous;
                    }
                }
                self.notices.push(Notice::DownloadFailed {
                    location,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn on_run_finished(&mut self, session: SessionId, pump: &mut dyn FnMut()) {
        let Some(mut record) = self.sessions.remove(&session) else {
            return;
        };
        if let Some(worker) = record.worker.take() {
            if worker.join().is_err() {
                log::error!("session {session} worker panicked");
            }
        }

        let root = record.root;
        if let Some(placeholder) = record.placeholder {
            let entries = std::mem::take(&mut record.buffered);
            self.swap_in(root, placeholder, entries);
        }
        if !record.backlog.is_empty() {
            log::warn!(
                "session {session} finished with {} unapplied event(s)",
                record.backlog.len()
            );
        }
        // Removes the downloaded playlist, if any.
        drop(record);

        let Some(chain) = self.chains.get_mut(&root) else {
            return;
        };
        chain.stack.retain(|id| *id != session);
        if chain.stack.is_empty() {
            self.chains.remove(&root);
            log::debug!("run {root} complete");
            return;
        }

        self.replay_backlog(root, pump);
    }

    /// Replace a child's placeholder with the entries it found.
    fn swap_in(&mut self, root: SessionId, placeholder: ItemId, entries: Vec<DiscoveredEntry>) {
        let previous = self.model.predecessor(placeholder);
        let items = entries.into_iter().map(PlaylistItem::Track).collect();
        let ids = self.model.replace(placeholder, items);

        let Some(chain) = self.chains.get_mut(&root) else {
            return;
        };
        if chain.cursor == Some(placeholder) {
            chain.cursor = ids.last().copied().or(previous);
        }
        if let Some(first) = ids.first() {
            if std::mem::take(&mut chain.play_first_item) {
                self.play_request = Some(*first);
            }
        }
    }

    /// Apply events held back for the new top of `root`'s stack, until it
    /// runs dry or starts another child.
    fn replay_backlog(&mut self, root: SessionId, pump: &mut dyn FnMut()) {
        loop {
            let Some(top) = self.chains.get(&root).and_then(|c| c.stack.last().copied()) else {
                return;
            };
            let Some(event) = self
                .sessions
                .get_mut(&top)
                .and_then(|record| record.backlog.pop_front())
            else {
                return;
            };
            self.dispatch(event, pump);
        }
    }
}
