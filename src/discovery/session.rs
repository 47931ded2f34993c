use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crate::location::Location;
use crate::media::MediaValidator;
use crate::playlist::{self, PlaylistFormat};

use super::event::LoaderEvent;
use super::model::{DiscoveredEntry, LoadOptions, SessionId};
use super::walker::DirectoryWalker;

/// Depth of the caller supplied locations. Playlists are only expanded here.
const TOP_LEVEL: usize = 0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Done,
}

/// Per-run traversal state: the canonical directories currently being
/// expanded, outermost first. Only re-entering one of these is a loop.
#[derive(Default)]
struct RecursionContext {
    ancestors: Vec<PathBuf>,
}

impl RecursionContext {
    /// Returns the key to hand back to `leave`, or `None` if `dir` is
    /// already being expanded further up.
    fn enter(&mut self, dir: &Path) -> Option<PathBuf> {
        let key = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        if self.ancestors.contains(&key) {
            return None;
        }
        self.ancestors.push(key.clone());
        Some(key)
    }

    fn leave(&mut self, key: &Path) {
        if self.ancestors.last().map(PathBuf::as_path) == Some(key) {
            self.ancestors.pop();
        }
    }
}

/// One discovery run over an ordered list of locations.
pub struct LoadSession {
    id: SessionId,
    locations: Vec<Location>,
    options: LoadOptions,
    validator: Arc<MediaValidator>,
    tx: Sender<LoaderEvent>,
    state: SessionState,
}

impl LoadSession {
    pub fn new(
        id: SessionId,
        locations: Vec<Location>,
        options: LoadOptions,
        validator: Arc<MediaValidator>,
        tx: Sender<LoaderEvent>,
    ) -> Self {
        Self {
            id,
            locations,
            options,
            validator,
            tx,
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Walk every location once and post the results, then `RunFinished`.
    /// A session runs at most once.
    pub fn run(&mut self) {
        if self.state != SessionState::Idle {
            log::warn!("session {} already ran", self.id);
            return;
        }
        self.state = SessionState::Running;
        log::debug!(
            "session {} started with {} location(s)",
            self.id,
            self.locations.len()
        );

        let locations = std::mem::take(&mut self.locations);
        let mut ctx = RecursionContext::default();
        self.process(&locations, true, TOP_LEVEL, &mut ctx);

        self.post(LoaderEvent::RunFinished { session: self.id });
        self.state = SessionState::Done;
        log::debug!("session {} done", self.id);
    }

    fn process(
        &self,
        locations: &[Location],
        validate: bool,
        depth: usize,
        ctx: &mut RecursionContext,
    ) {
        let only_argument = locations.len() == 1;

        for location in locations {
            let mut metadata: Option<Metadata> = None;

            if validate {
                if let Some(path) = location.as_local_path() {
                    let Some((meta, is_link)) = stat(path) else {
                        log::debug!("skipping missing {}", path.display());
                        continue;
                    };

                    if meta.is_dir() {
                        // A lone directory argument is always opened.
                        if !only_argument
                            && (!self.options.recurse || (!self.options.follow_symlinks && is_link))
                        {
                            log::debug!("not descending into {}", path.display());
                            continue;
                        }
                        self.visit_directory(path, depth + 1, ctx);
                        continue;
                    }

                    metadata = Some(meta);
                }
            }

            if depth == TOP_LEVEL {
                if let Some(format) = PlaylistFormat::of(location) {
                    match location {
                        Location::Local(path) => self.load_local_playlist(path, format),
                        Location::Remote(_) => self.post(LoaderEvent::DownloadRequested {
                            session: self.id,
                            location: location.clone(),
                        }),
                    }
                    continue;
                }
            }

            if validate && !self.validator.is_valid_media(location, metadata.as_ref()) {
                continue;
            }

            self.post(LoaderEvent::MediaFound {
                session: self.id,
                entry: DiscoveredEntry::new(location.clone()),
            });
        }
    }

    fn visit_directory(&self, dir: &Path, depth: usize, ctx: &mut RecursionContext) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            log::debug!("max depth reached at {}", dir.display());
            return;
        }
        let Some(key) = ctx.enter(dir) else {
            log::warn!("{} loops back onto itself, skipping", dir.display());
            return;
        };

        let expansion = DirectoryWalker::new(&self.options, &self.validator).expand(dir);

        // Already validated and sorted; no second stat pass.
        let files: Vec<Location> = expansion
            .files
            .into_iter()
            .map(|f| Location::Local(f.path))
            .collect();
        self.process(&files, false, depth, ctx);

        for sub in &expansion.subdirs {
            self.visit_directory(sub, depth + 1, ctx);
        }

        ctx.leave(&key);
    }

    fn load_local_playlist(&self, path: &Path, format: PlaylistFormat) {
        let entries = match playlist::open_playlist(path, format) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{e}");
                return;
            }
        };

        let mut urls = Vec::new();
        for entry in entries {
            urls.push(entry.location.clone());
            self.post(LoaderEvent::MediaFound {
                session: self.id,
                entry,
            });
        }

        log::debug!("{} resolved to {} entries", path.display(), urls.len());
        self.post(LoaderEvent::PlaylistResolved {
            session: self.id,
            path: path.to_path_buf(),
            urls,
        });
    }

    fn post(&self, event: LoaderEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("session {}: consumer went away", self.id);
        }
    }
}

/// `stat` through links, plus whether `path` itself is a symlink.
fn stat(path: &Path) -> Option<(Metadata, bool)> {
    let is_link = fs::symlink_metadata(path).ok()?.file_type().is_symlink();
    let meta = fs::metadata(path).ok()?;
    Some((meta, is_link))
}

/// Run `session` on a dedicated worker thread.
pub fn spawn_session(mut session: LoadSession) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("playlist-loader-{}", session.id().0))
        .spawn(move || session.run())
}
