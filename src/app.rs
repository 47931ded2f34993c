//! Consumer side: the playlist model and the `Loader` that fills it.
//!
//! The model lives in `app::model` and is only touched from the host thread;
//! discovery workers talk to it through `LoaderEvent`s applied by
//! `app::loader`.

mod display;
mod loader;
mod model;

pub use display::{display_from_fields, display_item, format_mmss};
pub use loader::{Loader, Notice, ResolvedPlaylist};
pub use model::*;

#[cfg(test)]
mod tests;
