//! Ordered playlist model owned by the consumer thread.
//!
//! Items carry stable `ItemId`s so insertion cursors survive inserts and
//! removals elsewhere in the list. A `Pending` item stands in for a remote
//! playlist whose entries are still being resolved by a child session.

use crate::discovery::{DiscoveredEntry, SessionId};
use crate::location::Location;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistItem {
    Track(DiscoveredEntry),
    /// Placeholder owned by `session` until it finishes.
    Pending {
        session: SessionId,
        location: Location,
    },
}

impl PlaylistItem {
    pub fn as_track(&self) -> Option<&DiscoveredEntry> {
        match self {
            Self::Track(entry) => Some(entry),
            Self::Pending { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct PlaylistModel {
    items: Vec<(ItemId, PlaylistItem)>,
    next_id: u64,
}

impl PlaylistModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append at the end of the list.
    pub fn push(&mut self, item: PlaylistItem) -> ItemId {
        let id = self.allocate();
        self.items.push((id, item));
        id
    }

    pub fn last_id(&self) -> Option<ItemId> {
        self.items.last().map(|(id, _)| *id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|(i, _)| *i == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&PlaylistItem> {
        self.items.iter().find(|(i, _)| *i == id).map(|(_, item)| item)
    }

    /// Insert `item` right after `after` (`None` = at the front).
    /// An id that is no longer in the list appends at the end.
    pub fn insert_after(&mut self, after: Option<ItemId>, item: PlaylistItem) -> ItemId {
        let index = match after {
            None => 0,
            Some(after) => match self.position(after) {
                Some(pos) => pos + 1,
                None => {
                    log::debug!("cursor {after:?} is gone, appending");
                    self.items.len()
                }
            },
        };

        let id = self.allocate();
        self.items.insert(index, (id, item));
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<PlaylistItem> {
        let pos = self.position(id)?;
        Some(self.items.remove(pos).1)
    }

    /// The item directly before `id`, if any.
    pub fn predecessor(&self, id: ItemId) -> Option<ItemId> {
        let pos = self.position(id)?;
        pos.checked_sub(1).map(|p| self.items[p].0)
    }

    /// Swap `id` for `replacement` in one step, keeping their order.
    /// Returns the ids of the inserted items; nothing happens if `id` is gone.
    pub fn replace(&mut self, id: ItemId, replacement: Vec<PlaylistItem>) -> Vec<ItemId> {
        let Some(pos) = self.position(id) else {
            return Vec::new();
        };

        let new_items: Vec<(ItemId, PlaylistItem)> = replacement
            .into_iter()
            .map(|item| (self.allocate(), item))
            .collect();
        let ids = new_items.iter().map(|(id, _)| *id).collect();
        self.items.splice(pos..=pos, new_items);
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &PlaylistItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    pub fn tracks(&self) -> impl Iterator<Item = &DiscoveredEntry> {
        self.items.iter().filter_map(|(_, item)| item.as_track())
    }

    pub fn has_pending(&self) -> bool {
        self.items
            .iter()
            .any(|(_, item)| matches!(item, PlaylistItem::Pending { .. }))
    }

    fn allocate(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }
}
