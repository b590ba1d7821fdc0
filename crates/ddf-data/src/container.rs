//! Ordered per-kind storage with shadowing name and number lookup.

use std::cell::Cell;
use std::collections::HashMap;

use ddf_types::{Handle, Ref};

use crate::name;

/// Slots in the direct-mapped number cache.
pub const NUMBER_CACHE_SIZE: usize = 211;

/// A record that can live in a [`DefContainer`].
pub trait Definition: Clone + Default {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);

    /// Numeric identity for kinds that have one.
    fn number(&self) -> Option<i32> {
        None
    }

    fn set_number(&mut self, _number: Option<i32>) {}
}

/// All entries of one kind.
///
/// Entries are never removed individually, so a [`Handle`] stays valid until
/// [`DefContainer::reset`]. Replacing an entry reuses its slot and moves it to
/// the end of the iteration order; name lookup always sees the newest entry
/// with that name.
///
/// `append` and `move_to_end` are amortised O(1): a vacated position in the
/// iteration order is left as a hole and swept once holes outnumber entries.
#[derive(Debug, Clone)]
pub struct DefContainer<T> {
    entries: Vec<T>,
    order: Vec<Option<Handle>>,
    /// Index into `order` for each entry, `None` once shadowed.
    position: Vec<Option<usize>>,
    live: usize,
    by_name: HashMap<String, Handle>,
    cache: [Cell<Option<Handle>>; NUMBER_CACHE_SIZE],
}

impl<T: Definition> Default for DefContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Definition> DefContainer<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            order: Vec::new(),
            position: Vec::new(),
            live: 0,
            by_name: HashMap::new(),
            cache: std::array::from_fn(|_| Cell::new(None)),
        }
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Add `def` as the newest entry for its identity. An older entry with the
    /// same name stays in storage but is no longer found by name.
    pub fn append(&mut self, def: T) -> Handle {
        self.invalidate();
        let handle = Handle::new(self.entries.len());
        let key = name::normalize(def.name());
        if let Some(old) = self.by_name.insert(key, handle) {
            self.unlink(old);
        }
        self.entries.push(def);
        self.position.push(None);
        self.link(handle);
        self.sweep();
        handle
    }

    pub fn lookup(&self, name: &str) -> Option<Handle> {
        self.by_name.get(&name::normalize(name)).copied()
    }

    pub fn find(&self, name: &str) -> Option<&T> {
        self.lookup(name).map(|h| &self.entries[h.index()])
    }

    /// Newest entry whose number is `number`.
    pub fn lookup_number(&self, number: i32) -> Option<Handle> {
        let slot = &self.cache[number.rem_euclid(NUMBER_CACHE_SIZE as i32) as usize];
        if let Some(h) = slot.get() {
            if self.entries[h.index()].number() == Some(number) {
                return Some(h);
            }
        }
        let found = self
            .order
            .iter()
            .rev()
            .flatten()
            .copied()
            .find(|h| self.entries[h.index()].number() == Some(number))?;
        slot.set(Some(found));
        Some(found)
    }

    pub fn find_number(&self, number: i32) -> Option<&T> {
        self.lookup_number(number).map(|h| &self.entries[h.index()])
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.entries.get(handle.index())
    }

    /// Mutable access. Drops every cached number lookup, since the entry's
    /// number may change.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.invalidate();
        self.entries.get_mut(handle.index())
    }

    /// Dereference a linked reference.
    pub fn resolve(&self, r: &Ref<T>) -> Option<&T> {
        r.handle().and_then(|h| self.get(h))
    }

    /// Make `handle` the newest entry, as when it is reopened for editing.
    pub fn move_to_end(&mut self, handle: Handle) {
        self.invalidate();
        if self.position.get(handle.index()).copied().flatten().is_some() {
            self.unlink(handle);
            self.link(handle);
            self.sweep();
        }
    }

    /// Drop every entry. Outstanding handles become invalid.
    pub fn reset(&mut self) {
        self.invalidate();
        self.entries.clear();
        self.order.clear();
        self.position.clear();
        self.live = 0;
        self.by_name.clear();
    }

    /// Live entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().flatten().map(|h| &self.entries[h.index()])
    }

    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.order.iter().flatten().copied()
    }

    /// Live entries with their handles, in storage order.
    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.invalidate();
        self.entries
            .iter_mut()
            .zip(&self.position)
            .enumerate()
            .filter_map(|(i, (e, pos))| pos.map(|_| (Handle::new(i), e)))
    }

    fn link(&mut self, handle: Handle) {
        self.position[handle.index()] = Some(self.order.len());
        self.order.push(Some(handle));
        self.live += 1;
    }

    fn unlink(&mut self, handle: Handle) {
        if let Some(pos) = self.position[handle.index()].take() {
            self.order[pos] = None;
            self.live -= 1;
        }
    }

    /// Drop holes from `order` once they outnumber live entries.
    fn sweep(&mut self) {
        if self.order.len() <= 2 * self.live + 16 {
            return;
        }
        self.order.retain(Option::is_some);
        for (pos, h) in self.order.iter().flatten().enumerate() {
            self.position[h.index()] = Some(pos);
        }
    }

    fn invalidate(&mut self) {
        for slot in &mut self.cache {
            *slot.get_mut() = None;
        }
    }
}
