//! # History
//!
//! A fixed-capacity ring of executed commands, with a cursor marking the present.
//!
//! The ring is described by three numbers. `head` is the oldest command still retained, `count` is how many
//! commands (undoable and redoable alike) follow it contiguously, and `tail` sits between them: everything in
//! `[head, tail)` may be undone, everything in `[tail, head + count)` may be redone. All indices wrap around
//! the capacity.
//!
//! Undone commands stay in place so they can be redone, and are only dropped when a new push makes them
//! unreachable. One slot is always kept free so that a full ring and an empty one can be told apart, thus a
//! history of capacity N remembers at most N - 1 commands.

use crate::{
    color::Color,
    commands::Command,
    id::AnimObjId,
    state::PropertyKind,
    store::ObjectStore,
};

pub struct History<Store> {
    store: Store,
    /// Occupied exactly on `[head, head + count)`.
    slots: Box<[Option<Command>]>,
    /// Oldest retained command.
    head: usize,
    /// Next slot to write, and the next command to redo.
    tail: usize,
    /// Number of retained commands, undoable and redoable.
    count: usize,
}
impl<Store: ObjectStore> History<Store> {
    /// Create an empty history bound to `store`.
    ///
    /// # Panics
    /// If `capacity <= 1`. A ring that small could never hold a single command.
    #[must_use]
    pub fn new(store: Store, capacity: usize) -> Self {
        assert!(
            capacity > 1,
            "Cannot have a history of size {capacity}. Must be greater than 1."
        );
        Self {
            store,
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }
    fn wrapping_next(&self, idx: usize) -> usize {
        (idx + 1) % self.capacity()
    }
    fn wrapping_prev(&self, idx: usize) -> usize {
        (idx + self.capacity() - 1) % self.capacity()
    }
    /// One past the newest retained command.
    fn end(&self) -> usize {
        (self.head + self.count) % self.capacity()
    }
    /// Number of slots in the ring.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    /// Most commands that can be remembered at once.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.capacity() - 1
    }
    /// Number of commands retained, both undoable and redoable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.head != self.tail
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.end() != self.tail
    }
    /// How many times [`Self::undo`] would succeed in a row.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        (self.tail + self.capacity() - self.head) % self.capacity()
    }
    /// How many times [`Self::redo`] would succeed in a row.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        (self.end() + self.capacity() - self.tail) % self.capacity()
    }
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }
    /// Access the store directly. Changes made this way are not recorded.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }
    /// Drop all history, returning the store.
    #[must_use]
    pub fn into_store(self) -> Store {
        self.store
    }
    /// Undoable commands, most recent first.
    pub fn iter_undoable(&self) -> impl Iterator<Item = &Command> + '_ {
        let mut idx = self.tail;
        (0..self.undo_depth()).filter_map(move |_| {
            idx = self.wrapping_prev(idx);
            self.slots[idx].as_ref()
        })
    }
    /// Redoable commands, in the order redo would apply them.
    pub fn iter_redoable(&self) -> impl Iterator<Item = &Command> + '_ {
        (0..self.redo_depth()).filter_map(move |offset| {
            self.slots[(self.tail + offset) % self.capacity()].as_ref()
        })
    }
    /// Execute a command and record it as the most recent change.
    ///
    /// Anything that was undone becomes unreachable and is dropped. If the ring is full, the oldest
    /// command is dropped too.
    pub fn push(&mut self, command: impl Into<Command>) {
        let command = command.into();

        // Drop the undone branch, it can never be redone now.
        let end = self.end();
        let mut discarded = 0;
        let mut idx = self.tail;
        while idx != end {
            let stale = self.slots[idx].take();
            debug_assert!(stale.is_some(), "Redoable slot {idx} was empty");
            discarded += 1;
            idx = self.wrapping_next(idx);
        }
        if discarded != 0 {
            self.count -= discarded;
            log::trace!("Discarded {discarded} undone commands");
        }

        // Writing here would make head and tail meet. Make room.
        if self.wrapping_next(self.tail) == self.head {
            let evicted = self.slots[self.head].take();
            debug_assert!(evicted.is_some(), "Head slot {} was empty", self.head);
            if let Some(evicted) = evicted {
                log::trace!("History full, evicting command on {}", evicted.target());
            }
            self.head = self.wrapping_next(self.head);
            self.count -= 1;
        }

        let slot = self.tail;
        self.count += 1;
        self.tail = self.wrapping_next(self.tail);

        log::trace!("Executing new command: {:#?}", command);
        self.slots[slot].insert(command).execute(&mut self.store);
    }
    /// Undo the most recent command. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        let prev = self.wrapping_prev(self.tail);
        let command = self.slots[prev]
            .as_mut()
            // Everything in [head, tail) is occupied. Nothing sensible to do if that's broken.
            .expect("Undoable slot was empty");
        log::trace!("Undoing command on {}", command.target());
        command.undo(&mut self.store);
        self.tail = prev;
        true
    }
    /// Redo the most recently undone command. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        let command = self.slots[self.tail]
            .as_mut()
            .expect("Redoable slot was empty");
        log::trace!("Redoing command on {}", command.target());
        command.execute(&mut self.store);
        self.tail = self.wrapping_next(self.tail);
        true
    }
    /// Undo up to `num` commands, returning how many were undone.
    pub fn undo_n(&mut self, num: usize) -> usize {
        (0..num).take_while(|_| self.undo()).count()
    }
    /// Redo up to `num` commands, returning how many were redone.
    pub fn redo_n(&mut self, num: usize) -> usize {
        (0..num).take_while(|_| self.redo()).count()
    }
    /// Forget every command, leaving the store as-is.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
    /// Record and execute a change to one color property of one object.
    ///
    /// `from` is what undo will restore, regardless of the object's value right now.
    pub fn set_color(&mut self, target: AnimObjId, from: Color, to: Color, kind: PropertyKind) {
        self.push(Command::modify_property(target, from, to, kind));
    }
    /// Record and execute copying `kind` from `root` onto all of its descendants.
    pub fn apply_color_to_children(&mut self, root: AnimObjId, kind: PropertyKind) {
        self.push(Command::apply_to_children(root, kind));
    }
}
