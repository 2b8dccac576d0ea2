//! # Commands
//!
//! Commands are the way object state is modified from the editor. Every edit is constructed as a command,
//! handed to a [`crate::history::History`] which executes it immediately and keeps it around for undo and redo.
//!
//! A command only remembers IDs, never the objects themselves. The store is passed in on every call, and an
//! object which no longer resolves is silently skipped in both directions.

mod cascade;
mod property;

pub use cascade::ApplyPropertyToChildren;
pub use property::ModifyProperty;

use crate::{color::Color, id::AnimObjId, state::PropertyKind, store::ObjectStore};

#[derive(Clone, PartialEq, Debug)]
pub enum Command {
    ModifyProperty(ModifyProperty),
    ApplyPropertyToChildren(ApplyPropertyToChildren),
}
impl From<ModifyProperty> for Command {
    fn from(value: ModifyProperty) -> Self {
        Self::ModifyProperty(value)
    }
}
impl From<ApplyPropertyToChildren> for Command {
    fn from(value: ApplyPropertyToChildren) -> Self {
        Self::ApplyPropertyToChildren(value)
    }
}
impl Command {
    /// Set `kind` of `target` from `from` to `to`.
    ///
    /// `from` is trusted as-is, it is what undo will restore.
    #[must_use]
    pub fn modify_property(target: AnimObjId, from: Color, to: Color, kind: PropertyKind) -> Self {
        ModifyProperty::new(target, from, to, kind).into()
    }
    /// Copy `kind` of `root` onto all of its descendants.
    #[must_use]
    pub fn apply_to_children(root: AnimObjId, kind: PropertyKind) -> Self {
        ApplyPropertyToChildren::new(root, kind).into()
    }
    /// The object this command is addressed to. For cascades, this is the root of the subtree.
    #[must_use]
    pub fn target(&self) -> AnimObjId {
        match self {
            Self::ModifyProperty(c) => c.target(),
            Self::ApplyPropertyToChildren(c) => c.root(),
        }
    }
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::ModifyProperty(c) => c.kind(),
            Self::ApplyPropertyToChildren(c) => c.kind(),
        }
    }
    #[must_use]
    pub fn modify_property_ref(&self) -> Option<&ModifyProperty> {
        match self {
            Self::ModifyProperty(c) => Some(c),
            Self::ApplyPropertyToChildren(_) => None,
        }
    }
    #[must_use]
    pub fn apply_to_children_ref(&self) -> Option<&ApplyPropertyToChildren> {
        match self {
            Self::ApplyPropertyToChildren(c) => Some(c),
            Self::ModifyProperty(_) => None,
        }
    }
    /// Apply the forward change.
    pub fn execute(&mut self, store: &mut impl ObjectStore) {
        match self {
            Self::ModifyProperty(c) => c.execute(store),
            Self::ApplyPropertyToChildren(c) => c.execute(store),
        }
    }
    /// Apply the exact inverse of [`Self::execute`].
    pub fn undo(&mut self, store: &mut impl ObjectStore) {
        match self {
            Self::ModifyProperty(c) => c.undo(store),
            Self::ApplyPropertyToChildren(c) => c.undo(store),
        }
    }
}
