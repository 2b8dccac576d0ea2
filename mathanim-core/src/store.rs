//! # Object store
//!
//! Commands never hold on to the objects they modify. Instead, the store is handed to every
//! `execute` and `undo`, and objects are looked up by [`AnimObjId`] at that moment. An ID which
//! no longer resolves means the object was deleted in the meantime.

use crate::{id::AnimObjId, state::AnimObject};

/// Anything commands can be applied to.
pub trait ObjectStore {
    /// Look up an object for mutation, or None if it was deleted or never existed.
    fn object_mut(&mut self, id: AnimObjId) -> Option<&mut AnimObject>;
    /// Notify the store that derived state of this object (and implicitly its descendants) must be
    /// recomputed before the next render.
    fn mark_dirty(&mut self, id: AnimObjId);
    /// Breadth-first walk of the subtree under `id`, excluding `id` itself.
    /// Siblings are visited in the store's child order. Empty if `id` does not resolve.
    ///
    /// The walk borrows the store, so callers which mutate along the way should collect it first.
    fn breadth_first_children(&self, id: AnimObjId) -> impl Iterator<Item = AnimObjId> + '_;
}

impl<Store> ObjectStore for &mut Store
where
    Store: ObjectStore,
{
    fn object_mut(&mut self, id: AnimObjId) -> Option<&mut AnimObject> {
        (**self).object_mut(id)
    }
    fn mark_dirty(&mut self, id: AnimObjId) {
        (**self).mark_dirty(id);
    }
    fn breadth_first_children(&self, id: AnimObjId) -> impl Iterator<Item = AnimObjId> + '_ {
        (**self).breadth_first_children(id)
    }
}
