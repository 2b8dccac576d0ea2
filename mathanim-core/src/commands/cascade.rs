use crate::{color::Color, id::AnimObjId, state::PropertyKind, store::ObjectStore};

/// Copy one color property from an object onto every one of its descendants.
///
/// The descendants' previous values are recorded on every execute, *including redo*. If a descendant was
/// changed by something else between an undo and the following redo, that intermediate value is what a later
/// undo restores, not the value from before the first execute.
///
/// With the `literal-stroke-cascade` feature, a stroke cascade writes the root's stroke color into each
/// descendant's *fill*, while still snapshotting and restoring stroke. This matches files and tests made
/// against older builds of the editor.
#[derive(Clone, PartialEq, Debug)]
pub struct ApplyPropertyToChildren {
    root: AnimObjId,
    kind: PropertyKind,
    /// Descendant -> its value before the most recent execute.
    snapshot: hashbrown::HashMap<AnimObjId, Color>,
}
impl ApplyPropertyToChildren {
    #[must_use]
    pub fn new(root: AnimObjId, kind: PropertyKind) -> Self {
        Self {
            root,
            kind,
            snapshot: hashbrown::HashMap::new(),
        }
    }
    #[must_use]
    pub fn root(&self) -> AnimObjId {
        self.root
    }
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }
    /// Values recorded by the last execute. Empty until the first execute.
    #[must_use]
    pub fn snapshot(&self) -> &hashbrown::HashMap<AnimObjId, Color> {
        &self.snapshot
    }
    /// The property of each descendant which receives the root's value.
    fn written_kind(&self) -> PropertyKind {
        if cfg!(feature = "literal-stroke-cascade") {
            PropertyKind::FillColor
        } else {
            self.kind
        }
    }
    fn descendants(&self, store: &impl ObjectStore) -> smallvec::SmallVec<[AnimObjId; 16]> {
        store.breadth_first_children(self.root).collect()
    }
    pub fn execute(&mut self, store: &mut impl ObjectStore) {
        let Some(root) = store.object_mut(self.root) else {
            log::debug!("{} no longer exists, skipping {} cascade", self.root, self.kind);
            return;
        };
        let value = root.color(self.kind);
        let written_kind = self.written_kind();

        let mut cascaded = 0usize;
        for child_id in self.descendants(&*store) {
            // Deleted mid-walk. Leave no snapshot behind for it.
            let Some(child) = store.object_mut(child_id) else {
                continue;
            };
            self.snapshot.insert(child_id, child.color(self.kind));
            *child.color_mut(written_kind) = value;
            cascaded += 1;
        }
        log::trace!("Cascaded {value} from {} onto {cascaded} descendants", self.root);
        store.mark_dirty(self.root);
    }
    pub fn undo(&mut self, store: &mut impl ObjectStore) {
        if store.object_mut(self.root).is_none() {
            log::debug!("{} no longer exists, skipping {} cascade undo", self.root, self.kind);
            return;
        }

        for child_id in self.descendants(&*store) {
            // Descendants added after the execute have nothing to go back to.
            let Some(&previous) = self.snapshot.get(&child_id) else {
                continue;
            };
            if let Some(child) = store.object_mut(child_id) {
                *child.color_mut(self.kind) = previous;
            }
        }
        store.mark_dirty(self.root);
    }
}
