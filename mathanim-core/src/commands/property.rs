use crate::{color::Color, id::AnimObjId, state::PropertyKind, store::ObjectStore};

/// Set one color property of one object.
#[derive(Clone, PartialEq, Debug)]
pub struct ModifyProperty {
    target: AnimObjId,
    kind: PropertyKind,
    from: Color,
    to: Color,
}
impl ModifyProperty {
    #[must_use]
    pub fn new(target: AnimObjId, from: Color, to: Color, kind: PropertyKind) -> Self {
        Self {
            target,
            kind,
            from,
            to,
        }
    }
    #[must_use]
    pub fn target(&self) -> AnimObjId {
        self.target
    }
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }
    #[must_use]
    pub fn old_value(&self) -> Color {
        self.from
    }
    #[must_use]
    pub fn new_value(&self) -> Color {
        self.to
    }
    pub fn execute(&self, store: &mut impl ObjectStore) {
        self.set(store, self.to);
    }
    pub fn undo(&self, store: &mut impl ObjectStore) {
        self.set(store, self.from);
    }
    fn set(&self, store: &mut impl ObjectStore, value: Color) {
        let Some(object) = store.object_mut(self.target) else {
            log::debug!("{} no longer exists, skipping {} change", self.target, self.kind);
            return;
        };
        *object.color_mut(self.kind) = value;
        store.mark_dirty(self.target);
    }
}
