//! # Scene
//!
//! Animation objects form a tree. Any object may have children, and the hidden root is the parent
//! of every top level object. This is the in-memory [`ObjectStore`] the editor hands to its history.

use super::object::AnimObject;
use crate::{id::AnimObjId, store::ObjectStore};

#[derive(Clone)]
enum NodeData {
    Root,
    Object(AnimObject),
}
impl NodeData {
    fn object(&self) -> Option<&AnimObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Root => None,
        }
    }
    fn object_mut(&mut self) -> Option<&mut AnimObject> {
        match self {
            Self::Object(object) => Some(object),
            Self::Root => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetError {
    #[error("ID not found")]
    TargetNotFound,
}

#[derive(Copy, Clone, Debug)]
pub enum Location {
    /// Set as the nth child of the root, where top = 0
    ///
    /// An index too large will be clamped to the bottom position.
    IndexIntoRoot(usize),
    /// Set as the nth child of this object, where top = 0
    ///
    /// An index too large will be clamped to the bottom position.
    IndexIntoObject(AnimObjId, usize),
}

pub struct Scene {
    tree: id_tree::Tree<NodeData>,
    ids: hashbrown::HashMap<AnimObjId, id_tree::NodeId>,
    /// Objects whose derived state is out of date.
    dirty: hashbrown::HashSet<AnimObjId>,
}
impl Default for Scene {
    fn default() -> Self {
        Self {
            tree: id_tree::TreeBuilder::new()
                .with_root(id_tree::Node::new(NodeData::Root))
                .build(),
            ids: hashbrown::HashMap::new(),
            dirty: hashbrown::HashSet::new(),
        }
    }
}
impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    fn root_id(&self) -> &id_tree::NodeId {
        // Unwrap ok - the root is created with the tree and never removed.
        self.tree.root_node_id().unwrap()
    }
    fn object_id_of(&self, node_id: &id_tree::NodeId) -> Option<AnimObjId> {
        self.tree
            .get(node_id)
            .ok()?
            .data()
            .object()
            .map(AnimObject::id)
    }
    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    #[must_use]
    pub fn contains(&self, id: AnimObjId) -> bool {
        self.ids.contains_key(&id)
    }
    #[must_use]
    pub fn get(&self, id: AnimObjId) -> Option<&AnimObject> {
        let node_id = self.ids.get(&id)?;
        self.tree.get(node_id).ok()?.data().object()
    }
    pub fn get_mut(&mut self, id: AnimObjId) -> Option<&mut AnimObject> {
        let node_id = self.ids.get(&id)?;
        self.tree.get_mut(node_id).ok()?.data_mut().object_mut()
    }
    /// Insert a new object with default properties.
    pub fn add_object(
        &mut self,
        location: Location,
        name: impl Into<String>,
    ) -> Result<AnimObjId, TargetError> {
        let (parent_id, idx) = match location {
            Location::IndexIntoRoot(idx) => (self.root_id().clone(), idx),
            Location::IndexIntoObject(parent, idx) => (
                self.ids
                    .get(&parent)
                    .ok_or(TargetError::TargetNotFound)?
                    .clone(),
                idx,
            ),
        };
        let id = AnimObjId::default();
        let new_node = self
            .tree
            .insert(
                id_tree::Node::new(NodeData::Object(AnimObject::new(id, name.into()))),
                id_tree::InsertBehavior::UnderNode(&parent_id),
            )
            .map_err(|_| TargetError::TargetNotFound)?;

        // Clamp, the new node is already the last child.
        let num_siblings = self
            .tree
            .children_ids(&parent_id)
            .map_err(|_| TargetError::TargetNotFound)?
            .count();
        let idx = idx.min(num_siblings.saturating_sub(1));
        // unwrap ok - we just added it, of course it will be found!
        self.tree.make_nth_sibling(&new_node, idx).unwrap();

        self.ids.insert(id, new_node);
        log::trace!("Added {id} under {location:?}");
        Ok(id)
    }
    /// Delete an object along with its whole subtree. Returns the number of objects removed.
    ///
    /// IDs of removed objects never resolve again.
    pub fn remove_object(&mut self, id: AnimObjId) -> Result<usize, TargetError> {
        let node_id = self
            .ids
            .get(&id)
            .ok_or(TargetError::TargetNotFound)?
            .clone();
        // Forget every ID in the subtree before the tree drops them.
        let removed: Vec<AnimObjId> = self
            .tree
            .traverse_level_order_ids(&node_id)
            .map_err(|_| TargetError::TargetNotFound)?
            .filter_map(|node_id| self.object_id_of(&node_id))
            .collect();
        self.tree
            .remove_node(node_id, id_tree::RemoveBehavior::DropChildren)
            .map_err(|_| TargetError::TargetNotFound)?;
        for removed_id in &removed {
            self.ids.remove(removed_id);
            self.dirty.remove(removed_id);
        }

        log::trace!("Removed {id} and {} descendants", removed.len() - 1);
        Ok(removed.len())
    }
    /// Get the parent of an object, or None if it is top level.
    pub fn parent_of(&self, id: AnimObjId) -> Result<Option<AnimObjId>, TargetError> {
        let node_id = self.ids.get(&id).ok_or(TargetError::TargetNotFound)?;
        let node = self
            .tree
            .get(node_id)
            .map_err(|_| TargetError::TargetNotFound)?;
        // Every object has a parent, even if it's only the root. Root maps to None.
        Ok(node.parent().and_then(|parent| self.object_id_of(parent)))
    }
    /// Iterate the direct children of this object, top first.
    #[must_use]
    pub fn children_of(&self, id: AnimObjId) -> Option<impl Iterator<Item = AnimObjId> + '_> {
        let node_id = self.ids.get(&id)?;
        Some(
            self.tree
                .children_ids(node_id)
                .ok()?
                .filter_map(|child| self.object_id_of(child)),
        )
    }
    /// Iterate every live object, breadth first from the top level.
    pub fn iter(&self) -> impl Iterator<Item = &AnimObject> + '_ {
        self.tree
            .traverse_level_order_ids(self.root_id())
            // Unwrap ok - root always present.
            .unwrap()
            .filter_map(|node_id| self.tree.get(&node_id).ok()?.data().object())
    }
    #[must_use]
    pub fn is_dirty(&self, id: AnimObjId) -> bool {
        self.dirty.contains(&id)
    }
    /// Take every object marked dirty since the last call.
    pub fn take_dirty(&mut self) -> hashbrown::HashSet<AnimObjId> {
        std::mem::take(&mut self.dirty)
    }
}

impl ObjectStore for Scene {
    fn object_mut(&mut self, id: AnimObjId) -> Option<&mut AnimObject> {
        self.get_mut(id)
    }
    fn mark_dirty(&mut self, id: AnimObjId) {
        if self.contains(id) {
            self.dirty.insert(id);
        }
    }
    fn breadth_first_children(&self, id: AnimObjId) -> impl Iterator<Item = AnimObjId> + '_ {
        self.ids
            .get(&id)
            .and_then(|node_id| self.tree.traverse_level_order_ids(node_id).ok())
            .into_iter()
            .flatten()
            // The walk starts with `id` itself.
            .skip(1)
            .filter_map(|node_id| self.object_id_of(&node_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    ///```ignore
    ///        a         e
    ///       / \
    ///      b   c
    ///      |
    ///      d
    ///```
    fn make_test_scene() -> (Scene, [AnimObjId; 5]) {
        let mut scene = Scene::new();
        let a = scene.add_object(Location::IndexIntoRoot(0), "a").unwrap();
        let b = scene
            .add_object(Location::IndexIntoObject(a, 0), "b")
            .unwrap();
        // Clamped to the bottom.
        let c = scene
            .add_object(Location::IndexIntoObject(a, 100), "c")
            .unwrap();
        let d = scene
            .add_object(Location::IndexIntoObject(b, 0), "d")
            .unwrap();
        let e = scene.add_object(Location::IndexIntoRoot(1), "e").unwrap();
        (scene, [a, b, c, d, e])
    }
    #[test]
    fn structure() {
        let (scene, [a, b, c, d, e]) = make_test_scene();
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.parent_of(a), Ok(None));
        assert_eq!(scene.parent_of(d), Ok(Some(b)));
        assert!(scene.children_of(a).unwrap().eq([b, c]));
        assert_eq!(scene.children_of(e).unwrap().count(), 0);
        assert!(scene.iter().map(AnimObject::id).eq([a, e, b, c, d]));
    }
    #[test]
    fn insert_ordering() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Location::IndexIntoRoot(0), "p").unwrap();
        let last = scene
            .add_object(Location::IndexIntoObject(parent, 0), "last")
            .unwrap();
        let first = scene
            .add_object(Location::IndexIntoObject(parent, 0), "first")
            .unwrap();
        let middle = scene
            .add_object(Location::IndexIntoObject(parent, 1), "middle")
            .unwrap();
        assert!(scene.children_of(parent).unwrap().eq([first, middle, last]));
    }
    #[test]
    fn breadth_first() {
        let (scene, [a, b, c, d, e]) = make_test_scene();
        assert!(scene.breadth_first_children(a).eq([b, c, d]));
        assert!(scene.breadth_first_children(b).eq([d]));
        assert_eq!(scene.breadth_first_children(e).count(), 0);
        // Unknown ids walk nothing.
        assert_eq!(scene.breadth_first_children(AnimObjId::default()).count(), 0);
    }
    #[test]
    fn remove_subtree() {
        let (mut scene, [a, b, c, d, e]) = make_test_scene();
        assert_eq!(scene.remove_object(b), Ok(2));
        assert!(scene.get(b).is_none());
        assert!(scene.get(d).is_none());
        assert_eq!(scene.remove_object(d), Err(TargetError::TargetNotFound));
        assert!(scene.breadth_first_children(a).eq([c]));
        assert_eq!(scene.len(), 3);
        assert!(scene.get(e).is_some());
        assert_eq!(
            scene.add_object(Location::IndexIntoObject(b, 0), "orphan"),
            Err(TargetError::TargetNotFound)
        );
    }
    #[test]
    fn dirty_tracking() {
        let (mut scene, [a, b, ..]) = make_test_scene();
        scene.mark_dirty(a);
        scene.mark_dirty(a);
        // Deleted objects are not tracked.
        scene.remove_object(b).unwrap();
        scene.mark_dirty(b);

        assert!(scene.is_dirty(a));
        let dirty = scene.take_dirty();
        assert_eq!(dirty.len(), 1);
        assert!(dirty.contains(&a));
        assert!(!scene.is_dirty(a));
    }
}
