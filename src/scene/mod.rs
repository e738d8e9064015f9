//! Scene graph collaborator for built curves.
//!
//! The builder only needs something it can hand a finished
//! [`SceneObject`] to: the [`SceneContainer`] trait. [`Group`] is the
//! crate's own container; it assigns stable [`ObjectHandle`]s, tracks a
//! generation counter so the renderer knows when to re-upload, and exposes
//! the bounds-checked segment color patch.

mod object;

pub use object::{DrawType, Material, Mesh, SceneObject};

use crate::error::WCurveError;

/// Identifies an object inside the container that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    /// Raw numeric id.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Anything a built renderable can be attached to.
pub trait SceneContainer {
    /// Take ownership of `object` as a child and return its handle.
    fn add_child(&mut self, object: SceneObject) -> ObjectHandle;
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// Flat container of scene objects in insertion order.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<(ObjectHandle, SceneObject)>,
    next_id: u32,
    /// Monotonically increasing generation; bumped on structural changes.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Group {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether children were added or removed since last `mark_rendered()`.
    ///
    /// Segment color patches do not dirty the group; they are tracked per
    /// mesh.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after uploading).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Read access to a child.
    #[must_use]
    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.children
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, object)| object)
    }

    /// Write access to a child's mesh-level state.
    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SceneObject> {
        self.children
            .iter_mut()
            .find(|(h, _)| *h == handle)
            .map(|(_, object)| object)
    }

    /// Children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject)> {
        self.children.iter().map(|(h, object)| (*h, object))
    }

    /// Mutable children in insertion order.
    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (ObjectHandle, &mut SceneObject)> {
        self.children.iter_mut().map(|(h, object)| (*h, object))
    }

    /// Remove a child. Returns it, if it existed.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SceneObject> {
        let idx = self.children.iter().position(|(h, _)| *h == handle)?;
        let (_, object) = self.children.remove(idx);
        self.invalidate();
        Some(object)
    }

    /// Remove all children.
    pub fn clear(&mut self) {
        self.children.clear();
        self.invalidate();
    }

    /// Recolor one segment of a child line-strip to `(r, g, b, 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`WCurveError::UnknownObject`] if `handle` is not a child of
    /// this group, or [`WCurveError::SegmentOutOfRange`] if the segment does
    /// not exist.
    pub fn set_segment_color(
        &mut self,
        handle: ObjectHandle,
        segment: usize,
        rgb: [f32; 3],
    ) -> Result<(), WCurveError> {
        let object = self
            .get_mut(handle)
            .ok_or(WCurveError::UnknownObject(handle.id()))?;
        object.mesh_mut().set_segment_color(segment, rgb)
    }
}

impl SceneContainer for Group {
    fn add_child(&mut self, object: SceneObject) -> ObjectHandle {
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;
        self.children.push((handle, object));
        self.invalidate();
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::LineStripGeometry;

    fn line(segments: usize) -> SceneObject {
        SceneObject::new(
            DrawType::LineStrip,
            Mesh::from(LineStripGeometry {
                positions: vec![0.0; segments * 6],
                colors: vec![0.0; segments * 8],
            }),
        )
    }

    #[test]
    fn handles_are_unique_and_stable() {
        let mut group = Group::new();
        let a = group.add_child(line(1));
        let b = group.add_child(line(2));
        assert_ne!(a, b);

        let _ = group.remove(a);
        let c = group.add_child(line(3));
        assert_ne!(c, a);
        assert_eq!(group.get(b).unwrap().mesh().segment_count(), 2);
        assert!(group.get(a).is_none());
    }

    #[test]
    fn structural_changes_dirty_the_group() {
        let mut group = Group::new();
        assert!(!group.is_dirty());

        let handle = group.add_child(line(2));
        assert!(group.is_dirty());
        group.mark_rendered();
        assert!(!group.is_dirty());

        group.set_segment_color(handle, 0, [1.0, 0.0, 0.0]).unwrap();
        assert!(!group.is_dirty());

        group.clear();
        assert!(group.is_dirty());
        assert!(group.is_empty());
    }

    #[test]
    fn patch_on_unknown_handle_fails() {
        let mut group = Group::new();
        let handle = group.add_child(line(1));
        let _ = group.remove(handle);
        assert!(matches!(
            group.set_segment_color(handle, 0, [0.0; 3]),
            Err(WCurveError::UnknownObject(_))
        ));
    }

    #[test]
    fn patch_out_of_range_fails() {
        let mut group = Group::new();
        let handle = group.add_child(line(3));
        assert!(matches!(
            group.set_segment_color(handle, 3, [0.0; 3]),
            Err(WCurveError::SegmentOutOfRange {
                segment: 3,
                segment_count: 3
            })
        ));
        assert!(group.set_segment_color(handle, 2, [0.0; 3]).is_ok());
    }
}
