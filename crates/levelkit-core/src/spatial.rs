use rstar::{RTree, RTreeObject, AABB};

use crate::entity::EntityKind;
use crate::geometry::{BBox, Point};

/// An entry in the R-tree spatial index, referencing an entity by its
/// position in the scene collection of its kind.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub kind: EntityKind,
    /// Index into the scene collection for `kind`.
    pub index: usize,
    /// Box that contains every point the entity's hit test can accept.
    pub bbox: BBox,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bbox.min.x, self.bbox.min.y],
            [self.bbox.max.x, self.bbox.max.y],
        )
    }
}

/// Spatial index for narrowing pointer hit tests.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.tree.size())
            .finish()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn build(entries: Vec<SpatialEntry>) -> Self {
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn insert(&mut self, entry: SpatialEntry) {
        self.tree.insert(entry);
    }

    /// Collection indices of `kind` whose box contains the point, ascending.
    pub fn candidates(&self, kind: EntityKind, point: &Point) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.index)
            .collect();
        indices.sort_unstable();
        indices
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
