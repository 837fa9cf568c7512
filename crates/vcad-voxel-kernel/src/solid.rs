use std::collections::HashSet;

use vcad_kernel_types::{Axis, Cell, FaceKey};

/// An occupancy set of lattice cells together with an incrementally
/// maintained boundary-face set. See the crate docs for the central B⇔V
/// invariant.
#[derive(Debug, Clone, Default)]
pub struct VoxelSolid {
    occupied: HashSet<Cell>,
    boundary: HashSet<FaceKey>,
}

impl VoxelSolid {
    /// An empty solid.
    pub fn new() -> Self {
        Self::default()
    }

    /// The set of occupied cells.
    pub fn cells(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// The set of boundary faces.
    pub fn boundary(&self) -> &HashSet<FaceKey> {
        &self.boundary
    }

    /// Number of occupied cells (spec §8 invariant 3: `volume = |V|`).
    pub fn volume(&self) -> usize {
        self.occupied.len()
    }

    /// Number of boundary faces (`surfaceArea = |B|`).
    pub fn surface_area(&self) -> usize {
        self.boundary.len()
    }

    /// Whether a cell is occupied.
    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Insert `cell`. No-op if already present. Toggles each of the six
    /// adjacent faces: present becomes absent, absent becomes present.
    pub fn add(&mut self, cell: Cell) {
        if !self.occupied.insert(cell) {
            return;
        }
        for axis in Axis::all() {
            self.toggle_face(FaceKey::high_face_of(cell, axis));
            self.toggle_face(FaceKey::low_face_of(cell, axis));
        }
    }

    /// Remove `cell`. No-op if absent. Toggles the same six faces as `add`.
    pub fn remove(&mut self, cell: Cell) {
        if !self.occupied.remove(&cell) {
            return;
        }
        for axis in Axis::all() {
            self.toggle_face(FaceKey::high_face_of(cell, axis));
            self.toggle_face(FaceKey::low_face_of(cell, axis));
        }
    }

    fn toggle_face(&mut self, face: FaceKey) {
        if !self.boundary.remove(&face) {
            self.boundary.insert(face);
        }
    }

    /// Bounds `(min, maxExcl)` enclosing every occupied cell. Empty solid
    /// returns `((0,0,0),(0,0,0))`.
    pub fn bounds(&self) -> (Cell, Cell) {
        if self.occupied.is_empty() {
            return (Cell::new(0, 0, 0), Cell::new(0, 0, 0));
        }
        let mut min = Cell::new(i32::MAX, i32::MAX, i32::MAX);
        let mut max = Cell::new(i32::MIN, i32::MIN, i32::MIN);
        for c in &self.occupied {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            min.z = min.z.min(c.z);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
            max.z = max.z.max(c.z);
        }
        (min, Cell::new(max.x + 1, max.y + 1, max.z + 1))
    }

    /// Build a solid directly from a cell set, recomputing `B` via `add` so
    /// the invariant holds (spec §9 "incremental boundary-set
    /// maintenance").
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut s = Self::new();
        for c in cells {
            s.add(c);
        }
        s
    }
}
