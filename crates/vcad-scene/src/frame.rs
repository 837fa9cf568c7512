use vcad_kernel_types::{Axis, Cell};

/// An exact integer frame: a 3x3 integer matrix composed of 90-degree
/// rotations and axis reflections, plus an integer translation, applied
/// to a cell as `cell ↦ matrix · cell + translation`.
///
/// Unlike the builder's transform stack (which replays a list of ops per
/// cell), an instance's frame is a single matrix+vector baked ahead of
/// time — bake applies it in one pass per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    matrix: [[i32; 3]; 3],
    translation: Cell,
}

impl Frame {
    /// The identity frame.
    pub fn identity() -> Self {
        Self {
            matrix: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
            translation: Cell::new(0, 0, 0),
        }
    }

    /// A pure translation frame.
    pub fn translation(delta: Cell) -> Self {
        Self {
            translation: delta,
            ..Self::identity()
        }
    }

    /// Left-compose an affine op `cell ↦ m·cell + t` onto this frame, so
    /// applying the result to a cell equals applying `self` first, then
    /// `(m, t)`.
    fn compose(self, m: [[i32; 3]; 3], t: Cell) -> Self {
        let new_matrix = mat_mul(m, self.matrix);
        let rotated_translation = mat_apply(m, self.translation);
        Self {
            matrix: new_matrix,
            translation: rotated_translation + t,
        }
    }

    /// Left-compose `k mod 4` 90-degree rotations about `axis` (applied
    /// after whatever this frame already does).
    pub fn rotate90(mut self, axis: Axis, k: i32) -> Self {
        for _ in 0..k.rem_euclid(4) {
            self = self.compose(rotation_matrix(axis), Cell::new(0, 0, 0));
        }
        self
    }

    /// Left-compose a reflection about `axis` onto this frame. Matches
    /// [`vcad_voxel_kernel::VoxelSolid::mirror`]'s `x ↦ -x-1` convention so
    /// the reflected occupied cube keeps occupying the same half-open
    /// lattice space.
    pub fn mirror(self, axis: Axis) -> Self {
        let (m, t) = mirror_affine(axis);
        self.compose(m, t)
    }

    /// Translate this frame by `delta` (composed after the existing
    /// rotation/reflection and translation).
    pub fn translate(self, delta: Cell) -> Self {
        self.compose([[1, 0, 0], [0, 1, 0], [0, 0, 1]], delta)
    }

    /// Apply `cell ↦ matrix · cell + translation`.
    pub fn apply(&self, cell: Cell) -> Cell {
        mat_apply(self.matrix, cell) + self.translation
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

fn rotation_matrix(axis: Axis) -> [[i32; 3]; 3] {
    match axis {
        // Rx: (x,y,z) -> (x,-z,y)
        Axis::X => [[1, 0, 0], [0, 0, -1], [0, 1, 0]],
        // Ry: (x,y,z) -> (z,y,-x)
        Axis::Y => [[0, 0, 1], [0, 1, 0], [-1, 0, 0]],
        // Rz: (x,y,z) -> (-y,x,z)
        Axis::Z => [[0, -1, 0], [1, 0, 0], [0, 0, 1]],
    }
}

/// Mirror as an affine op: for axis X, `x ↦ -x - 1` (Y, Z analogous).
fn mirror_affine(axis: Axis) -> ([[i32; 3]; 3], Cell) {
    match axis {
        Axis::X => ([[-1, 0, 0], [0, 1, 0], [0, 0, 1]], Cell::new(-1, 0, 0)),
        Axis::Y => ([[1, 0, 0], [0, -1, 0], [0, 0, 1]], Cell::new(0, -1, 0)),
        Axis::Z => ([[1, 0, 0], [0, 1, 0], [0, 0, -1]], Cell::new(0, 0, -1)),
    }
}

fn mat_mul(a: [[i32; 3]; 3], b: [[i32; 3]; 3]) -> [[i32; 3]; 3] {
    let mut out = [[0i32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

fn mat_apply(m: [[i32; 3]; 3], c: Cell) -> Cell {
    Cell::new(
        m[0][0] * c.x + m[0][1] * c.y + m[0][2] * c.z,
        m[1][0] * c.x + m[1][1] * c.y + m[1][2] * c.z,
        m[2][0] * c.x + m[2][1] * c.y + m[2][2] * c.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let f = Frame::identity();
        assert_eq!(f.apply(Cell::new(3, -2, 7)), Cell::new(3, -2, 7));
    }

    #[test]
    fn translation_adds_delta() {
        let f = Frame::translation(Cell::new(1, 2, 3));
        assert_eq!(f.apply(Cell::new(0, 0, 0)), Cell::new(1, 2, 3));
    }

    #[test]
    fn four_quarter_turns_is_identity() {
        let f = Frame::identity().rotate90(Axis::Z, 4);
        assert_eq!(f.apply(Cell::new(2, -1, 5)), Cell::new(2, -1, 5));
    }

    #[test]
    fn rotate_then_translate_order() {
        // rotate90(Z, 1) maps (1,0,0) -> (0,1,0); then translate by (10,0,0).
        let f = Frame::identity().rotate90(Axis::Z, 1).translate(Cell::new(10, 0, 0));
        assert_eq!(f.apply(Cell::new(1, 0, 0)), Cell::new(10, 1, 0));
    }

    #[test]
    fn mirror_twice_is_identity() {
        let f = Frame::identity().mirror(Axis::X).mirror(Axis::X);
        assert_eq!(f.apply(Cell::new(4, 5, 6)), Cell::new(4, 5, 6));
    }

    #[test]
    fn mirror_matches_voxel_solid_convention() {
        let f = Frame::identity().mirror(Axis::X);
        assert_eq!(f.apply(Cell::new(0, 2, 3)), Cell::new(-1, 2, 3));
        assert_eq!(f.apply(Cell::new(5, 0, 0)), Cell::new(-6, 0, 0));
    }
}
