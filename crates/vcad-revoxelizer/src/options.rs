use vcad_kernel_types::{Axis, Cell};

/// Options controlling an arbitrary-angle revoxelization (spec §4.2).
#[derive(Debug, Clone, Copy)]
pub struct RevoxelizeOptions {
    /// Rotation axis.
    pub axis: Axis,
    /// Rotation angle in degrees. May be negative.
    pub degrees: f64,
    /// Lattice point the rotation pivots around.
    pub pivot: Cell,
    /// `true` selects the conservative OBB/SAT mode; `false` selects
    /// deterministic supersampling.
    pub conservative_obb: bool,
    /// Supersample grid edge length (must be `> 0`). Default `3`.
    pub samples_per_axis: u32,
    /// Rounding tolerance for floor/ceil and membership tests (must be
    /// `> 0`). Default `1e-9`.
    pub epsilon: f64,
}

impl Default for RevoxelizeOptions {
    fn default() -> Self {
        Self {
            axis: Axis::Z,
            degrees: 0.0,
            pivot: Cell::new(0, 0, 0),
            conservative_obb: true,
            samples_per_axis: 3,
            epsilon: 1e-9,
        }
    }
}
