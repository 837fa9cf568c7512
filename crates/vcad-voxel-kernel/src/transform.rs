use vcad_kernel_types::{Axis, Cell};

use crate::solid::VoxelSolid;

impl VoxelSolid {
    /// Translate every cell by `delta`.
    pub fn translate(&self, delta: Cell) -> VoxelSolid {
        VoxelSolid::from_cells(self.cells().iter().map(|&c| c + delta))
    }

    /// Upscale every cell by `factor`, replicating it into a `factor^3`
    /// block of cells at the finer resolution. `factor <= 1` is the
    /// identity. Used both by per-instance voxels-per-unit overrides and
    /// by the Medium/High quality profiles.
    pub fn upscale(&self, factor: u32) -> VoxelSolid {
        if factor <= 1 {
            return self.clone();
        }
        let f = factor as i32;
        let mut out = VoxelSolid::new();
        for &c in self.cells() {
            for dx in 0..f {
                for dy in 0..f {
                    for dz in 0..f {
                        out.add(Cell::new(c.x * f + dx, c.y * f + dy, c.z * f + dz));
                    }
                }
            }
        }
        out
    }

    /// Apply `k mod 4` 90° rotations about `axis` using the canonical
    /// lattice rotations from spec §4.1:
    ///
    /// ```text
    /// Rx: (x,y,z) ↦ (x, −z,  y)
    /// Ry: (x,y,z) ↦ (z,  y, −x)
    /// Rz: (x,y,z) ↦ (−y, x,  z)
    /// ```
    pub fn rotate90(&self, axis: Axis, k: i32) -> VoxelSolid {
        let turns = k.rem_euclid(4);
        let mut cells: Vec<Cell> = self.cells().iter().copied().collect();
        for _ in 0..turns {
            cells = cells.into_iter().map(|c| rotate_quarter(c, axis)).collect();
        }
        VoxelSolid::from_cells(cells)
    }

    /// Reflect so the resulting occupied cube occupies the same half-open
    /// space: for axis X, `x ↦ −x−1` (Y, Z analogous).
    pub fn mirror(&self, axis: Axis) -> VoxelSolid {
        VoxelSolid::from_cells(self.cells().iter().map(|&c| mirror_cell(c, axis)))
    }
}

fn rotate_quarter(c: Cell, axis: Axis) -> Cell {
    match axis {
        Axis::X => Cell::new(c.x, -c.z, c.y),
        Axis::Y => Cell::new(c.z, c.y, -c.x),
        Axis::Z => Cell::new(-c.y, c.x, c.z),
    }
}

fn mirror_cell(c: Cell, axis: Axis) -> Cell {
    match axis {
        Axis::X => Cell::new(-c.x - 1, c.y, c.z),
        Axis::Y => Cell::new(c.x, -c.y - 1, c.z),
        Axis::Z => Cell::new(c.x, c.y, -c.z - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate90_four_turns_is_identity() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(3, 2, 1));
        let r4 = s.rotate90(Axis::Z, 4);
        assert_eq!(r4.cells(), s.cells());
    }

    #[test]
    fn rotate90_preserves_volume() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(4, 3, 2));
        let r = s.rotate90(Axis::X, 1);
        assert_eq!(r.volume(), s.volume());
    }

    #[test]
    fn mirror_twice_is_identity() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(-2, -1, 0), Cell::new(3, 4, 5));
        let m2 = s.mirror(Axis::X).mirror(Axis::X);
        assert_eq!(m2.cells(), s.cells());
    }

    #[test]
    fn translate_shifts_bounds() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let t = s.translate(Cell::new(10, 0, 0));
        assert_eq!(t.bounds().0, Cell::new(10, 0, 0));
    }

    #[test]
    fn upscale_by_one_is_identity() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let up = s.upscale(1);
        assert_eq!(up.cells(), s.cells());
    }

    #[test]
    fn upscale_cubes_the_volume_and_stays_watertight() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(10, 10, 2));
        let up = s.upscale(2);
        assert_eq!(up.volume(), s.volume() * 8);
        assert!(up.is_watertight());
    }
}
