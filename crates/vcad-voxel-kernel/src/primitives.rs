use vcad_kernel_types::Cell;

use crate::solid::VoxelSolid;

impl VoxelSolid {
    /// Fill the axis-aligned box `[min, maxExcl)` by repeated `add`.
    /// Negative radius or empty range (any axis with `max <= min`) is a
    /// no-op.
    pub fn fill_box(&mut self, min: Cell, max_excl: Cell) {
        if max_excl.x <= min.x || max_excl.y <= min.y || max_excl.z <= min.z {
            return;
        }
        for x in min.x..max_excl.x {
            for y in min.y..max_excl.y {
                for z in min.z..max_excl.z {
                    self.add(Cell::new(x, y, z));
                }
            }
        }
    }

    /// Fill a cylinder with its axis along Z: `dx² + dy² ≤ r²` for
    /// `z ∈ [z_min, z_max_excl)`. Negative radius or empty Z range is a
    /// no-op.
    pub fn fill_cylinder_z(&mut self, cx: i32, cy: i32, z_min: i32, z_max_excl: i32, r: f64) {
        if r < 0.0 || z_max_excl <= z_min {
            return;
        }
        let r2 = r * r;
        let ri = r.ceil() as i32;
        for z in z_min..z_max_excl {
            for dx in -ri..=ri {
                for dy in -ri..=ri {
                    if (dx * dx + dy * dy) as f64 <= r2 {
                        self.add(Cell::new(cx + dx, cy + dy, z));
                    }
                }
            }
        }
    }

    /// Cylinder with its axis along X: `dy² + dz² ≤ r²` for
    /// `x ∈ [x_min, x_max_excl)`.
    pub fn fill_cylinder_x(&mut self, cy: i32, cz: i32, x_min: i32, x_max_excl: i32, r: f64) {
        if r < 0.0 || x_max_excl <= x_min {
            return;
        }
        let r2 = r * r;
        let ri = r.ceil() as i32;
        for x in x_min..x_max_excl {
            for dy in -ri..=ri {
                for dz in -ri..=ri {
                    if (dy * dy + dz * dz) as f64 <= r2 {
                        self.add(Cell::new(x, cy + dy, cz + dz));
                    }
                }
            }
        }
    }

    /// Cylinder with its axis along Y: `dx² + dz² ≤ r²` for
    /// `y ∈ [y_min, y_max_excl)`.
    pub fn fill_cylinder_y(&mut self, cx: i32, cz: i32, y_min: i32, y_max_excl: i32, r: f64) {
        if r < 0.0 || y_max_excl <= y_min {
            return;
        }
        let r2 = r * r;
        let ri = r.ceil() as i32;
        for y in y_min..y_max_excl {
            for dx in -ri..=ri {
                for dz in -ri..=ri {
                    if (dx * dx + dz * dz) as f64 <= r2 {
                        self.add(Cell::new(cx + dx, y, cz + dz));
                    }
                }
            }
        }
    }

    /// Fill a sphere: `|Δ|² ≤ r²` around `center`. Negative radius is a
    /// no-op.
    pub fn fill_sphere(&mut self, center: Cell, r: f64) {
        if r < 0.0 {
            return;
        }
        let r2 = r * r;
        let ri = r.ceil() as i32;
        for dx in -ri..=ri {
            for dy in -ri..=ri {
                for dz in -ri..=ri {
                    if (dx * dx + dy * dy + dz * dz) as f64 <= r2 {
                        self.add(Cell::new(center.x + dx, center.y + dy, center.z + dz));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_range_is_noop() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(0, 5, 5));
        assert_eq!(s.volume(), 0);
    }

    #[test]
    fn negative_radius_is_noop() {
        let mut s = VoxelSolid::new();
        s.fill_sphere(Cell::new(0, 0, 0), -1.0);
        assert_eq!(s.volume(), 0);
    }

    #[test]
    fn sphere_contains_center() {
        let mut s = VoxelSolid::new();
        s.fill_sphere(Cell::new(0, 0, 0), 3.0);
        assert!(s.contains(Cell::new(0, 0, 0)));
        assert!(s.is_watertight());
    }
}
