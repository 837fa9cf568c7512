use vcad_kernel_types::Cell;

use crate::solid::VoxelSolid;

/// Distance metric used to define a morphological structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Chebyshev distance (max of per-axis absolute difference).
    LInf,
    /// Manhattan distance (sum of per-axis absolute differences).
    L1,
    /// Euclidean distance.
    L2,
}

/// The structuring element `E(r, metric) = { δ : ‖δ‖_metric ≤ r }`, as the
/// list of integer offsets within radius `r`.
fn structuring_element(r: i32, metric: Metric) -> Vec<Cell> {
    let mut offsets = Vec::new();
    if r <= 0 {
        offsets.push(Cell::new(0, 0, 0));
        return offsets;
    }
    for dx in -r..=r {
        for dy in -r..=r {
            for dz in -r..=r {
                let within = match metric {
                    Metric::LInf => dx.abs().max(dy.abs()).max(dz.abs()) <= r,
                    Metric::L1 => dx.abs() + dy.abs() + dz.abs() <= r,
                    Metric::L2 => {
                        let d2 = (dx * dx + dy * dy + dz * dz) as f64;
                        d2 <= (r as f64) * (r as f64)
                    }
                };
                if within {
                    offsets.push(Cell::new(dx, dy, dz));
                }
            }
        }
    }
    offsets
}

/// Minkowski sum of `s` with the structuring element `E(r, metric)`.
/// `r <= 0` is the identity.
pub fn dilate(s: &VoxelSolid, r: i32, metric: Metric) -> VoxelSolid {
    if r <= 0 {
        return s.clone();
    }
    let elem = structuring_element(r, metric);
    let mut out = VoxelSolid::new();
    let mut seen = std::collections::HashSet::new();
    for &c in s.cells() {
        for &d in &elem {
            let n = c + d;
            if seen.insert(n) {
                out.add(n);
            }
        }
    }
    out
}

/// Erosion: `{ c ∈ V : ∀δ ∈ E, c+δ ∈ V }`. `r <= 0` is the identity.
pub fn erode(s: &VoxelSolid, r: i32, metric: Metric) -> VoxelSolid {
    if r <= 0 {
        return s.clone();
    }
    let elem = structuring_element(r, metric);
    let mut out = VoxelSolid::new();
    for &c in s.cells() {
        if elem.iter().all(|&d| s.contains(c + d)) {
            out.add(c);
        }
    }
    out
}

/// Open: erode then dilate.
pub fn open(s: &VoxelSolid, r: i32, metric: Metric) -> VoxelSolid {
    dilate(&erode(s, r, metric), r, metric)
}

/// Close: dilate then erode.
pub fn close(s: &VoxelSolid, r: i32, metric: Metric) -> VoxelSolid {
    erode(&dilate(s, r, metric), r, metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcad_kernel_types::Cell;

    #[test]
    fn zero_radius_is_identity() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        let d = dilate(&s, 0, Metric::LInf);
        assert_eq!(d.cells(), s.cells());
        let e = erode(&s, -1, Metric::LInf);
        assert_eq!(e.cells(), s.cells());
    }

    #[test]
    fn dilate_then_erode_covers_original() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(5, 5, 5));
        let closed = close(&s, 1, Metric::LInf);
        for &c in s.cells() {
            assert!(closed.contains(c));
        }
    }

    #[test]
    fn erode_shrinks_box() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(5, 5, 5));
        let eroded = erode(&s, 1, Metric::LInf);
        // A 5x5x5 box eroded by chebyshev radius 1 leaves the inner 3x3x3.
        assert_eq!(eroded.volume(), 27);
    }

    #[test]
    fn close_connects_nearby_components() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        s.fill_box(Cell::new(4, 0, 0), Cell::new(7, 3, 3));
        assert!(!s.is_6_connected());
        let closed = close(&s, 1, Metric::LInf);
        assert!(closed.is_6_connected());
    }
}
