use std::collections::HashSet;

use vcad_kernel_types::{Axis, Cell};
use vcad_voxel_kernel::{close, dilate, union, Metric, VoxelSolid};

use crate::part::Part;

/// The result of [`weld`]: a new named part plus the structuring-element
/// radius that was needed to close the gap (`0` if the union was already
/// 6-connected).
#[derive(Debug, Clone)]
pub struct WeldResult {
    /// The welded, 6-connected part.
    pub part: Part,
    /// The radius used to close the union (`0` if no closing was needed).
    pub radius: i32,
}

/// Compute `union(a, b)`; if already 6-connected, return it as-is with
/// radius `0`. Otherwise grow a Chebyshev-metric closing radius (doubling
/// an initial guess up to 16 times) until closure connects the two
/// pieces, then binary-search the minimum radius in that range. Registers
/// the result as a new part named `name`.
pub fn weld(a: &VoxelSolid, b: &VoxelSolid, name: impl Into<String>, metric: Metric) -> WeldResult {
    let union = union(a, b);
    if union.is_6_connected() {
        return WeldResult {
            part: Part::new(name, union),
            radius: 0,
        };
    }

    let gap = chebyshev_gap(a.bounds(), b.bounds());
    let mut r_high = gap.max(1);
    let mut attempts = 0;
    while !close(&union, r_high, metric).is_6_connected() && attempts < 16 {
        r_high *= 2;
        attempts += 1;
    }
    if !close(&union, r_high, metric).is_6_connected() {
        // Fail-safe: even the doubled high bound didn't connect; return it
        // anyway rather than loop forever.
        return WeldResult {
            part: Part::new(name, close(&union, r_high, metric)),
            radius: r_high,
        };
    }

    let mut lo = 1;
    let mut hi = r_high;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if close(&union, mid, metric).is_6_connected() {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    WeldResult {
        part: Part::new(name, close(&union, lo, metric)),
        radius: lo,
    }
}

/// Chebyshev (L∞) distance between two axis-aligned boxes, `0` if they
/// touch or overlap on every axis.
fn chebyshev_gap(a: (Cell, Cell), b: (Cell, Cell)) -> i32 {
    let axis_gap = |a_min: i32, a_max_excl: i32, b_min: i32, b_max_excl: i32| -> i32 {
        (b_min - a_max_excl).max(a_min - b_max_excl).max(0)
    };
    let gx = axis_gap(a.0.x, a.1.x, b.0.x, b.1.x);
    let gy = axis_gap(a.0.y, a.1.y, b.0.y, b.1.y);
    let gz = axis_gap(a.0.z, a.1.z, b.0.z, b.1.z);
    gx.max(gy).max(gz)
}

/// Footprint cells and axis-depth range of a solid projected onto the
/// plane perpendicular to `axis`.
fn project(solid: &VoxelSolid, axis: Axis) -> (HashSet<(i32, i32)>, (i32, i32)) {
    let (a_axis, b_axis) = axis.other_axes();
    let mut footprint = HashSet::new();
    for &c in solid.cells() {
        footprint.insert((c.get(a_axis), c.get(b_axis)));
    }
    let (min, max_excl) = solid.bounds();
    (footprint, (min.get(axis), max_excl.get(axis)))
}

/// Fill connective geometry between `a` and `b` along `axis`: the
/// footprint (intersection of the two solids' silhouettes on the plane
/// perpendicular to `axis`, falling back to their AABB overlap rectangle
/// if that intersection is empty) is extruded along `axis` from the
/// nearer face of the axially-earlier solid to the nearer face of the
/// later one, extended by `thickness - 1` on the start side and
/// `thickness` on the end side (so `thickness = 1` fills exactly the
/// gap). Cells outside the optional `mask` AABB are dropped. The bridge
/// is unioned with both inputs.
#[allow(clippy::too_many_arguments)]
pub fn bridge_axis(
    a: &VoxelSolid,
    b: &VoxelSolid,
    axis: Axis,
    thickness: i32,
    mask: Option<(Cell, Cell)>,
) -> VoxelSolid {
    let (a_axis, b_axis) = axis.other_axes();
    let (footprint_a, range_a) = project(a, axis);
    let (footprint_b, range_b) = project(b, axis);

    let mut footprint: Vec<(i32, i32)> = footprint_a.intersection(&footprint_b).copied().collect();
    if footprint.is_empty() {
        let (amin, amax) = a.bounds();
        let (bmin, bmax) = b.bounds();
        let lo_a = (amin.get(a_axis).max(bmin.get(a_axis)), amin.get(b_axis).max(bmin.get(b_axis)));
        let hi_a = (amax.get(a_axis).min(bmax.get(a_axis)), amax.get(b_axis).min(bmax.get(b_axis)));
        if hi_a.0 > lo_a.0 && hi_a.1 > lo_a.1 {
            for av in lo_a.0..hi_a.0 {
                for bv in lo_a.1..hi_a.1 {
                    footprint.push((av, bv));
                }
            }
        }
    }

    let center_a = (range_a.0 + range_a.1 - 1) as f64 / 2.0;
    let center_b = (range_b.0 + range_b.1 - 1) as f64 / 2.0;
    let (earlier_range, later_range) = if center_a <= center_b {
        (range_a, range_b)
    } else {
        (range_b, range_a)
    };

    let gap_start = earlier_range.1;
    let gap_end = later_range.0;
    let fill_start = gap_start - (thickness - 1);
    let fill_end_excl = gap_end + thickness;

    let mut bridge = VoxelSolid::new();
    for (av, bv) in footprint {
        for k in fill_start..fill_end_excl {
            let mut cell = Cell::new(0, 0, 0);
            cell = cell.with(axis, k).with(a_axis, av).with(b_axis, bv);
            if let Some((mmin, mmax)) = mask {
                if cell.x < mmin.x || cell.y < mmin.y || cell.z < mmin.z
                    || cell.x >= mmax.x || cell.y >= mmax.y || cell.z >= mmax.z
                {
                    continue;
                }
            }
            bridge.add(cell);
        }
    }
    union(&union(&bridge, a), b)
}

/// Cells of `solid` exposed on at least one face (fewer than six occupied
/// neighbors).
fn surface_cells(solid: &VoxelSolid) -> Vec<Cell> {
    solid
        .cells()
        .iter()
        .copied()
        .filter(|&c| c.neighbors6().iter().any(|&n| !solid.contains(n)))
        .collect()
}

/// 3D Bresenham line from `start` to `end`, inclusive of both endpoints.
fn bresenham_line(start: Cell, end: Cell) -> Vec<Cell> {
    let mut points = Vec::new();
    let (mut x, mut y, mut z) = (start.x, start.y, start.z);
    let (dx, dy, dz) = (end.x - start.x, end.y - start.y, end.z - start.z);
    let (sx, sy, sz) = (dx.signum(), dy.signum(), dz.signum());
    let (adx, ady, adz) = (dx.abs(), dy.abs(), dz.abs());
    let longest = adx.max(ady).max(adz).max(1);

    let mut err_x = longest / 2;
    let mut err_y = longest / 2;
    let mut err_z = longest / 2;

    for _ in 0..=longest {
        points.push(Cell::new(x, y, z));
        err_x -= adx;
        err_y -= ady;
        err_z -= adz;
        if err_x < 0 {
            x += sx;
            err_x += longest;
        }
        if err_y < 0 {
            y += sy;
            err_y += longest;
        }
        if err_z < 0 {
            z += sz;
            err_z += longest;
        }
    }
    points
}

/// Connect `a` and `b` with a straight strut of the given L∞ radius: find
/// the closest pair of exposed surface cells (one from each solid) by
/// squared Euclidean distance, rasterize a 3D Bresenham line between
/// them, thicken by `radius`, and union with both inputs.
pub fn strut(a: &VoxelSolid, b: &VoxelSolid, radius: i32) -> VoxelSolid {
    let surf_a = surface_cells(a);
    let surf_b = surface_cells(b);
    if surf_a.is_empty() || surf_b.is_empty() {
        return union(a, b);
    }

    let mut best = (surf_a[0], surf_b[0], surf_a[0].dist2(surf_b[0]));
    for &pa in &surf_a {
        for &pb in &surf_b {
            let d = pa.dist2(pb);
            if d < best.2 {
                best = (pa, pb, d);
            }
        }
    }

    let mut line = VoxelSolid::from_cells(bresenham_line(best.0, best.1));
    if radius > 0 {
        line = dilate(&line, radius, Metric::LInf);
    }
    union(&union(&line, a), b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_solid(min: Cell, max: Cell) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        s.fill_box(min, max);
        s
    }

    #[test]
    fn weld_already_connected_uses_radius_zero() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let b = box_solid(Cell::new(2, 0, 0), Cell::new(4, 2, 2));
        let result = weld(&a, &b, "welded", Metric::LInf);
        assert_eq!(result.radius, 0);
        assert!(result.part.solid().is_6_connected());
    }

    #[test]
    fn weld_plates_with_gap_connects() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(10, 10, 3));
        let b = box_solid(Cell::new(12, 0, 0), Cell::new(22, 10, 3));
        let result = weld(&a, &b, "welded", Metric::LInf);
        assert!(result.radius > 0);
        assert!(result.part.solid().is_6_connected());
        assert!(result.part.solid().is_watertight());
    }

    #[test]
    fn bridge_fills_exactly_the_gap_at_thickness_one() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(5, 5, 2));
        let b = box_solid(Cell::new(0, 0, 5), Cell::new(5, 5, 7));
        let bridged = bridge_axis(&a, &b, Axis::Z, 1, None);
        // The gap at z in [2, 5) should now be filled across the shared
        // 5x5 footprint, with no new cells beyond it.
        for z in 2..5 {
            assert!(bridged.contains(Cell::new(2, 2, z)));
        }
        assert!(bridged.is_watertight());
    }

    #[test]
    fn strut_connects_disjoint_solids() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let b = box_solid(Cell::new(10, 0, 0), Cell::new(12, 2, 2));
        let result = strut(&a, &b, 0);
        assert!(result.is_6_connected());
    }

    #[test]
    fn chebyshev_gap_zero_when_touching() {
        let a = (Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let b = (Cell::new(2, 0, 0), Cell::new(4, 2, 2));
        assert_eq!(chebyshev_gap(a, b), 0);
    }

    #[test]
    fn chebyshev_gap_positive_when_separated() {
        let a = (Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let b = (Cell::new(5, 0, 0), Cell::new(7, 2, 2));
        assert_eq!(chebyshev_gap(a, b), 3);
    }
}
