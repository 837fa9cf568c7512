#![warn(missing_docs)]

//! Arbitrary-angle revoxelization: resampling a source voxel set under an
//! affine rotation into a target lattice (spec §4.2). Two modes are
//! offered: a conservative oriented-bounding-box intersection test that
//! never loses interior coverage, and deterministic supersampling that
//! produces thinner boundaries when resolution permits.

mod obb;
mod options;

pub use options::RevoxelizeOptions;

use log::trace;
use rayon::prelude::*;
use vcad_kernel_math::{Transform, Vec3};
use vcad_kernel_types::{Axis, Cell, CadError};
use vcad_voxel_kernel::VoxelSolid;

fn rotation_transform(axis: Axis, radians: f64) -> Transform {
    match axis {
        Axis::X => Transform::rotation_x(radians),
        Axis::Y => Transform::rotation_y(radians),
        Axis::Z => Transform::rotation_z(radians),
    }
}

fn cell_to_vec3(c: Cell) -> Vec3 {
    Vec3::new(c.x as f64, c.y as f64, c.z as f64)
}

/// Resample `source` under the rotation described by `opts`, producing a
/// new solid on the same integer lattice.
pub fn revoxelize(source: &VoxelSolid, opts: &RevoxelizeOptions) -> Result<VoxelSolid, CadError> {
    if opts.samples_per_axis == 0 {
        return Err(CadError::invalid_argument(
            "revoxelizer samplesPerAxis must be > 0",
        ));
    }
    if !(opts.epsilon > 0.0) {
        return Err(CadError::invalid_argument(
            "revoxelizer epsilon must be > 0",
        ));
    }

    let pivot = cell_to_vec3(opts.pivot);
    let radians = opts.degrees.to_radians();
    let fwd = rotation_transform(opts.axis, radians);
    let inv = rotation_transform(opts.axis, -radians); // R^T for a pure rotation

    if source.cells().is_empty() {
        return Ok(VoxelSolid::new());
    }

    let (target_min, target_max_excl) = target_bounds(source, &fwd, pivot, opts.epsilon);

    let mut out = VoxelSolid::new();
    if opts.conservative_obb {
        revoxelize_obb(source, &inv, pivot, opts.epsilon, target_min, target_max_excl, &mut out);
    } else {
        revoxelize_supersample(
            source,
            &inv,
            pivot,
            opts.epsilon,
            opts.samples_per_axis,
            target_min,
            target_max_excl,
            &mut out,
        );
    }
    Ok(out)
}

/// Rotate the expanded (padded by 1 on each side) source AABB and take the
/// floor/ceil envelope, widened by `epsilon`.
fn target_bounds(source: &VoxelSolid, fwd: &Transform, pivot: Vec3, eps: f64) -> (Cell, Cell) {
    let (min, max_excl) = source.bounds();
    let (pmin, pmax) = (
        Cell::new(min.x - 1, min.y - 1, min.z - 1),
        Cell::new(max_excl.x + 1, max_excl.y + 1, max_excl.z + 1),
    );
    let corners = [
        (pmin.x, pmin.y, pmin.z),
        (pmax.x, pmin.y, pmin.z),
        (pmin.x, pmax.y, pmin.z),
        (pmax.x, pmax.y, pmin.z),
        (pmin.x, pmin.y, pmax.z),
        (pmax.x, pmin.y, pmax.z),
        (pmin.x, pmax.y, pmax.z),
        (pmax.x, pmax.y, pmax.z),
    ];
    let mut lo = Vec3::new(f64::MAX, f64::MAX, f64::MAX);
    let mut hi = Vec3::new(f64::MIN, f64::MIN, f64::MIN);
    for (x, y, z) in corners {
        let local = Vec3::new(x as f64, y as f64, z as f64) - pivot;
        let rotated = fwd.apply_vec(&local) + pivot;
        lo.x = lo.x.min(rotated.x);
        lo.y = lo.y.min(rotated.y);
        lo.z = lo.z.min(rotated.z);
        hi.x = hi.x.max(rotated.x);
        hi.y = hi.y.max(rotated.y);
        hi.z = hi.z.max(rotated.z);
    }
    let min_out = Cell::new(
        (lo.x - eps).floor() as i32,
        (lo.y - eps).floor() as i32,
        (lo.z - eps).floor() as i32,
    );
    let max_out = Cell::new(
        (hi.x + eps).ceil() as i32,
        (hi.y + eps).ceil() as i32,
        (hi.z + eps).ceil() as i32,
    );
    (min_out, max_out)
}

/// `floor(v + eps)` — tolerant floor used to pick a candidate source cell
/// for a point near an integer boundary.
fn floor_with_tolerance(v: f64, eps: f64) -> i32 {
    (v + eps).floor() as i32
}

#[allow(clippy::too_many_arguments)]
fn revoxelize_supersample(
    source: &VoxelSolid,
    inv: &Transform,
    pivot: Vec3,
    eps: f64,
    n: u32,
    target_min: Cell,
    target_max_excl: Cell,
    out: &mut VoxelSolid,
) {
    let n = n as i32;
    // Each target slab tx is independent of every other; run the slabs in
    // parallel and add the resulting cells through the incremental path
    // afterwards, since VoxelSolid::add is not safe to call concurrently.
    let slabs: Vec<Vec<Cell>> = (target_min.x..target_max_excl.x)
        .into_par_iter()
        .map(|tx| {
            let mut hits = Vec::new();
            for ty in target_min.y..target_max_excl.y {
                for tz in target_min.z..target_max_excl.z {
                    let mut filled = false;
                    'samples: for i in 0..n {
                        for j in 0..n {
                            for k in 0..n {
                                let p = Vec3::new(
                                    tx as f64 + (i as f64 + 0.5) / n as f64,
                                    ty as f64 + (j as f64 + 0.5) / n as f64,
                                    tz as f64 + (k as f64 + 0.5) / n as f64,
                                );
                                let p_src = inv.apply_vec(&(p - pivot)) + pivot;
                                let cand = Cell::new(
                                    floor_with_tolerance(p_src.x, eps),
                                    floor_with_tolerance(p_src.y, eps),
                                    floor_with_tolerance(p_src.z, eps),
                                );
                                if !source.contains(cand) {
                                    continue;
                                }
                                let within = p_src.x >= cand.x as f64 - eps
                                    && p_src.x < cand.x as f64 + 1.0 + eps
                                    && p_src.y >= cand.y as f64 - eps
                                    && p_src.y < cand.y as f64 + 1.0 + eps
                                    && p_src.z >= cand.z as f64 - eps
                                    && p_src.z < cand.z as f64 + 1.0 + eps;
                                if within {
                                    trace!("supersample hit target=({tx},{ty},{tz}) source={cand:?}");
                                    filled = true;
                                    break 'samples;
                                }
                            }
                        }
                    }
                    if filled {
                        hits.push(Cell::new(tx, ty, tz));
                    }
                }
            }
            hits
        })
        .collect();
    for hits in slabs {
        for cell in hits {
            out.add(cell);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn revoxelize_obb(
    source: &VoxelSolid,
    inv: &Transform,
    pivot: Vec3,
    eps: f64,
    target_min: Cell,
    target_max_excl: Cell,
    out: &mut VoxelSolid,
) {
    let obb_axes = [
        inv.apply_vec(&Vec3::x()),
        inv.apply_vec(&Vec3::y()),
        inv.apply_vec(&Vec3::z()),
    ];
    let obb_half = [0.5, 0.5, 0.5];
    // Per-axis extent of the OBB in world (source) coordinates.
    let extent = Vec3::new(
        0.5 * (obb_axes[0].x.abs() + obb_axes[1].x.abs() + obb_axes[2].x.abs()),
        0.5 * (obb_axes[0].y.abs() + obb_axes[1].y.abs() + obb_axes[2].y.abs()),
        0.5 * (obb_axes[0].z.abs() + obb_axes[1].z.abs() + obb_axes[2].z.abs()),
    );

    let slabs: Vec<Vec<Cell>> = (target_min.x..target_max_excl.x)
        .into_par_iter()
        .map(|tx| {
            let mut hits = Vec::new();
            for ty in target_min.y..target_max_excl.y {
                for tz in target_min.z..target_max_excl.z {
                    let center_local =
                        Vec3::new(tx as f64 + 0.5, ty as f64 + 0.5, tz as f64 + 0.5) - pivot;
                    let center_src = inv.apply_vec(&center_local) + pivot;

                    let cx0 = (center_src.x - extent.x).floor() as i32;
                    let cx1 = (center_src.x + extent.x).ceil() as i32;
                    let cy0 = (center_src.y - extent.y).floor() as i32;
                    let cy1 = (center_src.y + extent.y).ceil() as i32;
                    let cz0 = (center_src.z - extent.z).floor() as i32;
                    let cz1 = (center_src.z + extent.z).ceil() as i32;

                    let mut filled = false;
                    'candidates: for sx in cx0..cx1 {
                        for sy in cy0..cy1 {
                            for sz in cz0..cz1 {
                                let cand = Cell::new(sx, sy, sz);
                                if !source.contains(cand) {
                                    continue;
                                }
                                let aabb_center =
                                    Vec3::new(sx as f64 + 0.5, sy as f64 + 0.5, sz as f64 + 0.5);
                                if obb::obb_aabb_intersect(
                                    center_src, obb_axes, obb_half, aabb_center, 0.5, eps,
                                ) {
                                    filled = true;
                                    break 'candidates;
                                }
                            }
                        }
                    }
                    if filled {
                        hits.push(Cell::new(tx, ty, tz));
                    }
                }
            }
            hits
        })
        .collect();
    for hits in slabs {
        for cell in hits {
            out.add(cell);
        }
    }
}
