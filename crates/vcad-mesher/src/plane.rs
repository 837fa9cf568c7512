use std::collections::HashMap;

use vcad_kernel_types::{Axis, Cell, FaceKey};
use vcad_voxel_kernel::VoxelSolid;

/// An oriented plane of coplanar boundary faces: all faces with the same
/// `(axis, k, sign)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneKey {
    pub axis: Axis,
    pub k: i32,
    pub sign: i8,
}

fn axis_order(axis: Axis) -> u8 {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
    }
}

/// Group every boundary face of `solid` by oriented plane, determining
/// each face's normal sign from voxel occupancy (spec §4.4 stage 1), and
/// return the planes sorted deterministically by `(axis, k, sign)`.
pub fn group_by_plane(solid: &VoxelSolid) -> Vec<(PlaneKey, Vec<(i32, i32)>)> {
    let mut groups: HashMap<PlaneKey, Vec<(i32, i32)>> = HashMap::new();
    for &face in solid.boundary() {
        let sign = face_sign(solid, face);
        let key = PlaneKey {
            axis: face.axis,
            k: face.k,
            sign,
        };
        groups.entry(key).or_default().push((face.a, face.b));
    }
    let mut out: Vec<(PlaneKey, Vec<(i32, i32)>)> = groups.into_iter().collect();
    out.sort_by_key(|(k, _)| (axis_order(k.axis), k.k, k.sign));
    out
}

fn face_sign(solid: &VoxelSolid, face: FaceKey) -> i8 {
    let (a_axis, b_axis) = face.axis.other_axes();
    let mut low = Cell::new(0, 0, 0);
    low = low
        .with(face.axis, face.k - 1)
        .with(a_axis, face.a)
        .with(b_axis, face.b);
    if solid.contains(low) {
        1
    } else {
        -1
    }
}
