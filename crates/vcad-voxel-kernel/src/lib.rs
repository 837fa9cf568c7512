#![warn(missing_docs)]

//! The voxel kernel: an occupancy set with an incrementally maintained
//! boundary-face set, bulk primitives, boolean operations, rigid 90°/mirror
//! transforms, morphology, and connectivity/watertightness predicates.
//!
//! The central invariant (spec §3, "B⇔V"): a face `f` belongs to the
//! boundary set `B` iff exactly one of its two adjacent voxels is in the
//! occupancy set `V`. [`VoxelSolid::add`] and [`VoxelSolid::remove`] are the
//! only primitive mutations and both preserve it by toggling faces
//! incrementally rather than recomputing `B` from scratch — this is what
//! keeps [`VoxelSolid::is_watertight`] and mesh extraction O(|B|) instead of
//! O(|V|).

mod boolean;
mod morphology;
mod predicates;
mod primitives;
mod solid;
mod transform;

pub use boolean::{intersect, subtract, union};
pub use morphology::{close, dilate, erode, open, Metric};
pub use solid::VoxelSolid;

pub use vcad_kernel_types::{Axis, Cell, FaceKey};
