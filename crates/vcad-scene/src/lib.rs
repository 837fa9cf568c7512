#![warn(missing_docs)]

//! Scene composition: named parts, placed instances with exact lattice
//! frames and optional arbitrary rotations, a project-wide bake pipeline
//! that folds every instance into one solid by role (Solid/Hole/
//! Intersect), quality-profile refinement, and the derived connective
//! operators `weld`, `bridge_axis`, and `strut`.

mod frame;
mod instance;
mod ops;
mod part;
mod quality;
mod scene;

pub use frame::Frame;
pub use instance::{ArbitraryRotation, Instance};
pub use ops::{bridge_axis, strut, weld, WeldResult};
pub use part::{Part, Role};
pub use quality::Quality;
pub use scene::{BakeOptions, RevoxelizeDefaults, Scene};

pub use vcad_kernel_types::{Axis, Cell, CadError};
pub use vcad_voxel_kernel::{Metric, VoxelSolid};
