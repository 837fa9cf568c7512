#![warn(missing_docs)]

//! vcad — a voxel-based constructive solid geometry kernel.
//!
//! Composes integer-lattice solids from primitives and boolean operations
//! ([`vcad_voxel_kernel`]), resamples them under arbitrary rotations
//! ([`vcad_revoxelizer`]), serializes them to the SBVX binary container
//! ([`vcad_sbvx`]), and extracts a watertight triangular boundary mesh
//! ([`vcad_mesher`]) for binary STL export ([`vcad_stl`]). [`Builder`]
//! offers fluent primitive composition; [`Scene`] composes named parts
//! into instances and bakes them into a single solid.
//!
//! # Example
//!
//! ```rust,no_run
//! use vcad::{Builder, Cell};
//!
//! let mut builder = Builder::new();
//! builder
//!     .box_(Cell::new(0, 0, 0), Cell::new(20, 20, 5))
//!     .cut_cylinder_z(10, 10, 0, 5, 6.0);
//! let solid = builder.build();
//!
//! let mesh = vcad::mesh::to_mesh(&solid);
//! vcad::stl::write_file(&mesh, "plate.stl", Some("plate")).unwrap();
//! ```

pub use vcad_kernel_types::{Axis, CadError, Cell, EdgeKey, FaceKey, MeshD, TriIdx};
pub use vcad_voxel_kernel::{close, dilate, erode, intersect, open, subtract, union, Metric, VoxelSolid};

pub use vcad_builder::{Builder, Role as BuilderRole};

pub use vcad_revoxelizer::{revoxelize, RevoxelizeOptions};

pub use vcad_scene::{
    bridge_axis, strut, weld, ArbitraryRotation, BakeOptions, Frame, Instance, Part, Quality,
    RevoxelizeDefaults, Role, Scene, WeldResult,
};

/// SBVX binary voxel container: dense bit-packed and sparse Morton-ordered
/// encodings, with optional outer compression (spec §4.3, §6).
pub mod sbvx {
    pub use vcad_sbvx::{
        auto_encoding, read, read_compressed, write, write_compressed, Compression,
        CompressionLevel, Encoding,
    };
}

/// Greedy coplanar quad-merge mesher: voxel boundary faces to a triangle
/// mesh (spec §4.4).
pub mod mesh {
    pub use vcad_mesher::{ensure_outward_normals, quantize_and_weld, to_mesh, PlaneKey};
}

/// Binary STL export (spec §4.7), plus export-time engine selection and
/// quantize-and-weld options (spec §6, §9).
pub mod stl {
    pub use vcad_stl::{export_mesh, to_bytes, write, write_file, Engine, ExportOptions};
}
