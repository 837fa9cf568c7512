//! Export-time options bundling mesh-engine selection, quantize-and-weld,
//! and a few reserved Surface Nets knobs (spec §6 "Bake/export options",
//! §9 "Dynamic dispatch over mesh engines").
//!
//! The source this spec distills from picked its mesh engine via a
//! reflective type-name lookup at runtime. Here that becomes a plain
//! tagged variant: [`Engine::VoxelFaces`] is the only implemented path;
//! [`Engine::SurfaceNets`] always fails with [`CadError::NotImplemented`].

use serde::{Deserialize, Serialize};

use vcad_kernel_types::{CadError, MeshD};
use vcad_mesher::{ensure_outward_normals, quantize_and_weld, to_mesh};
use vcad_voxel_kernel::VoxelSolid;

/// Which algorithm extracts a boundary mesh from a [`VoxelSolid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Engine {
    /// Greedy coplanar quad-merge over the kernel's boundary-face set
    /// (spec §4.4). The only implemented engine.
    #[default]
    VoxelFaces,
    /// Surface Nets, reserved for smoother output from the same voxel
    /// data. Not implemented; selecting it is an error (spec §6).
    SurfaceNets,
}

/// Export-time configuration (spec §6's `export.*` keys).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Mesh extraction engine.
    pub engine: Engine,
    /// Reserved for Surface Nets: the isosurface level in `[0, 1]`.
    pub iso_level: f64,
    /// Reserved for Surface Nets: number of Laplacian smoothing passes.
    pub smoothing_passes: u32,
    /// Quantize-and-weld grid spacing in logical units; `<= 0` disables it.
    pub quantize_step_units: f64,
    /// Lattice resolution, used to convert `quantize_step_units` into
    /// lattice-unit spacing.
    pub voxels_per_unit: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            engine: Engine::VoxelFaces,
            iso_level: 0.5,
            smoothing_passes: 0,
            quantize_step_units: 0.0,
            voxels_per_unit: 1,
        }
    }
}

/// Extract a triangle mesh from `solid` per `options`: mesh, optionally
/// quantize-and-weld, then reorient outward. Fails with
/// [`CadError::NotImplemented`] if `options.engine` is
/// [`Engine::SurfaceNets`].
pub fn export_mesh(solid: &VoxelSolid, options: &ExportOptions) -> Result<MeshD, CadError> {
    match options.engine {
        Engine::SurfaceNets => Err(CadError::NotImplemented(
            "Surface Nets mesh engine is not implemented".into(),
        )),
        Engine::VoxelFaces => {
            let raw = to_mesh(solid);
            let mut mesh = quantize_and_weld(&raw, options.quantize_step_units, options.voxels_per_unit);
            ensure_outward_normals(&mut mesh);
            Ok(mesh)
        }
    }
}
