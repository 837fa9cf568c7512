use vcad_voxel_kernel::{close, open, Metric};
use vcad_voxel_kernel::VoxelSolid;

/// Morphological refinement applied to a baked solid before export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Bake as-is.
    #[default]
    Draft,
    /// Upscale by factor 2, then close with radius 1 (Chebyshev).
    Medium,
    /// Upscale by factor 3, close, then open — both radius 1 Chebyshev.
    High,
}

impl Quality {
    /// Apply this quality profile's refinement to an already-baked solid.
    pub fn refine(self, solid: &VoxelSolid) -> VoxelSolid {
        match self {
            Quality::Draft => solid.clone(),
            Quality::Medium => {
                let upscaled = solid.upscale(2);
                close(&upscaled, 1, Metric::LInf)
            }
            Quality::High => {
                let upscaled = solid.upscale(3);
                let closed = close(&upscaled, 1, Metric::LInf);
                open(&closed, 1, Metric::LInf)
            }
        }
    }
}
