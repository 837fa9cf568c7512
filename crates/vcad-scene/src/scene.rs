use log::debug;
use serde::{Deserialize, Serialize};

use vcad_kernel_types::CadError;
use vcad_revoxelizer::{revoxelize, RevoxelizeOptions};
use vcad_voxel_kernel::{intersect, subtract, union, VoxelSolid};

use crate::instance::Instance;
use crate::part::Role;
use crate::quality::Quality;

/// Scene-wide defaults for arbitrary-angle revoxelization, overridable
/// per instance and per bake call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevoxelizeDefaults {
    /// `true` selects the conservative OBB/SAT mode; `false` selects
    /// supersampling.
    pub conservative_obb: bool,
    /// Supersample grid edge length.
    pub samples_per_axis: u32,
    /// Rounding tolerance for floor/ceil and membership tests.
    pub epsilon: f64,
}

impl Default for RevoxelizeDefaults {
    fn default() -> Self {
        Self {
            conservative_obb: true,
            samples_per_axis: 3,
            epsilon: 1e-9,
        }
    }
}

/// Per-bake-call overrides of the scene's ambient settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BakeOptions {
    /// Override the scene's revoxelization defaults for this bake only.
    pub revoxelization: Option<RevoxelizeDefaults>,
}

/// An ordered list of instances plus project-wide settings: lattice
/// resolution, revoxelization defaults, and export quality profile.
pub struct Scene {
    instances: Vec<Instance>,
    voxels_per_unit: u32,
    revoxelization_defaults: RevoxelizeDefaults,
    quality: Quality,
}

impl Scene {
    /// A new scene at the given lattice resolution (voxels per logical
    /// unit, must be `> 0`).
    pub fn new(voxels_per_unit: u32) -> Result<Self, CadError> {
        if voxels_per_unit == 0 {
            return Err(CadError::invalid_argument("voxelsPerUnit must be > 0"));
        }
        Ok(Self {
            instances: Vec::new(),
            voxels_per_unit,
            revoxelization_defaults: RevoxelizeDefaults::default(),
            quality: Quality::Draft,
        })
    }

    /// The scene's lattice resolution.
    pub fn voxels_per_unit(&self) -> u32 {
        self.voxels_per_unit
    }

    /// Set the export quality profile used by [`Scene::bake_for_quality`].
    pub fn set_quality(&mut self, quality: Quality) -> &mut Self {
        self.quality = quality;
        self
    }

    /// Set the scene's revoxelization defaults.
    pub fn set_revoxelization_defaults(&mut self, defaults: RevoxelizeDefaults) -> &mut Self {
        self.revoxelization_defaults = defaults;
        self
    }

    /// Append an instance, returning its index for later mutation via
    /// [`Scene::instance_mut`].
    pub fn add_instance(&mut self, instance: Instance) -> usize {
        self.instances.push(instance);
        self.instances.len() - 1
    }

    /// Mutable access to an instance by index (its frame and role may be
    /// edited up until bake).
    pub fn instance_mut(&mut self, index: usize) -> Option<&mut Instance> {
        self.instances.get_mut(index)
    }

    /// The scene's instances, in insertion order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Compose every instance's solid into a single result, applying
    /// booleans in insertion order. Returns an empty solid if the scene
    /// has no instances.
    pub fn bake(&self, overrides: Option<&BakeOptions>) -> Result<VoxelSolid, CadError> {
        let revox_defaults = overrides
            .and_then(|o| o.revoxelization)
            .unwrap_or(self.revoxelization_defaults);

        let mut accumulator = VoxelSolid::new();
        for (i, instance) in self.instances.iter().enumerate() {
            let mut solid = instance.part().solid().clone();

            if let Some(vpu_override) = instance.voxels_per_unit_override() {
                if vpu_override != self.voxels_per_unit {
                    if vpu_override == 0 || vpu_override % self.voxels_per_unit != 0 {
                        return Err(CadError::invalid_argument(format!(
                            "instance {i} voxelsPerUnit override {vpu_override} is not a multiple of scene resolution {}",
                            self.voxels_per_unit
                        )));
                    }
                    let factor = vpu_override / self.voxels_per_unit;
                    solid = solid.upscale(factor);
                }
            }

            let frame = instance.frame();
            solid = VoxelSolid::from_cells(solid.cells().iter().map(|&c| frame.apply(c)));

            if let Some(rotation) = instance.arbitrary_rotation() {
                let options = RevoxelizeOptions {
                    axis: rotation.axis,
                    degrees: rotation.degrees,
                    pivot: rotation.pivot,
                    conservative_obb: rotation
                        .conservative_obb
                        .unwrap_or(revox_defaults.conservative_obb),
                    samples_per_axis: rotation
                        .samples_per_axis
                        .unwrap_or(revox_defaults.samples_per_axis),
                    epsilon: rotation.epsilon.unwrap_or(revox_defaults.epsilon),
                };
                solid = revoxelize(&solid, &options)?;
            }

            debug!(
                "bake instance={i} part={:?} role={:?} cells={}",
                instance.part().name(),
                instance.role(),
                solid.volume()
            );

            accumulator = match instance.role() {
                Role::Solid => union(&accumulator, &solid),
                Role::Hole => subtract(&accumulator, &solid),
                Role::Intersect => intersect(&accumulator, &solid),
            };
        }
        Ok(accumulator)
    }

    /// Bake, then apply the scene's quality profile's morphological
    /// refinement.
    pub fn bake_for_quality(&self, overrides: Option<&BakeOptions>) -> Result<VoxelSolid, CadError> {
        let baked = self.bake(overrides)?;
        Ok(self.quality.refine(&baked))
    }
}
