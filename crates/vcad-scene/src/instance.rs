use std::sync::Arc;

use vcad_kernel_types::{Axis, Cell};

use crate::frame::Frame;
use crate::part::{Part, Role};

/// An arbitrary (non-90-degree) rotation applied after an instance's exact
/// frame during bake. Any field left `None` falls back to the scene's
/// revoxelization defaults.
#[derive(Debug, Clone, Copy)]
pub struct ArbitraryRotation {
    /// Rotation axis.
    pub axis: Axis,
    /// Rotation angle in degrees.
    pub degrees: f64,
    /// Lattice point the rotation pivots around.
    pub pivot: Cell,
    /// Rounding tolerance override.
    pub epsilon: Option<f64>,
    /// Supersample grid edge override.
    pub samples_per_axis: Option<u32>,
    /// Conservative-OBB-vs-supersampling mode override.
    pub conservative_obb: Option<bool>,
}

impl ArbitraryRotation {
    /// An arbitrary rotation with every tolerance left to scene defaults.
    pub fn new(axis: Axis, degrees: f64, pivot: Cell) -> Self {
        Self {
            axis,
            degrees,
            pivot,
            epsilon: None,
            samples_per_axis: None,
            conservative_obb: None,
        }
    }
}

/// A reference to a [`Part`] plus a mutable exact frame and an optional
/// arbitrary rotation, combined into the scene's accumulator with a role
/// at bake time.
#[derive(Clone)]
pub struct Instance {
    part: Arc<Part>,
    frame: Frame,
    role: Option<Role>,
    arbitrary_rotation: Option<ArbitraryRotation>,
    voxels_per_unit_override: Option<u32>,
}

impl Instance {
    /// A new instance of `part` at the identity frame, using the part's
    /// default role.
    pub fn new(part: Arc<Part>) -> Self {
        Self {
            part,
            frame: Frame::identity(),
            role: None,
            arbitrary_rotation: None,
            voxels_per_unit_override: None,
        }
    }

    /// The referenced part.
    pub fn part(&self) -> &Part {
        &self.part
    }

    /// The role this instance combines with, falling back to the part's
    /// default if no override was set.
    pub fn role(&self) -> Role {
        self.role.unwrap_or_else(|| self.part.default_role())
    }

    /// Override the combination role for this instance only.
    pub fn set_role(&mut self, role: Role) -> &mut Self {
        self.role = Some(role);
        self
    }

    /// The instance's current exact frame.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Translate the instance's frame.
    pub fn translate(&mut self, delta: Cell) -> &mut Self {
        self.frame = self.frame.translate(delta);
        self
    }

    /// Rotate the instance's frame by `k` 90-degree turns about `axis`.
    pub fn rotate90(&mut self, axis: Axis, k: i32) -> &mut Self {
        self.frame = self.frame.rotate90(axis, k);
        self
    }

    /// Mirror the instance's frame about `axis`.
    pub fn mirror(&mut self, axis: Axis) -> &mut Self {
        self.frame = self.frame.mirror(axis);
        self
    }

    /// Set (or clear, with `None`) the arbitrary rotation applied after
    /// the exact frame during bake.
    pub fn set_arbitrary_rotation(&mut self, rotation: Option<ArbitraryRotation>) -> &mut Self {
        self.arbitrary_rotation = rotation;
        self
    }

    /// The instance's arbitrary rotation, if any.
    pub fn arbitrary_rotation(&self) -> Option<ArbitraryRotation> {
        self.arbitrary_rotation
    }

    /// Override the scene's voxels-per-unit for this instance only; bake
    /// replicates the part's cells to match if it differs from the
    /// scene's resolution.
    pub fn set_voxels_per_unit_override(&mut self, vpu: Option<u32>) -> &mut Self {
        self.voxels_per_unit_override = vpu;
        self
    }

    /// The instance's voxels-per-unit override, if any.
    pub fn voxels_per_unit_override(&self) -> Option<u32> {
        self.voxels_per_unit_override
    }
}
