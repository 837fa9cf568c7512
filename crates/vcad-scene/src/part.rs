use vcad_voxel_kernel::VoxelSolid;

/// How an instance of a part combines into the scene's bake accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Union into the accumulator.
    Solid,
    /// Subtract from the accumulator.
    Hole,
    /// Intersect with the accumulator.
    Intersect,
}

/// A named, immutable solid together with a default combination role.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    solid: VoxelSolid,
    default_role: Role,
}

impl Part {
    /// Construct a part with `Role::Solid` as its default role.
    pub fn new(name: impl Into<String>, solid: VoxelSolid) -> Self {
        Self {
            name: name.into(),
            solid,
            default_role: Role::Solid,
        }
    }

    /// Construct a part with an explicit default role.
    pub fn with_role(name: impl Into<String>, solid: VoxelSolid, default_role: Role) -> Self {
        Self {
            name: name.into(),
            solid,
            default_role,
        }
    }

    /// The part's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The part's immutable solid.
    pub fn solid(&self) -> &VoxelSolid {
        &self.solid
    }

    /// The part's default role when instanced without an override.
    pub fn default_role(&self) -> Role {
        self.default_role
    }
}
