use vcad_kernel_types::{Axis, Cell};
use vcad_voxel_kernel::VoxelSolid;

/// One entry of a builder's transform stack: a rigid operation applied to
/// a whole solid in order, oldest first.
#[derive(Debug, Clone, Copy)]
pub enum TransformOp {
    /// Translate by a cell-space delta.
    Translate(Cell),
    /// Apply `k mod 4` 90-degree turns about `axis`.
    Rotate90(Axis, i32),
    /// Mirror about `axis`.
    Mirror(Axis),
}

/// An ordered list of rigid transforms, applied oldest-first to a freshly
/// materialized primitive before it is folded into the owning builder's
/// solid.
#[derive(Debug, Clone, Default)]
pub struct TransformStack(Vec<TransformOp>);

impl TransformStack {
    /// An empty stack (identity).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transform.
    pub fn push(&mut self, op: TransformOp) {
        self.0.push(op);
    }

    /// Discard every transform, returning to identity.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// A copy of this stack with one extra translation appended — used by
    /// the translation-based nested scopes (`place`, `arrayX`, `arrayY`,
    /// `grid`) to extend the ambient frame without touching the parent's.
    pub fn extended_with_translation(&self, delta: Cell) -> Self {
        let mut out = self.clone();
        out.push(TransformOp::Translate(delta));
        out
    }

    /// Apply every transform in order to `solid`, returning a new solid.
    pub fn apply(&self, solid: &VoxelSolid) -> VoxelSolid {
        let mut cur = solid.clone();
        for op in &self.0 {
            cur = match *op {
                TransformOp::Translate(delta) => cur.translate(delta),
                TransformOp::Rotate90(axis, k) => cur.rotate90(axis, k),
                TransformOp::Mirror(axis) => cur.mirror(axis),
            };
        }
        cur
    }
}
