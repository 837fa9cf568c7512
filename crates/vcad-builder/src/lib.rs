#![warn(missing_docs)]

//! Fluent composition of primitives under a stack of rigid transforms,
//! with nested boolean and translation scopes.
//!
//! A [`Builder`] owns exactly one [`VoxelSolid`] and a current
//! [`TransformStack`]. Primitive methods (`box_`, `cylinder_z`, `sphere`,
//! …) materialize a temporary solid, apply the current transform stack,
//! and fold the result into the owned solid by `add` (or `remove` for the
//! `cut_*` variants). Nested scopes (`place`, `union`, `subtract`,
//! `rotate_any`, …) run a caller-supplied closure against a child builder
//! and then combine the child's result back into the parent — either by
//! extending the transform stack (translation scopes mutate the parent's
//! solid directly) or by running a boolean operation once the scope
//! completes (boolean and rotate-any scopes).

mod transform;

pub use transform::TransformOp;

use log::debug;
use vcad_kernel_types::{Axis, Cell, CadError};
use vcad_revoxelizer::{revoxelize, RevoxelizeOptions};
use vcad_voxel_kernel::{intersect, subtract, union, VoxelSolid};

use transform::TransformStack;

/// How a builder's accumulated solid merges into its parent when the
/// scope that produced it completes. Nested `union`/`subtract`/
/// `intersect` scopes always use their own named operator regardless of
/// this value; it exists so that `rotate_any*` — which has no operator of
/// its own — merges its revoxelized output the same way the enclosing
/// scope would have merged a plain primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Fold in with `union`.
    Union,
    /// Fold in with `subtract`.
    Subtract,
    /// Fold in with `intersect`.
    Intersect,
}

/// A stateful object owning one [`VoxelSolid`] and a current transform
/// stack.
pub struct Builder {
    solid: VoxelSolid,
    transform: TransformStack,
    role: Role,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// A fresh builder with an empty solid, identity transform, and
    /// [`Role::Union`].
    pub fn new() -> Self {
        Self {
            solid: VoxelSolid::new(),
            transform: TransformStack::new(),
            role: Role::Union,
        }
    }

    fn with_role(role: Role) -> Self {
        Self {
            solid: VoxelSolid::new(),
            transform: TransformStack::new(),
            role,
        }
    }

    fn child_with_transform(&self, transform: TransformStack, role: Role) -> Self {
        Self {
            solid: VoxelSolid::new(),
            transform,
            role,
        }
    }

    /// Consume the builder, returning its accumulated solid.
    pub fn build(self) -> VoxelSolid {
        self.solid
    }

    /// The solid accumulated so far.
    pub fn solid(&self) -> &VoxelSolid {
        &self.solid
    }

    // -- transform push -----------------------------------------------

    /// Append a translation to the current transform stack.
    pub fn translate(&mut self, dx: i32, dy: i32, dz: i32) -> &mut Self {
        self.transform
            .push(TransformOp::Translate(Cell::new(dx, dy, dz)));
        self
    }

    /// Append `k mod 4` 90-degree turns about `axis`.
    pub fn rotate90(&mut self, axis: Axis, k: i32) -> &mut Self {
        self.transform.push(TransformOp::Rotate90(axis, k));
        self
    }

    /// Append a mirror about `axis`.
    pub fn mirror(&mut self, axis: Axis) -> &mut Self {
        self.transform.push(TransformOp::Mirror(axis));
        self
    }

    /// Clear the current transform stack back to identity.
    pub fn reset_transform(&mut self) -> &mut Self {
        self.transform.clear();
        self
    }

    // -- primitive emit -------------------------------------------------

    fn fold_in(&mut self, temp: VoxelSolid, cut: bool) {
        let placed = self.transform.apply(&temp);
        if cut {
            for &c in placed.cells() {
                self.solid.remove(c);
            }
        } else {
            for &c in placed.cells() {
                self.solid.add(c);
            }
        }
    }

    /// Emit an axis-aligned box `[min, maxExcl)` under the current
    /// transform.
    pub fn box_(&mut self, min: Cell, max_excl: Cell) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_box(min, max_excl);
        self.fold_in(temp, false);
        self
    }

    /// Subtract an axis-aligned box `[min, maxExcl)` under the current
    /// transform.
    pub fn cut_box(&mut self, min: Cell, max_excl: Cell) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_box(min, max_excl);
        self.fold_in(temp, true);
        self
    }

    /// Emit a Z-axis cylinder under the current transform.
    pub fn cylinder_z(&mut self, cx: i32, cy: i32, z_min: i32, z_max_excl: i32, r: f64) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_z(cx, cy, z_min, z_max_excl, r);
        self.fold_in(temp, false);
        self
    }

    /// Subtract a Z-axis cylinder under the current transform.
    pub fn cut_cylinder_z(
        &mut self,
        cx: i32,
        cy: i32,
        z_min: i32,
        z_max_excl: i32,
        r: f64,
    ) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_z(cx, cy, z_min, z_max_excl, r);
        self.fold_in(temp, true);
        self
    }

    /// Emit an X-axis cylinder under the current transform.
    pub fn cylinder_x(&mut self, cy: i32, cz: i32, x_min: i32, x_max_excl: i32, r: f64) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_x(cy, cz, x_min, x_max_excl, r);
        self.fold_in(temp, false);
        self
    }

    /// Subtract an X-axis cylinder under the current transform.
    pub fn cut_cylinder_x(
        &mut self,
        cy: i32,
        cz: i32,
        x_min: i32,
        x_max_excl: i32,
        r: f64,
    ) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_x(cy, cz, x_min, x_max_excl, r);
        self.fold_in(temp, true);
        self
    }

    /// Emit a Y-axis cylinder under the current transform.
    pub fn cylinder_y(&mut self, cx: i32, cz: i32, y_min: i32, y_max_excl: i32, r: f64) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_y(cx, cz, y_min, y_max_excl, r);
        self.fold_in(temp, false);
        self
    }

    /// Subtract a Y-axis cylinder under the current transform.
    pub fn cut_cylinder_y(
        &mut self,
        cx: i32,
        cz: i32,
        y_min: i32,
        y_max_excl: i32,
        r: f64,
    ) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_cylinder_y(cx, cz, y_min, y_max_excl, r);
        self.fold_in(temp, true);
        self
    }

    /// Emit a sphere under the current transform.
    pub fn sphere(&mut self, center: Cell, r: f64) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_sphere(center, r);
        self.fold_in(temp, false);
        self
    }

    /// Subtract a sphere under the current transform.
    pub fn cut_sphere(&mut self, center: Cell, r: f64) -> &mut Self {
        let mut temp = VoxelSolid::new();
        temp.fill_sphere(center, r);
        self.fold_in(temp, true);
        self
    }

    // -- nested scopes: translation --------------------------------------

    /// Run `scope` against a child builder sharing this builder's role but
    /// whose transform stack is extended by `(dx, dy, dz)`. Cells emitted
    /// inside the scope land directly in this builder's solid — there is
    /// no boolean merge step, since the child is only a view with a
    /// different ambient frame.
    pub fn place(&mut self, dx: i32, dy: i32, dz: i32, scope: impl FnOnce(&mut Builder)) -> &mut Self {
        let extended = self.transform.extended_with_translation(Cell::new(dx, dy, dz));
        let mut child = self.child_with_transform(extended, self.role);
        scope(&mut child);
        for &c in child.solid.cells() {
            if self.role == Role::Subtract {
                self.solid.remove(c);
            } else {
                self.solid.add(c);
            }
        }
        self
    }

    /// Run `scope` once at each of `n` offsets spaced `step` apart along
    /// X, via repeated [`Builder::place`].
    pub fn array_x(&mut self, n: u32, step: i32, mut scope: impl FnMut(&mut Builder, u32)) -> &mut Self {
        for i in 0..n {
            let idx = i;
            self.place(step * i as i32, 0, 0, |b| scope(b, idx));
        }
        self
    }

    /// Run `scope` once at each of `n` offsets spaced `step` apart along
    /// Y, via repeated [`Builder::place`].
    pub fn array_y(&mut self, n: u32, step: i32, mut scope: impl FnMut(&mut Builder, u32)) -> &mut Self {
        for i in 0..n {
            let idx = i;
            self.place(0, step * i as i32, 0, |b| scope(b, idx));
        }
        self
    }

    /// Run `scope` once at each cell of an `nx * ny` grid spaced
    /// `(step_x, step_y)` apart, via repeated [`Builder::place`].
    pub fn grid(
        &mut self,
        nx: u32,
        ny: u32,
        step_x: i32,
        step_y: i32,
        mut scope: impl FnMut(&mut Builder, u32, u32),
    ) -> &mut Self {
        for iy in 0..ny {
            for ix in 0..nx {
                self.place(step_x * ix as i32, step_y * iy as i32, 0, |b| scope(b, ix, iy));
            }
        }
        self
    }

    // -- nested scopes: booleans ------------------------------------------

    /// Run `scope` against a child builder seeded with an empty solid and
    /// the current transform stack, then union the child's result into
    /// this builder.
    pub fn union(&mut self, scope: impl FnOnce(&mut Builder)) -> &mut Self {
        let mut child = self.child_with_transform(self.transform.clone(), Role::Union);
        scope(&mut child);
        self.solid = union(&self.solid, &child.solid);
        self
    }

    /// Run `scope` against a child builder seeded with an empty solid and
    /// the current transform stack, then subtract the child's result from
    /// this builder.
    pub fn subtract(&mut self, scope: impl FnOnce(&mut Builder)) -> &mut Self {
        let mut child = self.child_with_transform(self.transform.clone(), Role::Subtract);
        scope(&mut child);
        self.solid = subtract(&self.solid, &child.solid);
        self
    }

    /// Run `scope` against a child builder seeded with an empty solid and
    /// the current transform stack, then intersect the child's result
    /// with this builder.
    pub fn intersect(&mut self, scope: impl FnOnce(&mut Builder)) -> &mut Self {
        let mut child = self.child_with_transform(self.transform.clone(), Role::Intersect);
        scope(&mut child);
        self.solid = intersect(&self.solid, &child.solid);
        self
    }

    // -- nested scopes: arbitrary rotation --------------------------------

    /// Run `scope` into a fresh solid, revoxelize it by `degrees` about
    /// `axis` around the origin using default revoxelization quality, then
    /// merge the result into this builder the same way this builder's own
    /// role would merge a plain primitive (union by default, subtract if
    /// this builder is itself the child of an enclosing `subtract` scope).
    pub fn rotate_any(
        &mut self,
        axis: Axis,
        degrees: f64,
        scope: impl FnOnce(&mut Builder),
    ) -> Result<&mut Self, CadError> {
        self.rotate_any_around(axis, degrees, Cell::new(0, 0, 0), scope)
    }

    /// As [`Builder::rotate_any`], but rotating about an explicit `pivot`
    /// lattice point.
    pub fn rotate_any_around(
        &mut self,
        axis: Axis,
        degrees: f64,
        pivot: Cell,
        scope: impl FnOnce(&mut Builder),
    ) -> Result<&mut Self, CadError> {
        let options = RevoxelizeOptions {
            axis,
            degrees,
            pivot,
            ..Default::default()
        };
        self.rotate_any_with(options, scope)
    }

    /// As [`Builder::rotate_any_around`], with full control over the
    /// revoxelizer's mode and tolerances via `options` (whose `axis`,
    /// `degrees`, and `pivot` fields are honored directly).
    pub fn rotate_any_with(
        &mut self,
        options: RevoxelizeOptions,
        scope: impl FnOnce(&mut Builder),
    ) -> Result<&mut Self, CadError> {
        let mut child = self.child_with_transform(self.transform.clone(), self.role);
        scope(&mut child);
        let revoxelized = revoxelize(&child.solid, &options)?;
        debug!(
            "rotate_any axis={:?} degrees={} role={:?} cells_in={} cells_out={}",
            options.axis,
            options.degrees,
            self.role,
            child.solid.volume(),
            revoxelized.volume()
        );
        self.solid = match self.role {
            Role::Union => union(&self.solid, &revoxelized),
            Role::Subtract => subtract(&self.solid, &revoxelized),
            Role::Intersect => intersect(&self.solid, &revoxelized),
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_emit_respects_translate() {
        let mut b = Builder::new();
        b.translate(10, 0, 0).box_(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let s = b.build();
        assert!(s.contains(Cell::new(10, 0, 0)));
        assert!(!s.contains(Cell::new(0, 0, 0)));
    }

    #[test]
    fn cut_box_removes_cells() {
        let mut b = Builder::new();
        b.box_(Cell::new(0, 0, 0), Cell::new(10, 10, 10));
        b.cut_box(Cell::new(2, 2, 2), Cell::new(8, 8, 8));
        let s = b.build();
        assert_eq!(s.volume(), 1000 - 216);
        assert!(s.is_watertight());
    }

    #[test]
    fn place_extends_ambient_frame_without_merge_step() {
        let mut b = Builder::new();
        b.place(5, 0, 0, |child| {
            child.box_(Cell::new(0, 0, 0), Cell::new(1, 1, 1));
        });
        let s = b.build();
        assert!(s.contains(Cell::new(5, 0, 0)));
        assert_eq!(s.volume(), 1);
    }

    #[test]
    fn array_x_repeats_at_each_offset() {
        let mut b = Builder::new();
        b.array_x(3, 10, |child, _| {
            child.box_(Cell::new(0, 0, 0), Cell::new(1, 1, 1));
        });
        let s = b.build();
        assert_eq!(s.volume(), 3);
        assert!(s.contains(Cell::new(0, 0, 0)));
        assert!(s.contains(Cell::new(10, 0, 0)));
        assert!(s.contains(Cell::new(20, 0, 0)));
    }

    #[test]
    fn grid_places_nx_by_ny() {
        let mut b = Builder::new();
        b.grid(2, 3, 5, 5, |child, _, _| {
            child.box_(Cell::new(0, 0, 0), Cell::new(1, 1, 1));
        });
        assert_eq!(b.solid().volume(), 6);
    }

    #[test]
    fn subtract_scope_subtracts_child_solid() {
        let mut b = Builder::new();
        b.box_(Cell::new(0, 0, 0), Cell::new(10, 10, 10));
        b.subtract(|child| {
            child.box_(Cell::new(2, 2, 2), Cell::new(8, 8, 8));
        });
        assert_eq!(b.solid().volume(), 1000 - 216);
    }

    #[test]
    fn intersect_scope_intersects_child_solid() {
        let mut b = Builder::new();
        b.box_(Cell::new(0, 0, 0), Cell::new(6, 6, 6));
        b.intersect(|child| {
            child.box_(Cell::new(3, 3, 3), Cell::new(9, 9, 9));
        });
        assert_eq!(b.solid().volume(), 27);
    }

    #[test]
    fn rotate_any_zero_degrees_is_union_of_child() {
        let mut b = Builder::new();
        b.rotate_any(Axis::Z, 0.0, |child| {
            child.box_(Cell::new(0, 0, 0), Cell::new(4, 4, 4));
        })
        .unwrap();
        assert_eq!(b.solid().volume(), 64);
    }

    #[test]
    fn rotate_any_inside_subtract_scope_subtracts_revoxelized_output() {
        let mut b = Builder::new();
        b.box_(Cell::new(0, 0, 0), Cell::new(10, 10, 10));
        b.subtract(|child| {
            child
                .rotate_any(Axis::Z, 0.0, |grandchild| {
                    grandchild.box_(Cell::new(2, 2, 2), Cell::new(8, 8, 8));
                })
                .unwrap();
        });
        assert_eq!(b.solid().volume(), 1000 - 216);
    }

    #[test]
    fn reset_transform_clears_translate() {
        let mut b = Builder::new();
        b.translate(10, 0, 0);
        b.reset_transform();
        b.box_(Cell::new(0, 0, 0), Cell::new(1, 1, 1));
        assert!(b.solid().contains(Cell::new(0, 0, 0)));
    }
}
