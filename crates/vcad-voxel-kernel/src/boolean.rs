use crate::solid::VoxelSolid;

/// `union(A, B)`: every cell of either input, added through the incremental
/// path so `B` is correctly recomputed (spec §9 "Boolean ops vs incremental
/// adds").
pub fn union(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    let mut out = VoxelSolid::new();
    for &c in a.cells() {
        out.add(c);
    }
    for &c in b.cells() {
        out.add(c);
    }
    out
}

/// `intersect(A, B)`: cells present in both inputs.
pub fn intersect(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    let mut out = VoxelSolid::new();
    for &c in a.cells() {
        if b.contains(c) {
            out.add(c);
        }
    }
    out
}

/// `subtract(A, B)`: cells of `A` not in `B`.
pub fn subtract(a: &VoxelSolid, b: &VoxelSolid) -> VoxelSolid {
    let mut out = VoxelSolid::new();
    for &c in a.cells() {
        if !b.contains(c) {
            out.add(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcad_kernel_types::Cell;

    fn box_solid(min: Cell, max: Cell) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        s.fill_box(min, max);
        s
    }

    #[test]
    fn subtract_self_is_empty() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        let r = subtract(&a, &a);
        assert_eq!(r.volume(), 0);
    }

    #[test]
    fn subtract_empty_is_identity() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        let empty = VoxelSolid::new();
        let r = subtract(&a, &empty);
        assert_eq!(r.volume(), a.volume());
        assert_eq!(r.cells(), a.cells());
    }

    #[test]
    fn union_commutative() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        let b = box_solid(Cell::new(2, 2, 2), Cell::new(5, 5, 5));
        let ab = union(&a, &b);
        let ba = union(&b, &a);
        assert_eq!(ab.cells(), ba.cells());
    }

    #[test]
    fn intersect_idempotent() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(3, 3, 3));
        let once = intersect(&a, &a);
        assert_eq!(once.cells(), a.cells());
    }

    #[test]
    fn intersect_distributes_over_union() {
        let a = box_solid(Cell::new(0, 0, 0), Cell::new(4, 4, 4));
        let b = box_solid(Cell::new(2, 0, 0), Cell::new(6, 4, 4));
        let c = box_solid(Cell::new(-2, 0, 0), Cell::new(2, 4, 4));
        let lhs = intersect(&a, &union(&b, &c));
        let rhs = union(&intersect(&a, &b), &intersect(&a, &c));
        assert_eq!(lhs.cells(), rhs.cells());
    }

    fn solid_from_cells(cells: &[(i32, i32, i32)]) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        for &(x, y, z) in cells {
            s.add(Cell::new(x, y, z));
        }
        s
    }

    proptest::proptest! {
        #[test]
        fn union_is_commutative_on_random_sets(
            a in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..25),
            b in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..25),
        ) {
            let sa = solid_from_cells(&a);
            let sb = solid_from_cells(&b);
            prop_assert_eq!(union(&sa, &sb).cells(), union(&sb, &sa).cells());
        }

        #[test]
        fn intersect_distributes_over_union_on_random_sets(
            a in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..20),
            b in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..20),
            c in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..20),
        ) {
            let sa = solid_from_cells(&a);
            let sb = solid_from_cells(&b);
            let sc = solid_from_cells(&c);
            let lhs = intersect(&sa, &union(&sb, &sc));
            let rhs = union(&intersect(&sa, &sb), &intersect(&sa, &sc));
            prop_assert_eq!(lhs.cells(), rhs.cells());
        }

        #[test]
        fn subtract_then_union_back_covers_original(
            a in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..25),
            b in proptest::collection::vec((-4i32..4, -4i32..4, -4i32..4), 0..25),
        ) {
            let sa = solid_from_cells(&a);
            let sb = solid_from_cells(&b);
            let diff = subtract(&sa, &sb);
            let restored = union(&diff, &intersect(&sa, &sb));
            prop_assert_eq!(restored.cells(), sa.cells());
        }
    }
}
