use std::collections::{HashMap, HashSet};

use vcad_kernel_types::{Axis, MeshD};

use crate::plane::PlaneKey;

/// An axis-aligned rectangle on one oriented plane, in `(a, b)` offset
/// coordinates: `[a0, a1) × [b0, b1)`.
#[derive(Debug, Clone, Copy)]
struct Rect {
    a0: i32,
    b0: i32,
    a1: i32,
    b1: i32,
}

/// Greedily merge the filled `(a, b)` cells of one oriented plane into
/// maximal rectangles (spec §4.4 stage 2): scan row by row, extend width
/// maximally along `a`, then extend height as many full-width rows as
/// possible along `b`.
fn merge_rectangles(cells: &[(i32, i32)]) -> Vec<Rect> {
    let filled: HashSet<(i32, i32)> = cells.iter().copied().collect();
    if filled.is_empty() {
        return Vec::new();
    }
    let mut visited: HashSet<(i32, i32)> = HashSet::new();
    let b_min = cells.iter().map(|&(_, b)| b).min().unwrap();
    let b_max = cells.iter().map(|&(_, b)| b).max().unwrap();
    let a_min = cells.iter().map(|&(a, _)| a).min().unwrap();
    let a_max = cells.iter().map(|&(a, _)| a).max().unwrap();

    let mut rects = Vec::new();
    for b in b_min..=b_max {
        let mut a = a_min;
        while a <= a_max {
            if !filled.contains(&(a, b)) || visited.contains(&(a, b)) {
                a += 1;
                continue;
            }
            // Extend width along a.
            let mut w = 1;
            while filled.contains(&(a + w, b)) && !visited.contains(&(a + w, b)) {
                w += 1;
            }
            // Extend height: as many full-width rows as possible.
            let mut h = 1;
            'grow: loop {
                let next_b = b + h;
                for da in 0..w {
                    let cell = (a + da, next_b);
                    if !filled.contains(&cell) || visited.contains(&cell) {
                        break 'grow;
                    }
                }
                h += 1;
            }
            for db in 0..h {
                for da in 0..w {
                    visited.insert((a + da, b + db));
                }
            }
            rects.push(Rect {
                a0: a,
                b0: b,
                a1: a + w,
                b1: b + h,
            });
            a += w;
        }
    }
    rects
}

/// Build the mesh for one oriented plane's filled cells, appending
/// vertices/triangles to `mesh`.
pub fn emit_plane(mesh: &mut MeshD, plane: PlaneKey, cells: &[(i32, i32)]) {
    for rect in merge_rectangles(cells) {
        let k = plane.k as f64;
        let (a0, b0, a1, b1) = (rect.a0 as f64, rect.b0 as f64, rect.a1 as f64, rect.b1 as f64);
        let corners: [(f64, f64, f64); 4] = match plane.axis {
            Axis::X => [(k, a0, b0), (k, a0, b1), (k, a1, b1), (k, a1, b0)],
            Axis::Y => [(a0, k, b0), (a1, k, b0), (a1, k, b1), (a0, k, b1)],
            Axis::Z => [(a0, b0, k), (a1, b0, k), (a1, b1, k), (a0, b1, k)],
        };
        let idx: Vec<u32> = corners.iter().map(|&p| mesh.push_vertex(p)).collect();
        if plane.sign > 0 {
            mesh.triangles.push([idx[0], idx[1], idx[2]]);
            mesh.triangles.push([idx[0], idx[2], idx[3]]);
        } else {
            mesh.triangles.push([idx[0], idx[2], idx[1]]);
            mesh.triangles.push([idx[0], idx[3], idx[2]]);
        }
    }
}

/// Number of filled cells covered (used by tests to check the ≤ |B|
/// triangle-count property without re-deriving it from the mesh).
pub fn rect_cell_count(cells: &[(i32, i32)]) -> usize {
    merge_rectangles(cells)
        .iter()
        .map(|r| ((r.a1 - r.a0) * (r.b1 - r.b0)) as usize)
        .sum()
}
