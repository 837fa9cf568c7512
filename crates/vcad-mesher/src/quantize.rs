use std::collections::HashMap;

use vcad_kernel_types::MeshD;

/// Snap every vertex to a grid of spacing `step_units * voxels_per_unit`
/// and merge collocated vertices, then drop degenerate triangles (any two
/// indices equal) and duplicate triangles (same unordered index triple).
/// `step_units <= 0` disables quantize-and-weld entirely (spec §4.4 stage
/// 3, §6 `export.quantize.stepUnits`).
pub fn quantize_and_weld(mesh: &MeshD, step_units: f64, voxels_per_unit: u32) -> MeshD {
    if step_units <= 0.0 {
        return mesh.clone();
    }
    let spacing = step_units * voxels_per_unit as f64;

    let mut new_vertices: Vec<(f64, f64, f64)> = Vec::new();
    let mut seen: HashMap<(i64, i64, i64), u32> = HashMap::new();
    let mut remap: Vec<u32> = Vec::with_capacity(mesh.vertices.len());

    for &(x, y, z) in &mesh.vertices {
        let key = (
            (x / spacing).round() as i64,
            (y / spacing).round() as i64,
            (z / spacing).round() as i64,
        );
        let idx = *seen.entry(key).or_insert_with(|| {
            let idx = new_vertices.len() as u32;
            new_vertices.push((
                key.0 as f64 * spacing,
                key.1 as f64 * spacing,
                key.2 as f64 * spacing,
            ));
            idx
        });
        remap.push(idx);
    }

    let mut triangles = Vec::with_capacity(mesh.triangles.len());
    let mut dedup: std::collections::HashSet<[u32; 3]> = std::collections::HashSet::new();
    for tri in &mesh.triangles {
        let t = [
            remap[tri[0] as usize],
            remap[tri[1] as usize],
            remap[tri[2] as usize],
        ];
        if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
            continue; // degenerate
        }
        let mut sorted = t;
        sorted.sort_unstable();
        if !dedup.insert(sorted) {
            continue; // duplicate
        }
        triangles.push(t);
    }

    MeshD {
        vertices: new_vertices,
        triangles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_is_identity() {
        let mut mesh = MeshD::new();
        let a = mesh.push_vertex((0.0, 0.0, 0.0));
        let b = mesh.push_vertex((1.0, 0.0, 0.0));
        let c = mesh.push_vertex((0.0, 1.0, 0.0));
        mesh.triangles.push([a, b, c]);
        let out = quantize_and_weld(&mesh, 0.0, 1);
        assert_eq!(out.vertices.len(), mesh.vertices.len());
    }

    #[test]
    fn collocated_vertices_merge() {
        let mut mesh = MeshD::new();
        let a = mesh.push_vertex((0.0, 0.0, 0.0));
        let b = mesh.push_vertex((1.0, 0.0, 0.0));
        let c = mesh.push_vertex((0.0, 1.0, 0.0));
        let d = mesh.push_vertex((1e-12, 1e-12, 0.0)); // same as `a` within a grid step
        mesh.triangles.push([a, b, c]);
        mesh.triangles.push([d, b, c]);
        let out = quantize_and_weld(&mesh, 1.0, 1);
        assert_eq!(out.vertices.len(), 3);
        assert_eq!(out.triangles.len(), 1); // duplicate triangle dropped
    }

    #[test]
    fn degenerate_triangle_dropped() {
        let mut mesh = MeshD::new();
        let a = mesh.push_vertex((0.0, 0.0, 0.0));
        let b = mesh.push_vertex((1e-15, 0.0, 0.0));
        let c = mesh.push_vertex((0.0, 1.0, 0.0));
        mesh.triangles.push([a, b, c]);
        let out = quantize_and_weld(&mesh, 1.0, 1);
        assert!(out.triangles.is_empty());
    }
}
