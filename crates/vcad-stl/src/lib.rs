#![warn(missing_docs)]

//! Binary STL writer (spec §4.7). Emits the 80-byte header, triangle
//! count, and one 50-byte record per triangle (normal, three vertices,
//! zero attribute byte), little-endian throughout.

mod engine;

pub use engine::{export_mesh, Engine, ExportOptions};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use vcad_kernel_types::{CadError, MeshD};

const HEADER_LEN: usize = 80;

/// Serialize `mesh` to binary STL on `w`. `name` is copied into the
/// 80-byte header (ASCII, zero-padded/truncated to fit); `None` leaves the
/// header zeroed.
pub fn write(w: &mut impl Write, mesh: &MeshD, name: Option<&str>) -> Result<(), CadError> {
    let mut header = [0u8; HEADER_LEN];
    if let Some(name) = name {
        let bytes = name.as_bytes();
        let n = bytes.len().min(HEADER_LEN);
        header[..n].copy_from_slice(&bytes[..n]);
    }
    w.write_all(&header)?;

    let tri_count: u32 = mesh
        .triangles
        .len()
        .try_into()
        .map_err(|_| CadError::invalid_argument("mesh has more than u32::MAX triangles"))?;
    w.write_all(&tri_count.to_le_bytes())?;

    debug!("writing STL: {tri_count} triangles");

    for tri in &mesh.triangles {
        let a = mesh.vertices[tri[0] as usize];
        let b = mesh.vertices[tri[1] as usize];
        let c = mesh.vertices[tri[2] as usize];
        let normal = face_normal(a, b, c);

        write_f32(w, normal.0)?;
        write_f32(w, normal.1)?;
        write_f32(w, normal.2)?;
        for v in [a, b, c] {
            write_f32(w, v.0)?;
            write_f32(w, v.1)?;
            write_f32(w, v.2)?;
        }
        w.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Serialize `mesh` to an in-memory binary STL buffer.
pub fn to_bytes(mesh: &MeshD, name: Option<&str>) -> Result<Vec<u8>, CadError> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + mesh.triangles.len() * 50);
    write(&mut buf, mesh, name)?;
    Ok(buf)
}

/// Write `mesh` to a binary STL file at `path`. The file is opened,
/// buffered, and flushed within this call; the stream is released on
/// every exit path, including errors (spec §5).
pub fn write_file(mesh: &MeshD, path: impl AsRef<Path>, name: Option<&str>) -> Result<(), CadError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write(&mut w, mesh, name)?;
    w.flush()?;
    Ok(())
}

/// Unit normal of the triangle `(a, b, c)`, as 32-bit floats. Degenerate
/// (zero-area) triangles emit a zero normal (spec §4.7).
fn face_normal(a: (f64, f64, f64), b: (f64, f64, f64), c: (f64, f64, f64)) -> (f32, f32, f32) {
    let ux = b.0 - a.0;
    let uy = b.1 - a.1;
    let uz = b.2 - a.2;
    let vx = c.0 - a.0;
    let vy = c.1 - a.1;
    let vz = c.2 - a.2;

    let nx = uy * vz - uz * vy;
    let ny = uz * vx - ux * vz;
    let nz = ux * vy - uy * vx;
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len == 0.0 {
        (0.0, 0.0, 0.0)
    } else {
        ((nx / len) as f32, (ny / len) as f32, (nz / len) as f32)
    }
}

fn write_f32(w: &mut impl Write, v: f32) -> Result<(), CadError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_mesh() -> MeshD {
        let mut mesh = MeshD::new();
        let p = [
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
            (0.0, 1.0, 1.0),
        ];
        for pt in p {
            mesh.push_vertex(pt);
        }
        // -Z face (outward normal -Z), wound so signed volume stays positive.
        mesh.triangles.push([0, 3, 2]);
        mesh.triangles.push([0, 2, 1]);
        // +Z face.
        mesh.triangles.push([4, 5, 6]);
        mesh.triangles.push([4, 6, 7]);
        mesh
    }

    #[test]
    fn byte_layout_matches_triangle_count() {
        let mesh = unit_box_mesh();
        let bytes = to_bytes(&mesh, None).unwrap();
        let expected = HEADER_LEN + 4 + mesh.triangles.len() * 50;
        assert_eq!(bytes.len(), expected);
        let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap());
        assert_eq!(count as usize, mesh.triangles.len());
    }

    #[test]
    fn header_carries_name() {
        let mesh = MeshD::new();
        let bytes = to_bytes(&mesh, Some("panel")).unwrap();
        assert_eq!(&bytes[0..5], b"panel");
        assert!(bytes[5..80].iter().all(|&b| b == 0));
    }

    #[test]
    fn header_truncates_long_name() {
        let name: String = "x".repeat(200);
        let bytes = to_bytes(&MeshD::new(), Some(&name)).unwrap();
        assert_eq!(bytes[0..80].len(), 80);
    }

    #[test]
    fn degenerate_triangle_emits_zero_normal() {
        let mut mesh = MeshD::new();
        mesh.push_vertex((0.0, 0.0, 0.0));
        mesh.push_vertex((1.0, 0.0, 0.0));
        mesh.push_vertex((0.0, 0.0, 0.0));
        mesh.triangles.push([0, 1, 2]);
        let bytes = to_bytes(&mesh, None).unwrap();
        let normal_bytes = &bytes[84..96];
        let nx = f32::from_le_bytes(normal_bytes[0..4].try_into().unwrap());
        let ny = f32::from_le_bytes(normal_bytes[4..8].try_into().unwrap());
        let nz = f32::from_le_bytes(normal_bytes[8..12].try_into().unwrap());
        assert_eq!((nx, ny, nz), (0.0, 0.0, 0.0));
    }

    #[test]
    fn normal_is_unit_length_for_nondegenerate_triangle() {
        let mesh = unit_box_mesh();
        let bytes = to_bytes(&mesh, None).unwrap();
        let rec = &bytes[84..84 + 12];
        let nx = f32::from_le_bytes(rec[0..4].try_into().unwrap());
        let ny = f32::from_le_bytes(rec[4..8].try_into().unwrap());
        let nz = f32::from_le_bytes(rec[8..12].try_into().unwrap());
        let len = (nx * nx + ny * ny + nz * nz).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }

    #[test]
    fn round_trip_file() {
        let mesh = unit_box_mesh();
        let path = std::env::temp_dir().join(format!("vcad_stl_test_{}.stl", std::process::id()));
        write_file(&mesh, &path, Some("test")).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let expected = HEADER_LEN + 4 + mesh.triangles.len() * 50;
        assert_eq!(bytes.len(), expected);
    }
}
