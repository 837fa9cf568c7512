#![warn(missing_docs)]

//! SBVX: the binary voxel container. A common header precedes either a
//! dense bit-packed payload or a sparse Morton-ordered payload; occupancy
//! drives automatic selection between the two (spec §4.3).

mod compression;
mod dense;
mod header;
mod morton;
mod sparse;

pub use compression::{read_compressed, write_compressed, Compression, CompressionLevel};
pub use header::Encoding;

use std::io::{Read, Write};

use header::Header;
use log::debug;
use vcad_kernel_types::{Cell, CadError};
use vcad_voxel_kernel::VoxelSolid;

/// Choose dense or sparse for `solid` per the occupancy heuristic: empty →
/// sparse; otherwise dense iff `4·|V| ≥ totalCells`, else sparse (spec
/// §4.3 "Auto-select").
pub fn auto_encoding(solid: &VoxelSolid) -> Encoding {
    if solid.cells().is_empty() {
        return Encoding::Sparse;
    }
    let (min, max_excl) = solid.bounds();
    let total = (max_excl.x - min.x) as u64
        * (max_excl.y - min.y) as u64
        * (max_excl.z - min.z) as u64;
    if 4 * solid.volume() as u64 >= total {
        Encoding::Dense
    } else {
        Encoding::Sparse
    }
}

/// Serialize `solid` to `w` using the requested encoding (or the
/// auto-selected one if `encoding` is `None`).
pub fn write(w: &mut impl Write, solid: &VoxelSolid, encoding: Option<Encoding>) -> Result<(), CadError> {
    let encoding = encoding.unwrap_or_else(|| auto_encoding(solid));
    let (min, max_excl) = solid.bounds();
    let size = size_of(min, max_excl);

    let payload = match encoding {
        Encoding::Dense => dense::encode(solid, min, size)?,
        Encoding::Sparse => sparse::encode(solid, min)?,
    };
    debug!(
        "writing SBVX encoding={encoding:?} voxels={} payload_bytes={}",
        solid.volume(),
        payload.len()
    );
    let header = Header {
        encoding,
        origin: (min.x, min.y, min.z),
        size,
        payload_len: payload.len() as u64,
    };
    header.write(w)?;
    w.write_all(&payload)?;
    Ok(())
}

/// Deserialize a solid from `r`, validating the header and payload.
pub fn read(r: &mut impl Read) -> Result<VoxelSolid, CadError> {
    let header = Header::read(r)?;
    let mut payload = vec![0u8; header.payload_len as usize];
    r.read_exact(&mut payload).map_err(|e| {
        CadError::invalid_format(format!("truncated SBVX payload: {e}"))
    })?;
    let origin = Cell::new(header.origin.0, header.origin.1, header.origin.2);
    match header.encoding {
        Encoding::Dense => dense::decode(&payload, origin, header.size),
        Encoding::Sparse => sparse::decode(&payload, origin, header.size),
    }
}

fn size_of(min: Cell, max_excl: Cell) -> (u32, u32, u32) {
    let dx = (max_excl.x - min.x).max(0) as u32;
    let dy = (max_excl.y - min.y).max(0) as u32;
    let dz = (max_excl.z - min.z).max(0) as u32;
    (dx, dy, dz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_solid(min: Cell, max: Cell) -> VoxelSolid {
        let mut s = VoxelSolid::new();
        s.fill_box(min, max);
        s
    }

    #[test]
    fn auto_select_dense_for_full_box() {
        let s = box_solid(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        assert_eq!(auto_encoding(&s), Encoding::Dense);
    }

    #[test]
    fn auto_select_sparse_for_scattered_cells() {
        let mut s = VoxelSolid::new();
        s.add(Cell::new(0, 0, 0));
        s.add(Cell::new(3, 3, 3));
        assert_eq!(auto_encoding(&s), Encoding::Sparse);
    }

    #[test]
    fn auto_select_sparse_for_empty() {
        let s = VoxelSolid::new();
        assert_eq!(auto_encoding(&s), Encoding::Sparse);
    }

    #[test]
    fn round_trip_dense_and_sparse() {
        let dense_s = box_solid(Cell::new(-1, -1, -1), Cell::new(3, 3, 3));
        let sparse_s = {
            let mut s = VoxelSolid::new();
            s.add(Cell::new(-5, 0, 0));
            s.add(Cell::new(5, 5, 5));
            s
        };
        for s in [&dense_s, &sparse_s] {
            let mut buf = Vec::new();
            write(&mut buf, s, None).unwrap();
            let back = read(&mut &buf[..]).unwrap();
            assert_eq!(back.cells(), s.cells());
        }
    }

    #[test]
    fn bad_magic_rejected() {
        let mut buf = vec![0u8; header::HEADER_LEN];
        buf[0..5].copy_from_slice(b"NOPE\0");
        let result = read(&mut &buf[..]);
        assert!(result.is_err());
    }

    proptest::proptest! {
        #[test]
        fn round_trip_preserves_cell_set_under_auto_select(
            cells in proptest::collection::vec((-6i32..6, -6i32..6, -6i32..6), 0..80)
        ) {
            let mut s = VoxelSolid::new();
            for (x, y, z) in cells {
                s.add(Cell::new(x, y, z));
            }
            let mut buf = Vec::new();
            write(&mut buf, &s, None).unwrap();
            let back = read(&mut &buf[..]).unwrap();
            prop_assert_eq!(back.cells(), s.cells());
        }

        #[test]
        fn dense_and_sparse_encodings_agree_on_the_same_solid(
            cells in proptest::collection::vec((-6i32..6, -6i32..6, -6i32..6), 1..80)
        ) {
            let mut s = VoxelSolid::new();
            for (x, y, z) in cells {
                s.add(Cell::new(x, y, z));
            }
            let mut dense_buf = Vec::new();
            write(&mut dense_buf, &s, Some(Encoding::Dense)).unwrap();
            let mut sparse_buf = Vec::new();
            write(&mut sparse_buf, &s, Some(Encoding::Sparse)).unwrap();
            let back_dense = read(&mut &dense_buf[..]).unwrap();
            let back_sparse = read(&mut &sparse_buf[..]).unwrap();
            prop_assert_eq!(back_dense.cells(), back_sparse.cells());
        }
    }
}
