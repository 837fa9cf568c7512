use vcad_kernel_types::{Cell, CadError};
use vcad_voxel_kernel::VoxelSolid;

use crate::morton::morton_key;

/// Encode cells as a sparse payload: a `u32` voxel count followed by that
/// many `(x, y, z)` signed 32-bit triples, sorted by 21-bit Morton key of
/// `(cell - min)`, tie-breaking by `(z, y, x)`.
pub fn encode(solid: &VoxelSolid, origin: Cell) -> Result<Vec<u8>, CadError> {
    let mut cells: Vec<Cell> = solid.cells().iter().copied().collect();
    sort_cells(&mut cells, origin);

    let count: u32 = cells
        .len()
        .try_into()
        .map_err(|_| CadError::invalid_format("sparse voxel count overflows u32"))?;

    let mut bytes = Vec::with_capacity(4 + cells.len() * 12);
    bytes.extend_from_slice(&count.to_le_bytes());
    for c in cells {
        bytes.extend_from_slice(&c.x.to_le_bytes());
        bytes.extend_from_slice(&c.y.to_le_bytes());
        bytes.extend_from_slice(&c.z.to_le_bytes());
    }
    Ok(bytes)
}

fn sort_cells(cells: &mut [Cell], origin: Cell) {
    cells.sort_by(|a, b| {
        let ka = morton_key(
            (a.x - origin.x) as u32,
            (a.y - origin.y) as u32,
            (a.z - origin.z) as u32,
        );
        let kb = morton_key(
            (b.x - origin.x) as u32,
            (b.y - origin.y) as u32,
            (b.z - origin.z) as u32,
        );
        ka.cmp(&kb)
            .then_with(|| a.z.cmp(&b.z))
            .then_with(|| a.y.cmp(&b.y))
            .then_with(|| a.x.cmp(&b.x))
    });
}

/// Decode a sparse payload, validating that every voxel lies within the
/// declared `[origin, origin + size)` box.
pub fn decode(bytes: &[u8], origin: Cell, size: (u32, u32, u32)) -> Result<VoxelSolid, CadError> {
    if bytes.len() < 4 {
        return Err(CadError::invalid_format("truncated sparse voxel count"));
    }
    let count = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let expected_len = 4 + count * 12;
    if bytes.len() != expected_len {
        return Err(CadError::invalid_format(format!(
            "sparse payload length {} does not match expected {}",
            bytes.len(),
            expected_len
        )));
    }
    let mut cells = Vec::with_capacity(count);
    let mut offset = 4usize;
    for _ in 0..count {
        let x = i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap());
        let y = i32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().unwrap());
        let z = i32::from_le_bytes(bytes[offset + 8..offset + 12].try_into().unwrap());
        offset += 12;
        let c = Cell::new(x, y, z);
        let (lx, ly, lz) = (c.x - origin.x, c.y - origin.y, c.z - origin.z);
        if lx < 0 || ly < 0 || lz < 0 || lx as u32 >= size.0 || ly as u32 >= size.1 || lz as u32 >= size.2 {
            return Err(CadError::invalid_format(
                "sparse voxel lies outside declared bounds",
            ));
        }
        cells.push(c);
    }
    Ok(VoxelSolid::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_scattered_cells() {
        let mut s = VoxelSolid::new();
        s.add(Cell::new(0, 0, 0));
        s.add(Cell::new(3, 3, 3));
        let (min, max) = s.bounds();
        let size = (
            (max.x - min.x) as u32,
            (max.y - min.y) as u32,
            (max.z - min.z) as u32,
        );
        let bytes = encode(&s, min).unwrap();
        let back = decode(&bytes, min, size).unwrap();
        assert_eq!(back.cells(), s.cells());
    }

    #[test]
    fn out_of_bounds_voxel_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&100i32.to_le_bytes());
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.extend_from_slice(&0i32.to_le_bytes());
        let result = decode(&bytes, Cell::new(0, 0, 0), (2, 2, 2));
        assert!(result.is_err());
    }
}
