use vcad_kernel_types::{Cell, CadError};
use vcad_voxel_kernel::VoxelSolid;

/// Encode cells into a dense bit-packed payload, X-fastest then Y then Z,
/// LSB-first within each byte.
pub fn encode(solid: &VoxelSolid, origin: Cell, size: (u32, u32, u32)) -> Result<Vec<u8>, CadError> {
    let total = checked_total_cells(size)?;
    let mut bytes = vec![0u8; total.div_ceil(8) as usize];
    for &c in solid.cells() {
        let idx = dense_index(c, origin, size)?;
        bytes[(idx / 8) as usize] |= 1 << (idx % 8);
    }
    Ok(bytes)
}

/// Decode a dense bit-packed payload into a solid.
pub fn decode(
    bytes: &[u8],
    origin: Cell,
    size: (u32, u32, u32),
) -> Result<VoxelSolid, CadError> {
    let total = checked_total_cells(size)?;
    let expected_len = total.div_ceil(8) as usize;
    if bytes.len() != expected_len {
        return Err(CadError::invalid_format(format!(
            "dense payload length {} does not match expected {}",
            bytes.len(),
            expected_len
        )));
    }
    let mut cells = Vec::new();
    for idx in 0..total {
        if (bytes[(idx / 8) as usize] >> (idx % 8)) & 1 == 1 {
            cells.push(index_to_cell(idx, origin, size));
        }
    }
    Ok(VoxelSolid::from_cells(cells))
}

fn checked_total_cells(size: (u32, u32, u32)) -> Result<u64, CadError> {
    (size.0 as u64)
        .checked_mul(size.1 as u64)
        .and_then(|v| v.checked_mul(size.2 as u64))
        .ok_or_else(|| CadError::invalid_format("dense voxel count overflows u64"))
}

fn dense_index(c: Cell, origin: Cell, size: (u32, u32, u32)) -> Result<u64, CadError> {
    let lx = c.x - origin.x;
    let ly = c.y - origin.y;
    let lz = c.z - origin.z;
    if lx < 0 || ly < 0 || lz < 0 || lx as u32 >= size.0 || ly as u32 >= size.1 || lz as u32 >= size.2
    {
        return Err(CadError::invalid_format(
            "cell outside declared dense bounds",
        ));
    }
    Ok(lx as u64 + size.0 as u64 * (ly as u64 + size.1 as u64 * lz as u64))
}

fn index_to_cell(idx: u64, origin: Cell, size: (u32, u32, u32)) -> Cell {
    let x = idx % size.0 as u64;
    let rest = idx / size.0 as u64;
    let y = rest % size.1 as u64;
    let z = rest / size.1 as u64;
    Cell::new(
        origin.x + x as i32,
        origin.y + y as i32,
        origin.z + z as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_small_box() {
        let mut s = VoxelSolid::new();
        s.fill_box(Cell::new(0, 0, 0), Cell::new(2, 2, 2));
        let (min, max) = s.bounds();
        let size = (
            (max.x - min.x) as u32,
            (max.y - min.y) as u32,
            (max.z - min.z) as u32,
        );
        let bytes = encode(&s, min, size).unwrap();
        let back = decode(&bytes, min, size).unwrap();
        assert_eq!(back.cells(), s.cells());
    }
}
