//! Build a sphere, auto-select a SBVX encoding, write it with Deflate
//! compression, then read it back and confirm the cell set round-trips.

use vcad::sbvx::{self, Compression, CompressionLevel};
use vcad::{Builder, Cell};

fn main() {
    let mut builder = Builder::new();
    builder.sphere(Cell::new(0, 0, 0), 12.0);
    let solid = builder.build();

    let encoding = sbvx::auto_encoding(&solid);
    println!("auto-selected encoding: {encoding:?}");

    let mut raw = Vec::new();
    sbvx::write(&mut raw, &solid, Some(encoding)).unwrap();

    let mut compressed = Vec::new();
    sbvx::write_compressed(
        &mut compressed,
        &raw,
        Compression::Deflate,
        CompressionLevel::Balanced,
    )
    .unwrap();
    println!("raw {} bytes, compressed {} bytes", raw.len(), compressed.len());

    let decompressed = sbvx::read_compressed(&mut &compressed[..], Compression::Deflate).unwrap();
    let back = sbvx::read(&mut &decompressed[..]).unwrap();
    assert_eq!(back.cells(), solid.cells());
    println!("round-trip OK: {} voxels", back.volume());
}
