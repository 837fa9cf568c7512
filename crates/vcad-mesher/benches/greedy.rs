use criterion::{criterion_group, criterion_main, Criterion};
use vcad_kernel_types::Cell;
use vcad_mesher::to_mesh;
use vcad_voxel_kernel::VoxelSolid;

fn slab(size: i32) -> VoxelSolid {
    let mut s = VoxelSolid::new();
    s.fill_box(Cell::new(0, 0, 0), Cell::new(size, size, 4));
    s
}

fn bench_greedy_merge(c: &mut Criterion) {
    let solid = slab(128);
    c.bench_function("mesher::to_mesh 128x128x4 slab", |b| {
        b.iter(|| to_mesh(&solid));
    });
}

criterion_group!(benches, bench_greedy_merge);
criterion_main!(benches);
