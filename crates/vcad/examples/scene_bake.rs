//! Compose two parts with a hole role, weld a third part's offset plate
//! against the result, then export the bake to binary STL.

use std::sync::Arc;

use vcad::{weld, Cell, Instance, Part, Role, Scene, VoxelSolid};

fn box_part(name: &str, min: Cell, max: Cell) -> Arc<Part> {
    let mut solid = VoxelSolid::new();
    solid.fill_box(min, max);
    Arc::new(Part::new(name, solid))
}

fn main() {
    let mut scene = Scene::new(1).unwrap();

    let block = box_part("block", Cell::new(0, 0, 0), Cell::new(20, 20, 10));
    let bore = box_part("bore", Cell::new(6, 6, 0), Cell::new(14, 14, 10));

    scene.add_instance(Instance::new(block));
    let mut bore_instance = Instance::new(bore);
    bore_instance.set_role(Role::Hole);
    scene.add_instance(bore_instance);

    let baked = scene.bake(None).unwrap();
    assert!(baked.is_watertight());
    println!("baked volume: {}", baked.volume());

    let mut plate = VoxelSolid::new();
    plate.fill_box(Cell::new(25, 0, 0), Cell::new(35, 20, 10));
    let welded = weld(&baked, &plate, "block_plus_tab", vcad::Metric::LInf);
    println!(
        "welded at radius {} (6-connected: {})",
        welded.radius,
        welded.part.solid().is_6_connected()
    );

    let mesh = vcad::mesh::to_mesh(welded.part.solid());
    vcad::stl::write_file(&mesh, "scene_bake.stl", Some("scene")).unwrap();
    println!("wrote scene_bake.stl: {} triangles", mesh.triangles.len());
}
