//! Mounting plate with a bolt pattern — basic Builder usage, meshed and
//! exported to binary STL.

use vcad::{Axis, Builder, Cell};

fn main() {
    let mut plate = Builder::new();
    plate.box_(Cell::new(0, 0, 0), Cell::new(120, 80, 5));
    plate.cut_cylinder_z(60, 40, 0, 5, 15.0);

    for &(dx, dy) in &[(15, 15), (105, 15), (15, 65), (105, 65)] {
        plate.cut_cylinder_z(dx, dy, 0, 5, 2.7);
    }

    // A bolt-circle hole placed via an arbitrary-angle rotation about the
    // plate's center, demonstrating `rotate_any` nested inside `subtract`.
    plate.subtract(|child| {
        child
            .rotate_any_around(Axis::Z, 30.0, Cell::new(60, 40, 0), |grandchild| {
                grandchild.cylinder_z(60, 15, 0, 5, 3.0);
            })
            .unwrap();
    });

    let solid = plate.build();
    assert!(solid.is_watertight());

    let mesh = vcad::mesh::to_mesh(&solid);
    vcad::stl::write_file(&mesh, "plate.stl", Some("plate")).unwrap();
    println!("wrote plate.stl: {} triangles", mesh.triangles.len());
}
