use vcad_kernel_math::Vec3;

/// 15-axis Separating Axis Test between an oriented box and an
/// axis-aligned box, both given as center + half-extents (spec §4.2 OBB
/// mode). `obb_axes` are the local axes of the oriented box (expected
/// orthonormal); `eps` masks degenerate near-parallel cross-product axes,
/// following Ericson's *Real-Time Collision Detection* formulation.
pub fn obb_aabb_intersect(
    obb_center: Vec3,
    obb_axes: [Vec3; 3],
    obb_half: [f64; 3],
    aabb_center: Vec3,
    aabb_half: f64,
    eps: f64,
) -> bool {
    let world_axes = [Vec3::x(), Vec3::y(), Vec3::z()];
    let t = obb_center - aabb_center;
    let a_half = [aabb_half, aabb_half, aabb_half];

    // r[i][j] = dot(world_axes[i], obb_axes[j]); abs_r adds eps to mask
    // degenerate parallel-axis cross products.
    let mut r = [[0.0f64; 3]; 3];
    let mut abs_r = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = world_axes[i].dot(&obb_axes[j]);
            abs_r[i][j] = r[i][j].abs() + eps;
        }
    }
    let t_in_a = [t.dot(&world_axes[0]), t.dot(&world_axes[1]), t.dot(&world_axes[2])];

    // 3 AABB face axes.
    for i in 0..3 {
        let rb = obb_half[0] * abs_r[i][0] + obb_half[1] * abs_r[i][1] + obb_half[2] * abs_r[i][2];
        if t_in_a[i].abs() > a_half[i] + rb {
            return false;
        }
    }

    // 3 OBB face axes.
    for j in 0..3 {
        let t_proj = t.dot(&obb_axes[j]);
        let ra = a_half[0] * abs_r[0][j] + a_half[1] * abs_r[1][j] + a_half[2] * abs_r[2][j];
        if t_proj.abs() > ra + obb_half[j] {
            return false;
        }
    }

    // 9 cross-product axes world_axes[i] × obb_axes[j].
    for i in 0..3 {
        let (i1, i2) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (j1, j2) = ((j + 1) % 3, (j + 2) % 3);
            let axis = world_axes[i].cross(&obb_axes[j]);
            let t_proj = t.dot(&axis);
            let ra = a_half[i1] * abs_r[i2][j] + a_half[i2] * abs_r[i1][j];
            let rb = obb_half[j1] * abs_r[i][j2] + obb_half[j2] * abs_r[i][j1];
            if t_proj.abs() > ra + rb {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_overlap() {
        let axes = [Vec3::x(), Vec3::y(), Vec3::z()];
        let hit = obb_aabb_intersect(
            Vec3::new(0.4, 0.0, 0.0),
            axes,
            [0.5, 0.5, 0.5],
            Vec3::new(0.0, 0.0, 0.0),
            0.5,
            1e-9,
        );
        assert!(hit);
    }

    #[test]
    fn axis_aligned_separated() {
        let axes = [Vec3::x(), Vec3::y(), Vec3::z()];
        let hit = obb_aabb_intersect(
            Vec3::new(5.0, 0.0, 0.0),
            axes,
            [0.5, 0.5, 0.5],
            Vec3::new(0.0, 0.0, 0.0),
            0.5,
            1e-9,
        );
        assert!(!hit);
    }

    #[test]
    fn rotated_45_diagonal_touch() {
        let axes = [
            Vec3::new(std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2, 0.0),
            Vec3::new(-std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2, 0.0),
            Vec3::z(),
        ];
        let hit = obb_aabb_intersect(
            Vec3::new(0.0, 0.0, 0.0),
            axes,
            [0.5, 0.5, 0.5],
            Vec3::new(0.0, 0.0, 0.0),
            0.5,
            1e-9,
        );
        assert!(hit);
    }
}
