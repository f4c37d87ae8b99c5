use crate::math::deg_to_rad;
use crate::math::vec::Vec3;

/// Column-major 4x4 matrix, laid out the way WGSL expects `mat4x4<f32>`.
///
/// `m.0[c][r]` is the element in column `c`, row `r`. Points are column
/// vectors, so `a.multiply(&b)` applies `b` first and then `a`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, z_far * range_reciprocal, -1.0],
            [0.0, 0.0, z_far * z_near * range_reciprocal, 0.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let f = (target - eye).normalize();
        let s = f.cross(&up).normalize();
        let u = s.cross(&f);

        Mat4([
            [s.x(), u.x(), -f.x(), 0.0],
            [s.y(), u.y(), -f.y(), 0.0],
            [s.z(), u.z(), -f.z(), 0.0],
            [-s.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0],
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation about +Y (seen from above), angle in degrees.
    pub fn rotation_y(angle_in_degrees: f32) -> Mat4 {
        let c = (deg_to_rad(angle_in_degrees)).cos();
        let s = (deg_to_rad(angle_in_degrees)).sin();
        Mat4([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn multiply(&self, b: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| b.0[i][k] * self.0[k][j]).sum();
            }
        }
        Mat4(result)
    }

    /// Transforms a point (w = 1) and applies the perspective divide.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let v = [p.x(), p.y(), p.z(), 1.0];
        let mut out = [0.0f32; 4];
        for (r, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|c| self.0[c][r] * v[c]).sum();
        }
        if out[3] != 0.0 && out[3] != 1.0 {
            return Vec3::new(out[0] / out[3], out[1] / out[3], out[2] / out[3]);
        }
        Vec3::new(out[0], out[1], out[2])
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{:?} != {:?}", a, b);
    }

    /// Tests that multiply applies the right-hand matrix first.
    #[test]
    fn test_multiply_order() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = Mat4::scaling(2.0, 2.0, 2.0);
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_close(t.multiply(&s).transform_point(p), Vec3::new(3.0, 2.0, 2.0));
        assert_close(s.multiply(&t).transform_point(p), Vec3::new(4.0, 2.0, 2.0));
    }

    /// Tests that the look-at matrix puts the eye at the origin looking down -Z.
    #[test]
    fn test_look_at_maps_target_to_negative_z() {
        let eye = Vec3::new(3.0, 1.7, 5.0);
        let view = Mat4::look_at(eye, eye + Vec3::new(1.0, 0.0, 0.0), Vec3::UNIT_Y);
        assert_close(view.transform_point(eye), Vec3::ZERO);
        assert_close(
            view.transform_point(eye + Vec3::new(2.0, 0.0, 0.0)),
            Vec3::new(0.0, 0.0, -2.0),
        );
    }

    /// Tests that the projection maps the near and far planes to depth 0 and 1.
    #[test]
    fn test_perspective_depth_range() {
        let proj = Mat4::perspective(deg_to_rad(45.0), 1.5, 0.1, 100.0);
        let near = proj.transform_point(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.transform_point(Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z().abs() < 1e-4);
        assert!((far.z() - 1.0).abs() < 1e-4);
    }

    /// Tests that a quarter turn about Y carries +X onto -Z.
    #[test]
    fn test_rotation_y_quarter_turn() {
        let r = Mat4::rotation_y(90.0);
        assert_close(
            r.transform_point(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(0.0, 0.0, -1.0),
        );
    }
}
