// ============================================
// Math Module - Векторы, матрицы, кватернионы
// ============================================
// Общие типы для генератора и рендера.
// Конвертация в ultraviolet для потребителей на его стеке.

mod matrix;
mod quaternion;
mod vector;

pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::Vector3;

pub const PI: f32 = std::f32::consts::PI;
pub const EPSILON: f32 = 1e-6;

// ============================================
// ultraviolet interop
// ============================================

impl From<Vector3> for ultraviolet::Vec3 {
    fn from(v: Vector3) -> Self {
        ultraviolet::Vec3::new(v.x, v.y, v.z)
    }
}

impl From<ultraviolet::Vec3> for Vector3 {
    fn from(v: ultraviolet::Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Matrix4> for ultraviolet::Mat4 {
    fn from(m: Matrix4) -> Self {
        let c = |i: usize| ultraviolet::Vec4::new(m.m[i * 4], m.m[i * 4 + 1], m.m[i * 4 + 2], m.m[i * 4 + 3]);
        ultraviolet::Mat4::new(c(0), c(1), c(2), c(3))
    }
}

impl From<ultraviolet::Mat4> for Matrix4 {
    fn from(m: ultraviolet::Mat4) -> Self {
        let mut out = [0.0f32; 16];
        for (i, col) in m.cols.iter().enumerate() {
            out[i * 4] = col.x;
            out[i * 4 + 1] = col.y;
            out[i * 4 + 2] = col.z;
            out[i * 4 + 3] = col.w;
        }
        Matrix4::from_cols_array(out)
    }
}

/// Формат uniform-буферов (`[[f32; 4]; 4]`, по столбцам)
impl From<Matrix4> for [[f32; 4]; 4] {
    fn from(m: Matrix4) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (col, chunk) in m.m.chunks_exact(4).enumerate() {
            out[col].copy_from_slice(chunk);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ultraviolet::{Mat4, Vec3};

    fn assert_mat_close(ours: Matrix4, theirs: Mat4) {
        let theirs: Matrix4 = theirs.into();
        for i in 0..16 {
            assert!(
                (ours.m[i] - theirs.m[i]).abs() <= 1e-5 * ours.m[i].abs().max(1.0),
                "element {}: {} vs {}",
                i,
                ours.m[i],
                theirs.m[i]
            );
        }
    }

    #[test]
    fn test_look_at_matches_ultraviolet() {
        let eye = Vector3::new(100.0, 80.0, 100.0);
        let center = Vector3::new(0.0, 10.0, -5.0);
        assert_mat_close(
            Matrix4::look_at(eye, center, Vector3::UNIT_Y),
            Mat4::look_at(eye.into(), center.into(), Vec3::unit_y()),
        );
    }

    #[test]
    fn test_perspective_matches_ultraviolet() {
        let fov = 45.0 * PI / 180.0;
        assert_mat_close(
            Matrix4::perspective(fov, 16.0 / 9.0, 0.1, 1000.0),
            ultraviolet::projection::rh_yup::perspective_gl(fov, 16.0 / 9.0, 0.1, 1000.0),
        );
    }

    #[test]
    fn test_translation_matches_ultraviolet() {
        assert_mat_close(
            Matrix4::translation(1.0, -2.0, 3.5),
            Mat4::from_translation(Vec3::new(1.0, -2.0, 3.5)),
        );
    }

    #[test]
    fn test_uniform_array_layout() {
        let cols: [[f32; 4]; 4] = Matrix4::translation(4.0, 5.0, 6.0).into();
        assert_eq!(cols[3], [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
