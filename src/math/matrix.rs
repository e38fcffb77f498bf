// ============================================
// Matrix4 - Матрица преобразований 4x4
// ============================================
// Хранение column-major (как в OpenGL): m[col * 4 + row]
// Правая система координат, камера смотрит вдоль -Z,
// clip space OpenGL (z в диапазоне -1..1)

use std::ops::{Mul, MulAssign};

use serde::{Deserialize, Serialize};

use super::vector::Vector3;

/// Порог определителя, ниже которого матрица считается вырожденной
const SINGULAR_DET: f32 = 1e-12;

/// Матрица 4x4 на f32, column-major
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Элемент (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[col * 4 + row] = value;
    }

    /// Сырые данные для загрузки в uniform
    pub fn data(&self) -> &[f32; 16] {
        &self.m
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::identity();
        r.m[12] = x;
        r.m[13] = y;
        r.m[14] = z;
        r
    }

    pub fn translation_v(v: Vector3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[5] = c;
        r.m[6] = s;
        r.m[9] = -s;
        r.m[10] = c;
        r
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[0] = c;
        r.m[2] = -s;
        r.m[8] = s;
        r.m[10] = c;
        r
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[0] = c;
        r.m[1] = s;
        r.m[4] = -s;
        r.m[5] = c;
        r
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut r = Self::identity();
        r.m[0] = x;
        r.m[5] = y;
        r.m[10] = z;
        r
    }

    pub fn scale_v(s: Vector3) -> Self {
        Self::scale(s.x, s.y, s.z)
    }

    /// Перспективная проекция
    ///
    /// * `fov_y` — вертикальный угол обзора в радианах
    /// * `aspect` — ширина / высота
    /// * `near`, `far` — расстояния до плоскостей отсечения (> 0)
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let nf = near - far;

        let mut r = Self::from_cols_array([0.0; 16]);
        r.m[0] = f / aspect;
        r.m[5] = f;
        r.m[10] = (far + near) / nf;
        r.m[11] = -1.0;
        r.m[14] = 2.0 * far * near / nf;
        r
    }

    /// Ортографическая проекция
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fn_ = far - near;

        let mut r = Self::identity();
        r.m[0] = 2.0 / rl;
        r.m[5] = 2.0 / tb;
        r.m[10] = -2.0 / fn_;
        r.m[12] = -(right + left) / rl;
        r.m[13] = -(top + bottom) / tb;
        r.m[14] = -(far + near) / fn_;
        r
    }

    /// Матрица вида: камера в `eye` смотрит на `center`
    #[rustfmt::skip]
    pub fn look_at(eye: Vector3, center: Vector3, up: Vector3) -> Self {
        let f = (center - eye).normalized();
        let s = f.cross(up).normalized();
        let u = s.cross(f);

        Self::from_cols_array([
            s.x, u.x, -f.x, 0.0,
            s.y, u.y, -f.y, 0.0,
            s.z, u.z, -f.z, 0.0,
            -s.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
        ])
    }

    // Пост-умножение: преобразование применяется в локальном пространстве
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        *self *= Self::translation(x, y, z);
    }

    pub fn rotate_x(&mut self, angle: f32) {
        *self *= Self::rotation_x(angle);
    }

    pub fn rotate_y(&mut self, angle: f32) {
        *self *= Self::rotation_y(angle);
    }

    pub fn rotate_z(&mut self, angle: f32) {
        *self *= Self::rotation_z(angle);
    }

    pub fn scale_by(&mut self, x: f32, y: f32, z: f32) {
        *self *= Self::scale(x, y, z);
    }

    /// Точка (w = 1) с перспективным делением
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        let x = m[0] * v.x + m[4] * v.y + m[8] * v.z + m[12];
        let y = m[1] * v.x + m[5] * v.y + m[9] * v.z + m[13];
        let z = m[2] * v.x + m[6] * v.y + m[10] * v.z + m[14];
        let w = m[3] * v.x + m[7] * v.y + m[11] * v.z + m[15];

        if w != 0.0 && w != 1.0 {
            Vector3::new(x / w, y / w, z / w)
        } else {
            Vector3::new(x, y, z)
        }
    }

    /// Направление (w = 0), перенос не применяется
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let m = &self.m;
        Vector3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }

    pub fn transpose(&self) -> Self {
        let mut r = Self::identity();
        for row in 0..4 {
            for col in 0..4 {
                r.set(col, row, self.get(row, col));
            }
        }
        r
    }

    pub fn determinant(&self) -> f32 {
        self.adjugate().1
    }

    /// Обратная матрица или None для вырожденной
    pub fn try_inverse(&self) -> Option<Self> {
        let (adj, det) = self.adjugate();
        if !det.is_finite() || det.abs() < SINGULAR_DET {
            return None;
        }

        let inv_det = 1.0 / det;
        let mut r = adj;
        for v in r.m.iter_mut() {
            *v *= inv_det;
        }
        Some(r)
    }

    /// Обратная матрица; для вырожденной возвращает единичную
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or_else(|| {
            log::warn!("Matrix4::inverse: singular matrix, falling back to identity");
            Self::identity()
        })
    }

    /// Присоединённая матрица (транспонированные алгебраические дополнения) и определитель
    #[rustfmt::skip]
    fn adjugate(&self) -> (Self, f32) {
        let m = &self.m;
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];

        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];

        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];

        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        (Self { m: inv }, det)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut r = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                r[col * 4 + row] = (0..4)
                    .map(|k| self.m[k * 4 + row] * rhs.m[col * 4 + k])
                    .sum();
            }
        }
        Self { m: r }
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.transform_point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_mat_eq(a: &Matrix4, b: &Matrix4, eps: f32) {
        for i in 0..16 {
            assert!(
                (a.m[i] - b.m[i]).abs() < eps,
                "element {}: {} vs {}",
                i,
                a.m[i],
                b.m[i]
            );
        }
    }

    fn assert_vec_eq(a: Vector3, b: Vector3, eps: f32) {
        assert!((a - b).length() < eps, "{:?} vs {:?}", a, b);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Matrix4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.transform_vector(Vector3::UNIT_X), Vector3::UNIT_X);
    }

    #[test]
    fn test_axis_rotations_right_handed() {
        let eps = 1e-6;
        assert_vec_eq(Matrix4::rotation_z(FRAC_PI_2) * Vector3::UNIT_X, Vector3::UNIT_Y, eps);
        assert_vec_eq(Matrix4::rotation_x(FRAC_PI_2) * Vector3::UNIT_Y, Vector3::UNIT_Z, eps);
        assert_vec_eq(Matrix4::rotation_y(FRAC_PI_2) * Vector3::UNIT_Z, Vector3::UNIT_X, eps);
    }

    #[test]
    fn test_multiplication_order() {
        // Сначала масштаб, затем перенос
        let m = Matrix4::translation(10.0, 0.0, 0.0) * Matrix4::scale(2.0, 2.0, 2.0);
        assert_eq!(m * Vector3::ONE, Vector3::new(12.0, 2.0, 2.0));

        let mut inplace = Matrix4::translation(10.0, 0.0, 0.0);
        inplace.scale_by(2.0, 2.0, 2.0);
        assert_eq!(inplace, m);
    }

    #[test]
    fn test_transpose_roundtrip() {
        let m = Matrix4::translation(1.0, 2.0, 3.0) * Matrix4::rotation_y(0.3);
        assert_eq!(m.transpose().get(3, 0), 1.0);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_inverse_of_affine_transform() {
        let mut m = Matrix4::translation(3.0, -2.0, 5.0);
        m.rotate_x(0.4);
        m.rotate_y(-1.1);
        m.scale_by(2.0, 0.5, 3.0);

        let product = m * m.inverse();
        assert_mat_eq(&product, &Matrix4::identity(), 1e-5);
    }

    #[test]
    fn test_inverse_of_projection() {
        let p = Matrix4::perspective(1.0, 1.5, 0.1, 100.0);
        let product = p.inverse() * p;
        assert_mat_eq(&product, &Matrix4::identity(), 1e-4);
    }

    #[test]
    fn test_singular_inverse_falls_back_to_identity() {
        let flat = Matrix4::scale(1.0, 0.0, 1.0);
        assert!(flat.try_inverse().is_none());
        assert_eq!(flat.inverse(), Matrix4::identity());
        assert_eq!(flat.determinant(), 0.0);
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let p = Matrix4::perspective(FRAC_PI_2, 1.0, 1.0, 10.0);
        assert!((p.transform_point(Vector3::new(0.0, 0.0, -1.0)).z + 1.0).abs() < 1e-5);
        assert!((p.transform_point(Vector3::new(0.0, 0.0, -10.0)).z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_maps_box_to_cube() {
        let o = Matrix4::orthographic(-2.0, 2.0, -1.0, 1.0, 0.5, 5.0);
        assert_vec_eq(o * Vector3::new(2.0, 1.0, -5.0), Vector3::new(1.0, 1.0, 1.0), 1e-6);
        assert_vec_eq(o * Vector3::new(-2.0, -1.0, -0.5), Vector3::new(-1.0, -1.0, -1.0), 1e-6);
    }

    #[test]
    fn test_look_at_puts_target_on_negative_z() {
        let eye = Vector3::new(5.0, 5.0, 5.0);
        let view = Matrix4::look_at(eye, Vector3::ZERO, Vector3::UNIT_Y);
        assert_vec_eq(view * eye, Vector3::ZERO, 1e-5);

        let target = view * Vector3::ZERO;
        assert!(target.x.abs() < 1e-5 && target.y.abs() < 1e-5);
        assert!((target.z + eye.length()).abs() < 1e-4);
    }
}
