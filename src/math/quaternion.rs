// ============================================
// Quaternion - Кватернион вращения
// ============================================

use std::ops::{Add, Mul, MulAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::matrix::Matrix4;
use super::vector::Vector3;

/// Выше этого cos угла slerp переходит на линейную интерполяцию
const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Кватернион (w, x, y, z)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Поворот на `angle` радиан вокруг `axis` (ось нормализуется)
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let axis = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    #[inline]
    pub fn dot(self, q: Self) -> f32 {
        self.w * q.w + self.x * q.x + self.y * q.y + self.z * q.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Нулевой кватернион возвращается без изменений
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            self
        }
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    pub fn inverse(self) -> Self {
        let len_sq = self.dot(self);
        if len_sq > 0.0 {
            self.conjugate() * (1.0 / len_sq)
        } else {
            self
        }
    }

    /// Векторная часть
    fn xyz(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Повернуть вектор (кватернион предполагается единичным)
    pub fn rotate(self, v: Vector3) -> Vector3 {
        let u = self.xyz();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    pub fn to_matrix4(self) -> Matrix4 {
        let q = self.normalized();
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);

        let mut m = Matrix4::identity();
        m.set(0, 0, 1.0 - 2.0 * (y * y + z * z));
        m.set(0, 1, 2.0 * (x * y - w * z));
        m.set(0, 2, 2.0 * (x * z + w * y));

        m.set(1, 0, 2.0 * (x * y + w * z));
        m.set(1, 1, 1.0 - 2.0 * (x * x + z * z));
        m.set(1, 2, 2.0 * (y * z - w * x));

        m.set(2, 0, 2.0 * (x * z - w * y));
        m.set(2, 1, 2.0 * (y * z + w * x));
        m.set(2, 2, 1.0 - 2.0 * (x * x + y * y));
        m
    }

    /// Извлечь вращение из верхнего 3x3 блока матрицы
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let r = |row, col| m.get(row, col);
        let trace = r(0, 0) + r(1, 1) + r(2, 2);

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (r(2, 1) - r(1, 2)) / s,
                (r(0, 2) - r(2, 0)) / s,
                (r(1, 0) - r(0, 1)) / s,
            )
        } else if r(0, 0) > r(1, 1) && r(0, 0) > r(2, 2) {
            let s = (1.0 + r(0, 0) - r(1, 1) - r(2, 2)).sqrt() * 2.0;
            Self::new(
                (r(2, 1) - r(1, 2)) / s,
                0.25 * s,
                (r(0, 1) + r(1, 0)) / s,
                (r(0, 2) + r(2, 0)) / s,
            )
        } else if r(1, 1) > r(2, 2) {
            let s = (1.0 + r(1, 1) - r(0, 0) - r(2, 2)).sqrt() * 2.0;
            Self::new(
                (r(0, 2) - r(2, 0)) / s,
                (r(0, 1) + r(1, 0)) / s,
                0.25 * s,
                (r(1, 2) + r(2, 1)) / s,
            )
        } else {
            let s = (1.0 + r(2, 2) - r(0, 0) - r(1, 1)).sqrt() * 2.0;
            Self::new(
                (r(1, 0) - r(0, 1)) / s,
                (r(0, 2) + r(2, 0)) / s,
                (r(1, 2) + r(2, 1)) / s,
                0.25 * s,
            )
        };

        q.normalized()
    }

    /// Сферическая интерполяция по кратчайшему пути.
    ///
    /// Входы нормализуются. При отрицательном скалярном произведении `b`
    /// инвертируется, поэтому при `t = 1` результат может быть `-b`
    /// (то же самое вращение).
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        let a = a.normalized();
        let mut b = b.normalized();
        let mut dot = a.dot(b);

        if dot < 0.0 {
            b = -b;
            dot = -dot;
        }

        if dot > SLERP_LINEAR_THRESHOLD {
            return (a + (b - a) * t).normalized();
        }

        let theta_0 = dot.clamp(-1.0, 1.0).acos();
        let theta = theta_0 * t;

        let ortho = (b - a * dot).normalized();
        a * theta.cos() + ortho * theta.sin()
    }
}

impl Add for Quaternion {
    type Output = Self;
    fn add(self, q: Self) -> Self {
        Self::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;
    fn sub(self, q: Self) -> Self {
        Self::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    fn mul(self, s: f32) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

/// Произведение Гамильтона: сначала `q`, затем `self`
impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, q: Self) {
        *self = *self * q;
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, v: Vector3) -> Vector3 {
        self.rotate(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPS: f32 = 1e-5;

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        assert!((a - b).length() < EPS, "{:?} vs {:?}", a, b);
    }

    /// q и -q задают одно и то же вращение
    fn assert_same_rotation(a: Quaternion, b: Quaternion) {
        assert!(
            (a - b).length() < EPS || (a + b).length() < EPS,
            "{:?} vs {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_slerp_endpoints() {
        let pairs = [
            (Quaternion::identity(), Quaternion::from_axis_angle(Vector3::UNIT_Y, FRAC_PI_2)),
            (
                Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.3),
                Quaternion::from_axis_angle(Vector3::UNIT_Z, 2.5),
            ),
            (
                Quaternion::from_axis_angle(Vector3::UNIT_X, 0.1),
                Quaternion::from_axis_angle(Vector3::UNIT_X, 0.1001),
            ),
        ];

        for (a, b) in pairs {
            assert_quat_eq(Quaternion::slerp(a, b, 0.0), a.normalized());
            assert_same_rotation(Quaternion::slerp(a, b, 1.0), b.normalized());
        }
    }

    #[test]
    fn test_slerp_normalizes_inputs() {
        let a = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        let b = Quaternion::from_axis_angle(Vector3::UNIT_Z, FRAC_PI_2) * 3.0;
        assert_quat_eq(Quaternion::slerp(a, b, 0.0), Quaternion::identity());
        assert_quat_eq(Quaternion::slerp(a, b, 1.0), b.normalized());
    }

    #[test]
    fn test_slerp_midpoint() {
        let a = Quaternion::identity();
        let b = Quaternion::from_axis_angle(Vector3::UNIT_Y, FRAC_PI_2);
        let mid = Quaternion::slerp(a, b, 0.5);
        assert_quat_eq(mid, Quaternion::from_axis_angle(Vector3::UNIT_Y, FRAC_PI_4));
        assert!((mid.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_slerp_takes_shortest_path() {
        // -b задаёт то же вращение, середина не должна уходить "длинным путём"
        let a = Quaternion::identity();
        let b = -Quaternion::from_axis_angle(Vector3::UNIT_Y, FRAC_PI_2);
        let mid = Quaternion::slerp(a, b, 0.5);
        assert_same_rotation(mid, Quaternion::from_axis_angle(Vector3::UNIT_Y, FRAC_PI_4));
    }

    #[test]
    fn test_rotation_matches_matrix() {
        let q = Quaternion::from_axis_angle(Vector3::UNIT_Y, 0.7);
        let m = Matrix4::rotation_y(0.7);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!((q * v - m * v).length() < EPS);
        assert!((q.to_matrix4() * v - m * v).length() < EPS);
    }

    #[test]
    fn test_matrix_roundtrip() {
        let axes = [
            Vector3::UNIT_X,
            Vector3::new(0.3, -1.0, 0.2),
            Vector3::new(-1.0, 0.5, 2.0),
        ];
        for axis in axes {
            for angle in [0.2, FRAC_PI_2, 2.8, PI] {
                let q = Quaternion::from_axis_angle(axis, angle);
                let back = Quaternion::from_matrix4(&q.to_matrix4());
                assert_same_rotation(back, q);
            }
        }
    }

    #[test]
    fn test_inverse_and_composition() {
        let q = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, 3.0), 1.2);
        assert_quat_eq(q * q.inverse(), Quaternion::identity());
        assert_quat_eq(q.conjugate(), q.inverse());

        let half = Quaternion::from_axis_angle(Vector3::UNIT_Z, FRAC_PI_4);
        let mut full = half;
        full *= half;
        assert_quat_eq(full, Quaternion::from_axis_angle(Vector3::UNIT_Z, FRAC_PI_2));
        assert!((full * Vector3::UNIT_X - Vector3::UNIT_Y).length() < EPS);
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        q.normalize();
        assert_eq!(q, Quaternion::new(0.0, 0.0, 0.0, 0.0));
    }
}
