// ============================================
// Perlin Noise - Градиентный шум с сидом
// ============================================
// Таблица перестановок 512 = 256 значений + их копия,
// чтобы индексы p[p[xi] + yi] + zi не выходили за границы
// без дополнительных проверок.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Эталонная перестановка Кена Перлина (каждое 0..=255 ровно один раз)
const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Кривая сглаживания 6t^5 - 15t^4 + 10t^3 (C2 на границах ячеек)
#[inline(always)]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline(always)]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Скалярное произведение с псевдослучайным градиентом из младших 4 бит хэша
#[inline(always)]
pub fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 8 { y } else { z };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// 3D шум Перлина, детерминированный по сиду.
///
/// Неизменяем после создания, безопасно разделяется между потоками.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerlinNoise {
    seed: u32,
    p: [u8; 512],
}

impl PerlinNoise {
    /// Перемешивает эталонную перестановку тасованием Фишера-Йетса
    /// на генераторе, инициализированном сидом. Влияют все 32 бита сида.
    pub fn new(seed: u32) -> Self {
        let mut table = REFERENCE_PERMUTATION;
        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        table.shuffle(&mut rng);

        let mut p = [0u8; 512];
        p[..256].copy_from_slice(&table);
        p[256..].copy_from_slice(&table);

        Self { seed, p }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Таблица перестановок (512 значений)
    pub fn permutation(&self) -> &[u8; 512] {
        &self.p
    }

    #[inline(always)]
    fn perm(&self, i: usize) -> usize {
        self.p[i] as usize
    }

    /// Значение шума в диапазоне 0.0..=1.0
    pub fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        ((self.signed_noise(x, y, z) + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Шум без сдвига и ограничения, примерно -1.0..=1.0
    pub fn signed_noise(&self, x: f32, y: f32, z: f32) -> f32 {
        let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());

        let xi = (fx as i32 & 255) as usize;
        let yi = (fy as i32 & 255) as usize;
        let zi = (fz as i32 & 255) as usize;

        let xf = x - fx;
        let yf = y - fy;
        let zf = z - fz;

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let a = self.perm(xi);
        let b = self.perm(xi + 1);

        let aaa = self.p[self.perm(a + yi) + zi];
        let aba = self.p[self.perm(a + yi + 1) + zi];
        let aab = self.p[self.perm(a + yi) + zi + 1];
        let abb = self.p[self.perm(a + yi + 1) + zi + 1];
        let baa = self.p[self.perm(b + yi) + zi];
        let bba = self.p[self.perm(b + yi + 1) + zi];
        let bab = self.p[self.perm(b + yi) + zi + 1];
        let bbb = self.p[self.perm(b + yi + 1) + zi + 1];

        let x1 = lerp(u, grad(aaa, xf, yf, zf), grad(baa, xf - 1.0, yf, zf));
        let x2 = lerp(u, grad(aba, xf, yf - 1.0, zf), grad(bba, xf - 1.0, yf - 1.0, zf));
        let y1 = lerp(v, x1, x2);

        let x1 = lerp(u, grad(aab, xf, yf, zf - 1.0), grad(bab, xf - 1.0, yf, zf - 1.0));
        let x2 = lerp(
            u,
            grad(abb, xf, yf - 1.0, zf - 1.0),
            grad(bbb, xf - 1.0, yf - 1.0, zf - 1.0),
        );
        let y2 = lerp(v, x1, x2);

        lerp(w, y1, y2)
    }

    /// Fractional Brownian Motion: сумма октав, нормированная на сумму амплитуд.
    ///
    /// * `octaves` — число слоёв (0 трактуется как 1)
    /// * `persistence` — множитель амплитуды на октаву (обычно 0.5)
    /// * `lacunarity` — множитель частоты на октаву (обычно 2.0)
    ///
    /// Результат в диапазоне 0.0..=1.0
    pub fn fbm(&self, x: f32, y: f32, z: f32, octaves: u32, persistence: f32, lacunarity: f32) -> f32 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves.max(1) {
            value += self.noise(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        value / max_value
    }
}
