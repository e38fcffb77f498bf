// ============================================
// Terrain Colors - Цвет по высоте
// ============================================
// 5 полос: вода -> песок -> трава -> лес -> снег.
// Внутри полосы цвет линейно интерполируется между концами.

use crate::math::Vector3;

/// Полоса высот [start, end): цвет `from + t * delta`, t = 0..1 внутри полосы
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBand {
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
    /// end - start, хранится литералом
    pub width: f32,
    pub from: Vector3,
    /// Приращение цвета по полосе, литералом (не `to - from`),
    /// чтобы значения совпадали побитово
    pub delta: Vector3,
}

impl HeightBand {
    #[inline]
    fn color_at(&self, normalized: f32) -> Vector3 {
        let t = (normalized - self.start) / self.width;
        Vector3::new(
            self.from.x + t * self.delta.x,
            self.from.y + t * self.delta.y,
            self.from.z + t * self.delta.z,
        )
    }

    /// Цвет на верхней границе полосы
    pub fn end_color(&self) -> Vector3 {
        self.color_at(self.end)
    }
}

/// Границы полос (нормализованная высота)
pub const BAND_BOUNDARIES: [f32; 6] = [0.0, 0.3, 0.45, 0.7, 0.85, 1.0];

pub const HEIGHT_BANDS: [HeightBand; 5] = [
    HeightBand {
        name: "deep water",
        start: 0.0,
        end: 0.3,
        width: 0.3,
        from: Vector3::new(0.1, 0.2, 0.4),
        delta: Vector3::new(0.2, 0.3, 0.3),
    },
    HeightBand {
        name: "sand",
        start: 0.3,
        end: 0.45,
        width: 0.15,
        from: Vector3::new(0.3, 0.5, 0.7),
        delta: Vector3::new(0.4, 0.3, -0.3),
    },
    HeightBand {
        name: "grass",
        start: 0.45,
        end: 0.7,
        width: 0.25,
        from: Vector3::new(0.7, 0.8, 0.4),
        delta: Vector3::new(-0.4, 0.15, -0.2),
    },
    HeightBand {
        name: "forest",
        start: 0.7,
        end: 0.85,
        width: 0.15,
        from: Vector3::new(0.3, 0.95, 0.2),
        delta: Vector3::new(-0.1, -0.3, 0.1),
    },
    HeightBand {
        name: "snow",
        start: 0.85,
        end: 1.0,
        width: 0.15,
        from: Vector3::new(0.8, 0.8, 0.8),
        delta: Vector3::new(0.2, 0.2, 0.2),
    },
];

/// Полоса для нормализованной высоты (уже ограниченной 0..=1)
pub fn band_for(normalized: f32) -> &'static HeightBand {
    HEIGHT_BANDS
        .iter()
        .find(|band| normalized < band.end)
        .unwrap_or(&HEIGHT_BANDS[HEIGHT_BANDS.len() - 1])
}

/// Цвет вершины по высоте.
///
/// `height / height_scale` ограничивается диапазоном 0..=1,
/// поэтому ниже 0 всегда глубокая вода, выше `height_scale` всегда белый снег.
pub fn get_color_by_height(height: f32, height_scale: f32) -> Vector3 {
    let normalized = (height / height_scale).clamp(0.0, 1.0);
    band_for(normalized).color_at(normalized)
}
