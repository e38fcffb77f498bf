// ============================================
// Terrain Config - Параметры генерации
// ============================================
// Загружается из JSON, недостающие поля берутся из Default

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

/// Фиксированный сид генератора
pub const DEFAULT_SEED: u32 = 12345;

/// Параметры построения террейна
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Число вершин по X
    pub width: usize,
    /// Число вершин по Z
    pub height: usize,
    /// Размер сетки в мировых единицах
    pub scale: f32,
    /// Множитель высоты (fbm 0..1 -> 0..height_scale)
    pub height_scale: f32,
    pub seed: u32,

    /// Частота сэмплирования шума относительно мировых координат
    pub frequency: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,

    /// Сэмплировать высоты на пуле rayon (результат идентичен последовательному)
    pub parallel_sampling: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            scale: 1.0,
            height_scale: 50.0,
            seed: DEFAULT_SEED,
            frequency: 0.8,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            parallel_sampling: false,
        }
    }
}

impl TerrainConfig {
    /// Конфиг с размерами сетки, остальное по умолчанию
    pub fn new(width: usize, height: usize, scale: f32, height_scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
            height_scale,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel_sampling(mut self, enabled: bool) -> Self {
        self.parallel_sampling = enabled;
        self
    }

    /// Загрузить конфиг из JSON строки (с валидацией)
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить конфиг из файла
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Проверка предусловий генерации
    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height < 2 {
            return Err(TerrainError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TerrainError::InvalidScale(self.scale));
        }
        if !self.height_scale.is_finite() || self.height_scale == 0.0 {
            return Err(TerrainError::InvalidHeightScale(self.height_scale));
        }
        if self.octaves == 0 {
            return Err(TerrainError::ZeroOctaves);
        }
        for (name, value) in [
            ("frequency", self.frequency),
            ("persistence", self.persistence),
            ("lacunarity", self.lacunarity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TerrainError::InvalidFractalParam { name, value });
            }
        }
        // Индексы u32
        if self.width.checked_mul(self.height).map_or(true, |n| n > u32::MAX as usize) {
            return Err(TerrainError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
