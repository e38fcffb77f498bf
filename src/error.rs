// ============================================
// Errors - Ошибки генерации и конфигурации
// ============================================

use thiserror::Error;

/// Ошибки построения террейна
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds u32 index range")]
    GridTooLarge { width: usize, height: usize },

    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f32),

    #[error("height scale must be non-zero and finite, got {0}")]
    InvalidHeightScale(f32),

    #[error("octaves must be at least 1")]
    ZeroOctaves,

    #[error("{name} must be positive and finite, got {value}")]
    InvalidFractalParam { name: &'static str, value: f32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
