// ============================================
// Terrain Module - Процедурная генерация рельефа
// ============================================
// Шум Перлина -> сетка высот -> цветной меш с нормалями

pub mod config;
pub mod generation;
pub mod mesh;
mod builder;

// Re-exports
pub use builder::Terrain;
pub use config::{TerrainConfig, DEFAULT_SEED};
pub use generation::{get_color_by_height, PerlinNoise};
pub use mesh::{Mesh, TerrainVertex};
