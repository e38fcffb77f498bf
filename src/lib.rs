// ============================================
// terrain-gen - Процедурный генератор рельефа
// ============================================
// Модули:
// - math    - Vector3 / Matrix4 / Quaternion
// - terrain - шум Перлина, цвет по высоте, построение меша
// - player  - свободная камера от первого лица
// - error   - типизированные ошибки

//! Детерминированный генератор рельефа на шуме Перлина.
//!
//! ```no_run
//! use terrain_gen::Terrain;
//!
//! let mut terrain = Terrain::new(200, 200, 200.0, 80.0)?;
//! let mesh = terrain.generate();
//! println!("{} vertices", mesh.vertices.len());
//! # Ok::<(), terrain_gen::TerrainError>(())
//! ```

pub mod error;
pub mod math;
pub mod player;
pub mod terrain;

// Re-exports
pub use error::{Result, TerrainError};
pub use math::{Matrix4, Quaternion, Vector3};
pub use player::{Camera, InputSnapshot};
pub use terrain::{Mesh, PerlinNoise, Terrain, TerrainConfig, TerrainVertex, DEFAULT_SEED};
