// ============================================
// Terrain Builder - Сетка высот -> меш
// ============================================
// Порядок генерации:
// 1. Сэмплирование высот fbm по сетке (z внешний, x внутренний)
// 2. Цвет по высоте
// 3. Два треугольника на ячейку
// 4. Сглаженные нормали

use rayon::prelude::*;

use crate::error::Result;
use crate::math::Vector3;

use super::config::{TerrainConfig, DEFAULT_SEED};
use super::generation::{get_color_by_height, PerlinNoise};
use super::mesh::{Mesh, TerrainVertex};

/// Процедурный террейн: параметры, источник шума и последний построенный меш
#[derive(Debug, Clone)]
pub struct Terrain {
    config: TerrainConfig,
    noise: PerlinNoise,
    mesh: Mesh,
}

impl Terrain {
    /// Террейн с фиксированным сидом [`DEFAULT_SEED`]
    pub fn new(width: usize, height: usize, scale: f32, height_scale: f32) -> Result<Self> {
        Self::with_config(TerrainConfig::new(width, height, scale, height_scale).with_seed(DEFAULT_SEED))
    }

    pub fn with_config(config: TerrainConfig) -> Result<Self> {
        config.validate()?;

        let noise = PerlinNoise::new(config.seed);
        log::debug!(
            "Terrain {}x{} scale={} height_scale={} seed={}",
            config.width,
            config.height,
            config.scale,
            config.height_scale,
            config.seed
        );

        Ok(Self {
            config,
            noise,
            mesh: Mesh::new(),
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn noise(&self) -> &PerlinNoise {
        &self.noise
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    pub fn height_scale(&self) -> f32 {
        self.config.height_scale
    }

    /// Последний построенный меш (пустой до первого `generate`)
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    /// Цвет для высоты в мировых единицах
    pub fn color_by_height(&self, height: f32) -> Vector3 {
        get_color_by_height(height, self.config.height_scale)
    }

    /// Высота fbm в мировой точке сетки (до центрирования)
    #[inline]
    pub fn sample_height(&self, x_coord: f32, z_coord: f32) -> f32 {
        let c = &self.config;
        let h = self.noise.fbm(
            x_coord * c.frequency,
            z_coord * c.frequency,
            0.0,
            c.octaves,
            c.persistence,
            c.lacunarity,
        );
        h * c.height_scale
    }

    /// Вершина узла сетки (x, z) с нормалью вверх
    fn build_vertex(&self, x: usize, z: usize) -> TerrainVertex {
        let c = &self.config;
        let x_coord = x as f32 / (c.width - 1) as f32 * c.scale;
        let z_coord = z as f32 / (c.height - 1) as f32 * c.scale;
        let half = c.scale * 0.5;

        let h = self.sample_height(x_coord, z_coord);
        let position = Vector3::new(x_coord - half, h, z_coord - half);

        TerrainVertex::with_up_normal(position, self.color_by_height(h))
    }

    /// Построить меш заново. Повторный вызов даёт тот же результат.
    pub fn generate(&mut self) -> &Mesh {
        let (width, height) = (self.config.width, self.config.height);
        let this = &*self;

        let vertices: Vec<TerrainVertex> = if this.config.parallel_sampling {
            // collect() у индексированного итератора сохраняет порядок сетки
            (0..width * height)
                .into_par_iter()
                .map(|i| this.build_vertex(i % width, i / width))
                .collect()
        } else {
            let mut out = Vec::with_capacity(width * height);
            for z in 0..height {
                for x in 0..width {
                    out.push(this.build_vertex(x, z));
                }
            }
            out
        };

        let mut mesh = Mesh::with_capacity(vertices.len(), 6 * (width - 1) * (height - 1));
        mesh.vertices = vertices;
        mesh.push_grid_indices(width, height);
        mesh.compute_normals();

        log::debug!(
            "Terrain mesh: {} vertices, {} indices ({} triangles)",
            mesh.vertices.len(),
            mesh.indices.len(),
            mesh.triangle_count()
        );
        if let Some((lo, hi)) = mesh.height_range() {
            log::info!("Terrain generated: height range {:.2}..{:.2}", lo, hi);
        }

        self.mesh = mesh;
        &self.mesh
    }
}
