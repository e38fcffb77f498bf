// ============================================
// terrain-gen - Генерация без окна
// ============================================
// terrain-gen [config.json]
// Без аргумента используются размеры демо-сцены 200x200.

use std::env;
use std::error::Error;

use terrain_gen::{Camera, Matrix4, Terrain, TerrainConfig, Vector3};

const ASPECT: f32 = 800.0 / 600.0;

fn load_config() -> Result<TerrainConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            log::info!("Loading terrain config from {}", path);
            Ok(TerrainConfig::from_file(&path)?)
        }
        None => Ok(TerrainConfig::new(200, 200, 200.0, 80.0)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    log::info!(
        "Generating terrain {}x{} (seed {})...",
        config.width,
        config.height,
        config.seed
    );

    let mut terrain = Terrain::with_config(config)?;
    let mesh = terrain.generate();

    let mut camera = Camera::new(Vector3::new(100.0, 80.0, 100.0), Vector3::UNIT_Y);
    camera.look_at_point(Vector3::ZERO);

    let model = Matrix4::identity();
    let view = camera.view_matrix();
    let projection = camera.projection_matrix(ASPECT);
    let mvp = projection * view * model;

    // Центр сетки в NDC (проверка что рельеф в кадре)
    let center = mvp.transform_point(Vector3::ZERO);
    log::debug!("Grid center in NDC: {:?}, fov {:.1} deg", center, camera.zoom);
    log::debug!("Camera front {:?}, yaw {:.1} pitch {:.1}", camera.front(), camera.yaw, camera.pitch);

    log::info!(
        "Mesh: {} vertices, {} indices, {} triangles",
        mesh.vertices.len(),
        mesh.indices.len(),
        mesh.triangle_count()
    );
    if let Some((lo, hi)) = mesh.height_range() {
        log::info!("Height range: {:.2} .. {:.2}", lo, hi);
    }
    log::info!(
        "Buffers: {} KB vertex, {} KB index",
        mesh.vertex_bytes().len() / 1024,
        mesh.index_bytes().len() / 1024
    );

    Ok(())
}
