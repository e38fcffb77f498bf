// ============================================
// Terrain Vertex - Структура вершины
// ============================================

use crate::math::Vector3;

/// Вершина height-field: позиция, нормаль, цвет.
/// `#[repr(C)]` + Pod, чтобы буфер загружался в GPU как есть.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl TerrainVertex {
    /// Шаг вершины в буфере (байт)
    pub const STRIDE: usize = std::mem::size_of::<TerrainVertex>();

    pub fn new(position: Vector3, normal: Vector3, color: Vector3) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            color: color.into(),
        }
    }

    /// Вершина с временной нормалью "вверх" (до пересчёта нормалей)
    pub fn with_up_normal(position: Vector3, color: Vector3) -> Self {
        Self::new(position, Vector3::UNIT_Y, color)
    }

    pub fn position(&self) -> Vector3 {
        self.position.into()
    }

    pub fn normal(&self) -> Vector3 {
        self.normal.into()
    }

    pub fn color(&self) -> Vector3 {
        self.color.into()
    }
}
