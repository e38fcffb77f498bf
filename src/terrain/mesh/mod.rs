// ============================================
// Mesh - Вершины + индексы треугольников
// ============================================

mod vertex;

pub use vertex::TerrainVertex;

use crate::math::Vector3;

/// Треугольная сетка террейна
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Минимальная и максимальная высота (y), None для пустой сетки
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.position[1]).fold(None, |acc, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
    }

    /// Вершинный буфер для загрузки в GPU
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Два треугольника на ячейку сетки `width` x `height`:
    /// (a, c, b) и (b, c, d), где a-b верхнее ребро, c-d нижнее.
    pub fn push_grid_indices(&mut self, width: usize, height: usize) {
        if width < 2 || height < 2 {
            return;
        }

        self.indices.reserve(6 * (width - 1) * (height - 1));
        let w = width as u32;

        for z in 0..(height - 1) as u32 {
            for x in 0..(width - 1) as u32 {
                let a = z * w + x;
                let b = z * w + x + 1;
                let c = (z + 1) * w + x;
                let d = (z + 1) * w + x + 1;

                self.indices.extend_from_slice(&[a, c, b]);
                self.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    /// Сглаженные нормали: сумма единичных нормалей граней
    /// (без весов по площади) с последующей нормализацией.
    pub fn compute_normals(&mut self) {
        let mut accum = vec![Vector3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);

            let v0 = self.vertices[i0].position();
            let v1 = self.vertices[i1].position();
            let v2 = self.vertices[i2].position();

            let face = (v1 - v0).cross(v2 - v0).normalized();

            accum[i0] += face;
            accum[i1] += face;
            accum[i2] += face;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(accum) {
            vertex.normal = normal.normalized().into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_grid(width: usize, height: usize) -> Mesh {
        let mut mesh = Mesh::new();
        for z in 0..height {
            for x in 0..width {
                mesh.vertices.push(TerrainVertex::with_up_normal(
                    Vector3::new(x as f32, 0.0, z as f32),
                    Vector3::ONE,
                ));
            }
        }
        mesh.push_grid_indices(width, height);
        mesh
    }

    #[test]
    fn test_grid_index_count_and_order() {
        let mesh = flat_grid(3, 2);
        assert_eq!(mesh.indices.len(), 6 * 2 * 1);
        assert_eq!(&mesh.indices[..6], &[0, 3, 1, 1, 3, 4]);
        assert_eq!(&mesh.indices[6..], &[1, 4, 2, 2, 4, 5]);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        // Обход (a, c, b) при +z "вниз" даёт нормаль +Y
        let mut mesh = flat_grid(4, 3);
        for v in &mut mesh.vertices {
            v.normal = [0.0; 3];
        }
        mesh.compute_normals();
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_normals_are_unweighted_average() {
        // Треугольники разной площади дают равный вклад
        let mut mesh = Mesh::new();
        let p = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 10.0, 0.0),
        ];
        for pos in p {
            mesh.vertices.push(TerrainVertex::with_up_normal(pos, Vector3::ONE));
        }
        // Маленький треугольник в плоскости XZ (нормаль +Y),
        // большой в плоскости XY (нормаль +Z)
        mesh.indices = vec![0, 1, 2, 0, 2, 3];
        mesh.compute_normals();

        let n0 = mesh.vertices[0].normal();
        let expected = Vector3::new(0.0, 1.0, 1.0).normalized();
        assert!((n0 - expected).length() < 1e-6, "{:?}", n0);
    }

    #[test]
    fn test_height_range_and_bytes() {
        let mut mesh = flat_grid(2, 2);
        assert_eq!(mesh.height_range(), Some((0.0, 0.0)));
        mesh.vertices[3].position[1] = 5.0;
        mesh.vertices[0].position[1] = -1.0;
        assert_eq!(mesh.height_range(), Some((-1.0, 5.0)));

        assert_eq!(mesh.vertex_bytes().len(), 4 * TerrainVertex::STRIDE);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);

        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.height_range(), None);
    }
}
