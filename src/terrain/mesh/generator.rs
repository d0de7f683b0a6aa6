// ============================================
// Heightmap Mesh - Меш террейна из карты высот
// ============================================
// Одна вершина на пиксель, два треугольника на ячейку.
// Высота вершины = серое пикселя * высота мира,
// шаг сетки = размер мира / (пикселей - 1).

use ultraviolet::Vec3;

use crate::terrain::extent::WorldExtent;
use crate::terrain::heightmap::HeightmapField;
use super::vertex::TerrainVertex;

/// Цвет-множитель для серого (как GRAY у исходной сцены)
pub const TERRAIN_TINT: [f32; 3] = [130.0 / 255.0, 130.0 / 255.0, 130.0 / 255.0];

/// Готовый меш террейна (CPU)
#[derive(Debug, Default, Clone)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Генератор меша по карте высот
pub struct HeightmapMeshGenerator;

impl HeightmapMeshGenerator {
    /// Построить меш. Карта уже 2 пикселей по любой оси даёт пустой меш.
    pub fn generate(field: &HeightmapField, extent: &WorldExtent, tint: [f32; 3]) -> TerrainMesh {
        let (w, h) = (field.width(), field.height());
        if w < 2 || h < 2 {
            log::warn!("Heightmap {}x{} is too small to build a mesh", w, h);
            return TerrainMesh::default();
        }

        let size = extent.size();
        let origin = extent.origin();
        let step_x = size.x / (w - 1) as f32;
        let step_z = size.z / (h - 1) as f32;

        let height_at = |col: i64, row: i64| -> f32 {
            let col = col.clamp(0, w as i64 - 1) as u32;
            let row = row.clamp(0, h as i64 - 1) as u32;
            field.gray_at(col, row) * size.y
        };

        let mut vertices = Vec::with_capacity((w * h) as usize);
        for row in 0..h as i64 {
            for col in 0..w as i64 {
                let y = height_at(col, row);

                // Нормаль через центральные разности (на краях - односторонние)
                let (l, r) = (height_at(col - 1, row), height_at(col + 1, row));
                let (b, f) = (height_at(col, row - 1), height_at(col, row + 1));
                let span_x = step_x * ((col + 1).min(w as i64 - 1) - (col - 1).max(0)) as f32;
                let span_z = step_z * ((row + 1).min(h as i64 - 1) - (row - 1).max(0)) as f32;
                let normal = Vec3::new(-(r - l) / span_x, 1.0, -(f - b) / span_z).normalized();

                let gray = field.gray_at(col as u32, row as u32);
                vertices.push(TerrainVertex::new(
                    [
                        origin.x + col as f32 * step_x,
                        origin.y + y,
                        origin.z + row as f32 * step_z,
                    ],
                    normal.into(),
                    [gray * tint[0], gray * tint[1], gray * tint[2]],
                ));
            }
        }

        let mut indices = Vec::with_capacity(((w - 1) * (h - 1) * 6) as usize);
        for row in 0..h - 1 {
            for col in 0..w - 1 {
                let i = row * w + col;
                // Нормаль треугольников смотрит вверх (+Y)
                indices.extend_from_slice(&[i, i + w, i + 1]);
                indices.extend_from_slice(&[i + 1, i + w, i + w + 1]);
            }
        }

        TerrainMesh { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, value: u8) -> HeightmapField {
        HeightmapField::from_red_channel(width, height, vec![value; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_mesh_counts_and_footprint() {
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();
        let mesh = HeightmapMeshGenerator::generate(&flat(5, 3, 255), &extent, [1.0; 3]);

        assert_eq!(mesh.vertices.len(), 15);
        assert_eq!(mesh.indices.len(), 4 * 2 * 6);
        assert_eq!(mesh.triangle_count(), 16);

        let first = mesh.vertices.first().unwrap().position;
        let last = mesh.vertices.last().unwrap().position;
        assert_eq!(first, [-8.0, 8.0, -8.0]);
        assert_eq!(last, [8.0, 8.0, 8.0]);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_flat_map_faces_up() {
        let extent = WorldExtent::centered(4.0, 2.0, 4.0).unwrap();
        let mesh = HeightmapMeshGenerator::generate(&flat(3, 3, 0), &extent, TERRAIN_TINT);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
            assert_eq!(v.color, [0.0; 3]);
        }

        // Каждый треугольник смотрит вверх
        let pos = |i: u32| Vec3::from(mesh.vertices[i as usize].position);
        for tri in mesh.indices.chunks(3) {
            let n = (pos(tri[1]) - pos(tri[0])).cross(pos(tri[2]) - pos(tri[0]));
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn test_slope_normal_leans_downhill() {
        // Высота растёт по X
        let red = vec![0, 128, 255, 0, 128, 255];
        let field = HeightmapField::from_red_channel(3, 2, red).unwrap();
        let extent = WorldExtent::centered(2.0, 2.0, 2.0).unwrap();
        let mesh = HeightmapMeshGenerator::generate(&field, &extent, [1.0; 3]);
        let n = mesh.vertices[1].normal;
        assert!(n[0] < 0.0);
        assert!(n[1] > 0.0);
        assert!(n[2].abs() < 1e-6);
    }

    #[test]
    fn test_too_small_map_yields_empty_mesh() {
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();
        assert!(HeightmapMeshGenerator::generate(&flat(1, 8, 10), &extent, TERRAIN_TINT).is_empty());
        assert!(HeightmapMeshGenerator::generate(&flat(8, 1, 10), &extent, TERRAIN_TINT).is_empty());
    }
}
