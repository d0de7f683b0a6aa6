// ============================================
// Player Marker - Меш и рендеринг маркера игрока
// ============================================
// Маркер - сфера, центр которой стоит в позиции игрока

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use ultraviolet::Mat4;

use super::player::Player;

/// Радиус маркера по умолчанию
pub const DEFAULT_MARKER_RADIUS: f32 = 0.125;

/// Красный цвет маркера
pub const MARKER_COLOR: [f32; 3] = [230.0 / 255.0, 41.0 / 255.0, 55.0 / 255.0];

/// Вершина маркера
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MarkerVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl MarkerVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: 24,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Генератор меша маркера
pub struct MarkerMeshGenerator;

impl MarkerMeshGenerator {
    /// UV-сфера единичного радиуса
    pub fn create_sphere_mesh(rings: u32, slices: u32, color: [f32; 3]) -> (Vec<MarkerVertex>, Vec<u32>) {
        let rings = rings.max(2);
        let slices = slices.max(3);

        let mut vertices = Vec::with_capacity(((rings + 1) * (slices + 1)) as usize);
        let mut indices = Vec::with_capacity((rings * slices * 6) as usize);

        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * std::f32::consts::PI;
            let (st, ct) = theta.sin_cos();
            for slice in 0..=slices {
                let phi = slice as f32 / slices as f32 * std::f32::consts::TAU;
                let (sp, cp) = phi.sin_cos();
                let p = [st * cp, ct, st * sp];
                vertices.push(MarkerVertex { position: p, normal: p, color });
            }
        }

        let stride = slices + 1;
        for ring in 0..rings {
            for slice in 0..slices {
                let a = ring * stride + slice;
                let b = a + stride;
                // Снаружи сферы обход против часовой
                indices.extend_from_slice(&[a, a + 1, b]);
                indices.extend_from_slice(&[a + 1, b + 1, b]);
            }
        }

        (vertices, indices)
    }
}

/// GPU буферы маркера
pub struct MarkerModel {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,

    // Uniform буфер для матрицы модели
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,

    radius: f32,
}

impl MarkerModel {
    pub fn new(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        radius: f32,
    ) -> Self {
        let (vertices, indices) = MarkerMeshGenerator::create_sphere_mesh(16, 16, MARKER_COLOR);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let model_matrix: [[f32; 4]; 4] = Mat4::from_scale(radius).into();
        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Model Buffer"),
            contents: bytemuck::cast_slice(&model_matrix),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Marker Model Bind Group"),
            layout: bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            model_buffer,
            model_bind_group,
            radius,
        }
    }

    /// Обновить матрицу модели на основе позиции игрока
    pub fn update(&self, queue: &wgpu::Queue, player: &Player) {
        let model_matrix = Mat4::from_translation(player.position) * Mat4::from_scale(self.radius);
        let matrix_data: [[f32; 4]; 4] = model_matrix.into();
        queue.write_buffer(&self.model_buffer, 0, bytemuck::cast_slice(&matrix_data));
    }

    /// Рендеринг модели
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_bind_group(1, &self.model_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Создать bind group layout для матрицы модели
    pub fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Marker Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_mesh_is_unit_and_closed() {
        let (vertices, indices) = MarkerMeshGenerator::create_sphere_mesh(8, 12, MARKER_COLOR);
        assert_eq!(vertices.len(), 9 * 13);
        assert_eq!(indices.len(), 8 * 12 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        for v in &vertices {
            let [x, y, z] = v.position;
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_mesh_clamps_resolution() {
        let (vertices, indices) = MarkerMeshGenerator::create_sphere_mesh(0, 0, MARKER_COLOR);
        assert_eq!(vertices.len(), 3 * 4);
        assert_eq!(indices.len(), 2 * 3 * 6);
    }
}
