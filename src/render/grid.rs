// ============================================
// Grid - Опорная сетка на плоскости Y = 0
// ============================================

use wgpu::util::DeviceExt;

use crate::terrain::TerrainVertex;

const GRID_COLOR: [f32; 3] = [0.75, 0.75, 0.75];
const AXIS_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Вершины линий: `slices` клеток по каждой оси, центр в начале координат
pub fn grid_vertices(slices: u32, spacing: f32) -> Vec<TerrainVertex> {
    let half = (slices / 2) as i32;
    let extent = half as f32 * spacing;
    let up = [0.0, 1.0, 0.0];

    let mut vertices = Vec::with_capacity(((2 * half + 1) * 4) as usize);
    for i in -half..=half {
        let offset = i as f32 * spacing;
        let color = if i == 0 { AXIS_COLOR } else { GRID_COLOR };

        vertices.push(TerrainVertex::new([offset, 0.0, -extent], up, color));
        vertices.push(TerrainVertex::new([offset, 0.0, extent], up, color));
        vertices.push(TerrainVertex::new([-extent, 0.0, offset], up, color));
        vertices.push(TerrainVertex::new([extent, 0.0, offset], up, color));
    }
    vertices
}

/// GPU буфер сетки
pub struct GridLines {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GridLines {
    pub fn new(device: &wgpu::Device, slices: u32, spacing: f32) -> Self {
        let vertices = grid_vertices(slices, spacing);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self { vertex_buffer, vertex_count: vertices.len() as u32 }
    }

    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}
