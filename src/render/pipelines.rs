use crate::terrain::TerrainVertex;
use crate::player::MarkerVertex;

use super::depth::DEPTH_FORMAT;

pub struct Pipelines {
    pub terrain: wgpu::RenderPipeline,
    pub grid: wgpu::RenderPipeline,
    pub marker: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        uniform_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/scene.wgsl").into()),
        });

        let marker_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Marker Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/marker.wgsl").into()),
        });

        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let marker_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Marker Layout"),
            bind_group_layouts: &[uniform_layout, model_layout],
            push_constant_ranges: &[],
        });

        // Террейн видно и снизу при облёте камерой
        let terrain = create_pipeline(
            device,
            "Terrain Pipeline",
            &scene_layout,
            &scene_shader,
            "fs_main",
            TerrainVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            None,
        );

        let grid = create_pipeline(
            device,
            "Grid Pipeline",
            &scene_layout,
            &scene_shader,
            "fs_flat",
            TerrainVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            None,
        );

        let marker = create_pipeline(
            device,
            "Marker Pipeline",
            &marker_layout,
            &marker_shader,
            "fs_main",
            MarkerVertex::desc(),
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        );

        Self { terrain, grid, marker }
    }
}

#[allow(clippy::too_many_arguments)]
fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fragment_entry: &str,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fragment_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Greater, // Reversed-Z
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}
