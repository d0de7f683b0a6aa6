use std::sync::Arc;

use crate::player::{Camera, MarkerModel, Player};
use crate::terrain::{TerrainMesh, TerrainModel};

use super::bind_groups::CoreBindGroups;
use super::depth::create_depth_texture;
use super::grid::GridLines;
use super::pipelines::Pipelines;
use super::uniforms::Uniforms;

/// Светлый фон (линейный цвет)
const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.91, g: 0.91, b: 0.91, a: 1.0 };

/// Ошибки инициализации GPU
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Основное состояние рендерера (GPU ресурсы)
pub struct RendererState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
}

/// Объекты сцены на GPU
struct SceneObjects {
    terrain: Option<TerrainModel>,
    grid: GridLines,
    marker: MarkerModel,
}

pub struct Renderer {
    state: RendererState,
    pipelines: Pipelines,
    core_bind_groups: CoreBindGroups,
    depth_texture: wgpu::TextureView,
    scene: SceneObjects,
}

impl Renderer {
    pub async fn new(
        window: Arc<winit::window::Window>,
        terrain_mesh: &TerrainMesh,
        marker_radius: f32,
    ) -> Result<Self, RenderError> {
        let state = init_gpu(window).await?;

        let core_bind_groups = CoreBindGroups::new(&state.device);
        let model_layout = MarkerModel::create_bind_group_layout(&state.device);
        let pipelines = Pipelines::new(
            &state.device,
            state.config.format,
            &core_bind_groups.layout,
            &model_layout,
        );
        let depth_texture = create_depth_texture(&state.device, &state.config);

        let terrain = TerrainModel::upload(&state.device, terrain_mesh);
        if terrain.is_none() {
            log::warn!("Terrain mesh is empty, only the marker and grid will be drawn");
        }

        let scene = SceneObjects {
            terrain,
            grid: GridLines::new(&state.device, 20, 1.0),
            marker: MarkerModel::new(&state.device, &model_layout, marker_radius),
        };

        Ok(Self { state, pipelines, core_bind_groups, depth_texture, scene })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.state.size = new_size;
            self.state.config.width = new_size.width;
            self.state.config.height = new_size.height;
            self.state.surface.configure(&self.state.device, &self.state.config);
            self.depth_texture = create_depth_texture(&self.state.device, &self.state.config);
        }
    }

    /// Обновить uniforms камеры и матрицу маркера
    pub fn update(&mut self, camera: &Camera, player: &Player) {
        let mut uniforms = Uniforms::new();
        uniforms.update(camera);
        self.state.queue.write_buffer(
            &self.core_bind_groups.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniforms]),
        );

        self.scene.marker.update(&self.state.queue, player);
    }

    /// Рендерит сцену и затем оверлей поверх
    pub fn render<F>(&mut self, overlay: F) -> Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &mut wgpu::CommandEncoder, &wgpu::TextureView, &wgpu::Queue),
    {
        let output = self.state.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0.0), // Reversed-Z: clear to 0 instead of 1
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.core_bind_groups.uniform_bind_group, &[]);

            // Marker
            render_pass.set_pipeline(&self.pipelines.marker);
            self.scene.marker.render(&mut render_pass);

            // Terrain
            if let Some(terrain) = &self.scene.terrain {
                render_pass.set_pipeline(&self.pipelines.terrain);
                terrain.render(&mut render_pass);
            }

            // Grid
            render_pass.set_pipeline(&self.pipelines.grid);
            self.scene.grid.render(&mut render_pass);
        }

        overlay(&self.state.device, &mut encoder, &view, &self.state.queue);

        self.state.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.state.size
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.state.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.state.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.state.config.format
    }
}

/// Инициализация GPU устройства и surface
async fn init_gpu(window: Arc<winit::window::Window>) -> Result<RendererState, RenderError> {
    let size = window.inner_size();
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let surface = instance.create_surface(window)?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("GPU Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await?;

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| surface_caps.formats.first())
        .copied()
        .ok_or(RenderError::NoSurfaceFormat)?;

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    log::info!("GPU adapter: {}", adapter.get_info().name);

    Ok(RendererState { surface, device, queue, config, size })
}
