// ============================================
// Render System - Система рендеринга
// ============================================

use winit::event_loop::ActiveEventLoop;

use crate::core::SceneResources;

/// Система рендеринга
pub struct RenderSystem;

impl RenderSystem {
    pub fn render(resources: &mut SceneResources, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut resources.renderer else { return };

        renderer.update(&resources.camera, resources.simulation.player());

        let overlay = &mut resources.overlay;
        let report = &resources.last_report;
        let result = renderer.render(|device, encoder, view, queue| {
            overlay.render(device, encoder, view, queue, report);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(renderer.size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {e:?}"),
        }
    }
}
