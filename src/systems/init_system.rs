// ============================================
// Init System - Инициализация сцены
// ============================================

use std::sync::Arc;
use std::time::Instant;
use ultraviolet::Vec3;
use winit::window::Window;

use crate::core::{DemoConfig, DemoError, SceneResources};
use crate::gui::DiagnosticOverlay;
use crate::player::{Camera, KeyState, MotionDelta, Player};
use crate::render::Renderer;
use crate::simulation::{FrameLimiter, FrameReport, SimulationState};
use crate::terrain::{HeightmapField, HeightmapMeshGenerator, TERRAIN_TINT};

/// Система инициализации
pub struct InitSystem;

impl InitSystem {
    /// Загрузить карту высот и собрать начальное состояние (без GPU)
    pub fn create_resources(config: DemoConfig) -> Result<SceneResources, DemoError> {
        let field = HeightmapField::from_path(&config.terrain.heightmap)?
            .with_clamp_policy(config.terrain.clamp);
        let extent = config.extent()?;
        log::debug!("Heightmap clamp policy: {:?}", field.clamp_policy());

        let terrain_mesh = HeightmapMeshGenerator::generate(&field, &extent, TERRAIN_TINT);
        log::debug!(
            "Terrain mesh: {} vertices, {} triangles",
            terrain_mesh.vertices.len(),
            terrain_mesh.triangle_count()
        );

        let [x, y, z] = config.player.spawn;
        let simulation = SimulationState::new(
            Player::new(x, y, z),
            Arc::new(field),
            extent,
            config.motion(),
        );
        let last_report = FrameReport {
            delta: MotionDelta::default(),
            position: simulation.player().position,
            probe: *simulation.last_probe(),
        };
        log::info!(
            "Player spawned at ({:.2}, {:.2}, {:.2})",
            last_report.position.x,
            last_report.position.y,
            last_report.position.z
        );

        let window = &config.window;
        let camera = Camera::looking_at(
            Vec3::from(config.camera.position),
            Vec3::from(config.camera.target),
            config.camera.fov,
            window.width as f32 / window.height as f32,
        );
        let limiter = FrameLimiter::new(window.target_fps, Instant::now());

        Ok(SceneResources {
            window: None,
            renderer: None,
            overlay: DiagnosticOverlay::disabled(),
            terrain_mesh,
            simulation,
            last_report,
            camera,
            limiter,
            keys: KeyState::default(),
            orbiting: false,
            fatal: None,
            config,
        })
    }

    /// Инициализация рендеринга (вызывается при resumed)
    pub fn init_rendering(resources: &mut SceneResources, window: Arc<Window>) -> Result<(), DemoError> {
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &resources.terrain_mesh,
            resources.config.player.marker_radius,
        ))?;

        let size = renderer.size();
        let overlay_config = &resources.config.overlay;
        resources.overlay = if overlay_config.enabled {
            DiagnosticOverlay::new(
                renderer.device(),
                renderer.surface_format(),
                size.width.max(1),
                size.height.max(1),
                &overlay_config.font,
                overlay_config.size,
            )
        } else {
            DiagnosticOverlay::disabled()
        };

        resources.camera.resize(size.width, size.height);
        resources.window = Some(window);
        resources.renderer = Some(renderer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("terrain_follow_init_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_create_resources_grounds_spawn() {
        let dir = temp_dir("ground");
        let path = dir.join("heightmap.png");
        ImageBuffer::from_pixel(4, 4, Rgba([128u8, 128, 128, 255])).save(&path).unwrap();

        let mut config = DemoConfig::default();
        config.terrain.heightmap = path;
        let resources = InitSystem::create_resources(config).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let expected = 128.0 / 255.0 * 8.0;
        assert!((resources.simulation.player().position.y - expected).abs() < 1e-5);
        assert_eq!(resources.last_report.position, resources.simulation.player().position);
        assert!(!resources.terrain_mesh.is_empty());
        assert!(resources.renderer.is_none());
    }

    #[test]
    fn test_create_resources_missing_heightmap() {
        let mut config = DemoConfig::default();
        config.terrain.heightmap = "definitely/not/here.png".into();
        let err = InitSystem::create_resources(config).err().unwrap();
        assert!(matches!(err, DemoError::Heightmap(_)));
    }
}
