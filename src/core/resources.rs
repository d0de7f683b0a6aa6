// ============================================
// Resources - Общие ресурсы сцены
// ============================================

use std::sync::Arc;
use winit::window::Window;

use crate::gui::DiagnosticOverlay;
use crate::player::{Camera, KeyState};
use crate::render::Renderer;
use crate::simulation::{FrameLimiter, FrameReport, SimulationState};
use crate::terrain::TerrainMesh;

use super::config::DemoConfig;
use super::error::DemoError;

/// Все ресурсы сцены в одном месте
pub struct SceneResources {
    pub config: DemoConfig,

    // Window & Rendering
    pub window: Option<Arc<Window>>,
    pub renderer: Option<Renderer>,
    pub overlay: DiagnosticOverlay,
    /// CPU меш, загружается на GPU при появлении окна
    pub terrain_mesh: TerrainMesh,

    // Simulation
    pub simulation: SimulationState,
    pub last_report: FrameReport,

    // Camera
    pub camera: Camera,

    // Timing
    pub limiter: FrameLimiter,

    // Input state
    pub keys: KeyState,
    pub orbiting: bool,

    /// Ошибка, из-за которой цикл был остановлен
    pub fatal: Option<DemoError>,
}
