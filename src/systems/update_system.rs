// ============================================
// Update System - Шаг симуляции
// ============================================

use crate::core::SceneResources;
use crate::gui::overlay_text;
use crate::player::MotionDelta;

/// Система обновления
pub struct UpdateSystem;

impl UpdateSystem {
    /// Один кадр: ввод -> X/Z -> высота
    pub fn update(resources: &mut SceneResources) {
        let (simulation, report) = resources.simulation.clone().update(&resources.keys);
        resources.simulation = simulation;
        resources.last_report = report;

        let level = Self::diagnostics_level(resources.overlay.is_visible(), &report.delta);
        if log::log_enabled!(level) {
            for line in overlay_text(&report) {
                log::log!(level, "{line}");
            }
        }
    }

    /// Без экранного оверлея значения идут в info, но только когда игрок сдвинулся
    pub fn diagnostics_level(overlay_visible: bool, delta: &MotionDelta) -> log::Level {
        if overlay_visible || delta.is_zero() {
            log::Level::Trace
        } else {
            log::Level::Info
        }
    }
}
