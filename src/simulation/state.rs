// ============================================
// Simulation State - Состояние и шаг кадра
// ============================================
// Порядок внутри кадра фиксирован:
//   ввод -> смещение X/Z -> высота по новым X/Z
// Каждая стадия - чистая функция.

use std::sync::Arc;

use ultraviolet::Vec3;

use crate::player::{InputMotion, KeyState, MotionDelta, Player};
use crate::terrain::{probe_height, HeightProbe, HeightSource, WorldExtent};

/// Итог одного кадра (для оверлея и логов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub delta: MotionDelta,
    pub position: Vec3,
    pub probe: HeightProbe,
}

/// Стадия 1: клавиши -> смещение
#[inline]
pub fn resolve_input(motion: &InputMotion, keys: &KeyState) -> MotionDelta {
    motion.compute_delta(keys)
}

/// Стадия 2: смещение X/Z
#[inline]
pub fn apply_motion(player: Player, delta: MotionDelta) -> Player {
    player.moved(delta)
}

/// Стадия 3: высота из террейна по уже сдвинутым X/Z
pub fn derive_height(player: Player, terrain: &dyn HeightSource, extent: &WorldExtent) -> (Player, HeightProbe) {
    let probe = probe_height(player.position.x, player.position.z, terrain, extent);
    (player.grounded(probe.world_y), probe)
}

/// Всё изменяемое состояние сцены + неизменяемый террейн
#[derive(Clone)]
pub struct SimulationState {
    player: Player,
    terrain: Arc<dyn HeightSource>,
    extent: WorldExtent,
    motion: InputMotion,
    last_probe: HeightProbe,
}

impl SimulationState {
    /// Игрок сразу ставится на террейн: Y спавна не используется
    pub fn new(
        spawn: Player,
        terrain: Arc<dyn HeightSource>,
        extent: WorldExtent,
        motion: InputMotion,
    ) -> Self {
        let (player, last_probe) = derive_height(spawn, terrain.as_ref(), &extent);
        Self { player, terrain, extent, motion, last_probe }
    }

    /// Один кадр
    pub fn update(self, keys: &KeyState) -> (Self, FrameReport) {
        let delta = resolve_input(&self.motion, keys);
        let moved = apply_motion(self.player, delta);
        let (player, probe) = derive_height(moved, self.terrain.as_ref(), &self.extent);

        let report = FrameReport { delta, position: player.position, probe };
        (Self { player, last_probe: probe, ..self }, report)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn extent(&self) -> &WorldExtent {
        &self.extent
    }

    pub fn motion(&self) -> &InputMotion {
        &self.motion
    }

    /// Результат последнего сэмпла высоты
    pub fn last_probe(&self) -> &HeightProbe {
        &self.last_probe
    }
}

impl std::fmt::Debug for SimulationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationState")
            .field("player", &self.player)
            .field("extent", &self.extent)
            .field("motion", &self.motion)
            .field("last_probe", &self.last_probe)
            .finish_non_exhaustive()
    }
}
