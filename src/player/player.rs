// ============================================
// Player Entity - Маркер игрока на террейне
// ============================================
// X/Z двигает ввод, Y каждый кадр перезаписывает сэмплер высоты.

use ultraviolet::Vec3;

use super::motion::MotionDelta;

/// Точка появления по умолчанию
pub const DEFAULT_SPAWN: [f32; 3] = [0.0, 0.5, 8.0];

/// Игрок: одна точка в мире
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Позиция (y выводится из террейна)
    pub position: Vec3,
}

impl Player {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { position: Vec3::new(x, y, z) }
    }

    /// Сдвинуть по X/Z, Y не меняется
    pub fn moved(self, delta: MotionDelta) -> Self {
        Self {
            position: Vec3::new(
                self.position.x + delta.dx,
                self.position.y,
                self.position.z + delta.dz,
            ),
        }
    }

    /// Поставить на высоту террейна
    pub fn grounded(self, y: f32) -> Self {
        Self { position: Vec3::new(self.position.x, y, self.position.z) }
    }
}

impl Default for Player {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_SPAWN;
        Self::new(x, y, z)
    }
}
