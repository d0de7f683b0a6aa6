// ============================================
// Input Motion - Клавиши -> смещение за кадр
// ============================================
// Фиксированный шаг за кадр, без ускорения. Y не трогаем:
// высоту всегда выставляет сэмплер.

use winit::keyboard::KeyCode;

/// Шаг за кадр по умолчанию (мировые единицы)
pub const DEFAULT_STEP: f32 = 0.2;

/// Состояние направленных клавиш (зажата / отпущена)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub right: bool,
    pub left: bool,
    pub down: bool,
    pub up: bool,
}

impl KeyState {
    /// Обновить состояние по событию клавиатуры.
    /// Возвращает true если клавиша направленная.
    pub fn process_keyboard(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::ArrowRight | KeyCode::KeyD => self.right = pressed,
            KeyCode::ArrowLeft | KeyCode::KeyA => self.left = pressed,
            KeyCode::ArrowDown | KeyCode::KeyS => self.down = pressed,
            KeyCode::ArrowUp | KeyCode::KeyW => self.up = pressed,
            _ => return false,
        }
        true
    }

    /// Отпустить всё (потеря фокуса окна)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.right || self.left || self.down || self.up
    }
}

/// Как совмещать несколько зажатых клавиш
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Одна ось за кадр: вправо, влево, вниз, вверх (первая зажатая побеждает)
    #[default]
    PriorityChain,
    /// Оси независимы, противоположные клавиши гасят друг друга
    Diagonal,
}

/// Смещение по X/Z за кадр
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionDelta {
    pub dx: f32,
    pub dz: f32,
}

impl MotionDelta {
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dz == 0.0
    }
}

/// Перевод клавиш в смещение
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMotion {
    pub step: f32,
    pub policy: MotionPolicy,
}

impl Default for InputMotion {
    fn default() -> Self {
        Self { step: DEFAULT_STEP, policy: MotionPolicy::default() }
    }
}

impl InputMotion {
    pub fn new(step: f32, policy: MotionPolicy) -> Self {
        Self { step, policy }
    }

    pub fn compute_delta(&self, keys: &KeyState) -> MotionDelta {
        let step = self.step;
        match self.policy {
            MotionPolicy::PriorityChain => {
                if keys.right {
                    MotionDelta { dx: step, dz: 0.0 }
                } else if keys.left {
                    MotionDelta { dx: -step, dz: 0.0 }
                } else if keys.down {
                    MotionDelta { dx: 0.0, dz: step }
                } else if keys.up {
                    MotionDelta { dx: 0.0, dz: -step }
                } else {
                    MotionDelta::default()
                }
            }
            MotionPolicy::Diagonal => MotionDelta {
                dx: axis(keys.right, keys.left) * step,
                dz: axis(keys.down, keys.up) * step,
            },
        }
    }
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    positive as i8 as f32 - negative as i8 as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(right: bool, left: bool, down: bool, up: bool) -> KeyState {
        KeyState { right, left, down, up }
    }

    #[test]
    fn test_single_keys() {
        let m = InputMotion::default();
        assert_eq!(m.compute_delta(&keys(true, false, false, false)), MotionDelta { dx: 0.2, dz: 0.0 });
        assert_eq!(m.compute_delta(&keys(false, true, false, false)), MotionDelta { dx: -0.2, dz: 0.0 });
        assert_eq!(m.compute_delta(&keys(false, false, true, false)), MotionDelta { dx: 0.0, dz: 0.2 });
        assert_eq!(m.compute_delta(&keys(false, false, false, true)), MotionDelta { dx: 0.0, dz: -0.2 });
        assert!(m.compute_delta(&KeyState::default()).is_zero());
    }

    #[test]
    fn test_priority_chain_order() {
        let m = InputMotion::default();
        // вправо + вниз: только вправо
        assert_eq!(m.compute_delta(&keys(true, false, true, false)), MotionDelta { dx: 0.2, dz: 0.0 });
        // вправо + влево: вправо побеждает, а не гасится
        assert_eq!(m.compute_delta(&keys(true, true, false, false)), MotionDelta { dx: 0.2, dz: 0.0 });
        // влево + вверх: только влево
        assert_eq!(m.compute_delta(&keys(false, true, false, true)), MotionDelta { dx: -0.2, dz: 0.0 });
        // вниз + вверх: вниз
        assert_eq!(m.compute_delta(&keys(false, false, true, true)), MotionDelta { dx: 0.0, dz: 0.2 });
        // всё сразу
        assert_eq!(m.compute_delta(&keys(true, true, true, true)), MotionDelta { dx: 0.2, dz: 0.0 });
    }

    #[test]
    fn test_diagonal_policy() {
        let m = InputMotion::new(0.5, MotionPolicy::Diagonal);
        assert_eq!(m.compute_delta(&keys(true, false, true, false)), MotionDelta { dx: 0.5, dz: 0.5 });
        assert_eq!(m.compute_delta(&keys(false, true, false, true)), MotionDelta { dx: -0.5, dz: -0.5 });
        assert!(m.compute_delta(&keys(true, true, true, true)).is_zero());
    }

    #[test]
    fn test_process_keyboard() {
        let mut state = KeyState::default();
        assert!(state.process_keyboard(KeyCode::ArrowRight, true));
        assert!(state.process_keyboard(KeyCode::KeyW, true));
        assert!(!state.process_keyboard(KeyCode::Space, true));
        assert_eq!(state, keys(true, false, false, true));

        assert!(state.process_keyboard(KeyCode::KeyD, false));
        assert_eq!(state, keys(false, false, false, true));
        assert!(state.any());

        state.release_all();
        assert!(!state.any());
    }
}
