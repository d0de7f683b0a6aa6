// ============================================
// Input System - Обработка ввода
// ============================================

use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta},
    keyboard::KeyCode,
};

use crate::core::SceneResources;

/// Система обработки ввода
pub struct InputSystem;

impl InputSystem {
    /// Обработка клавиатурного ввода
    pub fn process_keyboard(
        resources: &mut SceneResources,
        keycode: KeyCode,
        state: ElementState,
    ) -> Option<InputAction> {
        let pressed = state == ElementState::Pressed;

        match keycode {
            KeyCode::Escape if pressed => Some(InputAction::Exit),
            _ => {
                resources.keys.process_keyboard(keycode, pressed);
                None
            }
        }
    }

    /// ПКМ зажата - вращение камеры
    pub fn process_mouse_button(resources: &mut SceneResources, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            resources.orbiting = state == ElementState::Pressed;
        }
    }

    /// Обработка движения мыши
    pub fn process_mouse_motion(resources: &mut SceneResources, delta: (f64, f64)) {
        if resources.orbiting {
            resources.camera.orbit(delta.0, delta.1);
        }
    }

    /// Обработка колеса мыши
    pub fn process_mouse_wheel(resources: &mut SceneResources, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / 100.0) as f32,
        };
        if scroll != 0.0 {
            resources.camera.zoom(scroll);
        }
    }

    /// Окно потеряло фокус: отпустить всё, иначе игрок уедет сам
    pub fn focus_lost(resources: &mut SceneResources) {
        resources.keys.release_all();
        resources.orbiting = false;
    }
}

/// Действия, которые могут быть вызваны вводом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Exit,
}
