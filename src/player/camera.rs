// ============================================
// Camera - Орбитальная камера вокруг цели
// ============================================
// Камера смотрит на цель (центр сцены) и вращается вокруг неё:
// - ПКМ + мышь: поворот
// - колесо: приближение/отдаление

use ultraviolet::{Mat4, Vec3};

/// Ограничения орбиты
const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;
pub const MIN_DISTANCE: f32 = 2.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Орбитальная камера
#[derive(Debug, Clone)]
pub struct Camera {
    /// Точка, на которую смотрит камера
    pub target: Vec3,

    /// Горизонтальный угол вокруг цели
    yaw: f32,

    /// Вертикальный угол над плоскостью XZ
    pitch: f32,

    /// Дистанция до цели
    distance: f32,

    /// Чувствительность мыши (радиан на пиксель)
    pub sensitivity: f32,

    /// Параметры проекции
    pub aspect: f32,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Камера в `position`, смотрящая на `target`. `fov_degrees` - вертикальный FOV.
    pub fn looking_at(position: Vec3, target: Vec3, fov_degrees: f32, aspect: f32) -> Self {
        let offset = position - target;
        let distance = offset.mag().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let (yaw, pitch) = if offset.mag() > f32::EPSILON {
            let dir = offset.normalized();
            (dir.z.atan2(dir.x), dir.y.asin().clamp(MIN_PITCH, MAX_PITCH))
        } else {
            (std::f32::consts::FRAC_PI_2, 0.5)
        };

        Self {
            target,
            yaw,
            pitch,
            distance,
            sensitivity: 0.005,
            aspect,
            fov: fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Текущая позиция камеры
    pub fn position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(cp * cy, sp, cp * sy) * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Повернуть вокруг цели (дельта мыши в пикселях)
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.yaw += dx as f32 * self.sensitivity;
        self.pitch = (self.pitch + dy as f32 * self.sensitivity).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Приблизить (scroll > 0) или отдалить (scroll < 0)
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Матрица вида (View Matrix)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position(), self.target, Vec3::unit_y())
    }

    /// Матрица проекции (Perspective с Reversed-Z для лучшей точности вдали)
    pub fn projection_matrix(&self) -> Mat4 {
        // Reversed-Z: меняем near и far местами
        ultraviolet::projection::perspective_wgpu_dx(self.fov, self.aspect, self.far, self.near)
    }

    /// Комбинированная матрица View-Projection
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).mag() < 1e-4
    }

    #[test]
    fn test_looking_at_keeps_position() {
        let cam = Camera::looking_at(Vec3::new(0.0, 12.0, 16.0), Vec3::zero(), 45.0, 16.0 / 9.0);
        assert!((cam.distance() - 20.0).abs() < 1e-5);
        assert!(close(cam.position(), Vec3::new(0.0, 12.0, 16.0)));
    }

    #[test]
    fn test_orbit_keeps_distance_and_clamps_pitch() {
        let mut cam = Camera::looking_at(Vec3::new(0.0, 12.0, 16.0), Vec3::zero(), 45.0, 1.0);
        cam.orbit(300.0, 0.0);
        assert!((cam.position().mag() - 20.0).abs() < 1e-4);

        cam.orbit(0.0, 1e6);
        assert!(cam.position().y < 20.0);
        assert!(cam.position().y > 19.0);
    }

    #[test]
    fn test_zoom_limits() {
        let mut cam = Camera::looking_at(Vec3::new(0.0, 12.0, 16.0), Vec3::zero(), 45.0, 1.0);
        cam.zoom(1.0);
        assert!((cam.distance() - 18.0).abs() < 1e-4);
        for _ in 0..200 {
            cam.zoom(5.0);
        }
        assert_eq!(cam.distance(), MIN_DISTANCE);
        for _ in 0..200 {
            cam.zoom(-5.0);
        }
        assert_eq!(cam.distance(), MAX_DISTANCE);
    }

    #[test]
    fn test_degenerate_position() {
        let cam = Camera::looking_at(Vec3::zero(), Vec3::zero(), 45.0, 1.0);
        assert_eq!(cam.distance(), MIN_DISTANCE);
        assert!(cam.position().mag() > 0.0);
    }
}
