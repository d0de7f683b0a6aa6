use bytemuck::{Pod, Zeroable};
use ultraviolet::Mat4;

use crate::player::Camera;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _pad: f32,
    pub light_dir: [f32; 3],
    pub ambient: f32,
}

impl Uniforms {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::identity().into(),
            camera_pos: [0.0, 0.0, 0.0],
            _pad: 0.0,
            light_dir: [0.4, -0.8, 0.3],
            ambient: 0.45,
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view_proj = camera.view_projection_matrix().into();
        self.camera_pos = camera.position().into();
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::new()
    }
}
