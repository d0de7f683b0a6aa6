// ============================================
// Player Module - Игрок, ввод и камера
// ============================================

mod player;
mod motion;
mod camera;
mod marker;

pub use player::*;
pub use motion::*;
pub use camera::*;
pub use marker::*;
