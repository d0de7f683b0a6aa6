// ============================================
// terrain-follow - Игрок на карте высот
// ============================================
// Чистое ядро (terrain, player, simulation) не зависит от окна и GPU.
// core, systems, render и gui - тонкая оболочка на winit + wgpu.

pub mod terrain;
pub mod player;
pub mod simulation;
pub mod render;
pub mod gui;

pub mod core;
pub mod systems;

pub use self::core::app::run;
pub use self::core::{DemoConfig, DemoError};
