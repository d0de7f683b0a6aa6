// ============================================
// Core Module - Приложение, ресурсы и конфиг
// ============================================

pub mod app;
pub mod config;
mod error;
mod resources;

pub use app::{run, App};
pub use config::{DemoConfig, ConfigError, DEFAULT_HEIGHTMAP, DEFAULT_FONT};
pub use error::DemoError;
pub use resources::SceneResources;
