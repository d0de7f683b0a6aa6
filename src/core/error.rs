use crate::render::RenderError;
use crate::terrain::{ExtentError, HeightmapError};

use super::config::ConfigError;

/// Фатальные ошибки запуска и цикла событий
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Heightmap(#[from] HeightmapError),
    #[error(transparent)]
    Extent(#[from] ExtentError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
