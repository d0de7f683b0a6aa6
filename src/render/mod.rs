// ============================================
// Render Module - Рендеринг сцены
// ============================================

mod uniforms;
mod pipelines;
mod bind_groups;
mod depth;
mod grid;
mod renderer;

pub use renderer::{Renderer, RenderError};
pub use grid::grid_vertices;
