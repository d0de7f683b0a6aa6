// ============================================
// Simulation Module - Чистый шаг кадра
// ============================================

mod state;
mod frame_limiter;

pub use state::{SimulationState, FrameReport, resolve_input, apply_motion, derive_height};
pub use frame_limiter::FrameLimiter;
