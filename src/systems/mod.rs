// ============================================
// Systems Module - ECS-подобные системы
// ============================================

mod init_system;
mod input_system;
mod update_system;
mod render_system;

pub use init_system::InitSystem;
pub use input_system::{InputSystem, InputAction};
pub use update_system::UpdateSystem;
pub use render_system::RenderSystem;
