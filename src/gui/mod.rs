// ============================================
// GUI Module - Текстовый оверлей
// ============================================

mod text;
mod overlay;

pub use text::{FontError, TextParams, TextRenderer};
pub use overlay::{overlay_lines, overlay_text, DiagnosticOverlay};
