// ============================================
// Diagnostic Overlay - Значения сэмплера на экране
// ============================================

use std::path::Path;

use crate::simulation::FrameReport;

use super::text::{TextParams, TextRenderer};

const GREEN: [f32; 4] = rgba(0, 228, 48);
const ORANGE: [f32; 4] = rgba(255, 161, 0);
const PURPLE: [f32; 4] = rgba(200, 122, 255);
const BROWN: [f32; 4] = rgba(127, 106, 79);
const SKYBLUE: [f32; 4] = rgba(102, 191, 255);

/// Отступы строк сверху экрана
const LINE_Y: [f32; 5] = [10.0, 45.0, 90.0, 135.0, 170.0];
const LEFT_MARGIN: f32 = 10.0;

const fn rgba(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Текст пяти строк оверлея
pub fn overlay_text(report: &FrameReport) -> [String; 5] {
    let p = report.position;
    let probe = &report.probe;
    let texel = match probe.texel {
        Some(t) => format!("TexU: {:.6}, TexV: {:.6}", t.col, t.row),
        None => "TexU: n/a, TexV: n/a".to_string(),
    };

    [
        format!("XPos: {:.6}, YPos: {:.6}, ZPos: {:.6}", p.x, p.y, p.z),
        format!("NormalX: {:.6}, NormalZ: {:.6}", probe.normalized.u, probe.normalized.v),
        texel,
        format!("World Y Normal: {:.6}", probe.normalized_height),
        format!("World Y Pos: {:.6}", probe.world_y),
    ]
}

/// Строки оверлея с позицией и цветом
pub fn overlay_lines(report: &FrameReport, size: f32) -> Vec<TextParams> {
    let colors = [GREEN, ORANGE, PURPLE, BROWN, SKYBLUE];
    overlay_text(report)
        .into_iter()
        .zip(LINE_Y)
        .zip(colors)
        .map(|((text, y), color)| TextParams::new(text, LEFT_MARGIN, y, size).with_color(color))
        .collect()
}

/// Оверлей; без шрифта только пишет в лог
pub struct DiagnosticOverlay {
    text: Option<TextRenderer>,
    size: f32,
}

impl DiagnosticOverlay {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        font_path: &Path,
        size: f32,
    ) -> Self {
        let text = match TextRenderer::new(device, format, width, height, font_path) {
            Ok(renderer) => Some(renderer),
            Err(err) => {
                log::warn!("{err}; overlay values go to the log instead");
                None
            }
        };
        Self { text, size }
    }

    /// Выключенный оверлей
    pub fn disabled() -> Self {
        Self { text: None, size: 0.0 }
    }

    pub fn is_visible(&self) -> bool {
        self.text.is_some()
    }

    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        if let Some(text) = &mut self.text {
            text.resize(queue, width, height);
        }
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
        report: &FrameReport,
    ) {
        if let Some(text) = &mut self.text {
            let lines = overlay_lines(report, self.size);
            text.render(device, encoder, view, queue, &lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MotionDelta;
    use crate::terrain::{HeightProbe, NormalizedCoordinate, TexelCoordinate};
    use ultraviolet::Vec3;

    fn report(texel: Option<TexelCoordinate>) -> FrameReport {
        FrameReport {
            delta: MotionDelta { dx: 0.2, dz: 0.0 },
            position: Vec3::new(0.2, 4.0, 0.0),
            probe: HeightProbe {
                normalized: NormalizedCoordinate { u: 0.5125, v: 0.5 },
                texel,
                normalized_height: 0.5,
                world_y: 4.0,
            },
        }
    }

    #[test]
    fn test_overlay_text_format() {
        let text = overlay_text(&report(Some(TexelCoordinate { col: 2.05, row: 2.0 })));
        assert_eq!(text[0], "XPos: 0.200000, YPos: 4.000000, ZPos: 0.000000");
        assert_eq!(text[1], "NormalX: 0.512500, NormalZ: 0.500000");
        assert!(text[2].starts_with("TexU: 2.05"));
        assert_eq!(text[3], "World Y Normal: 0.500000");
        assert_eq!(text[4], "World Y Pos: 4.000000");
    }

    #[test]
    fn test_overlay_without_texel() {
        let text = overlay_text(&report(None));
        assert_eq!(text[2], "TexU: n/a, TexV: n/a");
    }

    #[test]
    fn test_disabled_overlay_is_hidden() {
        assert!(!DiagnosticOverlay::disabled().is_visible());
    }

    #[test]
    fn test_overlay_lines_layout() {
        let lines = overlay_lines(&report(None), 24.0);
        assert_eq!(lines.len(), 5);
        assert!(lines.windows(2).all(|w| w[0].y < w[1].y));
        assert!(lines.iter().all(|l| l.x == LEFT_MARGIN && l.size == 24.0));
        assert_eq!(lines[0].color, GREEN);
        assert_eq!(lines[4].color, SKYBLUE);
    }
}
