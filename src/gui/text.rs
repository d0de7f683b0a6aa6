// ============================================
// Text Renderer - Рендеринг текста через wgpu_text
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use wgpu_text::glyph_brush::{ab_glyph::FontArc, Section, Text};
use wgpu_text::BrushBuilder;

/// Ошибка загрузки шрифта
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not a valid TrueType/OpenType font", .0.display())]
    Invalid(PathBuf),
}

/// Параметры строки текста
#[derive(Debug, Clone, PartialEq)]
pub struct TextParams {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub color: [f32; 4],
}

impl TextParams {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            size,
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// GPU рендерер текста
pub struct TextRenderer {
    brush: wgpu_text::TextBrush<FontArc>,
}

impl TextRenderer {
    /// Шрифт читается с диска во время запуска
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        font_path: &Path,
    ) -> Result<Self, FontError> {
        let bytes = fs::read(font_path).map_err(|source| FontError::Read {
            path: font_path.to_path_buf(),
            source,
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|_| FontError::Invalid(font_path.to_path_buf()))?;

        let brush = BrushBuilder::using_font(font).build(device, width, height, format);

        Ok(Self { brush })
    }

    pub fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32) {
        self.brush.resize_view(width as f32, height as f32, queue);
    }

    /// Подготовить и отрендерить текст поверх уже нарисованной сцены
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
        texts: &[TextParams],
    ) {
        if texts.is_empty() {
            return;
        }

        let sections: Vec<Section> = texts
            .iter()
            .map(|params| {
                Section::default()
                    .add_text(
                        Text::new(&params.text)
                            .with_scale(params.size)
                            .with_color(params.color),
                    )
                    .with_screen_position((params.x, params.y))
            })
            .collect();

        if let Err(err) = self.brush.queue(device, queue, sections) {
            log::warn!("Failed to queue overlay text: {err:?}");
            return;
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Text Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.brush.draw(&mut render_pass);
    }
}
