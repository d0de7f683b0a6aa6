// ============================================
// Height Map - Источники высоты террейна
// ============================================
// Карта высот: один сэмпл на пиксель, высота берётся из красного канала.
// HeightSource позволяет подменить картинку процедурной функцией
// или заранее посчитанной float-сеткой.

use std::path::{Path, PathBuf};

use image::DynamicImage;

/// Запас от дальнего края сетки, чтобы не выйти за пределы при чтении
pub const TEXEL_EPSILON: f32 = 0.001;

/// Ошибки загрузки карты высот
#[derive(Debug, thiserror::Error)]
pub enum HeightmapError {
    #[error("heightmap not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load heightmap '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("heightmap has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("heightmap expects {expected} samples, got {actual}")]
    SampleCount { expected: usize, actual: usize },
}

/// Позиция в пикселях после клампа (до усечения до целого)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexelCoordinate {
    pub col: f32,
    pub row: f32,
}

/// Как клампить пиксельные координаты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampPolicy {
    /// col по ширине, row по высоте
    #[default]
    SameAxis,
    /// col по высоте, row по ширине (поведение исходной демки)
    CrossAxis,
}

impl ClampPolicy {
    /// (u, v) -> пиксельные координаты сетки `width` x `height`, всегда в пределах
    pub fn texel(self, u: f32, v: f32, width: u32, height: u32) -> TexelCoordinate {
        let col = u * width as f32;
        let row = v * height as f32;
        match self {
            ClampPolicy::SameAxis => TexelCoordinate {
                col: clamp_texel(col, width),
                row: clamp_texel(row, height),
            },
            ClampPolicy::CrossAxis => TexelCoordinate {
                col: clamp_texel(col, height),
                row: clamp_texel(row, width),
            },
        }
    }
}

/// Кламп в [0, bound - EPSILON]. NaN уходит в 0.
/// На больших картах EPSILON теряется в точности f32,
/// тогда верхняя граница - ближайшее число ниже `bound`.
#[inline]
pub fn clamp_texel(value: f32, bound: u32) -> f32 {
    if bound == 0 {
        return 0.0;
    }
    let edge = bound as f32;
    let mut max = edge - TEXEL_EPSILON;
    if max >= edge {
        max = f32::from_bits(edge.to_bits() - 1);
    }
    if value >= max {
        max
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Линейный индекс сэмпла. Индекс насыщается до последнего пикселя:
/// CrossAxis на неквадратной карте может дать координату за краем.
#[inline]
fn texel_index(texel: TexelCoordinate, width: u32, height: u32) -> usize {
    let col = (texel.col as u32).min(width - 1) as usize;
    let row = (texel.row as u32).min(height - 1) as usize;
    row * width as usize + col
}

/// Источник нормализованной высоты [0, 1]
pub trait HeightSource {
    /// Высота в точке (u, v) нормализованного следа террейна
    fn sample(&self, u: f32, v: f32) -> f32;

    /// Пиксель, из которого читается высота (только для сеток)
    fn texel(&self, _u: f32, _v: f32) -> Option<TexelCoordinate> {
        None
    }

    /// Размер сетки (ширина, высота) если источник дискретный
    fn dimensions(&self) -> Option<(u32, u32)> {
        None
    }
}

/// Карта высот из картинки (неизменяемая)
#[derive(Debug, Clone)]
pub struct HeightmapField {
    width: u32,
    height: u32,
    /// Красный канал, построчно
    red: Vec<u8>,
    /// Серое (r + g + b) / 3, для генерации меша
    gray: Vec<u8>,
    clamp: ClampPolicy,
}

impl HeightmapField {
    /// Загрузить карту высот с диска
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HeightmapError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HeightmapError::NotFound(path.to_path_buf()));
        }

        let image = image::open(path).map_err(|source| HeightmapError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let field = Self::from_image(&image)?;
        log::info!(
            "Loaded heightmap '{}' ({}x{})",
            path.display(),
            field.width,
            field.height
        );
        Ok(field)
    }

    /// Построить из уже декодированной картинки
    pub fn from_image(image: &DynamicImage) -> Result<Self, HeightmapError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(HeightmapError::ZeroDimension { width, height });
        }

        let mut red = Vec::with_capacity((width * height) as usize);
        let mut gray = Vec::with_capacity((width * height) as usize);
        for pixel in rgba.pixels() {
            let [r, g, b, _] = pixel.0;
            red.push(r);
            gray.push(((r as u16 + g as u16 + b as u16) / 3) as u8);
        }

        Ok(Self { width, height, red, gray, clamp: ClampPolicy::default() })
    }

    /// Построить из сырого красного канала (серое = красное)
    pub fn from_red_channel(width: u32, height: u32, red: Vec<u8>) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if red.len() != expected {
            return Err(HeightmapError::SampleCount { expected, actual: red.len() });
        }

        let gray = red.clone();
        Ok(Self { width, height, red, gray, clamp: ClampPolicy::default() })
    }

    /// Заменить политику клампа
    pub fn with_clamp_policy(mut self, clamp: ClampPolicy) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Нормализованный красный канал пикселя (col, row)
    pub fn red_at(&self, col: u32, row: u32) -> f32 {
        let col = col.min(self.width - 1) as usize;
        let row = row.min(self.height - 1) as usize;
        self.red[row * self.width as usize + col] as f32 / 255.0
    }

    /// Нормализованное серое пикселя (col, row)
    pub fn gray_at(&self, col: u32, row: u32) -> f32 {
        let col = col.min(self.width - 1) as usize;
        let row = row.min(self.height - 1) as usize;
        self.gray[row * self.width as usize + col] as f32 / 255.0
    }
}

impl HeightSource for HeightmapField {
    fn sample(&self, u: f32, v: f32) -> f32 {
        let texel = self.clamp.texel(u, v, self.width, self.height);
        self.red[texel_index(texel, self.width, self.height)] as f32 / 255.0
    }

    fn texel(&self, u: f32, v: f32) -> Option<TexelCoordinate> {
        Some(self.clamp.texel(u, v, self.width, self.height))
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }
}

/// Заранее посчитанная сетка высот
#[derive(Debug, Clone)]
pub struct FloatGrid {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl FloatGrid {
    /// Значения клампятся в [0, 1], NaN становится 0
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(HeightmapError::SampleCount { expected, actual: values.len() });
        }

        let values = values.into_iter().map(clamp_unit).collect();
        Ok(Self { width, height, values })
    }

    /// Заполнить сетку функцией от (col, row)
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Result<Self, HeightmapError>
    where
        F: Fn(u32, u32) -> f32,
    {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for row in 0..height {
            for col in 0..width {
                values.push(f(col, row));
            }
        }
        Self::new(width, height, values)
    }
}

impl HeightSource for FloatGrid {
    fn sample(&self, u: f32, v: f32) -> f32 {
        let texel = ClampPolicy::SameAxis.texel(u, v, self.width, self.height);
        self.values[texel_index(texel, self.width, self.height)]
    }

    fn texel(&self, u: f32, v: f32) -> Option<TexelCoordinate> {
        Some(ClampPolicy::SameAxis.texel(u, v, self.width, self.height))
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }
}

/// Процедурная высота: функция от (u, v)
pub struct ProceduralHeight<F> {
    f: F,
}

impl<F> ProceduralHeight<F>
where
    F: Fn(f32, f32) -> f32,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> HeightSource for ProceduralHeight<F>
where
    F: Fn(f32, f32) -> f32,
{
    fn sample(&self, u: f32, v: f32) -> f32 {
        clamp_unit((self.f)(clamp_unit(u), clamp_unit(v)))
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value >= 1.0 {
        1.0
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}
