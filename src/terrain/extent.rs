// ============================================
// World Extent - Размеры террейна в мире
// ============================================
// Мировой объём террейна (ширина, высота, глубина) и
// позиция его ближнего угла. Высота = масштаб высот.

use ultraviolet::Vec3;

/// Ошибка описания мирового объёма
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtentError {
    #[error("terrain {axis} must be finite and > 0, got {value}")]
    NonPositive { axis: &'static str, value: f32 },
    #[error("terrain origin must be finite, got ({x}, {y}, {z})")]
    NonFiniteOrigin { x: f32, y: f32, z: f32 },
}

/// Нормализованная координата внутри следа террейна
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedCoordinate {
    pub u: f32,
    pub v: f32,
}

/// Мировой объём террейна
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldExtent {
    size: Vec3,
    origin: Vec3,
}

impl WorldExtent {
    /// `size` = (width, height, depth), `origin` = ближний угол (обычно отрицательный)
    pub fn new(size: Vec3, origin: Vec3) -> Result<Self, ExtentError> {
        for (axis, value) in [("width", size.x), ("height", size.y), ("depth", size.z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ExtentError::NonPositive { axis, value });
            }
        }
        if !(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite()) {
            return Err(ExtentError::NonFiniteOrigin { x: origin.x, y: origin.y, z: origin.z });
        }
        Ok(Self { size, origin })
    }

    /// Террейн, центрированный в начале координат по XZ
    pub fn centered(width: f32, height: f32, depth: f32) -> Result<Self, ExtentError> {
        Self::new(
            Vec3::new(width, height, depth),
            Vec3::new(-width * 0.5, 0.0, -depth * 0.5),
        )
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn depth(&self) -> f32 {
        self.size.z
    }

    /// Масштаб высот: нормализованная высота 1.0 = эта высота в мире
    pub fn height_scale(&self) -> f32 {
        self.size.y
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Мировые X/Z -> (u, v).
    /// К координате прибавляется |origin|, поэтому ближний угол должен лежать
    /// в отрицательной полуплоскости (или в нуле).
    #[inline]
    pub fn normalize(&self, x: f32, z: f32) -> NormalizedCoordinate {
        NormalizedCoordinate {
            u: (x + self.origin.x.abs()) / self.size.x,
            v: (z + self.origin.z.abs()) / self.size.z,
        }
    }

    /// Центр следа террейна в мире (X, Z)
    pub fn center(&self) -> (f32, f32) {
        (
            self.size.x * 0.5 - self.origin.x.abs(),
            self.size.z * 0.5 - self.origin.z.abs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_width_and_depth() {
        let err = WorldExtent::new(Vec3::new(0.0, 8.0, 16.0), Vec3::zero()).unwrap_err();
        assert_eq!(err, ExtentError::NonPositive { axis: "width", value: 0.0 });

        let err = WorldExtent::new(Vec3::new(16.0, 8.0, -1.0), Vec3::zero()).unwrap_err();
        assert!(matches!(err, ExtentError::NonPositive { axis: "depth", .. }));

        assert!(WorldExtent::new(Vec3::new(f32::NAN, 8.0, 16.0), Vec3::zero()).is_err());
        assert!(WorldExtent::new(Vec3::new(16.0, 8.0, 16.0), Vec3::new(f32::INFINITY, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_normalize_centered_map() {
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();
        assert_eq!(extent.origin(), Vec3::new(-8.0, 0.0, -8.0));

        let c = extent.normalize(0.0, 0.0);
        assert_eq!(c, NormalizedCoordinate { u: 0.5, v: 0.5 });

        let near = extent.normalize(-8.0, -8.0);
        assert_eq!(near, NormalizedCoordinate { u: 0.0, v: 0.0 });

        let far = extent.normalize(8.0, 8.0);
        assert_eq!(far, NormalizedCoordinate { u: 1.0, v: 1.0 });

        assert_eq!(extent.center(), (0.0, 0.0));
    }
}
