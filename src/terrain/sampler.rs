// ============================================
// Height Sampler - Высота террейна под точкой мира
// ============================================
// Мировые (x, z) -> нормализованные (u, v) -> пиксель -> высота в мире.
// Чистая функция: не зависит от рендера, всегда в пределах сетки.

use super::extent::{NormalizedCoordinate, WorldExtent};
use super::heightmap::{HeightSource, TexelCoordinate};

/// Полный разбор одного сэмпла (для оверлея и логов)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightProbe {
    pub normalized: NormalizedCoordinate,
    pub texel: Option<TexelCoordinate>,
    /// Высота источника в [0, 1]
    pub normalized_height: f32,
    /// Высота в мире
    pub world_y: f32,
}

/// Высота в мире под точкой (x, z)
#[inline]
pub fn sample_height<S: HeightSource + ?Sized>(x: f32, z: f32, source: &S, extent: &WorldExtent) -> f32 {
    let c = extent.normalize(x, z);
    source.sample(c.u, c.v) * extent.height_scale()
}

/// То же что `sample_height`, но с промежуточными значениями
pub fn probe_height<S: HeightSource + ?Sized>(x: f32, z: f32, source: &S, extent: &WorldExtent) -> HeightProbe {
    let normalized = extent.normalize(x, z);
    let normalized_height = source.sample(normalized.u, normalized.v);
    HeightProbe {
        normalized,
        texel: source.texel(normalized.u, normalized.v),
        normalized_height,
        world_y: normalized_height * extent.height_scale(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::heightmap::{ClampPolicy, HeightmapField, ProceduralHeight};
    use ultraviolet::Vec3;

    fn scenario() -> (HeightmapField, WorldExtent) {
        let field = HeightmapField::from_red_channel(4, 4, vec![128; 16]).unwrap();
        let extent = WorldExtent::new(Vec3::new(16.0, 8.0, 16.0), Vec3::new(-8.0, 0.0, -8.0)).unwrap();
        (field, extent)
    }

    /// red = номер пикселя, чтобы видеть откуда читаем
    fn indexed(width: u32, height: u32) -> HeightmapField {
        let red = (0..width * height).map(|i| i as u8).collect();
        HeightmapField::from_red_channel(width, height, red).unwrap()
    }

    #[test]
    fn test_scenario_center() {
        let (field, extent) = scenario();
        let probe = probe_height(0.0, 0.0, &field, &extent);

        assert_eq!(probe.normalized, NormalizedCoordinate { u: 0.5, v: 0.5 });
        assert_eq!(probe.texel, Some(TexelCoordinate { col: 2.0, row: 2.0 }));
        assert_eq!(probe.normalized_height, 128.0 / 255.0);
        assert!((probe.world_y - 4.0157).abs() < 1e-3);
        assert_eq!(probe.world_y, sample_height(0.0, 0.0, &field, &extent));
    }

    #[test]
    fn test_scenario_far_outside_equals_edge() {
        let (field, extent) = scenario();
        assert_eq!(
            sample_height(100.0, 0.0, &field, &extent),
            sample_height(8.0, 0.0, &field, &extent)
        );
    }

    #[test]
    fn test_deterministic() {
        let field = indexed(16, 16);
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();
        for i in -40..40 {
            let x = i as f32 * 0.37;
            let z = i as f32 * -0.21;
            let a = sample_height(x, z, &field, &extent);
            let b = sample_height(x, z, &field, &extent);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_bounds_safety_for_any_input() {
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();
        let inputs = [
            0.0,
            -8.0,
            8.0,
            7.9999,
            1e6,
            -1e6,
            f32::MAX,
            f32::MIN,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ];
        for policy in [ClampPolicy::SameAxis, ClampPolicy::CrossAxis] {
            for (w, h) in [(1, 1), (4, 4), (7, 3), (3, 9)] {
                let field = indexed(w, h).with_clamp_policy(policy);
                for &x in &inputs {
                    for &z in &inputs {
                        let y = sample_height(x, z, &field, &extent);
                        assert!(y.is_finite(), "y not finite at ({x}, {z})");
                        assert!((0.0..=extent.height_scale()).contains(&y));
                    }
                }
            }
        }
    }

    #[test]
    fn test_center_consistency() {
        let field = indexed(8, 8);
        let extent = WorldExtent::centered(32.0, 10.0, 32.0).unwrap();
        let (cx, cz) = extent.center();
        let probe = probe_height(cx, cz, &field, &extent);
        let texel = probe.texel.unwrap();
        assert_eq!((texel.col as u32, texel.row as u32), (4, 4));
        assert_eq!(probe.normalized_height, field.red_at(4, 4));
    }

    #[test]
    fn test_edge_clamp_is_monotonic_then_constant() {
        let field = indexed(4, 4);
        let extent = WorldExtent::centered(16.0, 8.0, 16.0).unwrap();

        let mut last_col = -1.0;
        let mut x = 0.0;
        while x < 40.0 {
            let texel = probe_height(x, 0.0, &field, &extent).texel.unwrap();
            assert!(texel.col >= last_col);
            assert!(texel.col <= 4.0 - crate::terrain::TEXEL_EPSILON);
            last_col = texel.col;
            x += 0.5;
        }

        let edge = sample_height(8.0, 0.0, &field, &extent);
        for x in [8.0, 9.0, 50.0, 1e7] {
            assert_eq!(sample_height(x, 0.0, &field, &extent), edge);
        }
    }

    #[test]
    fn test_origin_offset_sign_is_ignored() {
        let field = indexed(4, 4);
        let neg = WorldExtent::new(Vec3::new(16.0, 8.0, 16.0), Vec3::new(-8.0, 0.0, -8.0)).unwrap();
        let pos = WorldExtent::new(Vec3::new(16.0, 8.0, 16.0), Vec3::new(8.0, 0.0, 8.0)).unwrap();
        assert_eq!(
            probe_height(-3.0, 5.0, &field, &neg),
            probe_height(-3.0, 5.0, &field, &pos)
        );
    }

    #[test]
    fn test_procedural_source() {
        let extent = WorldExtent::centered(10.0, 4.0, 10.0).unwrap();
        let ramp = ProceduralHeight::new(|u, _v| u);
        assert_eq!(sample_height(-5.0, 0.0, &ramp, &extent), 0.0);
        assert_eq!(sample_height(0.0, 0.0, &ramp, &extent), 2.0);
        assert_eq!(sample_height(50.0, 0.0, &ramp, &extent), 4.0);
        assert!(probe_height(0.0, 0.0, &ramp, &extent).texel.is_none());
    }
}
