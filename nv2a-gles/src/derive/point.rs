use glam::Vec3;

use crate::hw::methods::POINT_PARAMS_COUNT;

/// The eight `POINT_PARAMS` words in register order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointParams {
    /// Distance attenuation terms scaled into window units
    pub scale_factors: Vec3,
    pub size_range: f32,
    pub scale_bias: f32,
    pub min_size: f32,
}

impl PointParams {
    /// Scale factors A/B/C, the size range three times, bias, minimum.
    pub fn words(&self) -> [f32; POINT_PARAMS_COUNT] {
        let [a, b, c] = self.scale_factors.to_array();
        [
            a,
            b,
            c,
            self.size_range,
            self.size_range,
            self.size_range,
            self.scale_bias,
            self.min_size,
        ]
    }
}

/// Point-size attenuation for the current size, clamp range and viewport.
pub fn point_attenuation(
    attenuation: Vec3,
    size: f32,
    min: f32,
    max: f32,
    viewport: [i32; 4],
) -> PointParams {
    let range = max - min;
    let denom = size * viewport[3] as f32;
    let factor = if denom != 0.0 { range / denom } else { 0.0 };
    PointParams {
        scale_factors: attenuation * factor,
        size_range: range,
        scale_bias: if range != 0.0 { -min / range } else { 0.0 },
        min_size: min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attenuation_scaled_by_viewport_height() {
        let p = point_attenuation(Vec3::new(1.0, 2.0, 4.0), 2.0, 1.0, 9.0, [0, 0, 640, 400]);
        // range 8 over size 2 * height 400
        let f = 8.0 / 800.0;
        assert_eq!(p.scale_factors, Vec3::new(f, 2.0 * f, 4.0 * f));
        assert_eq!(p.size_range, 8.0);
        assert_eq!(p.scale_bias, -1.0 / 8.0);
        let w = p.words();
        assert_eq!(w[3..6], [8.0, 8.0, 8.0]);
        assert_eq!(w[7], 1.0);
    }

    #[test]
    fn test_empty_range_has_no_bias() {
        let p = point_attenuation(Vec3::X, 1.0, 2.0, 2.0, [0, 0, 10, 10]);
        assert_eq!(p.scale_bias, 0.0);
        assert_eq!(p.scale_factors, Vec3::ZERO);
    }

    #[test]
    fn test_zero_height_viewport() {
        let p = point_attenuation(Vec3::X, 1.0, 0.0, 1.0, [0, 0, 10, 0]);
        assert_eq!(p.scale_factors, Vec3::ZERO);
    }
}
