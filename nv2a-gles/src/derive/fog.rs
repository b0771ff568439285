use crate::state::enums::FogMode;

/// ln(256)
const LN_256: f32 = 5.5452;
/// sqrt(ln(256))
const SQRT_LN_256: f32 = 2.354;
/// Bias used by both exponential modes.
const EXP_BIAS: f32 = 1.5;

/// `FOG_PARAMS` bias and scale; the third word is always 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogParams {
    pub bias: f32,
    pub scale: f32,
}

impl FogParams {
    pub fn words(&self) -> [f32; 3] {
        [self.bias, self.scale, 0.0]
    }
}

/// Maps the GL fog equation onto the hardware's `bias + scale * z` ramp.
///
/// Linear fog with `start == end` has no slope; it degrades to `(1, 1)`.
pub fn fog_params(mode: FogMode, density: f32, start: f32, end: f32) -> FogParams {
    match mode {
        FogMode::Exp => FogParams {
            bias: EXP_BIAS,
            scale: -density / (2.0 * LN_256),
        },
        FogMode::Exp2 => FogParams {
            bias: EXP_BIAS,
            scale: -density / (2.0 * SQRT_LN_256),
        },
        FogMode::Linear => {
            if end == start {
                return FogParams {
                    bias: 1.0,
                    scale: 1.0,
                };
            }
            let scale = -1.0 / (end - start);
            FogParams {
                bias: 1.0 - end * scale,
                scale,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_fog_degenerate_range() {
        let p = fog_params(FogMode::Linear, 1.0, 5.0, 5.0);
        assert_eq!(p, FogParams { bias: 1.0, scale: 1.0 });
    }

    #[test]
    fn test_linear_fog_ramp() {
        let p = fog_params(FogMode::Linear, 1.0, 10.0, 20.0);
        assert!((p.scale + 0.1).abs() < 1e-6);
        assert!((p.bias - 3.0).abs() < 1e-6);
        assert!((p.bias + p.scale * 20.0 - 1.0).abs() < 1e-5);
        assert!((p.bias + p.scale * 10.0 - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_exponential_modes() {
        let exp = fog_params(FogMode::Exp, 2.0, 0.0, 1.0);
        assert_eq!(exp.bias, 1.5);
        assert!((exp.scale + 2.0 / (2.0 * LN_256)).abs() < 1e-6);

        let exp2 = fog_params(FogMode::Exp2, 2.0, 0.0, 1.0);
        assert_eq!(exp2.bias, 1.5);
        assert!((exp2.scale + 2.0 / (2.0 * SQRT_LN_256)).abs() < 1e-6);
        assert_eq!(exp2.words()[2], 0.0);
    }
}
