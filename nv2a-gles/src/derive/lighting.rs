//! Light and material equations
//!
//! The NV2A evaluates Blinn-Phong per vertex from pre-multiplied colors:
//! light colors arrive already scaled by the material, and the scene ambient
//! register carries `model_ambient * material_ambient + emission`.

use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::hw::methods::{
    LIGHT_MASK_BITS, LIGHT_MASK_INFINITE, LIGHT_MASK_LOCAL, LIGHT_MASK_OFF, LIGHT_MASK_SPOT,
};
use crate::state::{Light, Material};

/// Range pushed for every light; attenuation does the falloff.
pub const LOCAL_RANGE: f32 = f32::MAX;

/// Cutoff value that turns a spot light into a plain local light.
const NO_SPOT_CUTOFF: f32 = 180.0;

/// Direction towards the viewer in eye space.
const VIEWER: Vec3 = Vec3::Z;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightClass {
    Infinite,
    Local,
    Spot,
}

impl LightClass {
    /// Two-bit `LIGHT_ENABLE_MASK` field.
    pub const fn mask_bits(self) -> u32 {
        match self {
            Self::Infinite => LIGHT_MASK_INFINITE,
            Self::Local => LIGHT_MASK_LOCAL,
            Self::Spot => LIGHT_MASK_SPOT,
        }
    }
}

pub fn classify_light(light: &Light) -> LightClass {
    if light.is_directional() {
        LightClass::Infinite
    } else if light.spot_cutoff == NO_SPOT_CUTOFF {
        LightClass::Local
    } else {
        LightClass::Spot
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotParams {
    /// Quadratic coefficients approximating `cos^exponent`
    pub falloff: Vec3,
    /// Negated direction and cutoff, both scaled to map the cone onto [0, 1]
    pub direction: Vec4,
}

impl SpotParams {
    pub fn new(direction: Vec3, exponent: f32, cutoff_degrees: f32) -> Self {
        let cos_cutoff = cutoff_degrees.to_radians().cos();
        let falloff = if exponent == 0.0 {
            Vec3::X
        } else {
            // Fit through (0, 0), (0.5, 0.5^e) and (1, 1).
            let half = 0.5f32.powf(exponent);
            Vec3::new(0.0, 4.0 * half - 1.0, 2.0 - 4.0 * half)
        };
        let inv_scale = -1.0 / (1.0 - cos_cutoff);
        Self {
            falloff,
            direction: (direction.normalize_or_zero() * inv_scale).extend(cos_cutoff * inv_scale),
        }
    }
}

/// Registers for one enabled light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedLight {
    Directional {
        half_vector: Vec3,
        direction: Vec3,
    },
    Positional {
        position: Vec3,
        /// Constant, linear, quadratic
        attenuation: Vec3,
        spot: Option<SpotParams>,
    },
}

impl DerivedLight {
    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Directional { .. })
    }
}

pub fn derive_light(light: &Light) -> DerivedLight {
    match classify_light(light) {
        LightClass::Infinite => {
            let direction = light.position.xyz().normalize_or_zero();
            DerivedLight::Directional {
                half_vector: (direction + VIEWER).normalize_or_zero(),
                direction,
            }
        }
        class => DerivedLight::Positional {
            position: light.position.xyz(),
            attenuation: Vec3::new(
                light.constant_attenuation,
                light.linear_attenuation,
                light.quadratic_attenuation,
            ),
            spot: (class == LightClass::Spot).then(|| {
                SpotParams::new(light.spot_direction, light.spot_exponent, light.spot_cutoff)
            }),
        },
    }
}

/// Light colors pre-multiplied for one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

pub fn light_colors(
    light: &Light,
    material: &Material,
    model_ambient: Vec4,
    color_material: bool,
) -> LightColors {
    let diffuse = if color_material {
        // Material diffuse comes from the vertex color.
        light.diffuse.xyz()
    } else {
        light.diffuse.xyz() * material.diffuse.xyz()
    };
    LightColors {
        ambient: light.ambient.xyz() * model_ambient.xyz(),
        diffuse,
        specular: light.specular.xyz() * material.specular.xyz(),
    }
}

/// Scene ambient and emission register values for one face.
pub fn material_ambient(
    material: &Material,
    model_ambient: Vec4,
    color_material: bool,
) -> (Vec3, Vec3) {
    if color_material {
        (model_ambient.xyz(), material.emission.xyz())
    } else {
        (
            model_ambient.xyz() * material.ambient.xyz() + material.emission.xyz(),
            Vec3::ZERO,
        )
    }
}

/// `SPECULAR_PARAMS` for a shininess exponent.
///
/// The hardware evaluates `(a0 + a1 x + a2 x^2) / (b0 + b1 x + b2 x^2)`;
/// `x^2 / (k + (1 - k) x^2)` with `k = n / 2` tracks `x^n` closely near the
/// highlight and is exact at both ends.
pub fn specular_params(shininess: f32) -> [f32; 6] {
    if shininess <= 0.0 {
        return [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    }
    let k = shininess * 0.5;
    [0.0, 0.0, 1.0, k, 0.0, 1.0 - k]
}

/// `LIGHT_ENABLE_MASK` for the given lights.
pub fn light_mask<'a>(lights: impl IntoIterator<Item = &'a Light>) -> u32 {
    lights
        .into_iter()
        .enumerate()
        .fold(0, |mask, (i, light)| {
            let bits = if light.enabled {
                classify_light(light).mask_bits()
            } else {
                LIGHT_MASK_OFF
            };
            mask | bits << (i as u32 * LIGHT_MASK_BITS)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_classification() {
        let mut light = Light::new(0);
        assert_eq!(classify_light(&light), LightClass::Infinite);
        light.position = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(classify_light(&light), LightClass::Local);
        light.spot_cutoff = 45.0;
        assert_eq!(classify_light(&light), LightClass::Spot);
    }

    #[test]
    fn test_directional_light_half_vector() {
        let mut light = Light::new(0);
        light.position = Vec4::new(0.0, 2.0, 0.0, 0.0);
        let DerivedLight::Directional { half_vector, direction } = derive_light(&light) else {
            panic!("expected a directional light");
        };
        assert!(approx(direction, Vec3::Y));
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx(half_vector, Vec3::new(0.0, h, h)));
    }

    #[test]
    fn test_positional_light_carries_attenuation() {
        let mut light = Light::new(1);
        light.position = Vec4::new(1.0, 2.0, 3.0, 1.0);
        light.linear_attenuation = 0.5;
        match derive_light(&light) {
            DerivedLight::Positional { position, attenuation, spot } => {
                assert_eq!(position, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(attenuation, Vec3::new(1.0, 0.5, 0.0));
                assert!(spot.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_spot_params() {
        let flat = SpotParams::new(Vec3::new(0.0, 0.0, -2.0), 0.0, 60.0);
        assert_eq!(flat.falloff, Vec3::X);
        // cos 60 = 0.5, so the scale is -2.
        assert!((flat.direction - Vec4::new(0.0, 0.0, 2.0, -1.0)).abs().max_element() < 1e-5);

        let sharp = SpotParams::new(Vec3::NEG_Z, 1.0, 60.0);
        assert!(approx(sharp.falloff, Vec3::new(0.0, 1.0, 0.0)));
        let f = sharp.falloff;
        assert!((f.x + f.y + f.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_material_ambient_with_and_without_color_material() {
        let material = Material {
            ambient: Vec4::new(0.5, 0.5, 0.5, 1.0),
            emission: Vec4::new(0.1, 0.2, 0.3, 1.0),
            ..Material::default()
        };
        let model = Vec4::new(0.2, 0.4, 0.6, 1.0);

        let (ambient, emission) = material_ambient(&material, model, false);
        assert!(approx(ambient, Vec3::new(0.2, 0.4, 0.6)));
        assert_eq!(emission, Vec3::ZERO);

        let (ambient, emission) = material_ambient(&material, model, true);
        assert_eq!(ambient, model.xyz());
        assert!(approx(emission, Vec3::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_light_colors_premultiply_material() {
        let light = Light::new(0);
        let material = Material::default();
        let model = Vec4::new(0.2, 0.2, 0.2, 1.0);
        let colors = light_colors(&light, &material, model, false);
        assert!(approx(colors.diffuse, Vec3::splat(0.8)));
        assert_eq!(colors.specular, Vec3::ZERO);
        assert_eq!(colors.ambient, Vec3::ZERO);

        let colors = light_colors(&light, &material, model, true);
        assert_eq!(colors.diffuse, Vec3::ONE);
    }

    #[test]
    fn test_specular_params_endpoints() {
        assert_eq!(specular_params(0.0), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let p = specular_params(16.0);
        let eval = |x: f32| (p[0] + p[1] * x + p[2] * x * x) / (p[3] + p[4] * x + p[5] * x * x);
        assert!((eval(1.0) - 1.0).abs() < 1e-6);
        assert_eq!(eval(0.0), 0.0);
    }

    #[test]
    fn test_light_mask_layout() {
        let mut lights: [Light; 3] = std::array::from_fn(Light::new);
        lights[0].enabled = true;
        lights[2].enabled = true;
        lights[2].position = Vec4::new(0.0, 0.0, 0.0, 1.0);
        lights[2].spot_cutoff = 30.0;
        assert_eq!(light_mask(&lights), LIGHT_MASK_INFINITE | LIGHT_MASK_SPOT << 4);
    }
}
