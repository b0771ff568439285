//! Lights, materials and the light model

use glam::{Vec3, Vec4};

use crate::hw::MAX_LIGHTS;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub emission: Vec4,
    /// 0..=128
    pub shininess: f32,
    pub dirty: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            emission: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
            dirty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// Eye space; `w == 0` is directional
    pub position: Vec4,
    /// Eye space
    pub spot_direction: Vec3,
    pub spot_exponent: f32,
    /// Degrees; 180 disables the spot cone
    pub spot_cutoff: f32,
    pub constant_attenuation: f32,
    pub linear_attenuation: f32,
    pub quadratic_attenuation: f32,
    pub enabled: bool,
    pub dirty: bool,
}

impl Light {
    /// GL defaults; light 0 starts with white diffuse and specular.
    pub fn new(index: usize) -> Self {
        let primary = if index == 0 {
            Vec4::ONE
        } else {
            Vec4::new(0.0, 0.0, 0.0, 1.0)
        };
        Self {
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: primary,
            specular: primary,
            position: Vec4::new(0.0, 0.0, 1.0, 0.0),
            spot_direction: Vec3::new(0.0, 0.0, -1.0),
            spot_exponent: 0.0,
            spot_cutoff: 180.0,
            constant_attenuation: 1.0,
            linear_attenuation: 0.0,
            quadratic_attenuation: 0.0,
            enabled: false,
            dirty: true,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightingState {
    pub enabled: bool,
    pub color_material: bool,
    pub model_ambient: Vec4,
    pub two_sided: bool,
    pub front: Material,
    pub back: Material,
    pub lights: [Light; MAX_LIGHTS],
    /// Light model, color material or the lighting enable changed
    pub model_dirty: bool,
}

impl Default for LightingState {
    fn default() -> Self {
        Self {
            enabled: false,
            color_material: false,
            model_ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            two_sided: false,
            front: Material::default(),
            back: Material::default(),
            lights: std::array::from_fn(Light::new),
            model_dirty: true,
        }
    }
}

impl LightingState {
    pub fn any_dirty(&self) -> bool {
        self.model_dirty
            || self.front.dirty
            || self.back.dirty
            || self.lights.iter().any(|l| l.dirty)
    }

    /// Specular output is needed whenever lighting is on.
    pub fn specular_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_zero_defaults_differ() {
        let state = LightingState::default();
        assert_eq!(state.lights[0].diffuse, Vec4::ONE);
        assert_eq!(state.lights[1].diffuse, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(state.lights.iter().all(Light::is_directional));
        assert!(state.lights.iter().all(|l| !l.enabled));
    }

    #[test]
    fn test_fresh_state_is_dirty() {
        assert!(LightingState::default().any_dirty());
    }
}
