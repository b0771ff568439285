//! Fog and shading state

use glam::Vec4;

use super::enums::{FogMode, ShadeModel};

#[derive(Debug, Clone, PartialEq)]
pub struct ColoringState {
    pub fog_enabled: bool,
    pub fog_mode: FogMode,
    /// Clamped to [0, 1]
    pub fog_color: Vec4,
    pub fog_density: f32,
    pub fog_start: f32,
    pub fog_end: f32,
    pub shade_model: ShadeModel,
    pub fog_dirty: bool,
}

impl Default for ColoringState {
    fn default() -> Self {
        Self {
            fog_enabled: false,
            fog_mode: FogMode::Exp,
            fog_color: Vec4::ZERO,
            fog_density: 1.0,
            fog_start: 0.0,
            fog_end: 1.0,
            shade_model: ShadeModel::Smooth,
            fog_dirty: true,
        }
    }
}
