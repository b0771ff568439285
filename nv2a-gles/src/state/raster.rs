//! Points, lines, polygons and multisampling

use glam::Vec3;

use super::enums::{Face, FrontFace};

#[derive(Debug, Clone, PartialEq)]
pub struct RasterState {
    pub point_size: f32,
    pub point_size_min: f32,
    pub point_size_max: f32,
    pub point_fade_threshold: f32,
    /// Constant, linear and quadratic distance terms
    pub point_distance_attenuation: Vec3,
    pub point_smooth: bool,
    pub point_sprite: bool,
    /// Set once any point parameter has been specified
    pub point_params_requested: bool,
    pub line_width: f32,
    pub line_smooth: bool,
    pub cull_enabled: bool,
    pub cull_mode: Face,
    pub front_face: FrontFace,
    pub polygon_offset_factor: f32,
    pub polygon_offset_units: f32,
    pub polygon_offset_fill: bool,
    pub point_params_dirty: bool,
}

impl Default for RasterState {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            point_size_min: 0.0,
            point_size_max: 1.0,
            point_fade_threshold: 1.0,
            point_distance_attenuation: Vec3::X,
            point_smooth: false,
            point_sprite: false,
            point_params_requested: false,
            line_width: 1.0,
            line_smooth: false,
            cull_enabled: false,
            cull_mode: Face::Back,
            front_face: FrontFace::Ccw,
            polygon_offset_factor: 0.0,
            polygon_offset_units: 0.0,
            polygon_offset_fill: false,
            point_params_dirty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultisampleState {
    pub enabled: bool,
    pub alpha_to_coverage: bool,
    pub alpha_to_one: bool,
    pub coverage: bool,
    /// Clamped to [0, 1]
    pub coverage_value: f32,
    pub coverage_invert: bool,
}

impl Default for MultisampleState {
    fn default() -> Self {
        Self {
            enabled: true,
            alpha_to_coverage: false,
            alpha_to_one: false,
            coverage: false,
            coverage_value: 1.0,
            coverage_invert: false,
        }
    }
}
