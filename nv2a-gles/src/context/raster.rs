//! Culling, polygon offset, line width and point parameters

use glam::Vec3;

use super::Context;
use super::core::{line_range, point_range};
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, fixed_slice, fixed_to_float};
use crate::hw::methods::{
    CULL_FACE, FRONT_FACE, LINE_WIDTH, POINT_SIZE, POLYGON_OFFSET_BIAS,
    POLYGON_OFFSET_SCALE_FACTOR,
};
use crate::hw::{Batch, Device};
use crate::state::enums::{Face, FrontFace};

/// Line width and point size registers take 6.3 fixed point.
pub(super) fn size_word(value: f32, [min, max]: [f32; 2]) -> u32 {
    (value.clamp(min, max) * 8.0) as u32
}

impl<D: Device> Context<D> {
    pub fn cull_face(&mut self, mode: GLenum) -> GlResult<()> {
        let Some(mode) = Face::from_gl(mode) else {
            return self.fail("glCullFace", GlError::InvalidEnum);
        };
        self.state.raster.cull_mode = mode;
        self.batch().push1(CULL_FACE, mode.to_hw());
        Ok(())
    }

    pub fn front_face(&mut self, mode: GLenum) -> GlResult<()> {
        let Some(mode) = FrontFace::from_gl(mode) else {
            return self.fail("glFrontFace", GlError::InvalidEnum);
        };
        self.state.raster.front_face = mode;
        self.batch().push1(FRONT_FACE, mode.to_hw());
        Ok(())
    }

    pub fn polygon_offset(&mut self, factor: f32, units: f32) {
        let r = &mut self.state.raster;
        r.polygon_offset_factor = factor;
        r.polygon_offset_units = units;

        let mut b = Batch::new(&mut self.device);
        b.push_f32(POLYGON_OFFSET_SCALE_FACTOR, factor);
        b.push_f32(POLYGON_OFFSET_BIAS, units);
    }

    pub fn polygon_offset_x(&mut self, factor: GLfixed, units: GLfixed) {
        self.polygon_offset(fixed_to_float(factor), fixed_to_float(units));
    }

    pub fn line_width(&mut self, width: f32) -> GlResult<()> {
        if width <= 0.0 {
            return self.fail("glLineWidth", GlError::InvalidValue);
        }
        let r = &mut self.state.raster;
        r.line_width = width;
        let word = size_word(width, line_range(&self.config.limits, r.line_smooth));
        self.batch().push1(LINE_WIDTH, word);
        Ok(())
    }

    pub fn line_width_x(&mut self, width: GLfixed) -> GlResult<()> {
        self.line_width(fixed_to_float(width))
    }

    /// Sets the register directly and re-derives the attenuation parameters,
    /// which scale from the base size.
    pub fn point_size(&mut self, size: f32) -> GlResult<()> {
        if size <= 0.0 {
            return self.fail("glPointSize", GlError::InvalidValue);
        }
        let r = &mut self.state.raster;
        r.point_size = size;
        r.point_params_dirty = true;
        let word = size_word(size, point_range(&self.config.limits, r.point_smooth));
        self.batch().push1(POINT_SIZE, word);
        Ok(())
    }

    pub fn point_size_x(&mut self, size: GLfixed) -> GlResult<()> {
        self.point_size(fixed_to_float(size))
    }

    /// Scalar point parameters. Distance attenuation needs the vector form.
    pub fn point_parameter_f(&mut self, pname: GLenum, param: f32) -> GlResult<()> {
        if pname == gl::POINT_DISTANCE_ATTENUATION {
            return self.fail("glPointParameterf", GlError::InvalidEnum);
        }
        self.point_parameter_fv(pname, &[param])
    }

    pub fn point_parameter_fv(&mut self, pname: GLenum, params: &[f32]) -> GlResult<()> {
        const OP: &str = "glPointParameterfv";
        let count = match pname {
            gl::POINT_SIZE_MIN | gl::POINT_SIZE_MAX | gl::POINT_FADE_THRESHOLD_SIZE => 1,
            gl::POINT_DISTANCE_ATTENUATION => 3,
            _ => return self.fail(OP, GlError::InvalidEnum),
        };
        let Some(values) = params.get(..count) else {
            return self.fail(OP, GlError::InvalidValue);
        };
        if values.iter().any(|&v| v < 0.0) {
            return self.fail(OP, GlError::InvalidValue);
        }

        let r = &mut self.state.raster;
        match pname {
            gl::POINT_SIZE_MIN => r.point_size_min = values[0],
            gl::POINT_SIZE_MAX => r.point_size_max = values[0],
            gl::POINT_FADE_THRESHOLD_SIZE => r.point_fade_threshold = values[0],
            _ => r.point_distance_attenuation = Vec3::from_slice(values),
        }
        r.point_params_requested = true;
        r.point_params_dirty = true;
        Ok(())
    }

    pub fn point_parameter_x(&mut self, pname: GLenum, param: GLfixed) -> GlResult<()> {
        self.point_parameter_f(pname, fixed_to_float(param))
    }

    pub fn point_parameter_xv(&mut self, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        self.point_parameter_fv(pname, &fixed_slice(params))
    }
}
