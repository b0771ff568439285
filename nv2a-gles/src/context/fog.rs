use glam::Vec4;

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, fixed_slice, fixed_to_float};
use crate::hw::Device;
use crate::state::enums::FogMode;

impl<D: Device> Context<D> {
    pub fn fog_f(&mut self, pname: GLenum, param: f32) -> GlResult<()> {
        const OP: &str = "glFogf";
        let c = &mut self.state.coloring;
        match pname {
            gl::FOG_MODE => {
                let Some(mode) = FogMode::from_gl(param as GLenum) else {
                    return self.fail(OP, GlError::InvalidEnum);
                };
                c.fog_mode = mode;
            }
            gl::FOG_DENSITY => {
                if param < 0.0 {
                    return self.fail(OP, GlError::InvalidValue);
                }
                c.fog_density = param;
            }
            gl::FOG_START => c.fog_start = param,
            gl::FOG_END => c.fog_end = param,
            _ => return self.fail(OP, GlError::InvalidEnum),
        }
        self.state.coloring.fog_dirty = true;
        Ok(())
    }

    /// `FOG_COLOR` takes four components clamped to [0, 1]; everything else
    /// reads the first value.
    pub fn fog_fv(&mut self, pname: GLenum, params: &[f32]) -> GlResult<()> {
        if pname != gl::FOG_COLOR {
            let Some(&first) = params.first() else {
                return self.fail("glFogfv", GlError::InvalidValue);
            };
            return self.fog_f(pname, first);
        }
        let Some(&[r, g, b, a]) = params.first_chunk::<4>() else {
            return self.fail("glFogfv", GlError::InvalidValue);
        };
        let c = &mut self.state.coloring;
        c.fog_color = Vec4::new(r, g, b, a).clamp(Vec4::ZERO, Vec4::ONE);
        c.fog_dirty = true;
        Ok(())
    }

    /// The mode is an enum and is passed through unconverted.
    pub fn fog_x(&mut self, pname: GLenum, param: GLfixed) -> GlResult<()> {
        if pname == gl::FOG_MODE {
            return self.fog_f(pname, param as f32);
        }
        self.fog_f(pname, fixed_to_float(param))
    }

    pub fn fog_xv(&mut self, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        if pname == gl::FOG_MODE {
            let Some(&mode) = params.first() else {
                return self.fail("glFogxv", GlError::InvalidValue);
            };
            return self.fog_x(pname, mode);
        }
        self.fog_fv(pname, &fixed_slice(params))
    }
}
