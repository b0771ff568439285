//! Lights, materials and the light model
//!
//! Positions and spot directions are transformed into eye space with the
//! modelview current at the time of the call, so later matrix changes do not
//! move a light that was already placed.

use glam::{Vec3, Vec4};
use smallvec::SmallVec;

use super::Context;
use crate::derive::{eye_direction, eye_position};
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, fixed_slice, fixed_to_float, float_to_fixed};
use crate::hw::{Device, MAX_LIGHTS};
use crate::state::enums::Face;
use crate::state::{Light, Material};

/// Parameter values returned by the `get_*` calls.
pub type Params = SmallVec<[f32; 4]>;

fn light_index(light: GLenum) -> Option<usize> {
    light
        .checked_sub(gl::LIGHT0)
        .map(|i| i as usize)
        .filter(|&i| i < MAX_LIGHTS)
}

fn light_param_count(pname: GLenum) -> Option<usize> {
    Some(match pname {
        gl::AMBIENT | gl::DIFFUSE | gl::SPECULAR | gl::POSITION => 4,
        gl::SPOT_DIRECTION => 3,
        gl::SPOT_EXPONENT
        | gl::SPOT_CUTOFF
        | gl::CONSTANT_ATTENUATION
        | gl::LINEAR_ATTENUATION
        | gl::QUADRATIC_ATTENUATION => 1,
        _ => return None,
    })
}

fn material_param_count(pname: GLenum) -> Option<usize> {
    Some(match pname {
        gl::AMBIENT | gl::DIFFUSE | gl::SPECULAR | gl::EMISSION | gl::AMBIENT_AND_DIFFUSE => 4,
        gl::SHININESS => 1,
        _ => return None,
    })
}

fn vec4(p: &[f32]) -> Vec4 {
    Vec4::new(p[0], p[1], p[2], p[3])
}

/// Validates and stores one light parameter. `params` holds at least the
/// parameter's component count.
fn set_light_param(
    light: &mut Light,
    pname: GLenum,
    p: &[f32],
    modelview: &glam::Mat4,
) -> GlResult<()> {
    match pname {
        gl::AMBIENT => light.ambient = vec4(p).clamp(Vec4::ZERO, Vec4::ONE),
        gl::DIFFUSE => light.diffuse = vec4(p).clamp(Vec4::ZERO, Vec4::ONE),
        gl::SPECULAR => light.specular = vec4(p).clamp(Vec4::ZERO, Vec4::ONE),
        gl::POSITION => light.position = eye_position(modelview, vec4(p)),
        gl::SPOT_DIRECTION => {
            light.spot_direction = eye_direction(modelview, Vec3::new(p[0], p[1], p[2]));
        }
        gl::SPOT_EXPONENT => {
            if !(0.0..=128.0).contains(&p[0]) {
                return Err(GlError::InvalidValue);
            }
            light.spot_exponent = p[0];
        }
        gl::SPOT_CUTOFF => {
            if p[0] != 180.0 && !(0.0..=90.0).contains(&p[0]) {
                return Err(GlError::InvalidValue);
            }
            light.spot_cutoff = p[0];
        }
        gl::CONSTANT_ATTENUATION | gl::LINEAR_ATTENUATION | gl::QUADRATIC_ATTENUATION => {
            if p[0] < 0.0 {
                return Err(GlError::InvalidValue);
            }
            match pname {
                gl::CONSTANT_ATTENUATION => light.constant_attenuation = p[0],
                gl::LINEAR_ATTENUATION => light.linear_attenuation = p[0],
                _ => light.quadratic_attenuation = p[0],
            }
        }
        _ => return Err(GlError::InvalidEnum),
    }
    Ok(())
}

fn get_light_param(light: &Light, pname: GLenum) -> Option<Params> {
    Some(match pname {
        gl::AMBIENT => Params::from_slice(&light.ambient.to_array()),
        gl::DIFFUSE => Params::from_slice(&light.diffuse.to_array()),
        gl::SPECULAR => Params::from_slice(&light.specular.to_array()),
        gl::POSITION => Params::from_slice(&light.position.to_array()),
        gl::SPOT_DIRECTION => Params::from_slice(&light.spot_direction.to_array()),
        gl::SPOT_EXPONENT => Params::from_slice(&[light.spot_exponent]),
        gl::SPOT_CUTOFF => Params::from_slice(&[light.spot_cutoff]),
        gl::CONSTANT_ATTENUATION => Params::from_slice(&[light.constant_attenuation]),
        gl::LINEAR_ATTENUATION => Params::from_slice(&[light.linear_attenuation]),
        gl::QUADRATIC_ATTENUATION => Params::from_slice(&[light.quadratic_attenuation]),
        _ => return None,
    })
}

fn set_material_param(material: &mut Material, pname: GLenum, p: &[f32]) {
    match pname {
        gl::AMBIENT => material.ambient = vec4(p),
        gl::DIFFUSE => material.diffuse = vec4(p),
        gl::SPECULAR => material.specular = vec4(p),
        gl::EMISSION => material.emission = vec4(p),
        gl::AMBIENT_AND_DIFFUSE => {
            material.ambient = vec4(p);
            material.diffuse = vec4(p);
        }
        _ => material.shininess = p[0],
    }
    material.dirty = true;
}

impl<D: Device> Context<D> {
    pub fn light_fv(&mut self, light: GLenum, pname: GLenum, params: &[f32]) -> GlResult<()> {
        const OP: &str = "glLightfv";
        let (Some(index), Some(count)) = (light_index(light), light_param_count(pname)) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        let Some(p) = params.get(..count) else {
            return self.fail(OP, GlError::InvalidValue);
        };

        let modelview = *self.state.transform.modelview.top();
        let target = &mut self.state.lighting.lights[index];
        let result = set_light_param(target, pname, p, &modelview);
        if result.is_ok() {
            target.dirty = true;
        }
        self.check(OP, result)
    }

    /// Scalar light parameters only.
    pub fn light_f(&mut self, light: GLenum, pname: GLenum, param: f32) -> GlResult<()> {
        if light_param_count(pname) != Some(1) {
            return self.fail("glLightf", GlError::InvalidEnum);
        }
        self.light_fv(light, pname, &[param])
    }

    pub fn light_x(&mut self, light: GLenum, pname: GLenum, param: GLfixed) -> GlResult<()> {
        self.light_f(light, pname, fixed_to_float(param))
    }

    pub fn light_xv(&mut self, light: GLenum, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        self.light_fv(light, pname, &fixed_slice(params))
    }

    /// Position and spot direction come back in eye space.
    pub fn get_light_fv(&mut self, light: GLenum, pname: GLenum) -> GlResult<Params> {
        let values = light_index(light)
            .and_then(|i| get_light_param(&self.state.lighting.lights[i], pname));
        match values {
            Some(v) => Ok(v),
            None => self.fail("glGetLightfv", GlError::InvalidEnum),
        }
    }

    pub fn get_light_xv(
        &mut self,
        light: GLenum,
        pname: GLenum,
    ) -> GlResult<SmallVec<[GLfixed; 4]>> {
        let values = self.get_light_fv(light, pname)?;
        Ok(values.into_iter().map(float_to_fixed).collect())
    }

    pub fn light_model_fv(&mut self, pname: GLenum, params: &[f32]) -> GlResult<()> {
        const OP: &str = "glLightModelfv";
        let count = match pname {
            gl::LIGHT_MODEL_AMBIENT => 4,
            gl::LIGHT_MODEL_TWO_SIDE => 1,
            _ => return self.fail(OP, GlError::InvalidEnum),
        };
        let Some(p) = params.get(..count) else {
            return self.fail(OP, GlError::InvalidValue);
        };
        let l = &mut self.state.lighting;
        if pname == gl::LIGHT_MODEL_AMBIENT {
            l.model_ambient = vec4(p);
        } else {
            l.two_sided = p[0] != 0.0;
        }
        l.model_dirty = true;
        Ok(())
    }

    pub fn light_model_f(&mut self, pname: GLenum, param: f32) -> GlResult<()> {
        if pname != gl::LIGHT_MODEL_TWO_SIDE {
            return self.fail("glLightModelf", GlError::InvalidEnum);
        }
        self.light_model_fv(pname, &[param])
    }

    pub fn light_model_x(&mut self, pname: GLenum, param: GLfixed) -> GlResult<()> {
        self.light_model_f(pname, fixed_to_float(param))
    }

    pub fn light_model_xv(&mut self, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        self.light_model_fv(pname, &fixed_slice(params))
    }

    pub fn material_fv(&mut self, face: GLenum, pname: GLenum, params: &[f32]) -> GlResult<()> {
        const OP: &str = "glMaterialfv";
        let (Some(face), Some(count)) = (Face::from_gl(face), material_param_count(pname)) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        let Some(p) = params.get(..count) else {
            return self.fail(OP, GlError::InvalidValue);
        };
        if pname == gl::SHININESS && !(0.0..=128.0).contains(&p[0]) {
            return self.fail(OP, GlError::InvalidValue);
        }

        let l = &mut self.state.lighting;
        if matches!(face, Face::Front | Face::FrontAndBack) {
            set_material_param(&mut l.front, pname, p);
        }
        if matches!(face, Face::Back | Face::FrontAndBack) {
            set_material_param(&mut l.back, pname, p);
        }
        Ok(())
    }

    pub fn material_f(&mut self, face: GLenum, pname: GLenum, param: f32) -> GlResult<()> {
        if pname != gl::SHININESS {
            return self.fail("glMaterialf", GlError::InvalidEnum);
        }
        self.material_fv(face, pname, &[param])
    }

    pub fn material_x(&mut self, face: GLenum, pname: GLenum, param: GLfixed) -> GlResult<()> {
        self.material_f(face, pname, fixed_to_float(param))
    }

    pub fn material_xv(&mut self, face: GLenum, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        self.material_fv(face, pname, &fixed_slice(params))
    }

    /// `face` must name a single face.
    pub fn get_material_fv(&mut self, face: GLenum, pname: GLenum) -> GlResult<Params> {
        let l = &self.state.lighting;
        let material = match Face::from_gl(face) {
            Some(Face::Front) => Some(&l.front),
            Some(Face::Back) => Some(&l.back),
            _ => None,
        };
        let values = material.and_then(|m| {
            Some(match pname {
                gl::AMBIENT => Params::from_slice(&m.ambient.to_array()),
                gl::DIFFUSE => Params::from_slice(&m.diffuse.to_array()),
                gl::SPECULAR => Params::from_slice(&m.specular.to_array()),
                gl::EMISSION => Params::from_slice(&m.emission.to_array()),
                gl::SHININESS => Params::from_slice(&[m.shininess]),
                _ => return None,
            })
        });
        match values {
            Some(v) => Ok(v),
            None => self.fail("glGetMaterialfv", GlError::InvalidEnum),
        }
    }

    pub fn get_material_xv(
        &mut self,
        face: GLenum,
        pname: GLenum,
    ) -> GlResult<SmallVec<[GLfixed; 4]>> {
        let values = self.get_material_fv(face, pname)?;
        Ok(values.into_iter().map(float_to_fixed).collect())
    }
}
