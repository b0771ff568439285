//! Texture units, objects, parameters, environments and image upload

use glam::Vec4;
use smallvec::SmallVec;

use super::Context;
use super::lighting::Params;
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, fixed_to_float, float_to_int, int_to_float, npot2pot};
use crate::hw::{Device, MAX_TEXTURE_UNITS, TextureUpload, texture_layout};
use crate::state::enums::{
    CombineFunc, CombineOperand, CombineSource, MagFilter, MinFilter, PixelFormat, PixelType,
    TexEnvMode, TextureWrap,
};
use crate::state::{TexEnv, TextureImage, TextureObject};

/// Swizzled texture storage alignment.
const TEXTURE_ALIGNMENT: usize = 0x1000;

fn unit_index(texture: GLenum) -> Option<usize> {
    texture
        .checked_sub(gl::TEXTURE0)
        .map(|i| i as usize)
        .filter(|&i| i < MAX_TEXTURE_UNITS)
}

fn align_up(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}

enum EnvParam {
    Scalar(f32),
    Color(Vec4),
}

/// Validates and stores one `TEXTURE_ENV` parameter.
fn set_env_param(env: &mut TexEnv, pname: GLenum, param: EnvParam) -> GlResult<()> {
    let value = match param {
        EnvParam::Color(color) if pname == gl::TEXTURE_ENV_COLOR => {
            env.color = color.clamp(Vec4::ZERO, Vec4::ONE);
            return Ok(());
        }
        EnvParam::Color(_) => return Err(GlError::InvalidEnum),
        EnvParam::Scalar(v) => v,
    };
    let e = value as GLenum;
    let bad = GlError::InvalidEnum;
    match pname {
        gl::TEXTURE_ENV_MODE => env.mode = TexEnvMode::from_gl(e).ok_or(bad)?,
        gl::COMBINE_RGB => env.combine_rgb = CombineFunc::from_gl(e).ok_or(bad)?,
        gl::COMBINE_ALPHA => {
            env.combine_alpha = CombineFunc::from_gl(e)
                .filter(|f| f.valid_for_alpha())
                .ok_or(bad)?;
        }
        gl::SRC0_RGB..=gl::SRC2_RGB => {
            env.src_rgb[(pname - gl::SRC0_RGB) as usize] =
                CombineSource::from_gl(e).ok_or(bad)?;
        }
        gl::SRC0_ALPHA..=gl::SRC2_ALPHA => {
            env.src_alpha[(pname - gl::SRC0_ALPHA) as usize] =
                CombineSource::from_gl(e).ok_or(bad)?;
        }
        gl::OPERAND0_RGB..=gl::OPERAND2_RGB => {
            env.operand_rgb[(pname - gl::OPERAND0_RGB) as usize] =
                CombineOperand::from_gl(e).ok_or(bad)?;
        }
        gl::OPERAND0_ALPHA..=gl::OPERAND2_ALPHA => {
            env.operand_alpha[(pname - gl::OPERAND0_ALPHA) as usize] = CombineOperand::from_gl(e)
                .filter(|o| o.valid_for_alpha())
                .ok_or(bad)?;
        }
        gl::RGB_SCALE | gl::ALPHA_SCALE => {
            if ![1.0, 2.0, 4.0].contains(&value) {
                return Err(GlError::InvalidValue);
            }
            if pname == gl::RGB_SCALE {
                env.rgb_scale = value;
            } else {
                env.alpha_scale = value;
            }
        }
        _ => return Err(bad),
    }
    Ok(())
}

fn get_env_param(env: &TexEnv, pname: GLenum) -> Option<f32> {
    let e = |v: GLenum| Some(v as f32);
    match pname {
        gl::TEXTURE_ENV_MODE => e(env.mode.to_gl()),
        gl::COMBINE_RGB => e(env.combine_rgb.to_gl()),
        gl::COMBINE_ALPHA => e(env.combine_alpha.to_gl()),
        gl::SRC0_RGB..=gl::SRC2_RGB => e(env.src_rgb[(pname - gl::SRC0_RGB) as usize].to_gl()),
        gl::SRC0_ALPHA..=gl::SRC2_ALPHA => {
            e(env.src_alpha[(pname - gl::SRC0_ALPHA) as usize].to_gl())
        }
        gl::OPERAND0_RGB..=gl::OPERAND2_RGB => {
            e(env.operand_rgb[(pname - gl::OPERAND0_RGB) as usize].to_gl())
        }
        gl::OPERAND0_ALPHA..=gl::OPERAND2_ALPHA => {
            e(env.operand_alpha[(pname - gl::OPERAND0_ALPHA) as usize].to_gl())
        }
        gl::RGB_SCALE => Some(env.rgb_scale),
        gl::ALPHA_SCALE => Some(env.alpha_scale),
        _ => None,
    }
}

/// Arguments of `glTexImage2D`.
#[derive(Debug, Clone, Copy)]
pub struct TexImage2D<'a> {
    pub target: GLenum,
    pub level: i32,
    pub internal_format: GLenum,
    pub width: i32,
    pub height: i32,
    pub border: i32,
    pub format: GLenum,
    pub ty: GLenum,
    /// Rows aligned to the unpack alignment; `None` allocates storage only
    pub pixels: Option<&'a [u8]>,
}

impl<D: Device> Context<D> {
    // ========================================================================
    // Units
    // ========================================================================

    pub fn active_texture(&mut self, texture: GLenum) -> GlResult<()> {
        let Some(unit) = unit_index(texture) else {
            return self.fail("glActiveTexture", GlError::InvalidEnum);
        };
        self.state.texture.active_unit = unit;
        Ok(())
    }

    pub fn client_active_texture(&mut self, texture: GLenum) -> GlResult<()> {
        let Some(unit) = unit_index(texture) else {
            return self.fail("glClientActiveTexture", GlError::InvalidEnum);
        };
        self.state.arrays.client_active_unit = unit;
        Ok(())
    }

    // ========================================================================
    // Objects
    // ========================================================================

    pub fn gen_textures(&mut self, n: i32) -> GlResult<Vec<u32>> {
        if n < 0 {
            return self.fail("glGenTextures", GlError::InvalidValue);
        }
        Ok(self.state.texture.gen_names(n as usize))
    }

    /// Binds `name` to the active unit, creating the object on first use.
    pub fn bind_texture(&mut self, target: GLenum, name: u32) -> GlResult<()> {
        if target != gl::TEXTURE_2D {
            return self.fail("glBindTexture", GlError::InvalidEnum);
        }
        let t = &mut self.state.texture;
        if name != 0 {
            t.objects
                .entry(name)
                .or_insert_with(|| TextureObject::new(name));
        }
        let unit = t.active_unit;
        t.units[unit].binding = name;
        t.units[unit].dirty = true;
        t.bound_mut(unit).dirty = true;
        Ok(())
    }

    /// Frees each object's storage. Units that had one bound fall back to
    /// their default object.
    pub fn delete_textures(&mut self, names: &[u32]) {
        let t = &mut self.state.texture;
        for &name in names {
            if name == 0 {
                continue;
            }
            let Some(object) = t.objects.remove(&name) else {
                continue;
            };
            if let Some(image) = object.image {
                self.device.free(image.allocation);
            }
            for unit in &mut t.units {
                if unit.binding == name {
                    unit.binding = 0;
                    unit.dirty = true;
                    unit.default_object.dirty = true;
                }
            }
            tracing::debug!(name, "texture deleted");
        }
    }

    pub fn is_texture(&self, name: u32) -> bool {
        name != 0 && self.state.texture.objects.contains_key(&name)
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    pub fn tex_parameter_i(&mut self, target: GLenum, pname: GLenum, param: i32) -> GlResult<()> {
        const OP: &str = "glTexParameteri";
        if target != gl::TEXTURE_2D {
            return self.fail(OP, GlError::InvalidEnum);
        }
        let unit = self.state.texture.active_unit;
        let object = self.state.texture.bound_mut(unit);
        let e = param as GLenum;
        let applied = match pname {
            gl::TEXTURE_MIN_FILTER => MinFilter::from_gl(e).map(|f| object.min_filter = f),
            gl::TEXTURE_MAG_FILTER => MagFilter::from_gl(e).map(|f| object.mag_filter = f),
            gl::TEXTURE_WRAP_S => TextureWrap::from_gl(e).map(|w| object.wrap_s = w),
            gl::TEXTURE_WRAP_T => TextureWrap::from_gl(e).map(|w| object.wrap_t = w),
            gl::GENERATE_MIPMAP => {
                object.generate_mipmap = param != 0;
                Some(())
            }
            _ => None,
        };
        if applied.is_none() {
            return self.fail(OP, GlError::InvalidEnum);
        }
        object.dirty = true;
        Ok(())
    }

    pub fn tex_parameter_f(&mut self, target: GLenum, pname: GLenum, param: f32) -> GlResult<()> {
        self.tex_parameter_i(target, pname, param as i32)
    }

    /// Every texture parameter is an enum or a boolean, so the value is not
    /// converted from fixed point.
    pub fn tex_parameter_x(&mut self, target: GLenum, pname: GLenum, param: GLfixed) -> GlResult<()> {
        self.tex_parameter_i(target, pname, param)
    }

    pub fn get_tex_parameter(&mut self, target: GLenum, pname: GLenum) -> GlResult<i32> {
        let value = (target == gl::TEXTURE_2D)
            .then(|| {
                let object = self.state.texture.bound(self.state.texture.active_unit);
                match pname {
                    gl::TEXTURE_MIN_FILTER => Some(object.min_filter.to_gl() as i32),
                    gl::TEXTURE_MAG_FILTER => Some(object.mag_filter.to_gl() as i32),
                    gl::TEXTURE_WRAP_S => Some(object.wrap_s.to_gl() as i32),
                    gl::TEXTURE_WRAP_T => Some(object.wrap_t.to_gl() as i32),
                    gl::GENERATE_MIPMAP => Some(object.generate_mipmap as i32),
                    _ => None,
                }
            })
            .flatten();
        match value {
            Some(v) => Ok(v),
            None => self.fail("glGetTexParameteriv", GlError::InvalidEnum),
        }
    }

    // ========================================================================
    // Environment
    // ========================================================================

    fn set_tex_env(
        &mut self,
        op: &'static str,
        target: GLenum,
        pname: GLenum,
        param: EnvParam,
    ) -> GlResult<()> {
        let unit = self.state.texture.active_unit;
        let u = &mut self.state.texture.units[unit];
        let result = match (target, pname, param) {
            (gl::POINT_SPRITE_OES, gl::COORD_REPLACE_OES, EnvParam::Scalar(v)) => {
                u.env.coord_replace = v != 0.0;
                Ok(())
            }
            (gl::TEXTURE_ENV, _, param) => set_env_param(&mut u.env, pname, param),
            _ => Err(GlError::InvalidEnum),
        };
        if result.is_ok() {
            u.dirty = true;
        }
        self.check(op, result)
    }

    pub fn tex_env_i(&mut self, target: GLenum, pname: GLenum, param: i32) -> GlResult<()> {
        self.set_tex_env("glTexEnvi", target, pname, EnvParam::Scalar(param as f32))
    }

    /// Scalar form; `TEXTURE_ENV_COLOR` needs [`Context::tex_env_fv`].
    pub fn tex_env_f(&mut self, target: GLenum, pname: GLenum, param: f32) -> GlResult<()> {
        self.set_tex_env("glTexEnvf", target, pname, EnvParam::Scalar(param))
    }

    /// Enum parameters pass through unconverted; only the scales are fixed
    /// point.
    pub fn tex_env_x(&mut self, target: GLenum, pname: GLenum, param: GLfixed) -> GlResult<()> {
        let value = match pname {
            gl::RGB_SCALE | gl::ALPHA_SCALE => fixed_to_float(param),
            _ => param as f32,
        };
        self.set_tex_env("glTexEnvx", target, pname, EnvParam::Scalar(value))
    }

    pub fn tex_env_fv(&mut self, target: GLenum, pname: GLenum, params: &[f32]) -> GlResult<()> {
        const OP: &str = "glTexEnvfv";
        let param = if pname == gl::TEXTURE_ENV_COLOR {
            match params.first_chunk::<4>() {
                Some(c) => EnvParam::Color(Vec4::from_array(*c)),
                None => return self.fail(OP, GlError::InvalidValue),
            }
        } else {
            match params.first() {
                Some(&v) => EnvParam::Scalar(v),
                None => return self.fail(OP, GlError::InvalidValue),
            }
        };
        self.set_tex_env(OP, target, pname, param)
    }

    /// Integer colors map onto [-1, 1] before clamping.
    pub fn tex_env_iv(&mut self, target: GLenum, pname: GLenum, params: &[i32]) -> GlResult<()> {
        const OP: &str = "glTexEnviv";
        let param = if pname == gl::TEXTURE_ENV_COLOR {
            match params.first_chunk::<4>() {
                Some(c) => EnvParam::Color(Vec4::from_array(c.map(int_to_float))),
                None => return self.fail(OP, GlError::InvalidValue),
            }
        } else {
            match params.first() {
                Some(&v) => EnvParam::Scalar(v as f32),
                None => return self.fail(OP, GlError::InvalidValue),
            }
        };
        self.set_tex_env(OP, target, pname, param)
    }

    pub fn tex_env_xv(&mut self, target: GLenum, pname: GLenum, params: &[GLfixed]) -> GlResult<()> {
        if pname != gl::TEXTURE_ENV_COLOR {
            let Some(&v) = params.first() else {
                return self.fail("glTexEnvxv", GlError::InvalidValue);
            };
            return self.tex_env_x(target, pname, v);
        }
        let Some(c) = params.first_chunk::<4>() else {
            return self.fail("glTexEnvxv", GlError::InvalidValue);
        };
        self.tex_env_fv(target, pname, &c.map(fixed_to_float))
    }

    pub fn get_tex_env_fv(&mut self, target: GLenum, pname: GLenum) -> GlResult<Params> {
        let env = &self.state.texture.units[self.state.texture.active_unit].env;
        let values = match (target, pname) {
            (gl::POINT_SPRITE_OES, gl::COORD_REPLACE_OES) => {
                Some(Params::from_slice(&[env.coord_replace as u32 as f32]))
            }
            (gl::TEXTURE_ENV, gl::TEXTURE_ENV_COLOR) => {
                Some(Params::from_slice(&env.color.to_array()))
            }
            (gl::TEXTURE_ENV, _) => get_env_param(env, pname).map(|v| Params::from_slice(&[v])),
            _ => None,
        };
        match values {
            Some(v) => Ok(v),
            None => self.fail("glGetTexEnvfv", GlError::InvalidEnum),
        }
    }

    /// Colors come back through the integer color mapping.
    pub fn get_tex_env_iv(&mut self, target: GLenum, pname: GLenum) -> GlResult<SmallVec<[i32; 4]>> {
        let values = self.get_tex_env_fv(target, pname)?;
        Ok(if target == gl::TEXTURE_ENV && pname == gl::TEXTURE_ENV_COLOR {
            values.into_iter().map(float_to_int).collect()
        } else {
            values.into_iter().map(|v| v as i32).collect()
        })
    }

    // ========================================================================
    // Images
    // ========================================================================

    /// Specifies level 0 of the texture bound to the active unit.
    ///
    /// Storage is rounded up to power-of-two dimensions; the texture matrix
    /// flush rescales coordinates onto the used part. Levels above 0 are
    /// validated and ignored.
    pub fn tex_image_2d(&mut self, args: &TexImage2D<'_>) -> GlResult<()> {
        const OP: &str = "glTexImage2D";
        let (Some(format), Some(ty)) = (
            PixelFormat::from_gl(args.format),
            PixelType::from_gl(args.ty),
        ) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        if args.target != gl::TEXTURE_2D {
            return self.fail(OP, GlError::InvalidEnum);
        }
        let max = self.config.limits.max_texture_size as i32;
        if args.level < 0
            || args.width < 0
            || args.height < 0
            || args.width > max
            || args.height > max
            || args.border != 0
            || PixelFormat::from_gl(args.internal_format).is_none()
        {
            return self.fail(OP, GlError::InvalidValue);
        }
        if args.internal_format != args.format
            || ty.required_format().is_some_and(|f| f != format)
        {
            return self.fail(OP, GlError::InvalidOperation);
        }

        let (width, height) = (args.width as u32, args.height as u32);
        let src_bpp = ty.source_bytes_per_pixel(format);
        let src_pitch = align_up(width * src_bpp, self.state.pixel_store.unpack_alignment);
        if let Some(pixels) = args.pixels {
            let needed = match height {
                0 => 0,
                h => (src_pitch * (h - 1) + width * src_bpp) as usize,
            };
            if pixels.len() < needed {
                return self.fail(OP, GlError::InvalidValue);
            }
        }
        if args.level > 0 {
            tracing::debug!(level = args.level, "mipmap level ignored");
            return Ok(());
        }

        let layout = texture_layout(format, ty);
        let (pot_width, pot_height) = (npot2pot(width), npot2pot(height));
        let pitch = pot_width * layout.bytes_per_pixel;

        let image = if width == 0 || height == 0 {
            None
        } else {
            let size = pitch as usize * pot_height as usize;
            let allocation = match self.device.allocate(size, TEXTURE_ALIGNMENT) {
                Ok(a) => a,
                Err(err) => return self.fail(OP, err),
            };
            if let Some(pixels) = args.pixels {
                self.device.upload_texture(
                    &allocation,
                    &TextureUpload {
                        data: pixels,
                        width,
                        height,
                        src_pitch,
                        dst_pitch: pitch,
                        dst_bytes_per_pixel: layout.bytes_per_pixel,
                        conversion: layout.conversion,
                    },
                );
            }
            Some(TextureImage {
                width,
                height,
                pot_width,
                pot_height,
                pitch,
                format,
                ty,
                layout,
                allocation,
            })
        };

        let unit = self.state.texture.active_unit;
        let object = self.state.texture.bound_mut(unit);
        let previous = std::mem::replace(&mut object.image, image);
        object.dirty = true;
        // Matrices are rescaled by the used fraction of the storage.
        self.state.transform.texture_dirty[unit] = true;
        if let Some(old) = previous {
            self.device.free(old.allocation);
        }
        tracing::debug!(unit, width, height, ?format, ?ty, "texture image specified");
        Ok(())
    }
}
