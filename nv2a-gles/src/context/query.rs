//! `glGetBooleanv` / `glGetIntegerv` / `glGetFloatv` / `glGetFixedv`
//!
//! Every query reads the stored state, never the hardware. Each pname
//! produces a typed [`Value`]; the four entry points convert it with the GL
//! rules: booleans are 0 or 1, floats round to the nearest integer, and
//! normalized values (colors, depths) map onto the full integer range.

use glam::Mat4;
use smallvec::SmallVec;

use super::Context;
use super::core::capability_enabled;
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, float_to_fixed, float_to_int};
use crate::hw::{Device, MAX_CLIP_PLANES, MAX_LIGHTS, MAX_TEXTURE_UNITS};
use crate::state::enums::Capability;
use crate::state::{RenderState, VertexArray};

/// Color buffer is A8R8G8B8, depth/stencil is Z24S8.
const COLOR_CHANNEL_BITS: i32 = 8;
const DEPTH_BITS: i32 = 24;
const STENCIL_BITS: i32 = 8;

/// A queried state value in its native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bools(SmallVec<[bool; 4]>),
    /// Integers and enumerants
    Ints(SmallVec<[i32; 4]>),
    Floats(SmallVec<[f32; 16]>),
    /// Colors, depths and other values in [-1, 1]
    Normalized(SmallVec<[f32; 4]>),
}

impl Value {
    pub fn len(&self) -> usize {
        match self {
            Self::Bools(v) => v.len(),
            Self::Ints(v) => v.len(),
            Self::Floats(v) => v.len(),
            Self::Normalized(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_bools(&self) -> SmallVec<[bool; 16]> {
        match self {
            Self::Bools(v) => v.iter().copied().collect(),
            Self::Ints(v) => v.iter().map(|&i| i != 0).collect(),
            Self::Floats(v) => v.iter().map(|&f| f != 0.0).collect(),
            Self::Normalized(v) => v.iter().map(|&f| f != 0.0).collect(),
        }
    }

    pub fn to_ints(&self) -> SmallVec<[i32; 16]> {
        match self {
            Self::Bools(v) => v.iter().map(|&b| b as i32).collect(),
            Self::Ints(v) => v.iter().copied().collect(),
            Self::Floats(v) => v.iter().map(|&f| f.round() as i32).collect(),
            Self::Normalized(v) => v.iter().copied().map(float_to_int).collect(),
        }
    }

    pub fn to_floats(&self) -> SmallVec<[f32; 16]> {
        match self {
            Self::Bools(v) => v.iter().map(|&b| b as u32 as f32).collect(),
            Self::Ints(v) => v.iter().map(|&i| i as f32).collect(),
            Self::Floats(v) => v.iter().copied().collect(),
            Self::Normalized(v) => v.iter().copied().collect(),
        }
    }

    pub fn to_fixed(&self) -> SmallVec<[GLfixed; 16]> {
        self.to_floats().into_iter().map(float_to_fixed).collect()
    }
}

fn bools(v: &[bool]) -> Value {
    Value::Bools(SmallVec::from_slice(v))
}

fn ints(v: &[i32]) -> Value {
    Value::Ints(SmallVec::from_slice(v))
}

fn int(v: i32) -> Value {
    ints(&[v])
}

fn enum_value(v: GLenum) -> Value {
    int(v as i32)
}

fn floats(v: &[f32]) -> Value {
    Value::Floats(SmallVec::from_slice(v))
}

fn normalized(v: &[f32]) -> Value {
    Value::Normalized(SmallVec::from_slice(v))
}

fn matrix(m: &Mat4) -> Value {
    floats(&m.to_cols_array())
}

/// Size, type, stride and binding pnames of one array.
fn array_query(array: &VertexArray, pname: GLenum, names: [GLenum; 5]) -> Option<Value> {
    let [enabled, size, ty, stride, binding] = names;
    Some(match pname {
        p if p == enabled => bools(&[array.enabled]),
        p if p == size => int(array.size as i32),
        p if p == ty => enum_value(array.ty.to_gl()),
        p if p == stride => int(array.stride as i32),
        p if p == binding => int(array.buffer as i32),
        _ => return None,
    })
}

impl<D: Device> Context<D> {
    /// Current value of `pname`, or `None` when it is not a state variable.
    fn query(&self, pname: GLenum) -> Option<Value> {
        let s: &RenderState = &self.state;
        let limits = &self.config.limits;
        let unit = s.texture.active_unit;
        let client_unit = s.arrays.client_active_unit;

        let value = match pname {
            // Implementation limits
            gl::MAX_LIGHTS => int(MAX_LIGHTS as i32),
            gl::MAX_CLIP_PLANES => int(MAX_CLIP_PLANES as i32),
            gl::MAX_TEXTURE_UNITS => int(MAX_TEXTURE_UNITS as i32),
            gl::MAX_TEXTURE_SIZE => int(limits.max_texture_size as i32),
            gl::MAX_MODELVIEW_STACK_DEPTH => int(limits.max_modelview_stack as i32),
            gl::MAX_PROJECTION_STACK_DEPTH => int(limits.max_projection_stack as i32),
            gl::MAX_TEXTURE_STACK_DEPTH => int(limits.max_texture_stack as i32),
            gl::MAX_VIEWPORT_DIMS => ints(&[
                limits.max_viewport_width as i32,
                limits.max_viewport_height as i32,
            ]),
            gl::SUBPIXEL_BITS => int(limits.subpixel_bits as i32),
            gl::ALIASED_POINT_SIZE_RANGE => floats(&limits.aliased_point_size),
            gl::SMOOTH_POINT_SIZE_RANGE => floats(&limits.smooth_point_size),
            gl::ALIASED_LINE_WIDTH_RANGE => floats(&limits.aliased_line_width),
            gl::SMOOTH_LINE_WIDTH_RANGE => floats(&limits.smooth_line_width),
            gl::RED_BITS | gl::GREEN_BITS | gl::BLUE_BITS | gl::ALPHA_BITS => {
                int(COLOR_CHANNEL_BITS)
            }
            gl::DEPTH_BITS => int(DEPTH_BITS),
            gl::STENCIL_BITS => int(STENCIL_BITS),
            gl::SAMPLE_BUFFERS | gl::SAMPLES => int(0),
            gl::NUM_COMPRESSED_TEXTURE_FORMATS => int(0),
            gl::COMPRESSED_TEXTURE_FORMATS => ints(&[]),
            gl::IMPLEMENTATION_COLOR_READ_FORMAT_OES => enum_value(gl::RGBA),
            gl::IMPLEMENTATION_COLOR_READ_TYPE_OES => enum_value(gl::UNSIGNED_BYTE),

            // Transform
            gl::MATRIX_MODE => enum_value(s.transform.matrix_mode.to_gl()),
            gl::MODELVIEW_MATRIX => matrix(s.transform.modelview.top()),
            gl::PROJECTION_MATRIX => matrix(s.transform.projection.top()),
            gl::TEXTURE_MATRIX => matrix(s.transform.texture[unit].top()),
            gl::MODELVIEW_STACK_DEPTH => int(s.transform.modelview.depth() as i32),
            gl::PROJECTION_STACK_DEPTH => int(s.transform.projection.depth() as i32),
            gl::TEXTURE_STACK_DEPTH => int(s.transform.texture[unit].depth() as i32),
            gl::VIEWPORT => ints(&s.transform.viewport),
            gl::DEPTH_RANGE => normalized(&s.transform.depth_range),

            // Lighting and fog
            gl::LIGHT_MODEL_AMBIENT => normalized(&s.lighting.model_ambient.to_array()),
            gl::LIGHT_MODEL_TWO_SIDE => bools(&[s.lighting.two_sided]),
            gl::SHADE_MODEL => enum_value(s.coloring.shade_model.to_gl()),
            gl::FOG_MODE => enum_value(s.coloring.fog_mode.to_gl()),
            gl::FOG_COLOR => normalized(&s.coloring.fog_color.to_array()),
            gl::FOG_DENSITY => floats(&[s.coloring.fog_density]),
            gl::FOG_START => floats(&[s.coloring.fog_start]),
            gl::FOG_END => floats(&[s.coloring.fog_end]),

            // Rasterization
            gl::POINT_SIZE => floats(&[s.raster.point_size]),
            gl::POINT_SIZE_MIN => floats(&[s.raster.point_size_min]),
            gl::POINT_SIZE_MAX => floats(&[s.raster.point_size_max]),
            gl::POINT_FADE_THRESHOLD_SIZE => floats(&[s.raster.point_fade_threshold]),
            gl::POINT_DISTANCE_ATTENUATION => {
                floats(&s.raster.point_distance_attenuation.to_array())
            }
            gl::LINE_WIDTH => floats(&[s.raster.line_width]),
            gl::CULL_FACE_MODE => enum_value(s.raster.cull_mode.to_gl()),
            gl::FRONT_FACE => enum_value(s.raster.front_face.to_gl()),
            gl::POLYGON_OFFSET_FACTOR => floats(&[s.raster.polygon_offset_factor]),
            gl::POLYGON_OFFSET_UNITS => floats(&[s.raster.polygon_offset_units]),
            gl::SAMPLE_COVERAGE_VALUE => normalized(&[s.multisample.coverage_value]),
            gl::SAMPLE_COVERAGE_INVERT => bools(&[s.multisample.coverage_invert]),

            // Per-fragment operations
            gl::SCISSOR_BOX => ints(&s.pixel_ops.scissor_box),
            gl::ALPHA_TEST_FUNC => enum_value(s.pixel_ops.alpha_func.to_gl()),
            gl::ALPHA_TEST_REF => normalized(&[s.pixel_ops.alpha_ref]),
            gl::STENCIL_FUNC => enum_value(s.pixel_ops.stencil_func.to_gl()),
            gl::STENCIL_REF => int(s.pixel_ops.stencil_ref),
            gl::STENCIL_VALUE_MASK => int(s.pixel_ops.stencil_value_mask as i32),
            gl::STENCIL_FAIL => enum_value(s.pixel_ops.stencil_fail.to_gl()),
            gl::STENCIL_PASS_DEPTH_FAIL => enum_value(s.pixel_ops.stencil_zfail.to_gl()),
            gl::STENCIL_PASS_DEPTH_PASS => enum_value(s.pixel_ops.stencil_zpass.to_gl()),
            gl::DEPTH_FUNC => enum_value(s.pixel_ops.depth_func.to_gl()),
            gl::BLEND_SRC => enum_value(s.pixel_ops.blend_src.to_gl()),
            gl::BLEND_DST => enum_value(s.pixel_ops.blend_dst.to_gl()),
            gl::LOGIC_OP_MODE => enum_value(s.pixel_ops.logic_op.to_gl()),

            // Framebuffer control
            gl::COLOR_WRITEMASK => bools(&s.framebuffer.color_mask.channels()),
            gl::DEPTH_WRITEMASK => bools(&[s.framebuffer.depth_mask]),
            gl::STENCIL_WRITEMASK => int(s.framebuffer.stencil_write_mask as i32),
            gl::COLOR_CLEAR_VALUE => normalized(&s.framebuffer.clear_color.to_array()),
            gl::DEPTH_CLEAR_VALUE => normalized(&[s.framebuffer.clear_depth]),
            gl::STENCIL_CLEAR_VALUE => int(s.framebuffer.clear_stencil),
            gl::PACK_ALIGNMENT => int(s.pixel_store.pack_alignment as i32),
            gl::UNPACK_ALIGNMENT => int(s.pixel_store.unpack_alignment as i32),

            // Hints
            gl::PERSPECTIVE_CORRECTION_HINT => {
                enum_value(s.hints.perspective_correction.to_gl())
            }
            gl::POINT_SMOOTH_HINT => enum_value(s.hints.point_smooth.to_gl()),
            gl::LINE_SMOOTH_HINT => enum_value(s.hints.line_smooth.to_gl()),
            gl::FOG_HINT => enum_value(s.hints.fog.to_gl()),
            gl::GENERATE_MIPMAP_HINT => enum_value(s.hints.generate_mipmap.to_gl()),

            // Textures
            gl::ACTIVE_TEXTURE => enum_value(gl::TEXTURE0 + unit as GLenum),
            gl::CLIENT_ACTIVE_TEXTURE => enum_value(gl::TEXTURE0 + client_unit as GLenum),
            gl::TEXTURE_BINDING_2D => int(s.texture.units[unit].binding as i32),

            // Current values and arrays
            gl::CURRENT_COLOR => normalized(&s.current.color.to_array()),
            gl::CURRENT_NORMAL => normalized(&s.current.normal.to_array()),
            gl::CURRENT_TEXTURE_COORDS => floats(&s.current.texcoords[unit].to_array()),
            gl::ARRAY_BUFFER_BINDING => int(s.arrays.array_buffer as i32),
            gl::ELEMENT_ARRAY_BUFFER_BINDING => int(s.arrays.element_array_buffer as i32),
            gl::NORMAL_ARRAY_TYPE => enum_value(s.arrays.normal.ty.to_gl()),
            gl::NORMAL_ARRAY_STRIDE => int(s.arrays.normal.stride as i32),
            gl::NORMAL_ARRAY_BUFFER_BINDING => int(s.arrays.normal.buffer as i32),
            gl::POINT_SIZE_ARRAY_TYPE_OES => enum_value(s.arrays.point_size.ty.to_gl()),
            gl::POINT_SIZE_ARRAY_STRIDE_OES => int(s.arrays.point_size.stride as i32),
            gl::POINT_SIZE_ARRAY_BUFFER_BINDING_OES => int(s.arrays.point_size.buffer as i32),
            _ => {
                return array_query(
                    &s.arrays.vertex,
                    pname,
                    [
                        gl::VERTEX_ARRAY,
                        gl::VERTEX_ARRAY_SIZE,
                        gl::VERTEX_ARRAY_TYPE,
                        gl::VERTEX_ARRAY_STRIDE,
                        gl::VERTEX_ARRAY_BUFFER_BINDING,
                    ],
                )
                .or_else(|| {
                    array_query(
                        &s.arrays.color,
                        pname,
                        [
                            gl::COLOR_ARRAY,
                            gl::COLOR_ARRAY_SIZE,
                            gl::COLOR_ARRAY_TYPE,
                            gl::COLOR_ARRAY_STRIDE,
                            gl::COLOR_ARRAY_BUFFER_BINDING,
                        ],
                    )
                })
                .or_else(|| {
                    array_query(
                        &s.arrays.texcoords[client_unit],
                        pname,
                        [
                            gl::TEXTURE_COORD_ARRAY,
                            gl::TEXTURE_COORD_ARRAY_SIZE,
                            gl::TEXTURE_COORD_ARRAY_TYPE,
                            gl::TEXTURE_COORD_ARRAY_STRIDE,
                            gl::TEXTURE_COORD_ARRAY_BUFFER_BINDING,
                        ],
                    )
                })
                .or_else(|| match pname {
                    gl::NORMAL_ARRAY => Some(bools(&[s.arrays.normal.enabled])),
                    gl::POINT_SIZE_ARRAY_OES => Some(bools(&[s.arrays.point_size.enabled])),
                    _ => None,
                })
                .or_else(|| {
                    Capability::from_gl(pname, MAX_LIGHTS, MAX_CLIP_PLANES)
                        .map(|cap| bools(&[capability_enabled(s, cap)]))
                });
            }
        };
        Some(value)
    }

    /// The typed value behind every `glGet*v` variant.
    pub fn get(&mut self, pname: GLenum) -> GlResult<Value> {
        match self.query(pname) {
            Some(v) => Ok(v),
            None => self.fail("glGet", GlError::InvalidEnum),
        }
    }

    pub fn get_boolean(&mut self, pname: GLenum) -> GlResult<SmallVec<[bool; 16]>> {
        Ok(self.get(pname)?.to_bools())
    }

    pub fn get_integer(&mut self, pname: GLenum) -> GlResult<SmallVec<[i32; 16]>> {
        Ok(self.get(pname)?.to_ints())
    }

    pub fn get_float(&mut self, pname: GLenum) -> GlResult<SmallVec<[f32; 16]>> {
        Ok(self.get(pname)?.to_floats())
    }

    pub fn get_fixed(&mut self, pname: GLenum) -> GlResult<SmallVec<[GLfixed; 16]>> {
        Ok(self.get(pname)?.to_fixed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(floats(&[1.6, -0.4]).to_ints().as_slice(), &[2, 0]);
        assert_eq!(bools(&[true, false]).to_floats().as_slice(), &[1.0, 0.0]);
        assert_eq!(normalized(&[1.0]).to_ints().as_slice(), &[i32::MAX]);
        assert_eq!(normalized(&[-1.0]).to_ints().as_slice(), &[i32::MIN]);
        assert_eq!(int(3).to_bools().as_slice(), &[true]);
        assert_eq!(floats(&[0.5]).to_fixed().as_slice(), &[0x8000]);
    }
}
