//! Capabilities, errors, strings, hints and synchronization

use super::Context;
use super::pixel_ops::{alpha_ref_word, push_scissor};
use super::raster::size_word;
use crate::combiner::combiner_init;
use crate::error::{GlError, GlResult, NO_ERROR};
use crate::gl::{self, GLenum, GLfixed, fixed_to_float};
use crate::hw::methods::*;
use crate::hw::{Batch, Device, MAX_CLIP_PLANES, MAX_LIGHTS};
use crate::state::RenderState;
use crate::state::enums::{Capability, HintMode, ShadeModel};

pub const VENDOR: &str = "nv2a-gles";
pub const RENDERER: &str = "NV2A";
pub const VERSION: &str = "OpenGL ES 1.1.0";
pub const EXTENSIONS: &str = "GL_OES_point_sprite GL_OES_point_size_array";

impl<D: Device> Context<D> {
    /// Programs every write-through register with the current (default)
    /// state and sets up the combiner control words.
    pub(super) fn init_hardware(&mut self) {
        let s = &self.state;
        let limits = &self.config.limits;
        let ops = &s.pixel_ops;
        let raster = &s.raster;

        let mut b = Batch::new(&mut self.device);
        combiner_init(&mut b);

        b.push_bool(ALPHA_FUNC_ENABLE, ops.alpha_test);
        b.push1(ALPHA_FUNC, ops.alpha_func.to_hw());
        b.push1(ALPHA_REF, alpha_ref_word(ops.alpha_ref));
        b.push_bool(BLEND_ENABLE, ops.blend);
        b.push1(BLEND_FUNC_SFACTOR, ops.blend_src.to_hw());
        b.push1(BLEND_FUNC_DFACTOR, ops.blend_dst.to_hw());
        b.push_bool(DEPTH_TEST_ENABLE, ops.depth_test);
        b.push1(DEPTH_FUNC, ops.depth_func.to_hw());
        b.push_bool(DITHER_ENABLE, ops.dither);
        b.push_bool(STENCIL_TEST_ENABLE, ops.stencil_test);
        b.push1(STENCIL_FUNC, ops.stencil_func.to_hw());
        b.push1(STENCIL_FUNC_REF, ops.stencil_ref as u32);
        b.push1(STENCIL_FUNC_MASK, ops.stencil_value_mask & 0xFF);
        b.push1(STENCIL_OP_FAIL, ops.stencil_fail.to_hw());
        b.push1(STENCIL_OP_ZFAIL, ops.stencil_zfail.to_hw());
        b.push1(STENCIL_OP_ZPASS, ops.stencil_zpass.to_hw());
        b.push_bool(LOGIC_OP_ENABLE, ops.logic_op_enabled);
        b.push1(LOGIC_OP, ops.logic_op.to_hw());
        push_scissor(&mut b, ops);

        let fb = &s.framebuffer;
        b.push1(COLOR_MASK, fb.color_mask.bits());
        b.push_bool(DEPTH_MASK, fb.depth_mask);
        b.push1(STENCIL_MASK, fb.stencil_write_mask & 0xFF);

        b.push_bool(CULL_FACE_ENABLE, raster.cull_enabled);
        b.push1(CULL_FACE, raster.cull_mode.to_hw());
        b.push1(FRONT_FACE, raster.front_face.to_hw());
        b.push_bool(POLY_OFFSET_FILL_ENABLE, raster.polygon_offset_fill);
        b.push_f32(POLYGON_OFFSET_SCALE_FACTOR, raster.polygon_offset_factor);
        b.push_f32(POLYGON_OFFSET_BIAS, raster.polygon_offset_units);
        b.push1(SHADE_MODEL, s.coloring.shade_model.to_hw());
        b.push_bool(LINE_SMOOTH_ENABLE, raster.line_smooth);
        b.push1(
            LINE_WIDTH,
            size_word(raster.line_width, line_range(limits, raster.line_smooth)),
        );
        b.push_bool(POINT_SMOOTH_ENABLE, raster.point_smooth || raster.point_sprite);
        b.push1(
            POINT_SIZE,
            size_word(raster.point_size, point_range(limits, raster.point_smooth)),
        );

        b.push_bool(FOG_ENABLE, s.coloring.fog_enabled);
        b.push1(FOG_GEN_MODE, FOG_GEN_MODE_RADIAL);
        b.push_bool(LIGHTING_ENABLE, s.lighting.enabled);
        b.push_bool(SPECULAR_ENABLE, s.lighting.specular_enabled());
        b.push_bool(
            NORMALIZATION_ENABLE,
            s.transform.normalize || s.transform.rescale_normal,
        );

        let color = s.current.color;
        let normal = s.current.normal.extend(0.0);
        b.push_vec4(vertex_data4f(SLOT_DIFFUSE), color);
        b.push_vec4(vertex_data4f(SLOT_NORMAL), normal);
        drop(b);

        self.shadow.combiner_initialized = true;
    }

    // ========================================================================
    // Errors and strings
    // ========================================================================

    /// `glGetError`: returns and clears the pending error code.
    pub fn get_error(&mut self) -> u32 {
        self.errors.take().map_or(NO_ERROR, GlError::code)
    }

    pub fn get_string(&mut self, name: GLenum) -> GlResult<&'static str> {
        match name {
            gl::VENDOR => Ok(VENDOR),
            gl::RENDERER => Ok(RENDERER),
            gl::VERSION => Ok(VERSION),
            gl::EXTENSIONS => Ok(EXTENSIONS),
            _ => self.fail("glGetString", GlError::InvalidEnum),
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    pub fn enable(&mut self, cap: GLenum) -> GlResult<()> {
        self.set_capability("glEnable", cap, true)
    }

    pub fn disable(&mut self, cap: GLenum) -> GlResult<()> {
        self.set_capability("glDisable", cap, false)
    }

    fn set_capability(&mut self, op: &'static str, cap: GLenum, on: bool) -> GlResult<()> {
        let Some(cap) = Capability::from_gl(cap, MAX_LIGHTS, MAX_CLIP_PLANES) else {
            return self.fail(op, GlError::InvalidEnum);
        };
        tracing::trace!(?cap, on, "set capability");

        let s = &mut self.state;
        let limits = &self.config.limits;
        let mut b = Batch::new(&mut self.device);
        match cap {
            Capability::AlphaTest => {
                s.pixel_ops.alpha_test = on;
                b.push_bool(ALPHA_FUNC_ENABLE, on);
            }
            Capability::Blend => {
                s.pixel_ops.blend = on;
                b.push_bool(BLEND_ENABLE, on);
            }
            Capability::ColorLogicOp => {
                s.pixel_ops.logic_op_enabled = on;
                b.push_bool(LOGIC_OP_ENABLE, on);
            }
            Capability::ClipPlane(i) => {
                s.transform.clip_plane_enabled[i] = on;
                s.transform.clip_planes_dirty = true;
            }
            Capability::ColorMaterial => {
                s.lighting.color_material = on;
                s.lighting.model_dirty = true;
            }
            Capability::CullFace => {
                s.raster.cull_enabled = on;
                b.push_bool(CULL_FACE_ENABLE, on);
            }
            Capability::DepthTest => {
                s.pixel_ops.depth_test = on;
                b.push_bool(DEPTH_TEST_ENABLE, on);
            }
            Capability::Dither => {
                s.pixel_ops.dither = on;
                b.push_bool(DITHER_ENABLE, on);
            }
            Capability::Fog => {
                s.coloring.fog_enabled = on;
                s.coloring.fog_dirty = true;
                b.push_bool(FOG_ENABLE, on);
                b.push1(FOG_GEN_MODE, FOG_GEN_MODE_RADIAL);
            }
            Capability::Light(i) => {
                let light = &mut s.lighting.lights[i];
                light.enabled = on;
                light.dirty = true;
            }
            Capability::Lighting => {
                s.lighting.enabled = on;
                s.lighting.model_dirty = true;
                // The inverse modelview is only uploaded while lighting is on.
                s.transform.modelview_dirty = true;
                b.push_bool(LIGHTING_ENABLE, on);
                b.push_bool(SPECULAR_ENABLE, s.lighting.specular_enabled());
            }
            Capability::LineSmooth => {
                s.raster.line_smooth = on;
                b.push_bool(LINE_SMOOTH_ENABLE, on);
                b.push1(
                    LINE_WIDTH,
                    size_word(s.raster.line_width, line_range(limits, on)),
                );
            }
            Capability::Multisample => s.multisample.enabled = on,
            Capability::SampleAlphaToCoverage => s.multisample.alpha_to_coverage = on,
            Capability::SampleAlphaToOne => s.multisample.alpha_to_one = on,
            Capability::SampleCoverage => s.multisample.coverage = on,
            Capability::Normalize | Capability::RescaleNormal => {
                if cap == Capability::Normalize {
                    s.transform.normalize = on;
                } else {
                    s.transform.rescale_normal = on;
                }
                b.push_bool(
                    NORMALIZATION_ENABLE,
                    s.transform.normalize || s.transform.rescale_normal,
                );
            }
            Capability::PointSmooth | Capability::PointSprite => {
                if cap == Capability::PointSmooth {
                    s.raster.point_smooth = on;
                } else {
                    s.raster.point_sprite = on;
                }
                let r = &mut s.raster;
                r.point_params_dirty = true;
                b.push_bool(POINT_SMOOTH_ENABLE, r.point_smooth || r.point_sprite);
                b.push1(
                    POINT_SIZE,
                    size_word(r.point_size, point_range(limits, r.point_smooth)),
                );
            }
            Capability::PolygonOffsetFill => {
                s.raster.polygon_offset_fill = on;
                b.push_bool(POLY_OFFSET_FILL_ENABLE, on);
            }
            Capability::ScissorTest => {
                s.pixel_ops.scissor_enabled = on;
                push_scissor(&mut b, &s.pixel_ops);
            }
            Capability::StencilTest => {
                s.pixel_ops.stencil_test = on;
                b.push_bool(STENCIL_TEST_ENABLE, on);
            }
            Capability::Texture2D => {
                let active = s.texture.active_unit;
                let unit = &mut s.texture.units[active];
                unit.enabled = on;
                unit.dirty = true;
            }
        }
        Ok(())
    }

    pub fn is_enabled(&mut self, cap: GLenum) -> GlResult<bool> {
        let Some(cap) = Capability::from_gl(cap, MAX_LIGHTS, MAX_CLIP_PLANES) else {
            return self.fail("glIsEnabled", GlError::InvalidEnum);
        };
        Ok(capability_enabled(&self.state, cap))
    }

    // ========================================================================
    // Hints, pixel store, shading, multisample
    // ========================================================================

    pub fn hint(&mut self, target: GLenum, mode: GLenum) -> GlResult<()> {
        let Some(mode) = HintMode::from_gl(mode) else {
            return self.fail("glHint", GlError::InvalidEnum);
        };
        let Some(slot) = self.state.hints.target_mut(target) else {
            return self.fail("glHint", GlError::InvalidEnum);
        };
        *slot = mode;
        Ok(())
    }

    pub fn pixel_store(&mut self, pname: GLenum, param: i32) -> GlResult<()> {
        if !matches!(param, 1 | 2 | 4 | 8) {
            return self.fail("glPixelStorei", GlError::InvalidValue);
        }
        let store = &mut self.state.pixel_store;
        match pname {
            gl::PACK_ALIGNMENT => store.pack_alignment = param as u32,
            gl::UNPACK_ALIGNMENT => store.unpack_alignment = param as u32,
            _ => return self.fail("glPixelStorei", GlError::InvalidEnum),
        }
        Ok(())
    }

    pub fn shade_model(&mut self, mode: GLenum) -> GlResult<()> {
        let Some(mode) = ShadeModel::from_gl(mode) else {
            return self.fail("glShadeModel", GlError::InvalidEnum);
        };
        self.state.coloring.shade_model = mode;
        self.batch().push1(SHADE_MODEL, mode.to_hw());
        Ok(())
    }

    pub fn sample_coverage(&mut self, value: f32, invert: bool) {
        let ms = &mut self.state.multisample;
        ms.coverage_value = value.clamp(0.0, 1.0);
        ms.coverage_invert = invert;
    }

    pub fn sample_coverage_x(&mut self, value: GLfixed, invert: bool) {
        self.sample_coverage(fixed_to_float(value), invert);
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// `glFlush`: makes the GPU wait for idle before anything pushed later.
    pub fn flush(&mut self) {
        self.batch().push1(WAIT_FOR_IDLE, 0);
    }

    /// `glFinish`: flushes, then blocks until the GPU is idle and the push
    /// buffer has drained.
    pub fn finish(&mut self) {
        self.flush();
        let mut polls = 0u32;
        while self.device.busy() {
            polls += 1;
            std::hint::spin_loop();
        }
        while !self.device.finished() {
            std::hint::spin_loop();
        }
        tracing::trace!(polls, "finish");
    }
}

pub(super) fn line_range(limits: &crate::config::Limits, smooth: bool) -> [f32; 2] {
    if smooth {
        limits.smooth_line_width
    } else {
        limits.aliased_line_width
    }
}

pub(super) fn point_range(limits: &crate::config::Limits, smooth: bool) -> [f32; 2] {
    if smooth {
        limits.smooth_point_size
    } else {
        limits.aliased_point_size
    }
}

/// Stored enable bit of `cap`.
pub(super) fn capability_enabled(s: &RenderState, cap: Capability) -> bool {
    match cap {
        Capability::AlphaTest => s.pixel_ops.alpha_test,
        Capability::Blend => s.pixel_ops.blend,
        Capability::ColorLogicOp => s.pixel_ops.logic_op_enabled,
        Capability::ClipPlane(i) => s.transform.clip_plane_enabled[i],
        Capability::ColorMaterial => s.lighting.color_material,
        Capability::CullFace => s.raster.cull_enabled,
        Capability::DepthTest => s.pixel_ops.depth_test,
        Capability::Dither => s.pixel_ops.dither,
        Capability::Fog => s.coloring.fog_enabled,
        Capability::Light(i) => s.lighting.lights[i].enabled,
        Capability::Lighting => s.lighting.enabled,
        Capability::LineSmooth => s.raster.line_smooth,
        Capability::Multisample => s.multisample.enabled,
        Capability::Normalize => s.transform.normalize,
        Capability::PointSmooth => s.raster.point_smooth,
        Capability::PointSprite => s.raster.point_sprite,
        Capability::PolygonOffsetFill => s.raster.polygon_offset_fill,
        Capability::RescaleNormal => s.transform.rescale_normal,
        Capability::SampleAlphaToCoverage => s.multisample.alpha_to_coverage,
        Capability::SampleAlphaToOne => s.multisample.alpha_to_one,
        Capability::SampleCoverage => s.multisample.coverage,
        Capability::ScissorTest => s.pixel_ops.scissor_enabled,
        Capability::StencilTest => s.pixel_ops.stencil_test,
        Capability::Texture2D => s.texture.units[s.texture.active_unit].enabled,
    }
}
