//! Per-fragment tests, blending and the scissor box

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::{GLenum, GLfixed, fixed_to_float};
use crate::hw::methods::{
    ALPHA_FUNC, ALPHA_REF, BLEND_FUNC_DFACTOR, BLEND_FUNC_SFACTOR, DEPTH_FUNC, LOGIC_OP,
    STENCIL_FUNC, STENCIL_FUNC_MASK, STENCIL_FUNC_REF, STENCIL_OP_FAIL, STENCIL_OP_ZFAIL,
    STENCIL_OP_ZPASS, WINDOW_CLIP_HORIZONTAL, WINDOW_CLIP_MAX, WINDOW_CLIP_TYPE,
    WINDOW_CLIP_TYPE_INCLUSIVE, WINDOW_CLIP_VERTICAL,
};
use crate::hw::{Batch, Device, PushBuffer};
use crate::state::PixelOpsState;
use crate::state::enums::{BlendFactor, CompareFunc, LogicOp, StencilOp};

/// The alpha reference register takes an 8-bit value.
pub(super) fn alpha_ref_word(reference: f32) -> u32 {
    (reference.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Window clip rectangle: the scissor box while the test is on, the whole
/// addressable surface otherwise.
pub(super) fn scissor_words(ops: &PixelOpsState) -> (u32, u32) {
    let (x, y, w, h) = if ops.scissor_enabled {
        let [x, y, w, h] = ops.scissor_box;
        (x.max(0) as u32, y.max(0) as u32, w as u32, h as u32)
    } else {
        (0, 0, WINDOW_CLIP_MAX + 1, WINDOW_CLIP_MAX + 1)
    };
    let x_max = (x + w).saturating_sub(1).min(WINDOW_CLIP_MAX);
    let y_max = (y + h).saturating_sub(1).min(WINDOW_CLIP_MAX);
    (x_max << 16 | x, y_max << 16 | y)
}

pub(super) fn push_scissor<P: PushBuffer + ?Sized>(batch: &mut Batch<'_, P>, ops: &PixelOpsState) {
    let (horizontal, vertical) = scissor_words(ops);
    batch.push1(WINDOW_CLIP_TYPE, WINDOW_CLIP_TYPE_INCLUSIVE);
    batch.push1(WINDOW_CLIP_HORIZONTAL, horizontal);
    batch.push1(WINDOW_CLIP_VERTICAL, vertical);
}

impl<D: Device> Context<D> {
    pub fn alpha_func(&mut self, func: GLenum, reference: f32) -> GlResult<()> {
        let Some(func) = CompareFunc::from_gl(func) else {
            return self.fail("glAlphaFunc", GlError::InvalidEnum);
        };
        let ops = &mut self.state.pixel_ops;
        ops.alpha_func = func;
        ops.alpha_ref = reference.clamp(0.0, 1.0);

        let mut b = Batch::new(&mut self.device);
        b.push1(ALPHA_FUNC, func.to_hw());
        b.push1(ALPHA_REF, alpha_ref_word(ops.alpha_ref));
        Ok(())
    }

    pub fn alpha_func_x(&mut self, func: GLenum, reference: GLfixed) -> GlResult<()> {
        self.alpha_func(func, fixed_to_float(reference))
    }

    pub fn blend_func(&mut self, sfactor: GLenum, dfactor: GLenum) -> GlResult<()> {
        let src = BlendFactor::from_gl(sfactor).filter(|f| f.valid_as_source());
        let dst = BlendFactor::from_gl(dfactor).filter(|f| f.valid_as_destination());
        let (Some(src), Some(dst)) = (src, dst) else {
            return self.fail("glBlendFunc", GlError::InvalidEnum);
        };
        let ops = &mut self.state.pixel_ops;
        ops.blend_src = src;
        ops.blend_dst = dst;

        let mut b = Batch::new(&mut self.device);
        b.push1(BLEND_FUNC_SFACTOR, src.to_hw());
        b.push1(BLEND_FUNC_DFACTOR, dst.to_hw());
        Ok(())
    }

    pub fn depth_func(&mut self, func: GLenum) -> GlResult<()> {
        let Some(func) = CompareFunc::from_gl(func) else {
            return self.fail("glDepthFunc", GlError::InvalidEnum);
        };
        self.state.pixel_ops.depth_func = func;
        self.batch().push1(DEPTH_FUNC, func.to_hw());
        Ok(())
    }

    pub fn stencil_func(&mut self, func: GLenum, reference: i32, mask: u32) -> GlResult<()> {
        let Some(func) = CompareFunc::from_gl(func) else {
            return self.fail("glStencilFunc", GlError::InvalidEnum);
        };
        let ops = &mut self.state.pixel_ops;
        ops.stencil_func = func;
        // 8-bit stencil buffer
        ops.stencil_ref = reference.clamp(0, 0xFF);
        ops.stencil_value_mask = mask;

        let mut b = Batch::new(&mut self.device);
        b.push1(STENCIL_FUNC, func.to_hw());
        b.push1(STENCIL_FUNC_REF, ops.stencil_ref as u32);
        b.push1(STENCIL_FUNC_MASK, mask & 0xFF);
        Ok(())
    }

    pub fn stencil_op(&mut self, fail: GLenum, zfail: GLenum, zpass: GLenum) -> GlResult<()> {
        let (Some(fail), Some(zfail), Some(zpass)) = (
            StencilOp::from_gl(fail),
            StencilOp::from_gl(zfail),
            StencilOp::from_gl(zpass),
        ) else {
            return self.fail("glStencilOp", GlError::InvalidEnum);
        };
        let ops = &mut self.state.pixel_ops;
        ops.stencil_fail = fail;
        ops.stencil_zfail = zfail;
        ops.stencil_zpass = zpass;

        let mut b = Batch::new(&mut self.device);
        b.push1(STENCIL_OP_FAIL, fail.to_hw());
        b.push1(STENCIL_OP_ZFAIL, zfail.to_hw());
        b.push1(STENCIL_OP_ZPASS, zpass.to_hw());
        Ok(())
    }

    /// Stores the box; the window clip registers follow only while the
    /// scissor test is enabled.
    pub fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) -> GlResult<()> {
        if width < 0 || height < 0 {
            return self.fail("glScissor", GlError::InvalidValue);
        }
        let ops = &mut self.state.pixel_ops;
        ops.scissor_box = [x, y, width, height];
        if ops.scissor_enabled {
            push_scissor(&mut Batch::new(&mut self.device), ops);
        }
        Ok(())
    }

    pub fn logic_op(&mut self, opcode: GLenum) -> GlResult<()> {
        let Some(op) = LogicOp::from_gl(opcode) else {
            return self.fail("glLogicOp", GlError::InvalidEnum);
        };
        self.state.pixel_ops.logic_op = op;
        self.batch().push1(LOGIC_OP, op.to_hw());
        Ok(())
    }
}
