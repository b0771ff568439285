//! Per-fragment tests and blending

use super::enums::{BlendFactor, CompareFunc, LogicOp, StencilOp};

#[derive(Debug, Clone, PartialEq)]
pub struct PixelOpsState {
    pub scissor_enabled: bool,
    /// x, y, width, height
    pub scissor_box: [i32; 4],
    pub alpha_test: bool,
    pub alpha_func: CompareFunc,
    pub alpha_ref: f32,
    pub stencil_test: bool,
    pub stencil_func: CompareFunc,
    pub stencil_ref: i32,
    pub stencil_value_mask: u32,
    pub stencil_fail: StencilOp,
    pub stencil_zfail: StencilOp,
    pub stencil_zpass: StencilOp,
    pub depth_test: bool,
    pub depth_func: CompareFunc,
    pub blend: bool,
    pub blend_src: BlendFactor,
    pub blend_dst: BlendFactor,
    pub dither: bool,
    pub logic_op_enabled: bool,
    pub logic_op: LogicOp,
}

impl PixelOpsState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scissor_enabled: false,
            scissor_box: [0, 0, width as i32, height as i32],
            alpha_test: false,
            alpha_func: CompareFunc::Always,
            alpha_ref: 0.0,
            stencil_test: false,
            stencil_func: CompareFunc::Always,
            stencil_ref: 0,
            stencil_value_mask: u32::MAX,
            stencil_fail: StencilOp::Keep,
            stencil_zfail: StencilOp::Keep,
            stencil_zpass: StencilOp::Keep,
            depth_test: false,
            depth_func: CompareFunc::Less,
            blend: false,
            blend_src: BlendFactor::One,
            blend_dst: BlendFactor::Zero,
            dither: true,
            logic_op_enabled: false,
            logic_op: LogicOp::Copy,
        }
    }
}
