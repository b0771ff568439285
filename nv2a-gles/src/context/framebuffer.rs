//! Write masks, clear values and `glClear`

use glam::Vec4;

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::{GLfixed, fixed_to_float, pack_argb32};
use crate::hw::methods::{
    CLEAR_SURFACE, CLEAR_SURFACE_COLOR, CLEAR_SURFACE_STENCIL, CLEAR_SURFACE_Z, COLOR_CLEAR_VALUE,
    COLOR_MASK, DEPTH_MASK, STENCIL_MASK, ZSTENCIL_CLEAR_VALUE,
};
use crate::hw::{Batch, Device};
use crate::state::{ClearMask, ColorMask, FramebufferState};

/// Packed depth/stencil clear word: 24-bit depth above an 8-bit stencil.
fn zstencil_word(fb: &FramebufferState, depth_max: u32) -> u32 {
    let depth = (fb.clear_depth * depth_max as f32) as u32;
    (depth << 8) | (fb.clear_stencil as u32 & 0xFF)
}

fn clear_surface_bits(mask: ClearMask) -> u32 {
    let mut bits = 0;
    if mask.contains(ClearMask::DEPTH) {
        bits |= CLEAR_SURFACE_Z;
    }
    if mask.contains(ClearMask::STENCIL) {
        bits |= CLEAR_SURFACE_STENCIL;
    }
    if mask.contains(ClearMask::COLOR) {
        bits |= CLEAR_SURFACE_COLOR;
    }
    bits
}

impl<D: Device> Context<D> {
    pub fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) {
        let mask = ColorMask::from_channels(red, green, blue, alpha);
        self.state.framebuffer.color_mask = mask;
        self.batch().push1(COLOR_MASK, mask.bits());
    }

    pub fn depth_mask(&mut self, flag: bool) {
        self.state.framebuffer.depth_mask = flag;
        self.batch().push_bool(DEPTH_MASK, flag);
    }

    /// The full mask is kept for queries; the buffer has 8 bits.
    pub fn stencil_mask(&mut self, mask: u32) {
        self.state.framebuffer.stencil_write_mask = mask;
        self.batch().push1(STENCIL_MASK, mask & 0xFF);
    }

    pub fn clear_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.state.framebuffer.clear_color =
            Vec4::new(red, green, blue, alpha).clamp(Vec4::ZERO, Vec4::ONE);
    }

    pub fn clear_color_x(&mut self, red: GLfixed, green: GLfixed, blue: GLfixed, alpha: GLfixed) {
        let [r, g, b, a] = [red, green, blue, alpha].map(fixed_to_float);
        self.clear_color(r, g, b, a);
    }

    pub fn clear_depth(&mut self, depth: f32) {
        self.state.framebuffer.clear_depth = depth.clamp(0.0, 1.0);
    }

    pub fn clear_depth_x(&mut self, depth: GLfixed) {
        self.clear_depth(fixed_to_float(depth));
    }

    pub fn clear_stencil(&mut self, s: i32) {
        self.state.framebuffer.clear_stencil = s;
    }

    /// Loads both clear value registers and clears the selected buffers.
    /// The clip rectangle and write masks apply as for any other rendering.
    pub fn clear(&mut self, mask: u32) -> GlResult<()> {
        let Some(mask) = ClearMask::from_bits(mask) else {
            return self.fail("glClear", GlError::InvalidValue);
        };
        if mask.is_empty() {
            return Ok(());
        }
        let fb = &self.state.framebuffer;
        let zstencil = zstencil_word(fb, self.config.limits.depth_buffer_max);

        let mut b = Batch::new(&mut self.device);
        b.push1(ZSTENCIL_CLEAR_VALUE, zstencil);
        b.push1(COLOR_CLEAR_VALUE, pack_argb32(fb.clear_color));
        b.push1(CLEAR_SURFACE, clear_surface_bits(mask));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstencil_word_packs_depth_above_stencil() {
        let fb = FramebufferState {
            clear_depth: 1.0,
            clear_stencil: 0x1FF,
            ..FramebufferState::default()
        };
        assert_eq!(zstencil_word(&fb, 0xFF_FFFF), 0xFFFF_FFFF);

        let fb = FramebufferState {
            clear_depth: 0.0,
            clear_stencil: 3,
            ..FramebufferState::default()
        };
        assert_eq!(zstencil_word(&fb, 0xFF_FFFF), 3);
    }

    #[test]
    fn test_clear_surface_bits() {
        assert_eq!(clear_surface_bits(ClearMask::COLOR), CLEAR_SURFACE_COLOR);
        assert_eq!(
            clear_surface_bits(ClearMask::DEPTH | ClearMask::STENCIL),
            CLEAR_SURFACE_Z | CLEAR_SURFACE_STENCIL
        );
    }
}
