//! Framebuffer control, pixel store, hints and current vertex values

use glam::{Vec3, Vec4};

use super::enums::HintMode;
use crate::gl;
use crate::hw::MAX_TEXTURE_UNITS;

bitflags::bitflags! {
    /// Channel write enables, laid out as the `COLOR_MASK` register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorMask: u32 {
        const BLUE = 1 << 0;
        const GREEN = 1 << 8;
        const RED = 1 << 16;
        const ALPHA = 1 << 24;
    }
}

impl ColorMask {
    pub fn from_channels(red: bool, green: bool, blue: bool, alpha: bool) -> Self {
        let mut mask = Self::empty();
        mask.set(Self::RED, red);
        mask.set(Self::GREEN, green);
        mask.set(Self::BLUE, blue);
        mask.set(Self::ALPHA, alpha);
        mask
    }

    pub fn channels(self) -> [bool; 4] {
        [
            self.contains(Self::RED),
            self.contains(Self::GREEN),
            self.contains(Self::BLUE),
            self.contains(Self::ALPHA),
        ]
    }
}

bitflags::bitflags! {
    /// `glClear` buffer bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearMask: u32 {
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        const STENCIL = gl::STENCIL_BUFFER_BIT;
        const COLOR = gl::COLOR_BUFFER_BIT;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FramebufferState {
    pub color_mask: ColorMask,
    pub depth_mask: bool,
    pub stencil_write_mask: u32,
    pub clear_color: Vec4,
    pub clear_depth: f32,
    pub clear_stencil: i32,
}

impl Default for FramebufferState {
    fn default() -> Self {
        Self {
            color_mask: ColorMask::all(),
            depth_mask: true,
            stencil_write_mask: u32::MAX,
            clear_color: Vec4::ZERO,
            clear_depth: 1.0,
            clear_stencil: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelStore {
    pub pack_alignment: u32,
    pub unpack_alignment: u32,
}

impl Default for PixelStore {
    fn default() -> Self {
        Self {
            pack_alignment: 4,
            unpack_alignment: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hints {
    pub perspective_correction: HintMode,
    pub point_smooth: HintMode,
    pub line_smooth: HintMode,
    pub fog: HintMode,
    pub generate_mipmap: HintMode,
}

impl Default for Hints {
    fn default() -> Self {
        Self {
            perspective_correction: HintMode::DontCare,
            point_smooth: HintMode::DontCare,
            line_smooth: HintMode::DontCare,
            fog: HintMode::DontCare,
            generate_mipmap: HintMode::DontCare,
        }
    }
}

impl Hints {
    pub fn target_mut(&mut self, target: gl::GLenum) -> Option<&mut HintMode> {
        match target {
            gl::PERSPECTIVE_CORRECTION_HINT => Some(&mut self.perspective_correction),
            gl::POINT_SMOOTH_HINT => Some(&mut self.point_smooth),
            gl::LINE_SMOOTH_HINT => Some(&mut self.line_smooth),
            gl::FOG_HINT => Some(&mut self.fog),
            gl::GENERATE_MIPMAP_HINT => Some(&mut self.generate_mipmap),
            _ => None,
        }
    }
}

/// Values used when the matching array is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentValues {
    pub color: Vec4,
    pub normal: Vec3,
    pub texcoords: [Vec4; MAX_TEXTURE_UNITS],
}

impl Default for CurrentValues {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            normal: Vec3::Z,
            texcoords: [Vec4::new(0.0, 0.0, 0.0, 1.0); MAX_TEXTURE_UNITS],
        }
    }
}
