//! GL enum to NV097 value translation
//!
//! Most Kelvin enums reuse the GL values verbatim; the ones that don't are
//! spelled out here.

use super::methods::*;
use super::push_buffer::PixelConversion;
use crate::state::enums::{
    ArrayType, BlendFactor, CompareFunc, Face, FogMode, FrontFace, LogicOp, MagFilter, MinFilter,
    PixelFormat, PixelType, Primitive, ShadeModel, StencilOp, TextureWrap,
};

impl CompareFunc {
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl BlendFactor {
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl StencilOp {
    /// `INCR`/`DECR` map onto the saturating hardware ops, which share the
    /// GL values.
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl Face {
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl FrontFace {
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl ShadeModel {
    pub const fn to_hw(self) -> u32 {
        self.to_gl()
    }
}

impl FogMode {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::Linear => FOG_MODE_LINEAR,
            Self::Exp => FOG_MODE_EXP,
            Self::Exp2 => FOG_MODE_EXP2,
        }
    }
}

impl LogicOp {
    /// The blend unit keeps only the low nibble of the opcode.
    pub const fn to_hw(self) -> u32 {
        self.to_gl() & 0xF
    }
}

impl Primitive {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::Points => PRIM_POINTS,
            Self::Lines => PRIM_LINES,
            Self::LineLoop => PRIM_LINE_LOOP,
            Self::LineStrip => PRIM_LINE_STRIP,
            Self::Triangles => PRIM_TRIANGLES,
            Self::TriangleStrip => PRIM_TRIANGLE_STRIP,
            Self::TriangleFan => PRIM_TRIANGLE_FAN,
        }
    }
}

impl ArrayType {
    /// Vertex attribute type, or `None` when the fetch unit has no matching
    /// format. `normalized` selects the [-1, 1] short variant used by normals.
    pub const fn to_hw(self, normalized: bool) -> Option<u32> {
        match self {
            Self::UnsignedByte => Some(VERTEX_TYPE_UB_OGL),
            Self::Short if normalized => Some(VERTEX_TYPE_S1),
            Self::Short => Some(VERTEX_TYPE_S32K),
            Self::Float => Some(VERTEX_TYPE_F),
            Self::Byte | Self::Fixed => None,
        }
    }
}

impl TextureWrap {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::Repeat => TEXTURE_ADDRESS_WRAP,
            Self::ClampToEdge => TEXTURE_ADDRESS_CLAMP_TO_EDGE,
        }
    }
}

impl MinFilter {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::Nearest => TEXTURE_MIN_BOX_LOD0,
            Self::Linear => TEXTURE_MIN_TENT_LOD0,
            Self::NearestMipmapNearest => TEXTURE_MIN_BOX_NEARESTLOD,
            Self::LinearMipmapNearest => TEXTURE_MIN_TENT_NEARESTLOD,
            Self::NearestMipmapLinear => TEXTURE_MIN_BOX_TENT_LOD,
            Self::LinearMipmapLinear => TEXTURE_MIN_TENT_TENT_LOD,
        }
    }
}

impl MagFilter {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::Nearest => TEXTURE_MAG_BOX_LOD0,
            Self::Linear => TEXTURE_MAG_TENT_LOD0,
        }
    }
}

/// Hardware layout chosen for an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLayout {
    pub color: u32,
    pub bytes_per_pixel: u32,
    pub conversion: PixelConversion,
}

/// Picks the swizzled texture format for a validated format/type pair.
pub const fn texture_layout(format: PixelFormat, ty: PixelType) -> TextureLayout {
    let (color, bytes_per_pixel, conversion) = match (format, ty) {
        (PixelFormat::Alpha, _) => (TEXTURE_COLOR_A8, 1, PixelConversion::None),
        (PixelFormat::Luminance, _) => (TEXTURE_COLOR_Y8, 1, PixelConversion::None),
        (PixelFormat::LuminanceAlpha, _) => (TEXTURE_COLOR_AY8, 2, PixelConversion::None),
        (PixelFormat::Rgb, PixelType::UnsignedShort565) => {
            (TEXTURE_COLOR_R5G6B5, 2, PixelConversion::None)
        }
        (PixelFormat::Rgb, _) => (TEXTURE_COLOR_A8B8G8R8, 4, PixelConversion::RgbToAbgr),
        (PixelFormat::Rgba, PixelType::UnsignedShort4444) => {
            (TEXTURE_COLOR_A4R4G4B4, 2, PixelConversion::Rgba4444ToArgb)
        }
        (PixelFormat::Rgba, PixelType::UnsignedShort5551) => {
            (TEXTURE_COLOR_A1R5G5B5, 2, PixelConversion::Rgba5551ToArgb)
        }
        (PixelFormat::Rgba, _) => (TEXTURE_COLOR_A8B8G8R8, 4, PixelConversion::None),
    };
    TextureLayout {
        color,
        bytes_per_pixel,
        conversion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stencil_incr_decr_saturate() {
        assert_eq!(StencilOp::Incr.to_hw(), 0x1E02);
        assert_eq!(StencilOp::Decr.to_hw(), 0x1E03);
    }

    #[test]
    fn test_unrepresentable_vertex_types() {
        assert_eq!(ArrayType::Fixed.to_hw(false), None);
        assert_eq!(ArrayType::Byte.to_hw(true), None);
        assert_eq!(ArrayType::Short.to_hw(true), Some(VERTEX_TYPE_S1));
        assert_eq!(ArrayType::Short.to_hw(false), Some(VERTEX_TYPE_S32K));
    }

    #[test]
    fn test_texture_layouts() {
        let rgb = texture_layout(PixelFormat::Rgb, PixelType::UnsignedByte);
        assert_eq!(rgb.color, TEXTURE_COLOR_A8B8G8R8);
        assert_eq!(rgb.bytes_per_pixel, 4);
        assert_eq!(rgb.conversion, PixelConversion::RgbToAbgr);
        let la = texture_layout(PixelFormat::LuminanceAlpha, PixelType::UnsignedByte);
        assert_eq!((la.color, la.bytes_per_pixel), (TEXTURE_COLOR_AY8, 2));
    }

    #[test]
    fn test_logic_op_low_nibble() {
        assert_eq!(LogicOp::Copy.to_hw(), 3);
        assert_eq!(LogicOp::Set.to_hw(), 15);
    }
}
