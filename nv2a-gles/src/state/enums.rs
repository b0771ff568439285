//! Closed enums for every GL enumerant the state store keeps
//!
//! Discriminants are the GL values, so `to_gl` is a cast and `from_gl` is the
//! validation step every mutator runs before touching state.

use crate::gl::{self, GLenum};

macro_rules! gl_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:path),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// Validates a GL enumerant.
            pub fn from_gl(value: GLenum) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub const fn to_gl(self) -> GLenum {
                self as GLenum
            }
        }
    };
}

gl_enum! {
    pub enum CompareFunc {
        Never = gl::NEVER,
        Less = gl::LESS,
        Equal = gl::EQUAL,
        LessEqual = gl::LEQUAL,
        Greater = gl::GREATER,
        NotEqual = gl::NOTEQUAL,
        GreaterEqual = gl::GEQUAL,
        Always = gl::ALWAYS,
    }
}

gl_enum! {
    pub enum BlendFactor {
        Zero = gl::ZERO,
        One = gl::ONE,
        SrcColor = gl::SRC_COLOR,
        OneMinusSrcColor = gl::ONE_MINUS_SRC_COLOR,
        SrcAlpha = gl::SRC_ALPHA,
        OneMinusSrcAlpha = gl::ONE_MINUS_SRC_ALPHA,
        DstAlpha = gl::DST_ALPHA,
        OneMinusDstAlpha = gl::ONE_MINUS_DST_ALPHA,
        DstColor = gl::DST_COLOR,
        OneMinusDstColor = gl::ONE_MINUS_DST_COLOR,
        SrcAlphaSaturate = gl::SRC_ALPHA_SATURATE,
    }
}

impl BlendFactor {
    /// Source factors exclude `SRC_COLOR` and its complement.
    pub fn valid_as_source(self) -> bool {
        !matches!(self, Self::SrcColor | Self::OneMinusSrcColor)
    }

    /// Destination factors exclude `DST_COLOR`, its complement and saturate.
    pub fn valid_as_destination(self) -> bool {
        !matches!(
            self,
            Self::DstColor | Self::OneMinusDstColor | Self::SrcAlphaSaturate
        )
    }
}

gl_enum! {
    pub enum StencilOp {
        Keep = gl::KEEP,
        Zero = gl::ZERO,
        Replace = gl::REPLACE,
        Incr = gl::INCR,
        Decr = gl::DECR,
        Invert = gl::INVERT,
    }
}

gl_enum! {
    /// Faces for culling and materials.
    pub enum Face {
        Front = gl::FRONT,
        Back = gl::BACK,
        FrontAndBack = gl::FRONT_AND_BACK,
    }
}

gl_enum! {
    pub enum FrontFace {
        Cw = gl::CW,
        Ccw = gl::CCW,
    }
}

gl_enum! {
    pub enum ShadeModel {
        Flat = gl::FLAT,
        Smooth = gl::SMOOTH,
    }
}

gl_enum! {
    pub enum FogMode {
        Linear = gl::LINEAR,
        Exp = gl::EXP,
        Exp2 = gl::EXP2,
    }
}

gl_enum! {
    pub enum LogicOp {
        Clear = gl::CLEAR,
        And = gl::AND,
        AndReverse = gl::AND_REVERSE,
        Copy = gl::COPY,
        AndInverted = gl::AND_INVERTED,
        Noop = gl::NOOP,
        Xor = gl::XOR,
        Or = gl::OR,
        Nor = gl::NOR,
        Equiv = gl::EQUIV,
        Invert = gl::INVERT,
        OrReverse = gl::OR_REVERSE,
        CopyInverted = gl::COPY_INVERTED,
        OrInverted = gl::OR_INVERTED,
        Nand = gl::NAND,
        Set = gl::SET,
    }
}

gl_enum! {
    pub enum HintMode {
        Fastest = gl::FASTEST,
        Nicest = gl::NICEST,
        DontCare = gl::DONT_CARE,
    }
}

gl_enum! {
    pub enum MatrixMode {
        ModelView = gl::MODELVIEW,
        Projection = gl::PROJECTION,
        Texture = gl::TEXTURE,
    }
}

gl_enum! {
    pub enum Primitive {
        Points = gl::POINTS,
        Lines = gl::LINES,
        LineLoop = gl::LINE_LOOP,
        LineStrip = gl::LINE_STRIP,
        Triangles = gl::TRIANGLES,
        TriangleStrip = gl::TRIANGLE_STRIP,
        TriangleFan = gl::TRIANGLE_FAN,
    }
}

gl_enum! {
    pub enum IndexType {
        UnsignedByte = gl::UNSIGNED_BYTE,
        UnsignedShort = gl::UNSIGNED_SHORT,
        UnsignedInt = gl::UNSIGNED_INT,
    }
}

gl_enum! {
    /// Component types accepted by the `*Pointer` calls.
    pub enum ArrayType {
        Byte = gl::BYTE,
        UnsignedByte = gl::UNSIGNED_BYTE,
        Short = gl::SHORT,
        Fixed = gl::FIXED,
        Float = gl::FLOAT,
    }
}

impl ArrayType {
    pub const fn byte_size(self) -> u32 {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short => 2,
            Self::Fixed | Self::Float => 4,
        }
    }
}

gl_enum! {
    pub enum BufferTarget {
        Array = gl::ARRAY_BUFFER,
        ElementArray = gl::ELEMENT_ARRAY_BUFFER,
    }
}

gl_enum! {
    pub enum BufferUsage {
        StaticDraw = gl::STATIC_DRAW,
        DynamicDraw = gl::DYNAMIC_DRAW,
    }
}

// ============================================================================
// Textures
// ============================================================================

gl_enum! {
    pub enum MinFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
        NearestMipmapNearest = gl::NEAREST_MIPMAP_NEAREST,
        LinearMipmapNearest = gl::LINEAR_MIPMAP_NEAREST,
        NearestMipmapLinear = gl::NEAREST_MIPMAP_LINEAR,
        LinearMipmapLinear = gl::LINEAR_MIPMAP_LINEAR,
    }
}

gl_enum! {
    pub enum MagFilter {
        Nearest = gl::NEAREST,
        Linear = gl::LINEAR,
    }
}

gl_enum! {
    pub enum TextureWrap {
        ClampToEdge = gl::CLAMP_TO_EDGE,
        Repeat = gl::REPEAT,
    }
}

gl_enum! {
    pub enum PixelFormat {
        Alpha = gl::ALPHA,
        Rgb = gl::RGB,
        Rgba = gl::RGBA,
        Luminance = gl::LUMINANCE,
        LuminanceAlpha = gl::LUMINANCE_ALPHA,
    }
}

gl_enum! {
    pub enum PixelType {
        UnsignedByte = gl::UNSIGNED_BYTE,
        UnsignedShort565 = gl::UNSIGNED_SHORT_5_6_5,
        UnsignedShort4444 = gl::UNSIGNED_SHORT_4_4_4_4,
        UnsignedShort5551 = gl::UNSIGNED_SHORT_5_5_5_1,
    }
}

impl PixelType {
    /// The only format a packed type may be paired with.
    pub fn required_format(self) -> Option<PixelFormat> {
        match self {
            Self::UnsignedByte => None,
            Self::UnsignedShort565 => Some(PixelFormat::Rgb),
            Self::UnsignedShort4444 | Self::UnsignedShort5551 => Some(PixelFormat::Rgba),
        }
    }

    /// Bytes per source pixel.
    pub fn source_bytes_per_pixel(self, format: PixelFormat) -> u32 {
        match self {
            Self::UnsignedByte => match format {
                PixelFormat::Alpha | PixelFormat::Luminance => 1,
                PixelFormat::LuminanceAlpha => 2,
                PixelFormat::Rgb => 3,
                PixelFormat::Rgba => 4,
            },
            _ => 2,
        }
    }
}

gl_enum! {
    pub enum TexEnvMode {
        Modulate = gl::MODULATE,
        Decal = gl::DECAL,
        Blend = gl::BLEND,
        Replace = gl::REPLACE,
        Add = gl::ADD,
        Combine = gl::COMBINE,
    }
}

gl_enum! {
    /// `COMBINE_RGB` / `COMBINE_ALPHA` functions.
    pub enum CombineFunc {
        Replace = gl::REPLACE,
        Modulate = gl::MODULATE,
        Add = gl::ADD,
        AddSigned = gl::ADD_SIGNED,
        Interpolate = gl::INTERPOLATE,
        Subtract = gl::SUBTRACT,
        Dot3Rgb = gl::DOT3_RGB,
        Dot3Rgba = gl::DOT3_RGBA,
    }
}

impl CombineFunc {
    /// Dot products are only defined for the RGB function.
    pub fn valid_for_alpha(self) -> bool {
        !matches!(self, Self::Dot3Rgb | Self::Dot3Rgba)
    }
}

gl_enum! {
    pub enum CombineSource {
        Texture = gl::TEXTURE,
        Constant = gl::CONSTANT,
        PrimaryColor = gl::PRIMARY_COLOR,
        Previous = gl::PREVIOUS,
    }
}

gl_enum! {
    pub enum CombineOperand {
        SrcColor = gl::SRC_COLOR,
        OneMinusSrcColor = gl::ONE_MINUS_SRC_COLOR,
        SrcAlpha = gl::SRC_ALPHA,
        OneMinusSrcAlpha = gl::ONE_MINUS_SRC_ALPHA,
    }
}

impl CombineOperand {
    pub fn reads_alpha(self) -> bool {
        matches!(self, Self::SrcAlpha | Self::OneMinusSrcAlpha)
    }

    pub fn inverted(self) -> bool {
        matches!(self, Self::OneMinusSrcColor | Self::OneMinusSrcAlpha)
    }

    /// Alpha operands only accept the alpha forms.
    pub fn valid_for_alpha(self) -> bool {
        self.reads_alpha()
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// Targets of `glEnable` / `glDisable` / `glIsEnabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    AlphaTest,
    Blend,
    ColorLogicOp,
    ClipPlane(usize),
    ColorMaterial,
    CullFace,
    DepthTest,
    Dither,
    Fog,
    Light(usize),
    Lighting,
    LineSmooth,
    Multisample,
    Normalize,
    PointSmooth,
    PointSprite,
    PolygonOffsetFill,
    RescaleNormal,
    SampleAlphaToCoverage,
    SampleAlphaToOne,
    SampleCoverage,
    ScissorTest,
    StencilTest,
    Texture2D,
}

impl Capability {
    pub fn from_gl(cap: GLenum, max_lights: usize, max_clip_planes: usize) -> Option<Self> {
        let indexed = |base: GLenum, count: usize| {
            cap.checked_sub(base)
                .map(|i| i as usize)
                .filter(|&i| i < count)
        };
        if let Some(i) = indexed(gl::LIGHT0, max_lights) {
            return Some(Self::Light(i));
        }
        if let Some(i) = indexed(gl::CLIP_PLANE0, max_clip_planes) {
            return Some(Self::ClipPlane(i));
        }
        Some(match cap {
            gl::ALPHA_TEST => Self::AlphaTest,
            gl::BLEND => Self::Blend,
            gl::COLOR_LOGIC_OP => Self::ColorLogicOp,
            gl::COLOR_MATERIAL => Self::ColorMaterial,
            gl::CULL_FACE => Self::CullFace,
            gl::DEPTH_TEST => Self::DepthTest,
            gl::DITHER => Self::Dither,
            gl::FOG => Self::Fog,
            gl::LIGHTING => Self::Lighting,
            gl::LINE_SMOOTH => Self::LineSmooth,
            gl::MULTISAMPLE => Self::Multisample,
            gl::NORMALIZE => Self::Normalize,
            gl::POINT_SMOOTH => Self::PointSmooth,
            gl::POINT_SPRITE_OES => Self::PointSprite,
            gl::POLYGON_OFFSET_FILL => Self::PolygonOffsetFill,
            gl::RESCALE_NORMAL => Self::RescaleNormal,
            gl::SAMPLE_ALPHA_TO_COVERAGE => Self::SampleAlphaToCoverage,
            gl::SAMPLE_ALPHA_TO_ONE => Self::SampleAlphaToOne,
            gl::SAMPLE_COVERAGE => Self::SampleCoverage,
            gl::SCISSOR_TEST => Self::ScissorTest,
            gl::STENCIL_TEST => Self::StencilTest,
            gl::TEXTURE_2D => Self::Texture2D,
            _ => return None,
        })
    }
}

/// Targets of `glEnableClientState` / `glDisableClientState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientArray {
    Vertex,
    Normal,
    Color,
    TexCoord,
    PointSize,
}

impl ClientArray {
    pub fn from_gl(array: GLenum) -> Option<Self> {
        Some(match array {
            gl::VERTEX_ARRAY => Self::Vertex,
            gl::NORMAL_ARRAY => Self::Normal,
            gl::COLOR_ARRAY => Self::Color,
            gl::TEXTURE_COORD_ARRAY => Self::TexCoord,
            gl::POINT_SIZE_ARRAY_OES => Self::PointSize,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gl_round_trips() {
        assert_eq!(CompareFunc::from_gl(gl::LEQUAL), Some(CompareFunc::LessEqual));
        assert_eq!(CompareFunc::LessEqual.to_gl(), gl::LEQUAL);
        assert_eq!(TexEnvMode::from_gl(gl::BLEND), Some(TexEnvMode::Blend));
        assert_eq!(StencilOp::from_gl(gl::ZERO), Some(StencilOp::Zero));
        assert_eq!(MagFilter::from_gl(gl::NEAREST_MIPMAP_LINEAR), None);
    }

    #[test]
    fn test_indexed_capabilities() {
        assert_eq!(
            Capability::from_gl(gl::LIGHT0 + 7, 8, 4),
            Some(Capability::Light(7))
        );
        assert_eq!(Capability::from_gl(gl::LIGHT0 + 8, 8, 4), None);
        assert_eq!(
            Capability::from_gl(gl::CLIP_PLANE0 + 3, 8, 4),
            Some(Capability::ClipPlane(3))
        );
        assert_eq!(Capability::from_gl(gl::CLIP_PLANE0 + 4, 8, 4), None);
        assert_eq!(Capability::from_gl(gl::FOG, 8, 4), Some(Capability::Fog));
    }

    #[test]
    fn test_blend_factor_roles() {
        assert!(!BlendFactor::SrcColor.valid_as_source());
        assert!(BlendFactor::SrcAlphaSaturate.valid_as_source());
        assert!(!BlendFactor::SrcAlphaSaturate.valid_as_destination());
        assert!(BlendFactor::SrcColor.valid_as_destination());
    }

    #[test]
    fn test_packed_types_pin_format() {
        assert_eq!(
            PixelType::UnsignedShort565.required_format(),
            Some(PixelFormat::Rgb)
        );
        assert_eq!(PixelType::UnsignedByte.source_bytes_per_pixel(PixelFormat::Rgb), 3);
    }
}
