//! Texture environment compiler
//!
//! Lowers the GL texture environments of all units onto the NV2A register
//! combiners. Every stage reads the previous stage's result from `Spare0`
//! (stage 0 reads the interpolated vertex color) and writes its own result
//! back to `Spare0`, so unused stages must be programmed as pass-throughs.
//!
//! The words are built from typed records ([`Input`], [`InputWord`],
//! [`OutputWord`]) and only packed to `u32` at emission.

mod allocate;
mod compiler;
mod program;


pub use allocate::{
    AllocationInput, POINT_SPRITE_STAGE, StageAssignment, StageConflict, StageOwner,
    allocate_stages,
};
pub use compiler::{compile_unit, pass_through, specular_fog_words, stage_input};
pub use program::{CombinerProgram, StageConfig, StageProgram, combiner_init};

// ============================================================================
// Registers and input mappings
// ============================================================================

/// Combiner register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Register {
    /// Reads as zero; as a destination, discards the result
    Zero = 0x0,
    /// Per-stage factor 0 (texture environment color)
    Constant0 = 0x1,
    Constant1 = 0x2,
    Fog = 0x3,
    /// Interpolated diffuse vertex color
    Color0 = 0x4,
    /// Interpolated specular vertex color
    Color1 = 0x5,
    Texture0 = 0x8,
    Texture1 = 0x9,
    Texture2 = 0xA,
    Texture3 = 0xB,
    Spare0 = 0xC,
    Spare1 = 0xD,
    /// `Spare0 + Color1`; final combiner only
    SpecLit = 0xE,
}

impl Register {
    /// Sampled texel of `stage`.
    pub const fn texture(stage: usize) -> Self {
        match stage {
            0 => Self::Texture0,
            1 => Self::Texture1,
            2 => Self::Texture2,
            _ => Self::Texture3,
        }
    }
}

/// Input range mapping applied before the multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MapMode {
    /// `max(0, x)`
    UnsignedIdentity = 0,
    /// `1 - clamp(x)`
    UnsignedInvert = 1,
    /// `2x - 1`
    ExpandNormal = 2,
    /// `1 - 2x`
    ExpandNegate = 3,
    /// `x - 0.5`
    HalfBiasNormal = 4,
    /// `0.5 - x`
    HalfBiasNegate = 5,
    SignedIdentity = 6,
    SignedNegate = 7,
}

impl MapMode {
    /// The same mapping applied to `1 - x`.
    pub const fn inverted(self) -> Self {
        match self {
            Self::UnsignedIdentity => Self::UnsignedInvert,
            Self::UnsignedInvert => Self::UnsignedIdentity,
            Self::ExpandNormal => Self::ExpandNegate,
            Self::ExpandNegate => Self::ExpandNormal,
            Self::HalfBiasNormal => Self::HalfBiasNegate,
            Self::HalfBiasNegate => Self::HalfBiasNormal,
            Self::SignedIdentity => Self::SignedNegate,
            Self::SignedNegate => Self::SignedIdentity,
        }
    }
}

/// One A/B/C/D operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Input {
    pub source: Register,
    /// Read the alpha channel (replicated into RGB on the color side)
    pub alpha: bool,
    pub map: MapMode,
}

impl Input {
    pub const ZERO: Self = Self::rgb(Register::Zero);
    pub const ONE: Self = Self::rgb(Register::Zero).inverted();

    pub const fn rgb(source: Register) -> Self {
        Self {
            source,
            alpha: false,
            map: MapMode::UnsignedIdentity,
        }
    }

    pub const fn alpha(source: Register) -> Self {
        Self {
            source,
            alpha: true,
            map: MapMode::UnsignedIdentity,
        }
    }

    /// Constant one read through the alpha channel.
    pub const fn one_alpha() -> Self {
        Self::alpha(Register::Zero).inverted()
    }

    /// Reads `1 - x` instead of `x`.
    pub const fn inverted(self) -> Self {
        Self {
            map: self.map.inverted(),
            ..self
        }
    }

    /// Applies `map`, keeping an existing inversion.
    pub const fn mapped(self, map: MapMode) -> Self {
        let map = match self.map {
            MapMode::UnsignedInvert => map.inverted(),
            _ => map,
        };
        Self { map, ..self }
    }

    /// 8-bit operand field: source in 0-3, alpha in 4, map in 5-7.
    pub const fn bits(self) -> u32 {
        self.source as u32 | (self.alpha as u32) << 4 | (self.map as u32) << 5
    }
}

/// Input control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputWord {
    pub a: Input,
    pub b: Input,
    pub c: Input,
    pub d: Input,
}

impl Default for InputWord {
    fn default() -> Self {
        Self {
            a: Input::ZERO,
            b: Input::ZERO,
            c: Input::ZERO,
            d: Input::ZERO,
        }
    }
}

impl InputWord {
    /// Only the A*B product is used.
    pub fn ab(a: Input, b: Input) -> Self {
        Self {
            a,
            b,
            ..Self::default()
        }
    }

    pub fn abcd(a: Input, b: Input, c: Input, d: Input) -> Self {
        Self { a, b, c, d }
    }

    pub fn bits(&self) -> u32 {
        self.a.bits() << 24 | self.b.bits() << 16 | self.c.bits() << 8 | self.d.bits()
    }
}

/// Output scaling (`OCW` op field).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Shift {
    #[default]
    None = 0,
    Left1 = 2,
    Left2 = 4,
}

impl Shift {
    /// `RGB_SCALE` / `ALPHA_SCALE` of 1, 2 or 4.
    pub fn from_scale(scale: f32) -> Self {
        if scale == 4.0 {
            Self::Left2
        } else if scale == 2.0 {
            Self::Left1
        } else {
            Self::None
        }
    }
}

/// Output control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputWord {
    pub ab: Register,
    pub cd: Register,
    pub sum: Register,
    pub ab_dot: bool,
    pub cd_dot: bool,
    /// Color side only: replicate the AB blue channel into alpha
    pub blue_to_alpha_ab: bool,
    pub shift: Shift,
}

impl Default for OutputWord {
    fn default() -> Self {
        Self {
            ab: Register::Zero,
            cd: Register::Zero,
            sum: Register::Zero,
            ab_dot: false,
            cd_dot: false,
            blue_to_alpha_ab: false,
            shift: Shift::None,
        }
    }
}

impl OutputWord {
    /// `A*B` written to `dst`.
    pub fn ab(dst: Register) -> Self {
        Self {
            ab: dst,
            ..Self::default()
        }
    }

    /// `A*B + C*D` written to `dst`.
    pub fn sum(dst: Register) -> Self {
        Self {
            sum: dst,
            ..Self::default()
        }
    }

    pub fn with_shift(self, shift: Shift) -> Self {
        Self { shift, ..self }
    }

    pub fn bits(&self) -> u32 {
        self.cd as u32
            | (self.ab as u32) << 4
            | (self.sum as u32) << 8
            | (self.cd_dot as u32) << 12
            | (self.ab_dot as u32) << 13
            | (self.shift as u32) << 15
            | (self.blue_to_alpha_ab as u32) << 19
    }
}

/// The four words programming one general combiner stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StageWords {
    pub color_in: InputWord,
    pub color_out: OutputWord,
    pub alpha_in: InputWord,
    pub alpha_out: OutputWord,
}
