//! Per-stage word generation

use super::{Input, InputWord, MapMode, OutputWord, Register, Shift, StageWords};
use crate::hw::methods::SPECULAR_FOG_CW1_SPECULAR_CLAMP;
use crate::state::TexEnv;
use crate::state::enums::{CombineFunc, CombineOperand, CombineSource, TexEnvMode};

/// Register holding the value a stage builds on.
pub fn stage_input(stage: usize) -> Register {
    if stage == 0 {
        Register::Color0
    } else {
        Register::Spare0
    }
}

/// Forwards the prior stage's color and alpha unchanged.
pub fn pass_through(stage: usize) -> StageWords {
    let prior = stage_input(stage);
    StageWords {
        color_in: InputWord::ab(Input::rgb(prior), Input::ONE),
        color_out: OutputWord::ab(Register::Spare0),
        alpha_in: InputWord::ab(Input::alpha(prior), Input::one_alpha()),
        alpha_out: OutputWord::ab(Register::Spare0),
    }
}

/// Words for a texture unit whose texel is sampled at `stage`.
pub fn compile_unit(env: &TexEnv, stage: usize) -> StageWords {
    match env.mode {
        TexEnvMode::Combine => compile_combine(env, stage),
        mode => compile_fixed(mode, stage),
    }
}

fn compile_fixed(mode: TexEnvMode, stage: usize) -> StageWords {
    let prior = stage_input(stage);
    let texel = Register::texture(stage);
    let (cf, ct) = (Input::rgb(prior), Input::rgb(texel));
    let (af, at) = (Input::alpha(prior), Input::alpha(texel));

    let (color_in, color_out) = match mode {
        TexEnvMode::Replace => (InputWord::ab(ct, Input::ONE), OutputWord::ab(Register::Spare0)),
        TexEnvMode::Add => (
            InputWord::abcd(cf, Input::ONE, ct, Input::ONE),
            OutputWord::sum(Register::Spare0),
        ),
        // Cf * (1 - At) + Ct * At
        TexEnvMode::Decal => (
            InputWord::abcd(cf, at.inverted(), ct, at),
            OutputWord::sum(Register::Spare0),
        ),
        // Cf * (1 - Ct) + Cc * Ct
        TexEnvMode::Blend => (
            InputWord::abcd(cf, ct.inverted(), Input::rgb(Register::Constant0), ct),
            OutputWord::sum(Register::Spare0),
        ),
        TexEnvMode::Modulate | TexEnvMode::Combine => {
            (InputWord::ab(cf, ct), OutputWord::ab(Register::Spare0))
        }
    };

    let alpha_in = match mode {
        TexEnvMode::Replace => InputWord::ab(at, Input::one_alpha()),
        TexEnvMode::Decal => InputWord::ab(af, Input::one_alpha()),
        TexEnvMode::Modulate | TexEnvMode::Add | TexEnvMode::Blend | TexEnvMode::Combine => {
            InputWord::ab(af, at)
        }
    };

    StageWords {
        color_in,
        color_out,
        alpha_in,
        alpha_out: OutputWord::ab(Register::Spare0),
    }
}

fn source_register(source: CombineSource, stage: usize) -> Register {
    match source {
        CombineSource::Texture => Register::texture(stage),
        CombineSource::Constant => Register::Constant0,
        CombineSource::PrimaryColor => Register::Color0,
        CombineSource::Previous => stage_input(stage),
    }
}

fn operand_input(
    source: CombineSource,
    operand: CombineOperand,
    stage: usize,
    alpha_half: bool,
) -> Input {
    let register = source_register(source, stage);
    let input = if alpha_half || operand.reads_alpha() {
        Input::alpha(register)
    } else {
        Input::rgb(register)
    };
    if operand.inverted() {
        input.inverted()
    } else {
        input
    }
}

fn combine_half(
    func: CombineFunc,
    sources: &[CombineSource; 3],
    operands: &[CombineOperand; 3],
    scale: f32,
    stage: usize,
    alpha_half: bool,
) -> (InputWord, OutputWord) {
    let arg = |i: usize| operand_input(sources[i], operands[i], stage, alpha_half);
    let one = if alpha_half {
        Input::one_alpha()
    } else {
        Input::ONE
    };
    let shift = Shift::from_scale(scale);
    let ab = OutputWord::ab(Register::Spare0).with_shift(shift);
    let sum = OutputWord::sum(Register::Spare0).with_shift(shift);

    match func {
        CombineFunc::Replace => (InputWord::ab(arg(0), one), ab),
        CombineFunc::Modulate => (InputWord::ab(arg(0), arg(1)), ab),
        CombineFunc::Add => (InputWord::abcd(arg(0), one, arg(1), one), sum),
        // Arg0 + Arg1 - 0.5
        CombineFunc::AddSigned => (
            InputWord::abcd(arg(0), one, arg(1).mapped(MapMode::HalfBiasNormal), one),
            sum,
        ),
        // Arg0 * Arg2 + Arg1 * (1 - Arg2)
        CombineFunc::Interpolate => (
            InputWord::abcd(arg(0), arg(2), arg(1), arg(2).inverted()),
            sum,
        ),
        // (Arg0 - 0.5) + (0.5 - Arg1)
        CombineFunc::Subtract => (
            InputWord::abcd(
                arg(0).mapped(MapMode::HalfBiasNormal),
                one,
                arg(1).mapped(MapMode::HalfBiasNegate),
                one,
            ),
            sum,
        ),
        CombineFunc::Dot3Rgb | CombineFunc::Dot3Rgba => (
            InputWord::ab(
                arg(0).mapped(MapMode::ExpandNormal),
                arg(1).mapped(MapMode::ExpandNormal),
            ),
            OutputWord {
                ab_dot: true,
                blue_to_alpha_ab: func == CombineFunc::Dot3Rgba,
                ..ab
            },
        ),
    }
}

fn compile_combine(env: &TexEnv, stage: usize) -> StageWords {
    let (color_in, color_out) = combine_half(
        env.combine_rgb,
        &env.src_rgb,
        &env.operand_rgb,
        env.rgb_scale,
        stage,
        false,
    );
    let (alpha_in, alpha_out) = if env.combine_rgb == CombineFunc::Dot3Rgba {
        // Alpha comes from the color side's dot product.
        (InputWord::default(), OutputWord::default())
    } else {
        combine_half(
            env.combine_alpha,
            &env.src_alpha,
            &env.operand_alpha,
            env.alpha_scale,
            stage,
            true,
        )
    };
    StageWords {
        color_in,
        color_out,
        alpha_in,
        alpha_out,
    }
}

/// Final combiner words `(CW0, CW1)`.
///
/// Output is `A*B + (1-A)*C + D` for color and `G` for alpha. With fog on,
/// the fog alpha blends the lit color towards the fog color.
pub fn specular_fog_words(fog_enabled: bool, specular_enabled: bool) -> (u32, u32) {
    let color = if specular_enabled {
        Register::SpecLit
    } else {
        Register::Spare0
    };
    let cw0 = if fog_enabled {
        InputWord::abcd(
            Input::alpha(Register::Fog),
            Input::rgb(color),
            Input::rgb(Register::Fog),
            Input::ZERO,
        )
    } else {
        InputWord::abcd(Input::ZERO, Input::ZERO, Input::ZERO, Input::rgb(color))
    };
    let cw1 = InputWord::abcd(
        Input::ZERO,
        Input::ZERO,
        Input::alpha(Register::Spare0),
        Input::ZERO,
    );
    (cw0.bits(), cw1.bits() | SPECULAR_FOG_CW1_SPECULAR_CLAMP)
}
