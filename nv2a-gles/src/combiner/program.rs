//! Compiled combiner program and its emission

use glam::Vec4;
use smallvec::SmallVec;

use super::{
    StageAssignment, StageConflict, StageOwner, StageWords, compile_unit, pass_through,
};
use crate::gl::pack_argb32;
use crate::hw::methods::{
    self, COMBINER_ALPHA_ICW, COMBINER_ALPHA_OCW, COMBINER_COLOR_ICW, COMBINER_COLOR_OCW,
    COMBINER_CONTROL, COMBINER_CONTROL_FACTOR0_EACH_STAGE,
    COMBINER_CONTROL_FACTOR1_SAME_FACTOR_ALL, COMBINER_CONTROL_ITERATION_COUNT_SHIFT,
    COMBINER_FACTOR0, SHADER_CLIP_PLANE_MODE, SHADER_OTHER_STAGE_INPUT, SHADER_STAGE_BITS,
    SHADER_STAGE_PROGRAM, TEXGEN_DISABLE, TEXGEN_EYE_LINEAR,
};
use crate::hw::{Batch, MAX_CLIP_PLANES, MAX_STAGES, MAX_TEXTURE_UNITS, PushBuffer};
use crate::state::TexEnv;

/// Texcoord components S, T, R, Q.
const TEXGEN_COMPONENTS: u32 = 4;

/// Every stage reads texture coordinates from its own slot.
const OTHER_STAGE_INPUT_ALL_OWN: u32 = 0;

/// Discard a fragment when any generated clip coordinate is negative.
const CLIP_PLANE_MODE_DISCARD_NEGATIVE: u32 = 0;

/// Texture shader program of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageProgram {
    None,
    Projective2D,
    /// Texcoords hold clip-plane distances
    ClipPlane,
}

impl StageProgram {
    pub const fn to_hw(self) -> u32 {
        match self {
            Self::None => methods::STAGE_PROGRAM_NONE,
            Self::Projective2D => methods::STAGE_PROGRAM_2D_PROJECTIVE,
            Self::ClipPlane => methods::STAGE_PROGRAM_CLIP_PLANE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    pub owner: StageOwner,
    pub program: StageProgram,
    pub words: StageWords,
    /// Factor 0, the unit's environment color
    pub constant: Vec4,
    /// Eye-linear texgen planes for the clip stage
    pub texgen_planes: Option<[Vec4; MAX_CLIP_PLANES]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinerProgram {
    pub stages: [StageConfig; MAX_STAGES],
    pub conflicts: SmallVec<[StageConflict; 2]>,
}

impl CombinerProgram {
    /// Compiles every stage of `assignment`.
    ///
    /// `clip_planes` are eye-space equations; disabled planes are generated
    /// as zero, which never clips.
    pub fn build(
        assignment: &StageAssignment,
        envs: &[TexEnv; MAX_TEXTURE_UNITS],
        clip_planes: &[Vec4; MAX_CLIP_PLANES],
        clip_enabled: &[bool; MAX_CLIP_PLANES],
    ) -> Self {
        let stages = std::array::from_fn(|stage| {
            let owner = assignment.owners[stage];
            match owner {
                StageOwner::Texture(unit) => StageConfig {
                    owner,
                    program: StageProgram::Projective2D,
                    words: compile_unit(&envs[unit], stage),
                    constant: envs[unit].color,
                    texgen_planes: None,
                },
                StageOwner::ClipPlanes => StageConfig {
                    owner,
                    program: StageProgram::ClipPlane,
                    words: pass_through(stage),
                    constant: Vec4::ZERO,
                    texgen_planes: Some(std::array::from_fn(|i| {
                        if clip_enabled[i] {
                            clip_planes[i]
                        } else {
                            Vec4::ZERO
                        }
                    })),
                },
                StageOwner::PassThrough => StageConfig {
                    owner,
                    program: StageProgram::None,
                    words: pass_through(stage),
                    constant: Vec4::ZERO,
                    texgen_planes: None,
                },
            }
        });
        Self {
            stages,
            conflicts: assignment.conflicts.clone(),
        }
    }

    /// Packed `SHADER_STAGE_PROGRAM` word.
    pub fn stage_program_word(&self) -> u32 {
        self.stages
            .iter()
            .enumerate()
            .fold(0, |word, (i, s)| {
                word | s.program.to_hw() << (i as u32 * SHADER_STAGE_BITS)
            })
    }

    pub fn emit<P: PushBuffer + ?Sized>(&self, batch: &mut Batch<'_, P>) {
        for (stage, config) in self.stages.iter().enumerate() {
            let words = &config.words;
            batch.push1(methods::combiner(COMBINER_COLOR_ICW, stage), words.color_in.bits());
            batch.push1(methods::combiner(COMBINER_ALPHA_ICW, stage), words.alpha_in.bits());
            batch.push1(methods::combiner(COMBINER_COLOR_OCW, stage), words.color_out.bits());
            batch.push1(methods::combiner(COMBINER_ALPHA_OCW, stage), words.alpha_out.bits());
            batch.push1(
                methods::combiner(COMBINER_FACTOR0, stage),
                pack_argb32(config.constant),
            );

            let mode = if config.texgen_planes.is_some() {
                TEXGEN_EYE_LINEAR
            } else {
                TEXGEN_DISABLE
            };
            for component in 0..TEXGEN_COMPONENTS {
                batch.push1(methods::texgen(component, stage), mode);
            }
            if let Some(planes) = &config.texgen_planes {
                for (component, plane) in (0..TEXGEN_COMPONENTS).zip(planes) {
                    batch.push_vec4(methods::texgen_plane(component, stage), *plane);
                }
            }
        }
        batch.push1(SHADER_STAGE_PROGRAM, self.stage_program_word());
        batch.push1(SHADER_CLIP_PLANE_MODE, CLIP_PLANE_MODE_DISCARD_NEGATIVE);
    }
}

/// One-time combiner setup: own texcoords per stage, per-stage factor 0,
/// and all four general stages active.
pub fn combiner_init<P: PushBuffer + ?Sized>(batch: &mut Batch<'_, P>) {
    batch.push1(SHADER_OTHER_STAGE_INPUT, OTHER_STAGE_INPUT_ALL_OWN);
    batch.push1(
        COMBINER_CONTROL,
        COMBINER_CONTROL_FACTOR0_EACH_STAGE
            | COMBINER_CONTROL_FACTOR1_SAME_FACTOR_ALL
            | (MAX_STAGES as u32) << COMBINER_CONTROL_ITERATION_COUNT_SHIFT,
    );
}
