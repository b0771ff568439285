//! Deferred state flush
//!
//! Mutators only record state and raise dirty flags. Right before a draw,
//! [`flush_state_change`] walks the derived groups in a fixed order, turns
//! whatever changed into push-buffer methods and clears the flags it
//! consumed. Each step opens its own batch and skips the device entirely when
//! its group is clean, so back-to-back flushes cost nothing.
//!
//! [`HardwareShadow`] remembers what was last written where the decision to
//! push depends on more than a dirty flag: the stage assignment, the derived
//! lights and the vertex slots texcoord arrays were routed to.

mod arrays;
mod fog;
mod lighting;
mod point;
mod texture;
mod transform;

#[cfg(test)]
mod tests;

use crate::combiner::{AllocationInput, CombinerProgram, StageAssignment};
use crate::derive::DerivedLight;
use crate::hw::{MAX_LIGHTS, MAX_TEXTURE_UNITS, PushBuffer};
use crate::state::RenderState;

/// Last values written to the hardware by the flush steps.
#[derive(Debug, Clone, Default)]
pub struct HardwareShadow {
    /// Input of the last stage allocation
    pub allocation_input: Option<AllocationInput>,
    pub assignment: StageAssignment,
    /// Last emitted combiner program; `None` until the first texture flush
    pub program: Option<CombinerProgram>,
    pub lights: [Option<DerivedLight>; MAX_LIGHTS],
    pub light_mask: Option<u32>,
    /// `(fog_enabled, specular_enabled)` of the final combiner words
    pub final_combiner: Option<(bool, bool)>,
    /// Vertex attribute slot each unit's texcoord array is bound to
    pub texcoord_slots: [Option<usize>; MAX_TEXTURE_UNITS],
    pub combiner_initialized: bool,
}

/// Steps that produced output during one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushSummary {
    pub transform: bool,
    pub fog: bool,
    pub texture: bool,
    pub point: bool,
    pub lighting: bool,
    pub arrays: bool,
}

impl FlushSummary {
    pub fn any(&self) -> bool {
        self.transform || self.fog || self.texture || self.point || self.lighting || self.arrays
    }
}

/// Emits every pending derived-state change.
///
/// Order matters: the texture step decides the stage assignment that the
/// array step routes texcoords by.
pub fn flush_state_change<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    shadow: &mut HardwareShadow,
    pb: &mut P,
    depth_max: f32,
) -> FlushSummary {
    let summary = FlushSummary {
        transform: transform::flush(state, pb, depth_max),
        fog: fog::flush(state, shadow, pb),
        texture: texture::flush(state, shadow, pb),
        point: point::flush(state, pb),
        lighting: lighting::flush(state, shadow, pb),
        arrays: arrays::flush(state, shadow, pb),
    };
    if summary.any() {
        tracing::debug!(?summary, "state flushed");
    }
    summary
}
