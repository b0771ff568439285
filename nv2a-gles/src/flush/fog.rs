//! Fog registers and the final combiner

use super::HardwareShadow;
use crate::combiner::specular_fog_words;
use crate::derive::fog_params;
use crate::gl::pack_abgr32;
use crate::hw::methods::{FOG_COLOR, FOG_MODE, FOG_PARAMS, SPECULAR_FOG_CW0, SPECULAR_FOG_CW1};
use crate::hw::{Batch, PushBuffer};
use crate::state::RenderState;

pub(super) fn flush<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    shadow: &mut HardwareShadow,
    pb: &mut P,
) -> bool {
    let final_combiner = (
        state.coloring.fog_enabled,
        state.lighting.specular_enabled(),
    );
    let final_changed = shadow.final_combiner != Some(final_combiner);
    let c = &mut state.coloring;
    if !c.fog_dirty && !final_changed {
        return false;
    }
    tracing::trace!(fog = c.fog_dirty, final_changed, "flush fog");

    let mut batch = Batch::new(pb);
    if c.fog_dirty {
        let params = fog_params(c.fog_mode, c.fog_density, c.fog_start, c.fog_end);
        batch.push1(FOG_MODE, c.fog_mode.to_hw());
        batch.push1(FOG_COLOR, pack_abgr32(c.fog_color));
        batch.push_floats(FOG_PARAMS, &params.words());
        c.fog_dirty = false;
    }
    if final_changed {
        let (cw0, cw1) = specular_fog_words(final_combiner.0, final_combiner.1);
        batch.push1(SPECULAR_FOG_CW0, cw0);
        batch.push1(SPECULAR_FOG_CW1, cw1);
        shadow.final_combiner = Some(final_combiner);
    }
    true
}
