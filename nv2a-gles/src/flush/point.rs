use crate::derive::point_attenuation;
use crate::hw::methods::{POINT_PARAMS, POINT_PARAMS_ENABLE};
use crate::hw::{Batch, PushBuffer};
use crate::state::RenderState;

pub(super) fn flush<P: PushBuffer + ?Sized>(state: &mut RenderState, pb: &mut P) -> bool {
    let r = &mut state.raster;
    if !r.point_params_dirty {
        return false;
    }
    tracing::trace!("flush point params");

    let params = point_attenuation(
        r.point_distance_attenuation,
        r.point_size,
        r.point_size_min,
        r.point_size_max,
        state.transform.viewport,
    );
    let mut batch = Batch::new(pb);
    batch.push_bool(POINT_PARAMS_ENABLE, r.point_sprite || r.point_params_requested);
    batch.push_floats(POINT_PARAMS, &params.words());
    r.point_params_dirty = false;
    true
}
