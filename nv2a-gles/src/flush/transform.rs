//! Matrices, viewport and depth range

use crate::derive::{composite, viewport_matrix};
use crate::hw::methods::{
    CLIP_MAX, CLIP_MIN, COMPOSITE_MATRIX, INVERSE_MODEL_VIEW_MATRIX, MODEL_VIEW_MATRIX,
    PROJECTION_MATRIX, VIEWPORT_OFFSET, VIEWPORT_SCALE,
};
use crate::hw::{Batch, PushBuffer};
use crate::state::RenderState;

pub(super) fn flush<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    pb: &mut P,
    depth_max: f32,
) -> bool {
    let lighting = state.lighting.enabled;
    let t = &mut state.transform;
    let composite_dirty = t.modelview_dirty || t.projection_dirty || t.viewport_dirty;
    if !composite_dirty && !t.depth_range_dirty {
        return false;
    }
    tracing::trace!(
        modelview = t.modelview_dirty,
        projection = t.projection_dirty,
        viewport = t.viewport_dirty,
        depth_range = t.depth_range_dirty,
        "flush transform"
    );

    let mut batch = Batch::new(pb);
    let modelview = *t.modelview.top();
    if t.modelview_dirty {
        batch.push_matrix(MODEL_VIEW_MATRIX, &modelview);
        if lighting {
            // Column-major upload of the inverse is the inverse transpose,
            // which is what normals need.
            batch.push_matrix_raw(INVERSE_MODEL_VIEW_MATRIX, &modelview.inverse());
        }
    }

    if composite_dirty {
        if t.viewport_dirty {
            t.viewport_matrix = viewport_matrix(t.viewport, t.depth_range, depth_max);
            // The window mapping lives in the composite matrix.
            batch.push_floats(VIEWPORT_OFFSET, &[0.0; 4]);
            batch.push_floats(VIEWPORT_SCALE, &[1.0; 4]);
        }
        let projection = *t.projection.top();
        batch.push_matrix(PROJECTION_MATRIX, &projection);
        batch.push_matrix(
            COMPOSITE_MATRIX,
            &composite(&t.viewport_matrix, &projection, &modelview),
        );
    }

    if t.depth_range_dirty {
        let [near, far] = t.depth_range;
        batch.push_f32(CLIP_MIN, near * depth_max);
        batch.push_f32(CLIP_MAX, far * depth_max);
    }

    t.modelview_dirty = false;
    t.projection_dirty = false;
    t.viewport_dirty = false;
    t.depth_range_dirty = false;
    true
}
