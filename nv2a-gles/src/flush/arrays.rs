//! Vertex attribute pointers

use super::HardwareShadow;
use crate::hw::methods::{
    self, SLOT_DIFFUSE, SLOT_NORMAL, SLOT_POINT_SIZE, SLOT_POSITION, SLOT_TEXTURE0,
    VERTEX_DATA_ARRAY_FORMAT, VERTEX_DATA_ARRAY_OFFSET,
    VERTEX_FORMAT_SIZE_SHIFT, VERTEX_FORMAT_STRIDE_SHIFT, VERTEX_TYPE_F,
};
use crate::hw::{Batch, MAX_TEXTURE_UNITS, PushBuffer};
use crate::state::{BufferState, RenderState, VertexArray};

/// Format word of an attribute the vertex fetch skips.
const DISABLED_FORMAT: u32 = VERTEX_TYPE_F;

/// `(format, offset)` for one attribute slot.
pub(crate) fn array_words(array: &VertexArray, buffers: &BufferState, slot: usize) -> (u32, u32) {
    if !array.enabled {
        return (DISABLED_FORMAT, 0);
    }
    let Some(ty) = array.ty.to_hw(slot == SLOT_NORMAL) else {
        return (DISABLED_FORMAT, 0);
    };
    let offset = if array.buffer == 0 {
        Some(array.pointer)
    } else {
        buffers.resolve(array.buffer, array.pointer)
    };
    let Some(offset) = offset else {
        tracing::warn!(
            slot,
            buffer = array.buffer,
            "vertex array buffer has no storage, attribute disabled"
        );
        return (DISABLED_FORMAT, 0);
    };
    let format = ty
        | array.size << VERTEX_FORMAT_SIZE_SHIFT
        | array.effective_stride() << VERTEX_FORMAT_STRIDE_SHIFT;
    (format, offset)
}

fn push_array<P: PushBuffer + ?Sized>(
    batch: &mut Batch<'_, P>,
    slot: usize,
    array: &VertexArray,
    buffers: &BufferState,
) {
    let (format, offset) = array_words(array, buffers, slot);
    batch.push1(methods::vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, slot), offset);
    batch.push1(methods::vertex_attribute(VERTEX_DATA_ARRAY_FORMAT, slot), format);
}

pub(super) fn flush<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    shadow: &mut HardwareShadow,
    pb: &mut P,
) -> bool {
    let slots: [Option<usize>; MAX_TEXTURE_UNITS] =
        std::array::from_fn(|u| shadow.assignment.stage_of(u).map(|s| SLOT_TEXTURE0 + s));
    let rerouted = slots != shadow.texcoord_slots;
    let arrays = &mut state.arrays;
    let buffers = &state.buffers;
    let current = &state.current;

    let any_dirty = arrays.vertex.dirty
        || arrays.normal.dirty
        || arrays.color.dirty
        || arrays.point_size.dirty
        || arrays.texcoords.iter().any(|a| a.dirty);
    if !any_dirty && !rerouted {
        return false;
    }
    tracing::trace!(rerouted, "flush arrays");

    let mut batch = Batch::new(pb);
    for (slot, array) in [
        (SLOT_POSITION, &mut arrays.vertex),
        (SLOT_NORMAL, &mut arrays.normal),
        (SLOT_DIFFUSE, &mut arrays.color),
        (SLOT_POINT_SIZE, &mut arrays.point_size),
    ] {
        if array.dirty {
            push_array(&mut batch, slot, array, buffers);
            array.dirty = false;
        }
    }

    // Slots no texcoord array routes to anymore.
    for old in shadow.texcoord_slots.iter().flatten() {
        if !slots.contains(&Some(*old)) {
            batch.push1(methods::vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, *old), 0);
            batch.push1(
                methods::vertex_attribute(VERTEX_DATA_ARRAY_FORMAT, *old),
                DISABLED_FORMAT,
            );
        }
    }

    for (unit, array) in arrays.texcoords.iter_mut().enumerate() {
        if array.dirty || slots[unit] != shadow.texcoord_slots[unit] {
            if let Some(slot) = slots[unit] {
                push_array(&mut batch, slot, array, buffers);
                if !array.enabled {
                    batch.push_vec4(methods::vertex_data4f(slot), current.texcoords[unit]);
                }
            }
            array.dirty = false;
        }
    }
    shadow.texcoord_slots = slots;
    true
}
