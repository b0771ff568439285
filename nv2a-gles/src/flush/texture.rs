//! Texture stages, texture matrices and the combiner program

use glam::{Mat4, Vec3};

use super::HardwareShadow;
use crate::combiner::{AllocationInput, CombinerProgram, StageOwner, allocate_stages};
use crate::hw::methods::{
    self, TEXTURE_ADDRESS, TEXTURE_ADDRESS_CLAMP_TO_EDGE, TEXTURE_ADDRESS_P_SHIFT,
    TEXTURE_ADDRESS_U_SHIFT, TEXTURE_ADDRESS_V_SHIFT, TEXTURE_CONTROL0, TEXTURE_CONTROL0_ENABLE,
    TEXTURE_CONTROL1, TEXTURE_CONTROL1_PITCH_SHIFT, TEXTURE_FILTER,
    TEXTURE_FILTER_CONVOLUTION_GAUSSIAN, TEXTURE_FILTER_MAG_SHIFT, TEXTURE_FILTER_MIN_SHIFT,
    TEXTURE_FORMAT, TEXTURE_FORMAT_BASE_SIZE_U_SHIFT, TEXTURE_FORMAT_BASE_SIZE_V_SHIFT,
    TEXTURE_FORMAT_BORDER_SOURCE_COLOR, TEXTURE_FORMAT_COLOR_SHIFT, TEXTURE_FORMAT_CONTEXT_DMA_B,
    TEXTURE_FORMAT_DIMENSIONALITY_2D, TEXTURE_FORMAT_MIPMAP_LEVELS_SHIFT, TEXTURE_IMAGE_RECT,
    TEXTURE_OFFSET,
};
use crate::hw::{Batch, MAX_TEXTURE_UNITS, PushBuffer};
use crate::state::{RenderState, TextureImage, TextureObject};

/// Only level 0 is ever specified.
const MIPMAP_LEVELS: u32 = 1;

/// Snapshot of everything stage allocation depends on.
pub(super) fn allocation_input(state: &RenderState) -> AllocationInput {
    let texture = &state.texture;
    AllocationInput {
        active_units: std::array::from_fn(|u| texture.unit_active(u)),
        coord_replace: std::array::from_fn(|u| texture.units[u].env.coord_replace),
        point_sprite: state.raster.point_sprite,
        clip_planes: state.transform.any_clip_plane_enabled(),
    }
}

pub(super) fn flush<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    shadow: &mut HardwareShadow,
    pb: &mut P,
) -> bool {
    let input = allocation_input(state);
    let texture = &mut state.texture;
    let transform = &mut state.transform;

    let first = shadow.program.is_none();
    let units_dirty = texture.any_unit_dirty();
    let matrices_dirty = transform.texture_dirty.iter().any(|&d| d);
    let input_changed = shadow.allocation_input != Some(input);
    if !first && !units_dirty && !matrices_dirty && !transform.clip_planes_dirty && !input_changed
    {
        return false;
    }

    let assignment = if input_changed {
        allocate_stages(&input)
    } else {
        shadow.assignment.clone()
    };
    let reassigned = assignment.owners != shadow.assignment.owners;
    tracing::trace!(units_dirty, reassigned, owners = ?assignment.owners, "flush texture");

    let mut batch = Batch::new(pb);
    for (stage, &owner) in assignment.owners.iter().enumerate() {
        let previous = shadow.assignment.owners[stage];
        match owner {
            StageOwner::Texture(unit) => {
                let moved = previous != owner;
                let object = texture.bound(unit);
                let Some(image) = &object.image else {
                    continue;
                };
                if moved || texture.units[unit].dirty || object.dirty {
                    push_texture(&mut batch, stage, object, image);
                }
                if moved || transform.texture_dirty[unit] || object.dirty {
                    let (u, v) = image.uv_scale();
                    let matrix =
                        Mat4::from_scale(Vec3::new(u, v, 1.0)) * *transform.texture[unit].top();
                    batch.push_bool(methods::texture_matrix_enable(stage), true);
                    batch.push_matrix(methods::texture_matrix(stage), &matrix);
                }
            }
            _ if first || matches!(previous, StageOwner::Texture(_)) => {
                batch.push1(methods::texture(TEXTURE_CONTROL0, stage), 0);
                batch.push_bool(methods::texture_matrix_enable(stage), false);
            }
            _ => {}
        }
    }

    if first || units_dirty || transform.clip_planes_dirty || reassigned {
        let envs = std::array::from_fn(|u| texture.units[u].env.clone());
        let program = CombinerProgram::build(
            &assignment,
            &envs,
            &transform.clip_planes,
            &transform.clip_plane_enabled,
        );
        program.emit(&mut batch);
        shadow.program = Some(program);
    }

    for unit in 0..MAX_TEXTURE_UNITS {
        texture.units[unit].dirty = false;
        texture.bound_mut(unit).dirty = false;
    }
    transform.texture_dirty = [false; MAX_TEXTURE_UNITS];
    transform.clip_planes_dirty = false;
    shadow.allocation_input = Some(input);
    shadow.assignment = assignment;
    true
}

fn push_texture<P: PushBuffer + ?Sized>(
    batch: &mut Batch<'_, P>,
    stage: usize,
    object: &TextureObject,
    image: &TextureImage,
) {
    let reg = |base| methods::texture(base, stage);
    let (log2_u, log2_v) = image.log2_size();

    batch.push1(reg(TEXTURE_OFFSET), image.allocation.address);
    batch.push1(
        reg(TEXTURE_FORMAT),
        TEXTURE_FORMAT_CONTEXT_DMA_B
            | TEXTURE_FORMAT_BORDER_SOURCE_COLOR
            | TEXTURE_FORMAT_DIMENSIONALITY_2D
            | image.layout.color << TEXTURE_FORMAT_COLOR_SHIFT
            | MIPMAP_LEVELS << TEXTURE_FORMAT_MIPMAP_LEVELS_SHIFT
            | log2_u << TEXTURE_FORMAT_BASE_SIZE_U_SHIFT
            | log2_v << TEXTURE_FORMAT_BASE_SIZE_V_SHIFT,
    );
    batch.push1(
        reg(TEXTURE_ADDRESS),
        object.wrap_s.to_hw() << TEXTURE_ADDRESS_U_SHIFT
            | object.wrap_t.to_hw() << TEXTURE_ADDRESS_V_SHIFT
            | TEXTURE_ADDRESS_CLAMP_TO_EDGE << TEXTURE_ADDRESS_P_SHIFT,
    );
    batch.push1(reg(TEXTURE_CONTROL0), TEXTURE_CONTROL0_ENABLE);
    batch.push1(
        reg(TEXTURE_CONTROL1),
        image.pitch << TEXTURE_CONTROL1_PITCH_SHIFT,
    );
    batch.push1(
        reg(TEXTURE_FILTER),
        TEXTURE_FILTER_CONVOLUTION_GAUSSIAN
            | object.min_filter.to_hw() << TEXTURE_FILTER_MIN_SHIFT
            | object.mag_filter.to_hw() << TEXTURE_FILTER_MAG_SHIFT,
    );
    batch.push1(reg(TEXTURE_IMAGE_RECT), image.width << 16 | image.height);
}
