//! Tests for the flush steps

use super::*;
use crate::combiner::{StageOwner, pass_through};
use crate::config::ContextConfig;
use crate::hw::methods::*;
use crate::hw::{GpuAllocation, RecordingDevice, texture_layout};
use crate::state::enums::{FogMode, PixelFormat, PixelType};
use crate::state::{BufferObject, TextureImage};
use glam::{Vec3, Vec4};

const DEPTH_MAX: f32 = 16_777_215.0;

fn setup() -> (RenderState, HardwareShadow, RecordingDevice) {
    let state = RenderState::new(&ContextConfig::default());
    (state, HardwareShadow::default(), RecordingDevice::new())
}

fn flush(state: &mut RenderState, shadow: &mut HardwareShadow, dev: &mut RecordingDevice) {
    flush_state_change(state, shadow, dev, DEPTH_MAX);
}

fn image(address: u32, width: u32, height: u32) -> TextureImage {
    let layout = texture_layout(PixelFormat::Rgba, PixelType::UnsignedByte);
    TextureImage {
        width,
        height,
        pot_width: width.next_power_of_two(),
        pot_height: height.next_power_of_two(),
        pitch: width.next_power_of_two() * 4,
        format: PixelFormat::Rgba,
        ty: PixelType::UnsignedByte,
        layout,
        allocation: GpuAllocation {
            address,
            size: 4096,
        },
    }
}

fn activate_unit(state: &mut RenderState, unit: usize, address: u32) {
    let u = &mut state.texture.units[unit];
    u.enabled = true;
    u.dirty = true;
    u.default_object.image = Some(image(address, 16, 16));
    u.default_object.dirty = true;
}

#[test]
fn test_second_flush_emits_nothing() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    assert!(dev.command_count() > 0);
    assert!(dev.is_balanced());

    dev.clear();
    let summary = flush_state_change(&mut state, &mut shadow, &mut dev, DEPTH_MAX);
    assert!(!summary.any());
    assert_eq!(dev.command_count(), 0);
}

#[test]
fn test_first_flush_programs_every_stage() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    for stage in 0..4 {
        let words = pass_through(stage);
        assert_eq!(
            dev.last(combiner(COMBINER_COLOR_ICW, stage)).unwrap().params[0],
            words.color_in.bits()
        );
        assert_eq!(dev.last(texture(TEXTURE_CONTROL0, stage)).unwrap().params[0], 0);
    }
    assert_eq!(dev.last(SHADER_STAGE_PROGRAM).unwrap().params[0], 0);
    assert!(dev.contains(SPECULAR_FOG_CW0));
}

#[test]
fn test_depth_range_sets_clip_range() {
    let (mut state, mut shadow, mut dev) = setup();
    state.transform.depth_range = [0.25, 0.5];
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(dev.last(CLIP_MIN).unwrap().f32(0), 0.25 * DEPTH_MAX);
    assert_eq!(dev.last(CLIP_MAX).unwrap().f32(0), 0.5 * DEPTH_MAX);
}

#[test]
fn test_inverse_modelview_only_with_lighting() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    assert!(!dev.contains(INVERSE_MODEL_VIEW_MATRIX));

    state.lighting.enabled = true;
    state.transform.modelview_dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert!(dev.contains(INVERSE_MODEL_VIEW_MATRIX));
}

#[test]
fn test_projection_change_keeps_viewport_registers() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    dev.clear();

    state.transform.projection_dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert!(dev.contains(PROJECTION_MATRIX));
    assert!(dev.contains(COMPOSITE_MATRIX));
    assert!(!dev.contains(VIEWPORT_SCALE));
    assert!(!dev.contains(MODEL_VIEW_MATRIX));
}

#[test]
fn test_linear_fog_with_empty_range() {
    let (mut state, mut shadow, mut dev) = setup();
    state.coloring.fog_mode = FogMode::Linear;
    state.coloring.fog_start = 3.0;
    state.coloring.fog_end = 3.0;
    flush(&mut state, &mut shadow, &mut dev);
    let params = dev.last(FOG_PARAMS).unwrap();
    assert_eq!([params.f32(0), params.f32(1), params.f32(2)], [1.0, 1.0, 0.0]);
    assert_eq!(dev.last(FOG_MODE).unwrap().params[0], FOG_MODE_LINEAR);
}

#[test]
fn test_final_combiner_follows_fog_and_lighting() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    dev.clear();

    state.coloring.fog_enabled = true;
    state.lighting.enabled = true;
    state.lighting.model_dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    let (cw0, cw1) = crate::combiner::specular_fog_words(true, true);
    assert_eq!(dev.last(SPECULAR_FOG_CW0).unwrap().params[0], cw0);
    assert_eq!(dev.last(SPECULAR_FOG_CW1).unwrap().params[0], cw1);
    assert!(!dev.contains(FOG_PARAMS));
}

#[test]
fn test_modulate_unit_takes_stage_zero() {
    let (mut state, mut shadow, mut dev) = setup();
    activate_unit(&mut state, 0, 0x8000);
    flush(&mut state, &mut shadow, &mut dev);

    assert_eq!(
        shadow.assignment.owners,
        [
            StageOwner::Texture(0),
            StageOwner::PassThrough,
            StageOwner::PassThrough,
            StageOwner::PassThrough
        ]
    );
    assert_eq!(dev.last(texture(TEXTURE_OFFSET, 0)).unwrap().params[0], 0x8000);
    assert_eq!(
        dev.last(texture(TEXTURE_CONTROL0, 0)).unwrap().params[0],
        TEXTURE_CONTROL0_ENABLE
    );
    assert_eq!(
        dev.last(texture(TEXTURE_IMAGE_RECT, 0)).unwrap().params[0],
        16 << 16 | 16
    );
    assert_eq!(dev.last(texture_matrix_enable(0)).unwrap().params[0], 1);
    for stage in 1..4 {
        assert_eq!(
            dev.last(combiner(COMBINER_COLOR_ICW, stage)).unwrap().params[0],
            pass_through(stage).color_in.bits()
        );
    }
    assert_eq!(dev.last(SHADER_STAGE_PROGRAM).unwrap().params[0], STAGE_PROGRAM_2D_PROJECTIVE);
}

#[test]
fn test_npot_image_scales_texture_matrix() {
    let (mut state, mut shadow, mut dev) = setup();
    activate_unit(&mut state, 0, 0x8000);
    state.texture.units[0].default_object.image = Some(image(0x8000, 12, 16));
    flush(&mut state, &mut shadow, &mut dev);
    let matrix = dev.last(texture_matrix(0)).unwrap();
    // Row-major upload: first row scales s.
    assert_eq!(matrix.f32(0), 12.0 / 16.0);
    assert_eq!(matrix.f32(5), 1.0);
}

#[test]
fn test_reassignment_forces_recompile() {
    let (mut state, mut shadow, mut dev) = setup();
    activate_unit(&mut state, 0, 0x8000);
    activate_unit(&mut state, 1, 0x9000);
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(shadow.assignment.stage_of(1), Some(1));
    dev.clear();

    // Disabling unit 0 moves unit 1 down without touching unit 1 itself.
    state.texture.units[0].enabled = false;
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(shadow.assignment.stage_of(1), Some(0));
    assert_eq!(dev.last(texture(TEXTURE_OFFSET, 0)).unwrap().params[0], 0x9000);
    assert_eq!(dev.last(texture(TEXTURE_CONTROL0, 1)).unwrap().params[0], 0);
    assert!(dev.contains(SHADER_STAGE_PROGRAM));
    assert_eq!(
        dev.last(combiner(COMBINER_COLOR_ICW, 1)).unwrap().params[0],
        pass_through(1).color_in.bits()
    );
}

#[test]
fn test_env_change_recompiles_without_matrix_upload() {
    let (mut state, mut shadow, mut dev) = setup();
    activate_unit(&mut state, 0, 0x8000);
    flush(&mut state, &mut shadow, &mut dev);
    dev.clear();

    state.texture.units[0].env.color = Vec4::new(1.0, 0.0, 0.0, 1.0);
    state.texture.units[0].dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(
        dev.last(combiner(COMBINER_FACTOR0, 0)).unwrap().params[0],
        0xFFFF_0000
    );
    assert!(!dev.contains(texture_matrix(0)));
}

#[test]
fn test_clip_planes_take_last_free_stage() {
    let (mut state, mut shadow, mut dev) = setup();
    state.transform.clip_planes[1] = Vec4::new(0.0, 1.0, 0.0, 2.0);
    state.transform.clip_plane_enabled[1] = true;
    state.transform.clip_planes_dirty = true;
    flush(&mut state, &mut shadow, &mut dev);

    assert_eq!(shadow.assignment.clip_stage(), Some(3));
    assert_eq!(dev.last(texgen(0, 3)).unwrap().params[0], TEXGEN_EYE_LINEAR);
    let plane = dev.last(texgen_plane(1, 3)).unwrap();
    assert_eq!([plane.f32(1), plane.f32(3)], [1.0, 2.0]);
    let disabled = dev.last(texgen_plane(0, 3)).unwrap();
    assert_eq!(disabled.f32(3), 0.0);
}

#[test]
fn test_directional_then_positional_light() {
    let (mut state, mut shadow, mut dev) = setup();
    state.lighting.enabled = true;
    state.lighting.lights[0].enabled = true;
    flush(&mut state, &mut shadow, &mut dev);
    let half = dev.last(light(LIGHT_INFINITE_HALF_VECTOR, 0)).unwrap();
    assert!((half.f32(2) - 1.0).abs() < 1e-6);
    assert!(!dev.contains(light(LIGHT_LOCAL_POSITION, 0)));
    assert_eq!(dev.last(LIGHT_ENABLE_MASK).unwrap().params[0], LIGHT_MASK_INFINITE);
    dev.clear();

    let light0 = &mut state.lighting.lights[0];
    light0.position = Vec4::new(1.0, 2.0, 3.0, 1.0);
    light0.linear_attenuation = 0.5;
    light0.dirty = true;
    flush(&mut state, &mut shadow, &mut dev);

    let position = dev.last(light(LIGHT_LOCAL_POSITION, 0)).unwrap();
    assert_eq!([position.f32(0), position.f32(1), position.f32(2)], [1.0, 2.0, 3.0]);
    let attenuation = dev.last(light(LIGHT_LOCAL_ATTENUATION, 0)).unwrap();
    assert_eq!(attenuation.f32(1), 0.5);
    let direction = dev.last(light(LIGHT_INFINITE_DIRECTION, 0)).unwrap();
    assert!(direction.params.iter().all(|&w| w == 0));
    assert_eq!(dev.last(LIGHT_ENABLE_MASK).unwrap().params[0], LIGHT_MASK_LOCAL);
}

#[test]
fn test_color_change_keeps_light_mask() {
    let (mut state, mut shadow, mut dev) = setup();
    state.lighting.enabled = true;
    state.lighting.lights[0].enabled = true;
    flush(&mut state, &mut shadow, &mut dev);
    dev.clear();

    state.lighting.lights[0].diffuse = Vec4::new(0.5, 0.5, 0.5, 1.0);
    state.lighting.lights[0].dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert!(!dev.contains(LIGHT_ENABLE_MASK));
    assert!(!dev.contains(light(LIGHT_INFINITE_DIRECTION, 0)));
    let diffuse = dev.last(light(LIGHT_DIFFUSE_COLOR, 0)).unwrap();
    assert!((diffuse.f32(0) - 0.4).abs() < 1e-6);
    assert!(dev.contains(back_light(BACK_LIGHT_DIFFUSE_COLOR, 0)));
}

#[test]
fn test_material_pushes_scene_ambient_per_face() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    dev.clear();

    state.lighting.back.emission = Vec4::new(0.1, 0.0, 0.0, 1.0);
    state.lighting.back.dirty = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert!(dev.contains(BACK_SCENE_AMBIENT_COLOR));
    assert!(!dev.contains(SCENE_AMBIENT_COLOR));
    let ambient = dev.last(BACK_SCENE_AMBIENT_COLOR).unwrap();
    assert!((ambient.f32(0) - (0.04 + 0.1)).abs() < 1e-6);
}

#[test]
fn test_point_params_use_viewport_height() {
    let (mut state, mut shadow, mut dev) = setup();
    state.raster.point_size_max = 9.0;
    state.raster.point_size_min = 1.0;
    state.raster.point_distance_attenuation = Vec3::new(0.0, 1.0, 0.0);
    state.raster.point_params_requested = true;
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(dev.last(POINT_PARAMS_ENABLE).unwrap().params[0], 1);
    let params = dev.last(POINT_PARAMS).unwrap();
    assert_eq!(params.params.len(), 8);
    assert_eq!(params.f32(1), 8.0 / 480.0);
    assert_eq!(params.f32(7), 1.0);
}

#[test]
fn test_buffer_bound_array_resolves_offset() {
    let (mut state, mut shadow, mut dev) = setup();
    state.buffers.objects.insert(
        7,
        BufferObject {
            size: 256,
            storage: Some(GpuAllocation {
                address: 0x4000,
                size: 256,
            }),
            ..BufferObject::default()
        },
    );
    let vertex = &mut state.arrays.vertex;
    vertex.enabled = true;
    vertex.size = 3;
    vertex.buffer = 7;
    vertex.pointer = 16;
    flush(&mut state, &mut shadow, &mut dev);

    let offset = dev.last(vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, SLOT_POSITION));
    assert_eq!(offset.unwrap().params[0], 0x4010);
    let format = dev.last(vertex_attribute(VERTEX_DATA_ARRAY_FORMAT, SLOT_POSITION));
    assert_eq!(format.unwrap().params[0], VERTEX_TYPE_F | 3 << 4 | 12 << 8);
}

#[test]
fn test_disabled_array_gets_empty_format() {
    let (mut state, mut shadow, mut dev) = setup();
    flush(&mut state, &mut shadow, &mut dev);
    let format = dev.last(vertex_attribute(VERTEX_DATA_ARRAY_FORMAT, SLOT_DIFFUSE));
    assert_eq!(format.unwrap().params[0], VERTEX_TYPE_F);
}

#[test]
fn test_texcoords_follow_assigned_stage() {
    let (mut state, mut shadow, mut dev) = setup();
    activate_unit(&mut state, 1, 0x9000);
    let coords = &mut state.arrays.texcoords[1];
    coords.enabled = true;
    coords.size = 2;
    coords.pointer = 0x2000;
    flush(&mut state, &mut shadow, &mut dev);

    let slot = SLOT_TEXTURE0;
    assert_eq!(
        dev.last(vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, slot)).unwrap().params[0],
        0x2000
    );
    dev.clear();

    // Unit 0 claims stage 0; unit 1's coordinates move to the next slot.
    activate_unit(&mut state, 0, 0x8000);
    flush(&mut state, &mut shadow, &mut dev);
    assert_eq!(
        dev.last(vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, slot + 1)).unwrap().params[0],
        0x2000
    );
    assert_eq!(shadow.texcoord_slots, [Some(slot), Some(slot + 1), None]);
}
