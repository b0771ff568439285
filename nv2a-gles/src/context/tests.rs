//! End-to-end tests through the GL entry points

use super::*;
use crate::error::NO_ERROR;
use crate::gl;
use crate::hw::RecordingDevice;
use crate::hw::methods::*;
use crate::state::enums::PixelFormat;

fn context() -> Context<RecordingDevice> {
    Context::new(RecordingDevice::new(), ContextConfig::default()).unwrap()
}

/// A context whose construction output has been discarded.
fn quiet_context() -> Context<RecordingDevice> {
    let mut ctx = context();
    ctx.device_mut().clear();
    ctx
}

fn rgba_image(width: i32, height: i32, pixels: &[u8]) -> TexImage2D<'_> {
    TexImage2D {
        target: gl::TEXTURE_2D,
        level: 0,
        internal_format: gl::RGBA,
        width,
        height,
        border: 0,
        format: gl::RGBA,
        ty: gl::UNSIGNED_BYTE,
        pixels: Some(pixels),
    }
}

#[test]
fn test_new_context_is_flushed_and_balanced() {
    let mut ctx = context();
    assert!(ctx.device().is_balanced());
    assert!(ctx.hardware_shadow().combiner_initialized);

    ctx.device_mut().clear();
    assert!(!ctx.flush_state().any());
    assert_eq!(ctx.device().command_count(), 0);
}

#[test]
fn test_first_error_wins_until_read() {
    let mut ctx = quiet_context();
    assert_eq!(ctx.matrix_mode(0x1234), Err(GlError::InvalidEnum));
    assert_eq!(ctx.line_width(-1.0), Err(GlError::InvalidValue));
    assert_eq!(ctx.get_error(), GlError::InvalidEnum.code());
    assert_eq!(ctx.get_error(), NO_ERROR);
}

#[test]
fn test_rejected_call_leaves_state_unchanged() {
    let mut ctx = quiet_context();
    assert!(ctx.blend_func(gl::ONE, gl::SRC_ALPHA_SATURATE).is_err());
    assert_eq!(ctx.state().pixel_ops, context().state().pixel_ops);
    assert_eq!(ctx.device().command_count(), 0);
}

#[test]
fn test_light_position_is_baked_at_call_time() {
    let mut ctx = quiet_context();
    ctx.translate(1.0, 2.0, 0.0);
    ctx.light_fv(gl::LIGHT0, gl::POSITION, &[0.0, 0.0, 0.0, 1.0])
        .unwrap();
    ctx.load_identity();
    ctx.rotate(90.0, 0.0, 0.0, 1.0);

    let position = ctx.get_light_fv(gl::LIGHT0, gl::POSITION).unwrap();
    assert_eq!(position.as_slice(), &[1.0, 2.0, 0.0, 1.0]);
}

#[test]
fn test_spot_direction_is_normalized_in_eye_space() {
    let mut ctx = quiet_context();
    ctx.scale(2.0, 2.0, 2.0);
    ctx.light_fv(gl::LIGHT0, gl::SPOT_DIRECTION, &[0.0, 0.0, -3.0])
        .unwrap();

    let direction = ctx.get_light_fv(gl::LIGHT0, gl::SPOT_DIRECTION).unwrap();
    assert_eq!(direction.as_slice(), &[0.0, 0.0, -1.0]);

    ctx.light_fv(gl::LIGHT0, gl::SPOT_DIRECTION, &[0.0, 0.0, 0.0])
        .unwrap();
    let direction = ctx.get_light_fv(gl::LIGHT0, gl::SPOT_DIRECTION).unwrap();
    assert_eq!(direction.as_slice(), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_stack_overflow_and_underflow_keep_depth() {
    let mut ctx = quiet_context();
    ctx.matrix_mode(gl::PROJECTION).unwrap();
    ctx.push_matrix().unwrap();
    assert_eq!(ctx.push_matrix(), Err(GlError::StackOverflow));
    assert_eq!(ctx.get_integer(gl::PROJECTION_STACK_DEPTH).unwrap()[0], 2);

    ctx.pop_matrix().unwrap();
    assert_eq!(ctx.pop_matrix(), Err(GlError::StackUnderflow));
    assert_eq!(ctx.get_integer(gl::PROJECTION_STACK_DEPTH).unwrap()[0], 1);
    assert_eq!(ctx.get_error(), GlError::StackOverflow.code());
}

#[test]
fn test_draw_arrays_flushes_once() {
    let mut ctx = quiet_context();
    ctx.enable(gl::LIGHTING).unwrap();
    ctx.enable(gl::LIGHT0).unwrap();
    ctx.translate(0.0, 0.0, -5.0);
    ctx.vertex_pointer(3, gl::FLOAT, 0, 0x1000).unwrap();
    ctx.enable_client_state(gl::VERTEX_ARRAY).unwrap();
    ctx.device_mut().clear();

    ctx.draw_arrays(gl::TRIANGLES, 0, 3).unwrap();
    assert!(ctx.device().contains(MODEL_VIEW_MATRIX));
    let begin_end = ctx.device().find(BEGIN_END);
    assert_eq!(begin_end.len(), 2);
    assert_eq!(begin_end[0].params[0], PRIM_TRIANGLES);
    assert_eq!(begin_end[1].params[0], PRIM_END);
    assert_eq!(ctx.device().last(DRAW_ARRAYS).unwrap().params[0], 2 << 24);

    // Nothing left to flush: only the draw itself.
    ctx.device_mut().clear();
    ctx.draw_arrays(gl::TRIANGLES, 3, 3).unwrap();
    assert_eq!(ctx.device().command_count(), 3);
    assert!(ctx.device().is_balanced());
}

#[test]
fn test_empty_draw_emits_nothing() {
    let mut ctx = quiet_context();
    ctx.translate(1.0, 0.0, 0.0);
    ctx.draw_arrays(gl::TRIANGLES, 0, 0).unwrap();
    assert_eq!(ctx.device().command_count(), 0);
    assert_eq!(ctx.draw_arrays(gl::TRIANGLES, -1, 3), Err(GlError::InvalidValue));
    assert_eq!(ctx.draw_arrays(0x7777, 0, 3), Err(GlError::InvalidEnum));
}

#[test]
fn test_draw_arrays_rejects_range_past_start_field() {
    let mut ctx = quiet_context();
    ctx.vertex_pointer(3, gl::FLOAT, 0, 0x1000).unwrap();
    ctx.enable_client_state(gl::VERTEX_ARRAY).unwrap();
    ctx.translate(1.0, 0.0, 0.0);
    ctx.device_mut().clear();

    assert_eq!(
        ctx.draw_arrays(gl::TRIANGLES, 0x0100_0000, 3),
        Err(GlError::InvalidValue)
    );
    assert_eq!(
        ctx.draw_arrays(gl::TRIANGLES, 0x00FF_FFFF, 3),
        Err(GlError::InvalidValue)
    );
    assert_eq!(ctx.device().command_count(), 0);

    // The last addressable vertex still draws.
    ctx.draw_arrays(gl::POINTS, 0x00FF_FFFF, 1).unwrap();
    assert_eq!(
        ctx.device().last(DRAW_ARRAYS).unwrap().params[0],
        0x00FF_FFFF
    );
    assert_eq!(ctx.get_error(), GlError::InvalidValue.code());
}

#[test]
fn test_draw_arrays_without_vertex_array_is_skipped() {
    let mut ctx = quiet_context();
    ctx.translate(1.0, 0.0, 0.0);
    ctx.draw_arrays(gl::TRIANGLES, 0, 3).unwrap();
    assert_eq!(ctx.device().command_count(), 0);
    assert_eq!(ctx.get_error(), NO_ERROR);
}

#[test]
fn test_draw_elements_reads_element_buffer() {
    let mut ctx = quiet_context();
    assert_eq!(
        ctx.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, Indices::Buffer(0)),
        Err(GlError::InvalidOperation)
    );

    let name = ctx.gen_buffers(1).unwrap()[0];
    ctx.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, name).unwrap();
    let indices = [9u8, 9, 0, 0, 1, 0, 2, 0];
    ctx.buffer_data(gl::ELEMENT_ARRAY_BUFFER, 8, Some(&indices), gl::STATIC_DRAW)
        .unwrap();
    ctx.device_mut().clear();

    ctx.draw_elements(gl::TRIANGLES, 3, gl::UNSIGNED_SHORT, Indices::Buffer(2))
        .unwrap();
    assert_eq!(ctx.device().last(ARRAY_ELEMENT16).unwrap().params[0], 1 << 16);
    assert_eq!(ctx.device().last(ARRAY_ELEMENT32).unwrap().params[0], 2);

    assert_eq!(
        ctx.draw_elements(gl::TRIANGLES, 4, gl::UNSIGNED_SHORT, Indices::Buffer(2)),
        Err(GlError::InvalidValue)
    );
}

#[test]
fn test_draw_elements_from_client_bytes() {
    let mut ctx = quiet_context();
    ctx.draw_elements(gl::LINES, 2, gl::UNSIGNED_BYTE, Indices::Client(&[4, 5]))
        .unwrap();
    assert_eq!(ctx.device().last(BEGIN_END).unwrap().params[0], PRIM_END);
    assert_eq!(ctx.device().find(BEGIN_END)[0].params[0], PRIM_LINES);
    assert_eq!(
        ctx.device().last(ARRAY_ELEMENT16).unwrap().params[0],
        4 | (5 << 16)
    );
    assert!(!ctx.device().contains(ARRAY_ELEMENT32));
}

#[test]
fn test_vertex_array_resolves_buffer_offset() {
    let mut ctx = quiet_context();
    let name = ctx.gen_buffers(1).unwrap()[0];
    ctx.bind_buffer(gl::ARRAY_BUFFER, name).unwrap();
    ctx.buffer_data(gl::ARRAY_BUFFER, 64, None, gl::DYNAMIC_DRAW)
        .unwrap();
    ctx.vertex_pointer(3, gl::FLOAT, 0, 16).unwrap();
    ctx.enable_client_state(gl::VERTEX_ARRAY).unwrap();
    ctx.flush_state();

    let expected = ctx.state().buffers.resolve(name, 16).unwrap();
    let offset = vertex_attribute(VERTEX_DATA_ARRAY_OFFSET, SLOT_POSITION);
    assert_eq!(ctx.device().last(offset).unwrap().params[0], expected);

    // New storage moves the array with it.
    ctx.buffer_data(gl::ARRAY_BUFFER, 128, None, gl::DYNAMIC_DRAW)
        .unwrap();
    ctx.device_mut().clear();
    ctx.flush_state();
    let moved = ctx.state().buffers.resolve(name, 16).unwrap();
    assert_ne!(moved, expected);
    assert_eq!(ctx.device().last(offset).unwrap().params[0], moved);
}

#[test]
fn test_delete_buffer_detaches_arrays() {
    let mut ctx = quiet_context();
    let name = ctx.gen_buffers(1).unwrap()[0];
    ctx.bind_buffer(gl::ARRAY_BUFFER, name).unwrap();
    ctx.buffer_data(gl::ARRAY_BUFFER, 32, None, gl::STATIC_DRAW)
        .unwrap();
    ctx.color_pointer(4, gl::UNSIGNED_BYTE, 0, 0).unwrap();
    ctx.delete_buffers(&[name]);

    assert!(!ctx.is_buffer(name));
    assert_eq!(ctx.state().arrays.array_buffer, 0);
    assert_eq!(ctx.state().arrays.color.buffer, 0);
    assert_eq!(
        ctx.get_buffer_parameter(gl::ARRAY_BUFFER, gl::BUFFER_SIZE),
        Err(GlError::InvalidOperation)
    );
}

#[test]
fn test_buffer_sub_data_bounds() {
    let mut ctx = quiet_context();
    let name = ctx.gen_buffers(1).unwrap()[0];
    ctx.bind_buffer(gl::ARRAY_BUFFER, name).unwrap();
    ctx.buffer_data(gl::ARRAY_BUFFER, 8, None, gl::STATIC_DRAW)
        .unwrap();
    ctx.buffer_sub_data(gl::ARRAY_BUFFER, 4, &[1, 2, 3, 4]).unwrap();
    assert_eq!(
        ctx.buffer_sub_data(gl::ARRAY_BUFFER, 6, &[1, 2, 3]),
        Err(GlError::InvalidValue)
    );
    let object = &ctx.state().buffers.objects[&name];
    assert_eq!(object.data, vec![0u8, 0, 0, 0, 1, 2, 3, 4]);
    let storage = object.storage.unwrap();
    assert_eq!(ctx.device().memory(&storage).unwrap(), &[0u8, 0, 0, 0, 1, 2, 3, 4]);
    assert_eq!(
        ctx.get_buffer_parameter(gl::ARRAY_BUFFER, gl::BUFFER_SIZE),
        Ok(8)
    );
}

#[test]
fn test_delete_bound_texture_reverts_unit() {
    let mut ctx = quiet_context();
    let name = ctx.gen_textures(1).unwrap()[0];
    ctx.bind_texture(gl::TEXTURE_2D, name).unwrap();
    ctx.tex_image_2d(&rgba_image(2, 2, &[0xFF; 16])).unwrap();
    assert!(ctx.is_texture(name));
    assert_eq!(ctx.get_integer(gl::TEXTURE_BINDING_2D).unwrap()[0], name as i32);

    ctx.delete_textures(&[name]);
    assert!(!ctx.is_texture(name));
    assert_eq!(ctx.state().texture.units[0].binding, 0);
    assert_eq!(ctx.get_integer(gl::TEXTURE_BINDING_2D).unwrap()[0], 0);
}

#[test]
fn test_tex_image_pads_to_power_of_two() {
    let mut ctx = quiet_context();
    let pixels = vec![0u8; 12 + 9];
    let args = TexImage2D {
        internal_format: gl::RGB,
        format: gl::RGB,
        ..rgba_image(3, 2, &pixels)
    };
    ctx.tex_image_2d(&args).unwrap();

    let upload = &ctx.device().uploads[0];
    assert_eq!((upload.width, upload.height), (3, 2));
    // Rows start on 4-byte boundaries in client memory.
    assert_eq!(upload.src_pitch, 12);
    assert_eq!(upload.dst_pitch, 16);

    let image = ctx.state().texture.bound(0).image.as_ref().unwrap();
    assert_eq!((image.pot_width, image.pot_height), (4, 2));
    assert_eq!(image.format, PixelFormat::Rgb);
    assert!(ctx.state().transform.texture_dirty[0]);
}

#[test]
fn test_shared_texture_resize_updates_every_unit_matrix() {
    let mut ctx = quiet_context();
    let name = ctx.gen_textures(1).unwrap()[0];
    let square = vec![0u8; 16 * 16 * 4];
    for unit in 0..2 {
        ctx.active_texture(gl::TEXTURE0 + unit).unwrap();
        ctx.bind_texture(gl::TEXTURE_2D, name).unwrap();
        ctx.enable(gl::TEXTURE_2D).unwrap();
    }
    ctx.tex_image_2d(&rgba_image(16, 16, &square)).unwrap();
    ctx.flush_state();
    ctx.device_mut().clear();

    // Respecify through unit 0 only; unit 1 samples the same object.
    ctx.active_texture(gl::TEXTURE0).unwrap();
    let narrow = vec![0u8; 12 * 16 * 4];
    ctx.tex_image_2d(&rgba_image(12, 16, &narrow)).unwrap();
    ctx.flush_state();

    for stage in 0..2 {
        let matrix = ctx.device().last(texture_matrix(stage)).unwrap();
        assert_eq!(matrix.f32(0), 0.75);
        assert_eq!(matrix.f32(5), 1.0);
    }
}

#[test]
fn test_tex_image_validation() {
    let mut ctx = quiet_context();
    let short = [0u8; 4];
    assert_eq!(
        ctx.tex_image_2d(&rgba_image(2, 2, &short)),
        Err(GlError::InvalidValue)
    );
    let mismatch = TexImage2D {
        internal_format: gl::RGB,
        ..rgba_image(1, 1, &short)
    };
    assert_eq!(ctx.tex_image_2d(&mismatch), Err(GlError::InvalidOperation));
    let packed = TexImage2D {
        ty: gl::UNSIGNED_SHORT_5_6_5,
        ..rgba_image(1, 1, &short)
    };
    assert_eq!(ctx.tex_image_2d(&packed), Err(GlError::InvalidOperation));
    assert!(ctx.device().uploads.is_empty());
}

#[test]
fn test_tex_env_combine_validation() {
    let mut ctx = quiet_context();
    ctx.tex_env_i(gl::TEXTURE_ENV, gl::TEXTURE_ENV_MODE, gl::COMBINE as i32)
        .unwrap();
    assert_eq!(
        ctx.tex_env_i(gl::TEXTURE_ENV, gl::COMBINE_ALPHA, gl::DOT3_RGB as i32),
        Err(GlError::InvalidEnum)
    );
    assert_eq!(
        ctx.tex_env_f(gl::TEXTURE_ENV, gl::RGB_SCALE, 3.0),
        Err(GlError::InvalidValue)
    );
    ctx.tex_env_f(gl::TEXTURE_ENV, gl::RGB_SCALE, 2.0).unwrap();
    ctx.tex_env_fv(gl::TEXTURE_ENV, gl::TEXTURE_ENV_COLOR, &[2.0, 0.5, 0.0, 1.0])
        .unwrap();

    let color = ctx.get_tex_env_fv(gl::TEXTURE_ENV, gl::TEXTURE_ENV_COLOR).unwrap();
    assert_eq!(color.as_slice(), &[1.0, 0.5, 0.0, 1.0]);
    let mode = ctx.get_tex_env_iv(gl::TEXTURE_ENV, gl::TEXTURE_ENV_MODE).unwrap();
    assert_eq!(mode[0], gl::COMBINE as i32);
    assert_eq!(
        ctx.tex_env_i(gl::TEXTURE_ENV, gl::COORD_REPLACE_OES, 1),
        Err(GlError::InvalidEnum)
    );
}

#[test]
fn test_point_sprite_conflict_is_not_an_error() {
    let mut ctx = quiet_context();
    ctx.enable(gl::POINT_SPRITE_OES).unwrap();
    for unit in 0..2 {
        ctx.active_texture(gl::TEXTURE0 + unit).unwrap();
        ctx.enable(gl::TEXTURE_2D).unwrap();
        ctx.tex_image_2d(&rgba_image(1, 1, &[0; 4])).unwrap();
        ctx.tex_env_i(gl::POINT_SPRITE_OES, gl::COORD_REPLACE_OES, 1)
            .unwrap();
    }
    ctx.flush_state();

    assert_eq!(ctx.hardware_shadow().assignment.conflicts.len(), 1);
    assert_eq!(ctx.get_error(), NO_ERROR);
}

#[test]
fn test_clear_loads_values_then_clears() {
    let mut ctx = quiet_context();
    ctx.clear_color(1.0, 0.0, 0.0, 1.0);
    ctx.clear_stencil(0x102);
    ctx.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT | gl::STENCIL_BUFFER_BIT)
        .unwrap();

    let dev = ctx.device();
    assert_eq!(dev.last(COLOR_CLEAR_VALUE).unwrap().params[0], 0xFFFF_0000);
    assert_eq!(dev.last(ZSTENCIL_CLEAR_VALUE).unwrap().params[0], 0xFFFF_FF02);
    assert_eq!(
        dev.last(CLEAR_SURFACE).unwrap().params[0],
        CLEAR_SURFACE_COLOR | CLEAR_SURFACE_Z | CLEAR_SURFACE_STENCIL
    );
    assert_eq!(ctx.clear(0x1), Err(GlError::InvalidValue));
}

#[test]
fn test_scissor_box_reaches_hardware_once_enabled() {
    let mut ctx = quiet_context();
    ctx.scissor(10, 20, 30, 40).unwrap();
    assert!(!ctx.device().contains(WINDOW_CLIP_HORIZONTAL));

    ctx.enable(gl::SCISSOR_TEST).unwrap();
    let dev = ctx.device();
    assert_eq!(dev.last(WINDOW_CLIP_HORIZONTAL).unwrap().params[0], (39 << 16) | 10);
    assert_eq!(dev.last(WINDOW_CLIP_VERTICAL).unwrap().params[0], (59 << 16) | 20);
    assert_eq!(ctx.get_integer(gl::SCISSOR_BOX).unwrap().as_slice(), &[10, 20, 30, 40]);
}

#[test]
fn test_masks_write_through() {
    let mut ctx = quiet_context();
    ctx.color_mask(true, false, true, false);
    ctx.stencil_mask(0x1F0);
    ctx.depth_mask(false);

    let dev = ctx.device();
    assert_eq!(dev.last(COLOR_MASK).unwrap().params[0], 0x0001_0001);
    assert_eq!(dev.last(STENCIL_MASK).unwrap().params[0], 0xF0);
    assert_eq!(dev.last(DEPTH_MASK).unwrap().params[0], 0);
    assert_eq!(
        ctx.get_boolean(gl::COLOR_WRITEMASK).unwrap().as_slice(),
        &[true, false, true, false]
    );
    assert_eq!(ctx.get_integer(gl::STENCIL_WRITEMASK).unwrap()[0], 0x1F0);
}

#[test]
fn test_finish_polls_until_idle() {
    let mut ctx = quiet_context();
    ctx.device_mut().set_busy_polls(3);
    ctx.finish();
    assert_eq!(ctx.device().busy_calls, 4);
    assert_eq!(ctx.device().last(WAIT_FOR_IDLE).unwrap().params[0], 0);
}

#[test]
fn test_queries_read_stored_state() {
    let mut ctx = quiet_context();
    assert_eq!(ctx.get_integer(gl::VIEWPORT).unwrap().as_slice(), &[0, 0, 640, 480]);
    assert_eq!(ctx.get_integer(gl::MAX_TEXTURE_UNITS).unwrap()[0], 3);
    assert_eq!(ctx.get_integer(gl::MATRIX_MODE).unwrap()[0], gl::MODELVIEW as i32);
    assert_eq!(ctx.get_boolean(gl::DEPTH_TEST).unwrap()[0], false);
    ctx.enable(gl::DEPTH_TEST).unwrap();
    assert_eq!(ctx.get_boolean(gl::DEPTH_TEST).unwrap()[0], true);

    ctx.fog_f(gl::FOG_DENSITY, 0.25).unwrap();
    assert_eq!(ctx.get_float(gl::FOG_DENSITY).unwrap()[0], 0.25);
    assert_eq!(ctx.get_fixed(gl::FOG_DENSITY).unwrap()[0], 0x4000);

    let modelview = ctx.get_float(gl::MODELVIEW_MATRIX).unwrap();
    assert_eq!(modelview.len(), 16);
    assert_eq!(ctx.get(0xFFFF), Err(GlError::InvalidEnum));
}

#[test]
fn test_current_color_writes_constant_attribute() {
    let mut ctx = quiet_context();
    ctx.color4ub(255, 0, 0, 255);
    let cmd = ctx.device().last(vertex_data4f(SLOT_DIFFUSE)).unwrap();
    assert_eq!(cmd.f32(0), 1.0);
    assert_eq!(cmd.f32(1), 0.0);
    assert_eq!(ctx.get_float(gl::CURRENT_COLOR).unwrap().as_slice(), &[1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_config_round_trip_through_file() {
    let mut config = ContextConfig::default();
    config.surface.width = 320;
    config.limits.max_texture_stack = 4;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.toml");
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    let loaded = ContextConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let ctx = Context::new(RecordingDevice::new(), loaded).unwrap();
    assert_eq!(ctx.state().transform.viewport, [0, 0, 320, 480]);
}

#[test]
fn test_raster_state_writes_through() {
    let mut ctx = quiet_context();
    ctx.cull_face(gl::FRONT).unwrap();
    ctx.polygon_offset(1.5, -2.0);
    ctx.line_width(2.5).unwrap();
    ctx.line_width(100.0).unwrap();

    let dev = ctx.device();
    assert_eq!(
        dev.last(CULL_FACE).unwrap().params[0],
        crate::state::enums::Face::Front.to_hw()
    );
    assert_eq!(dev.last(POLYGON_OFFSET_SCALE_FACTOR).unwrap().f32(0), 1.5);
    assert_eq!(dev.last(POLYGON_OFFSET_BIAS).unwrap().f32(0), -2.0);
    let widths = dev.find(LINE_WIDTH);
    assert_eq!(widths[0].params[0], 20);
    // Clamped to the aliased range, 6.3 fixed point.
    assert_eq!(widths[1].params[0], 511);
    assert_eq!(ctx.get_float(gl::LINE_WIDTH).unwrap()[0], 100.0);

    assert_eq!(ctx.front_face(gl::FRONT), Err(GlError::InvalidEnum));
    assert_eq!(ctx.point_size(0.0), Err(GlError::InvalidValue));
}

#[test]
fn test_fragment_test_references_are_clamped() {
    let mut ctx = quiet_context();
    ctx.alpha_func(gl::GREATER, 0.5).unwrap();
    ctx.stencil_func(gl::EQUAL, 300, 0x1FF).unwrap();

    let dev = ctx.device();
    assert_eq!(dev.last(ALPHA_REF).unwrap().params[0], 128);
    assert_eq!(dev.last(STENCIL_FUNC_REF).unwrap().params[0], 0xFF);
    assert_eq!(dev.last(STENCIL_FUNC_MASK).unwrap().params[0], 0xFF);
    assert_eq!(ctx.get_integer(gl::STENCIL_REF).unwrap()[0], 0xFF);
    assert_eq!(ctx.stencil_op(gl::KEEP, gl::KEEP, gl::GREATER), Err(GlError::InvalidEnum));
}

#[test]
fn test_point_params_enable_follows_sprite_or_parameters() {
    let mut ctx = context();
    assert_eq!(ctx.device().last(POINT_PARAMS_ENABLE).unwrap().params[0], 0);

    ctx.enable(gl::POINT_SPRITE_OES).unwrap();
    ctx.flush_state();
    assert_eq!(ctx.device().last(POINT_PARAMS_ENABLE).unwrap().params[0], 1);

    ctx.disable(gl::POINT_SPRITE_OES).unwrap();
    ctx.flush_state();
    assert_eq!(ctx.device().last(POINT_PARAMS_ENABLE).unwrap().params[0], 0);

    ctx.point_parameter_f(gl::POINT_SIZE_MIN, 2.0).unwrap();
    ctx.flush_state();
    assert_eq!(ctx.device().last(POINT_PARAMS_ENABLE).unwrap().params[0], 1);
}
