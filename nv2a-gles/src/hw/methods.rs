//! NV097 (Kelvin) method addresses and field encodings
//!
//! Addresses are byte offsets into the 3D object's method space. Indexed
//! registers take a stride argument through the helper functions below.

// ============================================================================
// Synchronisation
// ============================================================================

pub const WAIT_FOR_IDLE: u32 = 0x0110;

// ============================================================================
// Register combiners
// ============================================================================

pub const COMBINER_ALPHA_ICW: u32 = 0x0260;
pub const COMBINER_COLOR_ICW: u32 = 0x0AC0;
pub const COMBINER_ALPHA_OCW: u32 = 0x0AA0;
pub const COMBINER_COLOR_OCW: u32 = 0x1E40;
pub const COMBINER_FACTOR0: u32 = 0x0A60;
pub const COMBINER_FACTOR1: u32 = 0x0A80;
pub const COMBINER_CONTROL: u32 = 0x1E60;
pub const SPECULAR_FOG_CW0: u32 = 0x0288;
pub const SPECULAR_FOG_CW1: u32 = 0x028C;

/// Byte stride between per-stage combiner registers.
pub const COMBINER_STAGE_STRIDE: u32 = 4;

pub const COMBINER_CONTROL_ITERATION_COUNT_SHIFT: u32 = 0;
pub const COMBINER_CONTROL_FACTOR0_EACH_STAGE: u32 = 1 << 12;
pub const COMBINER_CONTROL_FACTOR1_SAME_FACTOR_ALL: u32 = 0;

pub const SPECULAR_FOG_CW1_SPECULAR_CLAMP: u32 = 1 << 7;

pub const SHADER_STAGE_PROGRAM: u32 = 0x1E70;
pub const SHADER_OTHER_STAGE_INPUT: u32 = 0x1E78;
pub const SHADER_CLIP_PLANE_MODE: u32 = 0x17F8;

/// Bits per stage in `SHADER_STAGE_PROGRAM`.
pub const SHADER_STAGE_BITS: u32 = 5;

pub const STAGE_PROGRAM_NONE: u32 = 0x00;
pub const STAGE_PROGRAM_2D_PROJECTIVE: u32 = 0x01;
pub const STAGE_PROGRAM_CLIP_PLANE: u32 = 0x05;

// ============================================================================
// Fog
// ============================================================================

pub const FOG_MODE: u32 = 0x029C;
pub const FOG_GEN_MODE: u32 = 0x02A0;
pub const FOG_ENABLE: u32 = 0x02A4;
pub const FOG_COLOR: u32 = 0x02A8;
pub const FOG_PARAMS: u32 = 0x09C0;

pub const FOG_MODE_LINEAR: u32 = 0x2601;
pub const FOG_MODE_EXP: u32 = 0x0800;
pub const FOG_MODE_EXP2: u32 = 0x0801;
pub const FOG_GEN_MODE_RADIAL: u32 = 1;

// ============================================================================
// Lighting
// ============================================================================

pub const LIGHTING_ENABLE: u32 = 0x0314;
pub const SPECULAR_ENABLE: u32 = 0x03B8;
pub const LIGHT_ENABLE_MASK: u32 = 0x03BC;
pub const TWO_SIDE_LIGHT_EN: u32 = 0x17C4;
pub const COLOR_MATERIAL: u32 = 0x0298;

pub const SCENE_AMBIENT_COLOR: u32 = 0x0A10;
pub const MATERIAL_EMISSION: u32 = 0x03A8;
pub const MATERIAL_FACTOR_ALPHA: u32 = 0x03B4;
pub const SPECULAR_PARAMS: u32 = 0x09E0;
pub const BACK_SCENE_AMBIENT_COLOR: u32 = 0x17A0;
pub const BACK_MATERIAL_EMISSION: u32 = 0x17B0;
pub const BACK_MATERIAL_FACTOR_ALPHA: u32 = 0x17AC;
pub const BACK_SPECULAR_PARAMS: u32 = 0x1E28;

pub const LIGHT_STRIDE: u32 = 128;
pub const LIGHT_AMBIENT_COLOR: u32 = 0x1000;
pub const LIGHT_DIFFUSE_COLOR: u32 = 0x100C;
pub const LIGHT_SPECULAR_COLOR: u32 = 0x1018;
pub const LIGHT_LOCAL_RANGE: u32 = 0x1024;
pub const LIGHT_INFINITE_HALF_VECTOR: u32 = 0x1028;
pub const LIGHT_INFINITE_DIRECTION: u32 = 0x1034;
pub const LIGHT_SPOT_FALLOFF: u32 = 0x1040;
pub const LIGHT_SPOT_DIRECTION: u32 = 0x104C;
pub const LIGHT_LOCAL_POSITION: u32 = 0x105C;
pub const LIGHT_LOCAL_ATTENUATION: u32 = 0x1068;

pub const BACK_LIGHT_STRIDE: u32 = 64;
pub const BACK_LIGHT_AMBIENT_COLOR: u32 = 0x0C00;
pub const BACK_LIGHT_DIFFUSE_COLOR: u32 = 0x0C0C;
pub const BACK_LIGHT_SPECULAR_COLOR: u32 = 0x0C18;

pub const LIGHT_MASK_OFF: u32 = 0;
pub const LIGHT_MASK_INFINITE: u32 = 1;
pub const LIGHT_MASK_LOCAL: u32 = 2;
pub const LIGHT_MASK_SPOT: u32 = 3;
pub const LIGHT_MASK_BITS: u32 = 2;

pub const COLOR_MATERIAL_ALL_FROM_MATERIAL: u32 = 0;
/// Front and back ambient/diffuse sourced from the vertex diffuse color.
pub const COLOR_MATERIAL_AMBIENT_DIFFUSE_FROM_VERTEX: u32 = (1 << 2) | (1 << 4) | (1 << 10) | (1 << 12);

#[inline]
pub const fn light(base: u32, index: usize) -> u32 {
    base + index as u32 * LIGHT_STRIDE
}

#[inline]
pub const fn back_light(base: u32, index: usize) -> u32 {
    base + index as u32 * BACK_LIGHT_STRIDE
}

// ============================================================================
// Transform
// ============================================================================

pub const MODEL_VIEW_MATRIX: u32 = 0x0480;
pub const INVERSE_MODEL_VIEW_MATRIX: u32 = 0x0580;
pub const COMPOSITE_MATRIX: u32 = 0x0680;
pub const PROJECTION_MATRIX: u32 = 0x0440;
pub const TEXTURE_MATRIX: u32 = 0x06C0;
pub const TEXTURE_MATRIX_STRIDE: u32 = 64;
pub const TEXTURE_MATRIX_ENABLE: u32 = 0x0420;
pub const VIEWPORT_OFFSET: u32 = 0x0A20;
pub const VIEWPORT_SCALE: u32 = 0x0AF0;
pub const CLIP_MIN: u32 = 0x0394;
pub const CLIP_MAX: u32 = 0x0398;
pub const NORMALIZATION_ENABLE: u32 = 0x03A4;

pub const TEXGEN_S: u32 = 0x03C0;
pub const TEXGEN_STAGE_STRIDE: u32 = 16;
pub const TEXGEN_EYE_LINEAR: u32 = 0x2400;
pub const TEXGEN_DISABLE: u32 = 0;
pub const TEXGEN_PLANE_S: u32 = 0x0840;
pub const TEXGEN_PLANE_STAGE_STRIDE: u32 = 64;
pub const TEXGEN_PLANE_COMPONENT_STRIDE: u32 = 16;

// ============================================================================
// Points and lines
// ============================================================================

pub const POINT_PARAMS_ENABLE: u32 = 0x0318;
pub const POINT_SMOOTH_ENABLE: u32 = 0x031C;
pub const POINT_SIZE: u32 = 0x043C;
pub const POINT_PARAMS: u32 = 0x0A30;
pub const POINT_PARAMS_COUNT: usize = 8;

pub const LINE_WIDTH: u32 = 0x0380;
pub const LINE_SMOOTH_ENABLE: u32 = 0x0320;

// ============================================================================
// Rasterisation
// ============================================================================

pub const CULL_FACE_ENABLE: u32 = 0x0308;
pub const CULL_FACE: u32 = 0x039C;
pub const FRONT_FACE: u32 = 0x03A0;
pub const POLY_OFFSET_FILL_ENABLE: u32 = 0x0338;
pub const POLYGON_OFFSET_SCALE_FACTOR: u32 = 0x0384;
pub const POLYGON_OFFSET_BIAS: u32 = 0x0388;
pub const SHADE_MODEL: u32 = 0x037C;

// ============================================================================
// Pixel ops
// ============================================================================

pub const ALPHA_FUNC_ENABLE: u32 = 0x0300;
pub const ALPHA_FUNC: u32 = 0x033C;
pub const ALPHA_REF: u32 = 0x0340;
pub const BLEND_ENABLE: u32 = 0x0304;
pub const BLEND_FUNC_SFACTOR: u32 = 0x0344;
pub const BLEND_FUNC_DFACTOR: u32 = 0x0348;
pub const DEPTH_TEST_ENABLE: u32 = 0x030C;
pub const DITHER_ENABLE: u32 = 0x0310;
pub const DEPTH_FUNC: u32 = 0x0354;
pub const COLOR_MASK: u32 = 0x0358;
pub const DEPTH_MASK: u32 = 0x035C;
pub const STENCIL_TEST_ENABLE: u32 = 0x032C;
pub const STENCIL_MASK: u32 = 0x0360;
pub const STENCIL_FUNC: u32 = 0x0364;
pub const STENCIL_FUNC_REF: u32 = 0x0368;
pub const STENCIL_FUNC_MASK: u32 = 0x036C;
pub const STENCIL_OP_FAIL: u32 = 0x0370;
pub const STENCIL_OP_ZFAIL: u32 = 0x0374;
pub const STENCIL_OP_ZPASS: u32 = 0x0378;
pub const LOGIC_OP_ENABLE: u32 = 0x17BC;
pub const LOGIC_OP: u32 = 0x17C0;
pub const WINDOW_CLIP_TYPE: u32 = 0x02B4;
pub const WINDOW_CLIP_HORIZONTAL: u32 = 0x02C0;
pub const WINDOW_CLIP_VERTICAL: u32 = 0x02E0;

pub const WINDOW_CLIP_TYPE_INCLUSIVE: u32 = 0;
/// Largest scissor coordinate the window clip accepts.
pub const WINDOW_CLIP_MAX: u32 = 4095;

// ============================================================================
// Clears
// ============================================================================

pub const ZSTENCIL_CLEAR_VALUE: u32 = 0x1D8C;
pub const COLOR_CLEAR_VALUE: u32 = 0x1D90;
pub const CLEAR_SURFACE: u32 = 0x1D94;

pub const CLEAR_SURFACE_Z: u32 = 1 << 0;
pub const CLEAR_SURFACE_STENCIL: u32 = 1 << 1;
pub const CLEAR_SURFACE_COLOR: u32 = 0xF0;

// ============================================================================
// Vertex data and draws
// ============================================================================

pub const VERTEX_DATA_ARRAY_OFFSET: u32 = 0x1720;
pub const VERTEX_DATA_ARRAY_FORMAT: u32 = 0x1760;
pub const VERTEX_DATA4F_M: u32 = 0x1A00;
pub const VERTEX_ATTRIBUTE_STRIDE: u32 = 4;
pub const VERTEX_DATA4F_STRIDE: u32 = 16;

pub const VERTEX_FORMAT_SIZE_SHIFT: u32 = 4;
pub const VERTEX_FORMAT_STRIDE_SHIFT: u32 = 8;

pub const VERTEX_TYPE_UB_D3D: u32 = 0;
pub const VERTEX_TYPE_S1: u32 = 1;
pub const VERTEX_TYPE_F: u32 = 2;
pub const VERTEX_TYPE_UB_OGL: u32 = 4;
pub const VERTEX_TYPE_S32K: u32 = 5;

pub const SLOT_POSITION: usize = 0;
pub const SLOT_NORMAL: usize = 2;
pub const SLOT_DIFFUSE: usize = 3;
pub const SLOT_POINT_SIZE: usize = 6;
pub const SLOT_TEXTURE0: usize = 9;
pub const VERTEX_ATTRIBUTE_COUNT: usize = 16;

pub const BEGIN_END: u32 = 0x17FC;
pub const DRAW_ARRAYS: u32 = 0x1810;
pub const ARRAY_ELEMENT16: u32 = 0x1800;
pub const ARRAY_ELEMENT32: u32 = 0x1808;

pub const PRIM_END: u32 = 0;
pub const PRIM_POINTS: u32 = 1;
pub const PRIM_LINES: u32 = 2;
pub const PRIM_LINE_LOOP: u32 = 3;
pub const PRIM_LINE_STRIP: u32 = 4;
pub const PRIM_TRIANGLES: u32 = 5;
pub const PRIM_TRIANGLE_STRIP: u32 = 6;
pub const PRIM_TRIANGLE_FAN: u32 = 7;

/// `DRAW_ARRAYS` packs a start index and `count - 1` in 8 bits.
pub const DRAW_ARRAYS_MAX_BATCH: u32 = 256;
pub const DRAW_ARRAYS_COUNT_SHIFT: u32 = 24;
/// Vertices addressable by the 24-bit start field.
pub const DRAW_ARRAYS_MAX_VERTICES: u64 = 1 << DRAW_ARRAYS_COUNT_SHIFT;

#[inline]
pub const fn vertex_attribute(base: u32, slot: usize) -> u32 {
    base + slot as u32 * VERTEX_ATTRIBUTE_STRIDE
}

/// Constant attribute value used while the slot's array is disabled.
#[inline]
pub const fn vertex_data4f(slot: usize) -> u32 {
    VERTEX_DATA4F_M + slot as u32 * VERTEX_DATA4F_STRIDE
}

// ============================================================================
// Textures
// ============================================================================

pub const TEXTURE_STAGE_STRIDE: u32 = 64;
pub const TEXTURE_OFFSET: u32 = 0x1B00;
pub const TEXTURE_FORMAT: u32 = 0x1B04;
pub const TEXTURE_ADDRESS: u32 = 0x1B08;
pub const TEXTURE_CONTROL0: u32 = 0x1B0C;
pub const TEXTURE_CONTROL1: u32 = 0x1B10;
pub const TEXTURE_FILTER: u32 = 0x1B14;
pub const TEXTURE_IMAGE_RECT: u32 = 0x1B1C;

pub const TEXTURE_FORMAT_CONTEXT_DMA_B: u32 = 2;
pub const TEXTURE_FORMAT_BORDER_SOURCE_COLOR: u32 = 1 << 3;
pub const TEXTURE_FORMAT_DIMENSIONALITY_2D: u32 = 2 << 4;
pub const TEXTURE_FORMAT_COLOR_SHIFT: u32 = 8;
pub const TEXTURE_FORMAT_MIPMAP_LEVELS_SHIFT: u32 = 16;
pub const TEXTURE_FORMAT_BASE_SIZE_U_SHIFT: u32 = 20;
pub const TEXTURE_FORMAT_BASE_SIZE_V_SHIFT: u32 = 24;

pub const TEXTURE_CONTROL0_ENABLE: u32 = 1 << 30;
pub const TEXTURE_CONTROL1_PITCH_SHIFT: u32 = 16;

pub const TEXTURE_FILTER_CONVOLUTION_GAUSSIAN: u32 = 2 << 13;
pub const TEXTURE_FILTER_MIN_SHIFT: u32 = 16;
pub const TEXTURE_FILTER_MAG_SHIFT: u32 = 24;

pub const TEXTURE_ADDRESS_U_SHIFT: u32 = 0;
pub const TEXTURE_ADDRESS_V_SHIFT: u32 = 8;
pub const TEXTURE_ADDRESS_P_SHIFT: u32 = 16;
pub const TEXTURE_ADDRESS_WRAP: u32 = 1;
pub const TEXTURE_ADDRESS_CLAMP_TO_EDGE: u32 = 3;

pub const TEXTURE_COLOR_Y8: u32 = 0x00;
pub const TEXTURE_COLOR_A1R5G5B5: u32 = 0x02;
pub const TEXTURE_COLOR_A4R4G4B4: u32 = 0x04;
pub const TEXTURE_COLOR_R5G6B5: u32 = 0x05;
pub const TEXTURE_COLOR_A8: u32 = 0x19;
pub const TEXTURE_COLOR_AY8: u32 = 0x1A;
pub const TEXTURE_COLOR_A8B8G8R8: u32 = 0x3A;

pub const TEXTURE_MIN_BOX_LOD0: u32 = 1;
pub const TEXTURE_MIN_TENT_LOD0: u32 = 2;
pub const TEXTURE_MIN_BOX_NEARESTLOD: u32 = 3;
pub const TEXTURE_MIN_TENT_NEARESTLOD: u32 = 4;
pub const TEXTURE_MIN_BOX_TENT_LOD: u32 = 5;
pub const TEXTURE_MIN_TENT_TENT_LOD: u32 = 6;
pub const TEXTURE_MAG_BOX_LOD0: u32 = 1;
pub const TEXTURE_MAG_TENT_LOD0: u32 = 2;

#[inline]
pub const fn texture(base: u32, stage: usize) -> u32 {
    base + stage as u32 * TEXTURE_STAGE_STRIDE
}

#[inline]
pub const fn texture_matrix(stage: usize) -> u32 {
    TEXTURE_MATRIX + stage as u32 * TEXTURE_MATRIX_STRIDE
}

#[inline]
pub const fn texture_matrix_enable(stage: usize) -> u32 {
    TEXTURE_MATRIX_ENABLE + stage as u32 * 4
}

#[inline]
pub const fn combiner(base: u32, stage: usize) -> u32 {
    base + stage as u32 * COMBINER_STAGE_STRIDE
}

#[inline]
pub const fn texgen(component: u32, stage: usize) -> u32 {
    TEXGEN_S + component * 4 + stage as u32 * TEXGEN_STAGE_STRIDE
}

#[inline]
pub const fn texgen_plane(component: u32, stage: usize) -> u32 {
    TEXGEN_PLANE_S + component * TEXGEN_PLANE_COMPONENT_STRIDE + stage as u32 * TEXGEN_PLANE_STAGE_STRIDE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_register_strides() {
        assert_eq!(combiner(COMBINER_COLOR_ICW, 1), 0x0AC4);
        assert_eq!(combiner(COMBINER_ALPHA_OCW, 3), 0x0AAC);
        assert_eq!(light(LIGHT_LOCAL_POSITION, 1), 0x10DC);
        assert_eq!(back_light(BACK_LIGHT_DIFFUSE_COLOR, 2), 0x0C8C);
        assert_eq!(texture(TEXTURE_OFFSET, 2), 0x1B80);
        assert_eq!(texgen(1, 2), 0x03E4);
        assert_eq!(texgen_plane(3, 1), 0x08B0);
        assert_eq!(texture_matrix(1), 0x0700);
        assert_eq!(texture_matrix_enable(3), 0x042C);
        assert_eq!(vertex_attribute(VERTEX_DATA_ARRAY_FORMAT, SLOT_TEXTURE0), 0x1784);
    }
}
