//! Scalar conversions shared by the `x`, `i` and `f` entry-point variants

use glam::{Mat4, Vec4};

use super::GLfixed;

const FIXED_ONE: f32 = 65536.0;

/// 16.16 fixed point to float.
#[inline]
pub fn fixed_to_float(x: GLfixed) -> f32 {
    x as f32 / FIXED_ONE
}

/// Float to 16.16 fixed point, saturating at the representable range.
#[inline]
pub fn float_to_fixed(f: f32) -> GLfixed {
    (f * FIXED_ONE) as GLfixed
}

pub fn fixed_slice(src: &[GLfixed]) -> smallvec::SmallVec<[f32; 16]> {
    src.iter().copied().map(fixed_to_float).collect()
}

/// Column-major fixed matrix to float.
pub fn fixed_matrix(m: &[GLfixed; 16]) -> Mat4 {
    Mat4::from_cols_array(&m.map(fixed_to_float))
}

/// Maps a signed integer color component onto [-1, 1]: `(2c + 1) / (2^32 - 1)`.
#[inline]
pub fn int_to_float(c: i32) -> f32 {
    ((2.0 * c as f64 + 1.0) / 4_294_967_295.0) as f32
}

/// Inverse of [`int_to_float`], clamped to [-1, 1] first.
#[inline]
pub fn float_to_int(f: f32) -> i32 {
    let f = f.clamp(-1.0, 1.0) as f64;
    ((f * 4_294_967_295.0 - 1.0) / 2.0).round() as i32
}

#[inline]
fn unorm8(v: f32) -> u32 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u32
}

/// Packs a color as `0xAARRGGBB`.
#[inline]
pub fn pack_argb32(c: Vec4) -> u32 {
    (unorm8(c.w) << 24) | (unorm8(c.x) << 16) | (unorm8(c.y) << 8) | unorm8(c.z)
}

/// Packs a color as `0xAABBGGRR`.
#[inline]
pub fn pack_abgr32(c: Vec4) -> u32 {
    (unorm8(c.w) << 24) | (unorm8(c.z) << 16) | (unorm8(c.y) << 8) | unorm8(c.x)
}

/// Rounds up to the next power of two (0 stays 0).
#[inline]
pub fn npot2pot(n: u32) -> u32 {
    if n == 0 { 0 } else { n.next_power_of_two() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_conversions() {
        assert_eq!(fixed_to_float(0x0001_0000), 1.0);
        assert_eq!(fixed_to_float(-0x0000_8000), -0.5);
        assert_eq!(float_to_fixed(2.25), 0x0002_4000);
    }

    #[test]
    fn test_int_color_mapping_hits_extremes() {
        assert!((int_to_float(i32::MAX) - 1.0).abs() < 1e-6);
        assert!((int_to_float(i32::MIN) + 1.0).abs() < 1e-6);
        assert_eq!(float_to_int(1.0), i32::MAX);
        assert_eq!(float_to_int(-1.0), i32::MIN);
        assert_eq!(float_to_int(4.0), i32::MAX);
    }

    #[test]
    fn test_color_packing_orders() {
        let c = Vec4::new(1.0, 0.0, 0.5, 1.0);
        assert_eq!(pack_argb32(c), 0xFFFF_0080);
        assert_eq!(pack_abgr32(c), 0xFF80_00FF);
        assert_eq!(pack_argb32(Vec4::splat(2.0)), 0xFFFF_FFFF);
    }

    #[test]
    fn test_npot2pot() {
        assert_eq!(npot2pot(0), 0);
        assert_eq!(npot2pot(1), 1);
        assert_eq!(npot2pot(3), 4);
        assert_eq!(npot2pot(64), 64);
        assert_eq!(npot2pot(65), 128);
    }

    #[test]
    fn test_fixed_matrix_is_column_major() {
        let mut m = [0; 16];
        m[0] = 0x10000;
        m[5] = 0x10000;
        m[10] = 0x10000;
        m[15] = 0x10000;
        m[12] = 0x30000;
        let mat = fixed_matrix(&m);
        assert_eq!(mat.w_axis.x, 3.0);
        assert_eq!(mat.x_axis.x, 1.0);
    }
}
