use glam::{Mat3, Mat4, Vec3, Vec4};

/// Object-space point to eye space.
pub fn eye_position(modelview: &Mat4, v: Vec4) -> Vec4 {
    *modelview * v
}

/// Object-space direction to eye space through the upper 3x3, normalized.
/// A zero direction stays zero.
pub fn eye_direction(modelview: &Mat4, v: Vec3) -> Vec3 {
    (Mat3::from_mat4(*modelview) * v).normalize_or_zero()
}

/// Object-space plane equation to eye space: `plane * modelview^-1`.
pub fn eye_plane(modelview: &Mat4, plane: Vec4) -> Vec4 {
    modelview.inverse().transpose() * plane
}

/// Window transform folded into the composite matrix.
///
/// The hardware viewport offset/scale registers are left at identity; the
/// whole mapping to window coordinates lives here, with y flipped and z in
/// depth-buffer units.
pub fn viewport_matrix(viewport: [i32; 4], depth_range: [f32; 2], depth_max: f32) -> Mat4 {
    let [x, y, w, h] = viewport.map(|v| v as f32);
    let [near, far] = depth_range;
    let z_scale = (far - near) * depth_max * 0.5;
    let z_offset = (far + near) * depth_max * 0.5;
    Mat4::from_cols(
        Vec4::new(w * 0.5, 0.0, 0.0, 0.0),
        Vec4::new(0.0, h * -0.5, 0.0, 0.0),
        Vec4::new(0.0, 0.0, z_scale, 0.0),
        Vec4::new(x + w * 0.5, y + h * 0.5, z_offset, 1.0),
    )
}

/// `viewport * projection * modelview`
pub fn composite(viewport: &Mat4, projection: &Mat4, modelview: &Mat4) -> Mat4 {
    *viewport * *projection * *modelview
}

/// `glRotate`: `angle` degrees about `axis`. A zero axis yields identity.
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle.to_radians()),
        None => Mat4::IDENTITY,
    }
}

/// `glFrustum` perspective matrix. Arguments are assumed validated.
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rl = right - left;
    let tb = top - bottom;
    let fnr = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / rl, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / tb, 0.0, 0.0),
        Vec4::new((right + left) / rl, (top + bottom) / tb, -(far + near) / fnr, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * far * near / fnr, 0.0),
    )
}

/// `glOrtho` parallel projection. Arguments are assumed validated.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(left, right, bottom, top, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn test_viewport_maps_ndc_corners() {
        let vp = viewport_matrix([0, 0, 640, 480], [0.0, 1.0], 65535.0);
        assert!(approx(vp * Vec4::new(-1.0, 1.0, -1.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0)));
        assert!(approx(
            vp * Vec4::new(1.0, -1.0, 1.0, 1.0),
            Vec4::new(640.0, 480.0, 65535.0, 1.0)
        ));
    }

    #[test]
    fn test_viewport_honours_depth_range_offset() {
        let vp = viewport_matrix([10, 20, 100, 50], [0.25, 0.75], 1000.0);
        assert!(approx(vp * Vec4::new(0.0, 0.0, -1.0, 1.0), Vec4::new(60.0, 45.0, 250.0, 1.0)));
        assert!(approx(vp * Vec4::new(0.0, 0.0, 1.0, 1.0), Vec4::new(60.0, 45.0, 750.0, 1.0)));
    }

    #[test]
    fn test_eye_plane_keeps_points_on_plane() {
        let mv = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0))
            * Mat4::from_rotation_y(0.3);
        // Object-space plane y = 1
        let plane = Vec4::new(0.0, 1.0, 0.0, -1.0);
        let eye = eye_plane(&mv, plane);
        let point = eye_position(&mv, Vec4::new(3.0, 1.0, 2.0, 1.0));
        assert!(eye.dot(point).abs() < 1e-5);
    }

    #[test]
    fn test_eye_direction_ignores_translation() {
        let mv = Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(eye_direction(&mv, Vec3::NEG_Z), Vec3::NEG_Z);
    }

    #[test]
    fn test_frustum_maps_near_and_far() {
        let m = frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!((near.z / near.w + 1.0).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_axis_rotation_is_identity() {
        assert_eq!(rotation(90.0, Vec3::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn test_composite_order() {
        let vp = Mat4::from_scale(Vec3::splat(2.0));
        let proj = Mat4::from_translation(Vec3::X);
        let mv = Mat4::from_rotation_z(1.0);
        assert_eq!(composite(&vp, &proj, &mv), vp * proj * mv);
    }
}
