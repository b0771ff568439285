//! Matrix stacks, viewport, depth range and user clip planes

use glam::{Mat4, Vec3, Vec4};

use super::Context;
use crate::derive::{eye_plane, frustum, ortho, rotation};
use crate::error::{GlError, GlResult};
use crate::gl::{GLenum, GLfixed, fixed_matrix, fixed_to_float};
use crate::hw::{Device, MAX_CLIP_PLANES};
use crate::state::MatrixStack;
use crate::state::enums::MatrixMode;

fn clip_plane_index(plane: GLenum) -> Option<usize> {
    plane
        .checked_sub(crate::gl::CLIP_PLANE0)
        .map(|i| i as usize)
        .filter(|&i| i < MAX_CLIP_PLANES)
}

impl<D: Device> Context<D> {
    /// Applies `f` to the stack selected by the matrix mode and marks it dirty.
    fn with_current_stack<T>(&mut self, f: impl FnOnce(&mut MatrixStack) -> T) -> T {
        let unit = self.state.texture.active_unit;
        let t = &mut self.state.transform;
        let out = f(t.current_stack_mut(unit));
        t.mark_current_dirty(unit);
        out
    }

    pub fn matrix_mode(&mut self, mode: GLenum) -> GlResult<()> {
        let Some(mode) = MatrixMode::from_gl(mode) else {
            return self.fail("glMatrixMode", GlError::InvalidEnum);
        };
        self.state.transform.matrix_mode = mode;
        Ok(())
    }

    pub fn load_identity(&mut self) {
        self.with_current_stack(|s| s.load(Mat4::IDENTITY));
    }

    /// Column-major, as GL passes matrices.
    pub fn load_matrix(&mut self, m: &[f32; 16]) {
        let m = Mat4::from_cols_array(m);
        self.with_current_stack(|s| s.load(m));
    }

    pub fn load_matrix_x(&mut self, m: &[GLfixed; 16]) {
        let m = fixed_matrix(m);
        self.with_current_stack(|s| s.load(m));
    }

    pub fn mult_matrix(&mut self, m: &[f32; 16]) {
        let m = Mat4::from_cols_array(m);
        self.with_current_stack(|s| s.multiply(m));
    }

    pub fn mult_matrix_x(&mut self, m: &[GLfixed; 16]) {
        let m = fixed_matrix(m);
        self.with_current_stack(|s| s.multiply(m));
    }

    pub fn push_matrix(&mut self) -> GlResult<()> {
        let unit = self.state.texture.active_unit;
        let result = self.state.transform.current_stack_mut(unit).push();
        self.check("glPushMatrix", result)
    }

    pub fn pop_matrix(&mut self) -> GlResult<()> {
        let unit = self.state.texture.active_unit;
        let t = &mut self.state.transform;
        let result = t.current_stack_mut(unit).pop();
        if result.is_ok() {
            t.mark_current_dirty(unit);
        }
        self.check("glPopMatrix", result)
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        let m = Mat4::from_translation(Vec3::new(x, y, z));
        self.with_current_stack(|s| s.multiply(m));
    }

    pub fn translate_x(&mut self, x: GLfixed, y: GLfixed, z: GLfixed) {
        self.translate(fixed_to_float(x), fixed_to_float(y), fixed_to_float(z));
    }

    /// `angle` in degrees.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let m = rotation(angle, Vec3::new(x, y, z));
        self.with_current_stack(|s| s.multiply(m));
    }

    pub fn rotate_x(&mut self, angle: GLfixed, x: GLfixed, y: GLfixed, z: GLfixed) {
        self.rotate(
            fixed_to_float(angle),
            fixed_to_float(x),
            fixed_to_float(y),
            fixed_to_float(z),
        );
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        let m = Mat4::from_scale(Vec3::new(x, y, z));
        self.with_current_stack(|s| s.multiply(m));
    }

    pub fn scale_x(&mut self, x: GLfixed, y: GLfixed, z: GLfixed) {
        self.scale(fixed_to_float(x), fixed_to_float(y), fixed_to_float(z));
    }

    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> GlResult<()> {
        if near <= 0.0 || far <= 0.0 || left == right || bottom == top || near == far {
            return self.fail("glFrustumf", GlError::InvalidValue);
        }
        let m = frustum(left, right, bottom, top, near, far);
        self.with_current_stack(|s| s.multiply(m));
        Ok(())
    }

    pub fn frustum_x(
        &mut self,
        left: GLfixed,
        right: GLfixed,
        bottom: GLfixed,
        top: GLfixed,
        near: GLfixed,
        far: GLfixed,
    ) -> GlResult<()> {
        let [l, r, b, t, n, f] = [left, right, bottom, top, near, far].map(fixed_to_float);
        self.frustum(l, r, b, t, n, f)
    }

    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> GlResult<()> {
        if left == right || bottom == top || near == far {
            return self.fail("glOrthof", GlError::InvalidValue);
        }
        let m = ortho(left, right, bottom, top, near, far);
        self.with_current_stack(|s| s.multiply(m));
        Ok(())
    }

    pub fn ortho_x(
        &mut self,
        left: GLfixed,
        right: GLfixed,
        bottom: GLfixed,
        top: GLfixed,
        near: GLfixed,
        far: GLfixed,
    ) -> GlResult<()> {
        let [l, r, b, t, n, f] = [left, right, bottom, top, near, far].map(fixed_to_float);
        self.ortho(l, r, b, t, n, f)
    }

    /// Dimensions are clamped to the maximum viewport size.
    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) -> GlResult<()> {
        if width < 0 || height < 0 {
            return self.fail("glViewport", GlError::InvalidValue);
        }
        let limits = &self.config.limits;
        let width = width.min(limits.max_viewport_width as i32);
        let height = height.min(limits.max_viewport_height as i32);

        let s = &mut self.state;
        s.transform.viewport = [x, y, width, height];
        s.transform.viewport_dirty = true;
        // Point attenuation is expressed in window units.
        s.raster.point_params_dirty = true;
        Ok(())
    }

    /// Both values are clamped to [0, 1].
    pub fn depth_range(&mut self, near: f32, far: f32) {
        let t = &mut self.state.transform;
        t.depth_range = [near.clamp(0.0, 1.0), far.clamp(0.0, 1.0)];
        t.depth_range_dirty = true;
        t.viewport_dirty = true;
    }

    pub fn depth_range_x(&mut self, near: GLfixed, far: GLfixed) {
        self.depth_range(fixed_to_float(near), fixed_to_float(far));
    }

    /// Stores the plane in eye space using the current modelview. Enabling
    /// the plane is left to `enable(CLIP_PLANEi)`.
    pub fn clip_plane(&mut self, plane: GLenum, equation: &[f32; 4]) -> GlResult<()> {
        let Some(index) = clip_plane_index(plane) else {
            return self.fail("glClipPlanef", GlError::InvalidEnum);
        };
        let t = &mut self.state.transform;
        t.clip_planes[index] = eye_plane(t.modelview.top(), Vec4::from_array(*equation));
        t.clip_planes_dirty = true;
        Ok(())
    }

    pub fn clip_plane_x(&mut self, plane: GLenum, equation: &[GLfixed; 4]) -> GlResult<()> {
        self.clip_plane(plane, &equation.map(fixed_to_float))
    }

    /// The stored eye-space equation.
    pub fn get_clip_plane(&mut self, plane: GLenum) -> GlResult<[f32; 4]> {
        let Some(index) = clip_plane_index(plane) else {
            return self.fail("glGetClipPlanef", GlError::InvalidEnum);
        };
        Ok(self.state.transform.clip_planes[index].to_array())
    }
}
