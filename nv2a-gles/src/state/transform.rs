//! Matrix stacks, viewport, depth range and clip planes

use glam::{Mat4, Vec4};
use smallvec::{SmallVec, smallvec};

use super::enums::MatrixMode;
use crate::error::{GlError, GlResult};
use crate::hw::{MAX_CLIP_PLANES, MAX_TEXTURE_UNITS};

/// Bounded matrix stack. Always holds at least one matrix.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    matrices: SmallVec<[Mat4; 2]>,
    max_depth: usize,
}

impl MatrixStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            matrices: smallvec![Mat4::IDENTITY],
            max_depth: max_depth.max(1),
        }
    }

    pub fn depth(&self) -> usize {
        self.matrices.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn top(&self) -> &Mat4 {
        // Non-empty by construction; pop never removes the last entry.
        &self.matrices[self.matrices.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.matrices.len() - 1;
        &mut self.matrices[last]
    }

    pub fn load(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    /// Post-multiplies the top: `top = top * rhs`.
    pub fn multiply(&mut self, rhs: Mat4) {
        let top = self.top_mut();
        *top *= rhs;
    }

    /// Duplicates the top. Fails without change at max depth.
    pub fn push(&mut self) -> GlResult<()> {
        if self.matrices.len() >= self.max_depth {
            return Err(GlError::StackOverflow);
        }
        let top = *self.top();
        self.matrices.push(top);
        Ok(())
    }

    /// Discards the top. Fails without change at depth 1.
    pub fn pop(&mut self) -> GlResult<()> {
        if self.matrices.len() <= 1 {
            return Err(GlError::StackUnderflow);
        }
        self.matrices.pop();
        Ok(())
    }
}

/// Transformation state (GL ES 1.1 table 6.6).
#[derive(Debug, Clone)]
pub struct TransformState {
    pub matrix_mode: MatrixMode,
    pub modelview: MatrixStack,
    pub projection: MatrixStack,
    pub texture: [MatrixStack; MAX_TEXTURE_UNITS],
    /// x, y, width, height
    pub viewport: [i32; 4],
    /// Cached viewport transform, rebuilt by the transform flush
    pub viewport_matrix: Mat4,
    pub depth_range: [f32; 2],
    /// Eye-space plane equations
    pub clip_planes: [Vec4; MAX_CLIP_PLANES],
    pub clip_plane_enabled: [bool; MAX_CLIP_PLANES],
    pub normalize: bool,
    pub rescale_normal: bool,

    pub modelview_dirty: bool,
    pub projection_dirty: bool,
    pub texture_dirty: [bool; MAX_TEXTURE_UNITS],
    pub viewport_dirty: bool,
    pub depth_range_dirty: bool,
    pub clip_planes_dirty: bool,
}

impl TransformState {
    pub fn new(
        width: u32,
        height: u32,
        modelview_depth: usize,
        projection_depth: usize,
        texture_depth: usize,
    ) -> Self {
        Self {
            matrix_mode: MatrixMode::ModelView,
            modelview: MatrixStack::new(modelview_depth),
            projection: MatrixStack::new(projection_depth),
            texture: std::array::from_fn(|_| MatrixStack::new(texture_depth)),
            viewport: [0, 0, width as i32, height as i32],
            viewport_matrix: Mat4::IDENTITY,
            depth_range: [0.0, 1.0],
            clip_planes: [Vec4::ZERO; MAX_CLIP_PLANES],
            clip_plane_enabled: [false; MAX_CLIP_PLANES],
            normalize: false,
            rescale_normal: false,
            modelview_dirty: true,
            projection_dirty: true,
            texture_dirty: [true; MAX_TEXTURE_UNITS],
            viewport_dirty: true,
            depth_range_dirty: true,
            clip_planes_dirty: true,
        }
    }

    /// Stack selected by the current matrix mode.
    pub fn current_stack_mut(&mut self, active_unit: usize) -> &mut MatrixStack {
        match self.matrix_mode {
            MatrixMode::ModelView => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::Texture => &mut self.texture[active_unit],
        }
    }

    pub fn current_stack(&self, active_unit: usize) -> &MatrixStack {
        match self.matrix_mode {
            MatrixMode::ModelView => &self.modelview,
            MatrixMode::Projection => &self.projection,
            MatrixMode::Texture => &self.texture[active_unit],
        }
    }

    /// Flags the stack selected by the current matrix mode as changed.
    pub fn mark_current_dirty(&mut self, active_unit: usize) {
        match self.matrix_mode {
            MatrixMode::ModelView => self.modelview_dirty = true,
            MatrixMode::Projection => self.projection_dirty = true,
            MatrixMode::Texture => self.texture_dirty[active_unit] = true,
        }
    }

    pub fn any_clip_plane_enabled(&self) -> bool {
        self.clip_plane_enabled.iter().any(|&e| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_stack_overflow_leaves_stack_unchanged() {
        let mut stack = MatrixStack::new(2);
        stack.load(Mat4::from_translation(Vec3::X));
        stack.push().unwrap();
        stack.load(Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(stack.push(), Err(GlError::StackOverflow));
        assert_eq!(stack.depth(), 2);
        assert_eq!(*stack.top(), Mat4::from_scale(Vec3::splat(2.0)));
    }

    #[test]
    fn test_stack_underflow_leaves_stack_unchanged() {
        let mut stack = MatrixStack::new(4);
        let m = Mat4::from_translation(Vec3::Y);
        stack.load(m);
        assert_eq!(stack.pop(), Err(GlError::StackUnderflow));
        assert_eq!(stack.depth(), 1);
        assert_eq!(*stack.top(), m);
    }

    #[test]
    fn test_push_duplicates_and_pop_restores() {
        let mut stack = MatrixStack::new(4);
        let base = Mat4::from_translation(Vec3::Z);
        stack.load(base);
        stack.push().unwrap();
        assert_eq!(*stack.top(), base);
        stack.multiply(Mat4::from_scale(Vec3::splat(3.0)));
        stack.pop().unwrap();
        assert_eq!(*stack.top(), base);
    }

    #[test]
    fn test_multiply_is_post_multiplication() {
        let mut stack = MatrixStack::new(1);
        let t = Mat4::from_translation(Vec3::X);
        let s = Mat4::from_scale(Vec3::splat(2.0));
        stack.load(t);
        stack.multiply(s);
        assert_eq!(*stack.top(), t * s);
    }

    #[test]
    fn test_zero_depth_is_clamped_to_one() {
        let stack = MatrixStack::new(0);
        assert_eq!(stack.max_depth(), 1);
        assert_eq!(stack.depth(), 1);
    }
}
