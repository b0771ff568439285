//! Client vertex arrays and current vertex attributes

use glam::{Vec3, Vec4};

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum, GLfixed, fixed_to_float};
use crate::hw::Device;
use crate::hw::methods::{SLOT_DIFFUSE, SLOT_NORMAL, vertex_data4f};
use crate::state::VertexArray;
use crate::state::enums::{ArrayType, ClientArray};

/// Accepted sizes and types for one kind of array.
struct PointerRules {
    op: &'static str,
    sizes: &'static [i32],
    types: &'static [ArrayType],
}

const VERTEX_RULES: PointerRules = PointerRules {
    op: "glVertexPointer",
    sizes: &[2, 3, 4],
    types: &[ArrayType::Byte, ArrayType::Short, ArrayType::Fixed, ArrayType::Float],
};

const NORMAL_RULES: PointerRules = PointerRules {
    op: "glNormalPointer",
    sizes: &[3],
    types: &[ArrayType::Byte, ArrayType::Short, ArrayType::Fixed, ArrayType::Float],
};

const COLOR_RULES: PointerRules = PointerRules {
    op: "glColorPointer",
    sizes: &[4],
    types: &[ArrayType::UnsignedByte, ArrayType::Fixed, ArrayType::Float],
};

const TEXCOORD_RULES: PointerRules = PointerRules {
    op: "glTexCoordPointer",
    sizes: &[2, 3, 4],
    types: &[ArrayType::Byte, ArrayType::Short, ArrayType::Fixed, ArrayType::Float],
};

const POINT_SIZE_RULES: PointerRules = PointerRules {
    op: "glPointSizePointerOES",
    sizes: &[1],
    types: &[ArrayType::Fixed, ArrayType::Float],
};

impl PointerRules {
    fn validate(&self, size: i32, ty: GLenum, stride: i32) -> GlResult<(u32, ArrayType)> {
        let ty = ArrayType::from_gl(ty)
            .filter(|t| self.types.contains(t))
            .ok_or(GlError::InvalidEnum)?;
        if !self.sizes.contains(&size) || stride < 0 {
            return Err(GlError::InvalidValue);
        }
        Ok((size as u32, ty))
    }
}

impl<D: Device> Context<D> {
    fn client_array_mut(&mut self, array: ClientArray) -> &mut VertexArray {
        let a = &mut self.state.arrays;
        match array {
            ClientArray::Vertex => &mut a.vertex,
            ClientArray::Normal => &mut a.normal,
            ClientArray::Color => &mut a.color,
            ClientArray::TexCoord => &mut a.texcoords[a.client_active_unit],
            ClientArray::PointSize => &mut a.point_size,
        }
    }

    fn set_client_state(&mut self, op: &'static str, array: GLenum, on: bool) -> GlResult<()> {
        let Some(array) = ClientArray::from_gl(array) else {
            return self.fail(op, GlError::InvalidEnum);
        };
        let target = self.client_array_mut(array);
        target.enabled = on;
        target.dirty = true;

        // The constant attribute takes over again once the array is off.
        if !on {
            let current = &self.state.current;
            let (color, normal) = (current.color, current.normal.extend(0.0));
            match array {
                ClientArray::Color => self.batch().push_vec4(vertex_data4f(SLOT_DIFFUSE), color),
                ClientArray::Normal => self.batch().push_vec4(vertex_data4f(SLOT_NORMAL), normal),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn enable_client_state(&mut self, array: GLenum) -> GlResult<()> {
        self.set_client_state("glEnableClientState", array, true)
    }

    pub fn disable_client_state(&mut self, array: GLenum) -> GlResult<()> {
        self.set_client_state("glDisableClientState", array, false)
    }

    // ========================================================================
    // Pointers
    // ========================================================================

    /// Common tail of the `*Pointer` calls. `pointer` is a client address,
    /// or a byte offset while an array buffer is bound.
    fn set_pointer(
        &mut self,
        array: ClientArray,
        rules: &PointerRules,
        size: i32,
        ty: GLenum,
        stride: i32,
        pointer: u32,
    ) -> GlResult<()> {
        let result = rules.validate(size, ty, stride);
        let (size, ty) = self.check(rules.op, result)?;
        let buffer = self.state.arrays.array_buffer;
        let target = self.client_array_mut(array);
        target.size = size;
        target.ty = ty;
        target.stride = stride as u32;
        target.pointer = pointer;
        target.buffer = buffer;
        target.dirty = true;
        Ok(())
    }

    pub fn vertex_pointer(&mut self, size: i32, ty: GLenum, stride: i32, pointer: u32) -> GlResult<()> {
        self.set_pointer(ClientArray::Vertex, &VERTEX_RULES, size, ty, stride, pointer)
    }

    pub fn normal_pointer(&mut self, ty: GLenum, stride: i32, pointer: u32) -> GlResult<()> {
        self.set_pointer(ClientArray::Normal, &NORMAL_RULES, 3, ty, stride, pointer)
    }

    pub fn color_pointer(&mut self, size: i32, ty: GLenum, stride: i32, pointer: u32) -> GlResult<()> {
        self.set_pointer(ClientArray::Color, &COLOR_RULES, size, ty, stride, pointer)
    }

    /// Sets the array of the client active texture unit.
    pub fn tex_coord_pointer(
        &mut self,
        size: i32,
        ty: GLenum,
        stride: i32,
        pointer: u32,
    ) -> GlResult<()> {
        self.set_pointer(ClientArray::TexCoord, &TEXCOORD_RULES, size, ty, stride, pointer)
    }

    pub fn point_size_pointer(&mut self, ty: GLenum, stride: i32, pointer: u32) -> GlResult<()> {
        self.set_pointer(ClientArray::PointSize, &POINT_SIZE_RULES, 1, ty, stride, pointer)
    }

    // ========================================================================
    // Current values
    // ========================================================================

    pub fn color4f(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        let color = Vec4::new(red, green, blue, alpha);
        self.state.current.color = color;
        self.batch().push_vec4(vertex_data4f(SLOT_DIFFUSE), color);
    }

    pub fn color4ub(&mut self, red: u8, green: u8, blue: u8, alpha: u8) {
        let [r, g, b, a] = [red, green, blue, alpha].map(|c| c as f32 / 255.0);
        self.color4f(r, g, b, a);
    }

    pub fn color4x(&mut self, red: GLfixed, green: GLfixed, blue: GLfixed, alpha: GLfixed) {
        let [r, g, b, a] = [red, green, blue, alpha].map(fixed_to_float);
        self.color4f(r, g, b, a);
    }

    pub fn normal3f(&mut self, x: f32, y: f32, z: f32) {
        let normal = Vec3::new(x, y, z);
        self.state.current.normal = normal;
        self.batch().push_vec4(vertex_data4f(SLOT_NORMAL), normal.extend(0.0));
    }

    pub fn normal3x(&mut self, x: GLfixed, y: GLfixed, z: GLfixed) {
        self.normal3f(fixed_to_float(x), fixed_to_float(y), fixed_to_float(z));
    }

    /// The value reaches the hardware with the next array flush, once the
    /// unit's stage slot is known.
    pub fn multi_tex_coord4f(&mut self, target: GLenum, s: f32, t: f32, r: f32, q: f32) -> GlResult<()> {
        let Some(unit) = target
            .checked_sub(gl::TEXTURE0)
            .map(|u| u as usize)
            .filter(|&u| u < self.state.current.texcoords.len())
        else {
            return self.fail("glMultiTexCoord4f", GlError::InvalidEnum);
        };
        self.state.current.texcoords[unit] = Vec4::new(s, t, r, q);
        self.state.arrays.texcoords[unit].dirty = true;
        Ok(())
    }

    pub fn multi_tex_coord4x(
        &mut self,
        target: GLenum,
        s: GLfixed,
        t: GLfixed,
        r: GLfixed,
        q: GLfixed,
    ) -> GlResult<()> {
        let [s, t, r, q] = [s, t, r, q].map(fixed_to_float);
        self.multi_tex_coord4f(target, s, t, r, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_rules() {
        assert_eq!(
            VERTEX_RULES.validate(3, gl::FLOAT, 0),
            Ok((3, ArrayType::Float))
        );
        assert_eq!(VERTEX_RULES.validate(1, gl::FLOAT, 0), Err(GlError::InvalidValue));
        assert_eq!(VERTEX_RULES.validate(3, gl::FLOAT, -4), Err(GlError::InvalidValue));
        assert_eq!(
            COLOR_RULES.validate(4, gl::SHORT, 0),
            Err(GlError::InvalidEnum)
        );
        assert_eq!(
            COLOR_RULES.validate(4, gl::UNSIGNED_BYTE, 8),
            Ok((4, ArrayType::UnsignedByte))
        );
        assert_eq!(
            POINT_SIZE_RULES.validate(1, gl::BYTE, 0),
            Err(GlError::InvalidEnum)
        );
    }
}
