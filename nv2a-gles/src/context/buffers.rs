//! Vertex and index buffer objects

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::{self, GLenum};
use crate::hw::Device;
use crate::state::BufferObject;
use crate::state::enums::{BufferTarget, BufferUsage};

const BUFFER_ALIGNMENT: usize = 0x1000;

impl<D: Device> Context<D> {
    fn binding(&self, target: BufferTarget) -> u32 {
        match target {
            BufferTarget::Array => self.state.arrays.array_buffer,
            BufferTarget::ElementArray => self.state.arrays.element_array_buffer,
        }
    }

    /// Name bound to a valid target, or the error to report.
    fn bound_buffer(&self, target: GLenum) -> GlResult<u32> {
        let target = BufferTarget::from_gl(target).ok_or(GlError::InvalidEnum)?;
        match self.binding(target) {
            0 => Err(GlError::InvalidOperation),
            name => Ok(name),
        }
    }

    /// Arrays sourcing from `name` re-resolve their offset on the next flush.
    fn touch_arrays_using(&mut self, name: u32) {
        for array in self.state.arrays.all_mut() {
            if array.buffer == name {
                array.dirty = true;
            }
        }
    }

    pub fn gen_buffers(&mut self, n: i32) -> GlResult<Vec<u32>> {
        if n < 0 {
            return self.fail("glGenBuffers", GlError::InvalidValue);
        }
        Ok(self.state.buffers.gen_names(n as usize))
    }

    /// Binds `name`, creating an empty object on first use.
    pub fn bind_buffer(&mut self, target: GLenum, name: u32) -> GlResult<()> {
        let Some(target) = BufferTarget::from_gl(target) else {
            return self.fail("glBindBuffer", GlError::InvalidEnum);
        };
        if name != 0 {
            self.state.buffers.objects.entry(name).or_default();
        }
        let a = &mut self.state.arrays;
        match target {
            BufferTarget::Array => a.array_buffer = name,
            BufferTarget::ElementArray => a.element_array_buffer = name,
        }
        Ok(())
    }

    /// Frees storage and resets every binding and array attachment of the
    /// deleted names to 0.
    pub fn delete_buffers(&mut self, names: &[u32]) {
        for &name in names {
            if name == 0 {
                continue;
            }
            let Some(object) = self.state.buffers.objects.remove(&name) else {
                continue;
            };
            if let Some(storage) = object.storage {
                self.device.free(storage);
            }
            let a = &mut self.state.arrays;
            if a.array_buffer == name {
                a.array_buffer = 0;
            }
            if a.element_array_buffer == name {
                a.element_array_buffer = 0;
            }
            for array in a.all_mut() {
                if array.buffer == name {
                    array.buffer = 0;
                    array.dirty = true;
                }
            }
            tracing::debug!(name, "buffer deleted");
        }
    }

    pub fn is_buffer(&self, name: u32) -> bool {
        name != 0 && self.state.buffers.objects.contains_key(&name)
    }

    /// Replaces the storage of the bound buffer. With `data == None` the new
    /// storage is zero-filled.
    pub fn buffer_data(
        &mut self,
        target: GLenum,
        size: isize,
        data: Option<&[u8]>,
        usage: GLenum,
    ) -> GlResult<()> {
        const OP: &str = "glBufferData";
        let result = self.bound_buffer(target);
        let name = self.check(OP, result)?;
        let Some(usage) = BufferUsage::from_gl(usage) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        let Ok(size) = usize::try_from(size) else {
            return self.fail(OP, GlError::InvalidValue);
        };
        if data.is_some_and(|d| d.len() < size) {
            return self.fail(OP, GlError::InvalidValue);
        }

        let storage = match size {
            0 => None,
            _ => match self.device.allocate(size, BUFFER_ALIGNMENT) {
                Ok(a) => Some(a),
                Err(err) => return self.fail(OP, err),
            },
        };
        let contents = data.map_or_else(|| vec![0; size], |d| d[..size].to_vec());
        if let Some(storage) = &storage {
            self.device.write(storage, 0, &contents);
        }

        let previous = self.state.buffers.objects.insert(
            name,
            BufferObject {
                size,
                usage,
                storage,
                data: contents,
            },
        );
        if let Some(old) = previous.and_then(|o| o.storage) {
            self.device.free(old);
        }
        self.touch_arrays_using(name);
        tracing::debug!(name, size, ?usage, "buffer storage specified");
        Ok(())
    }

    pub fn buffer_sub_data(&mut self, target: GLenum, offset: isize, data: &[u8]) -> GlResult<()> {
        const OP: &str = "glBufferSubData";
        let result = self.bound_buffer(target);
        let name = self.check(OP, result)?;
        let Some(object) = self.state.buffers.objects.get_mut(&name) else {
            return self.fail(OP, GlError::InvalidOperation);
        };
        let range = usize::try_from(offset)
            .ok()
            .and_then(|start| Some(start..start.checked_add(data.len())?))
            .filter(|r| r.end <= object.size);
        let Some(range) = range else {
            return self.fail(OP, GlError::InvalidValue);
        };

        if let Some(storage) = &object.storage {
            self.device.write(storage, range.start, data);
        }
        object.data[range].copy_from_slice(data);
        Ok(())
    }

    pub fn get_buffer_parameter(&mut self, target: GLenum, pname: GLenum) -> GlResult<i32> {
        const OP: &str = "glGetBufferParameteriv";
        let result = self.bound_buffer(target);
        let name = self.check(OP, result)?;
        let object = self.state.buffers.objects.get(&name);
        let value = match pname {
            gl::BUFFER_SIZE => object.map(|o| o.size as i32),
            gl::BUFFER_USAGE => object.map(|o| o.usage.to_gl() as i32),
            _ => return self.fail(OP, GlError::InvalidEnum),
        };
        let Some(value) = value else {
            return self.fail(OP, GlError::InvalidOperation);
        };
        Ok(value)
    }
}
