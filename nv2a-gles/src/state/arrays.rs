//! Vertex arrays and buffer objects

use hashbrown::HashMap;

use super::enums::{ArrayType, BufferUsage};
use crate::hw::{GpuAllocation, MAX_TEXTURE_UNITS};

#[derive(Debug, Clone, PartialEq)]
pub struct VertexArray {
    pub enabled: bool,
    pub size: u32,
    pub ty: ArrayType,
    /// Bytes; 0 means tightly packed
    pub stride: u32,
    /// Client address, or an offset when `buffer != 0`
    pub pointer: u32,
    /// Array buffer bound when the pointer was specified
    pub buffer: u32,
    pub dirty: bool,
}

impl VertexArray {
    pub fn new(size: u32, ty: ArrayType) -> Self {
        Self {
            enabled: false,
            size,
            ty,
            stride: 0,
            pointer: 0,
            buffer: 0,
            dirty: true,
        }
    }

    pub fn effective_stride(&self) -> u32 {
        if self.stride == 0 {
            self.size * self.ty.byte_size()
        } else {
            self.stride
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexArrayState {
    pub client_active_unit: usize,
    pub vertex: VertexArray,
    pub normal: VertexArray,
    pub color: VertexArray,
    pub texcoords: [VertexArray; MAX_TEXTURE_UNITS],
    pub point_size: VertexArray,
    pub array_buffer: u32,
    pub element_array_buffer: u32,
}

impl Default for VertexArrayState {
    fn default() -> Self {
        Self {
            client_active_unit: 0,
            vertex: VertexArray::new(4, ArrayType::Float),
            normal: VertexArray::new(3, ArrayType::Float),
            color: VertexArray::new(4, ArrayType::Float),
            texcoords: std::array::from_fn(|_| VertexArray::new(4, ArrayType::Float)),
            point_size: VertexArray::new(1, ArrayType::Float),
            array_buffer: 0,
            element_array_buffer: 0,
        }
    }
}

impl VertexArrayState {
    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut VertexArray> {
        [
            &mut self.vertex,
            &mut self.normal,
            &mut self.color,
            &mut self.point_size,
        ]
        .into_iter()
        .chain(self.texcoords.iter_mut())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BufferObject {
    pub size: usize,
    pub usage: BufferUsage,
    pub storage: Option<GpuAllocation>,
    /// CPU copy of the contents, read back when indices come from the buffer
    pub data: Vec<u8>,
}

impl Default for BufferObject {
    fn default() -> Self {
        Self {
            size: 0,
            usage: BufferUsage::StaticDraw,
            storage: None,
            data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BufferState {
    pub objects: HashMap<u32, BufferObject>,
    next_name: u32,
}

impl Default for BufferState {
    fn default() -> Self {
        Self {
            objects: HashMap::new(),
            next_name: 1,
        }
    }
}

impl BufferState {
    pub fn gen_names(&mut self, count: usize) -> Vec<u32> {
        let mut names = Vec::with_capacity(count);
        while names.len() < count {
            let name = self.next_name;
            self.next_name = self.next_name.wrapping_add(1).max(1);
            if !self.objects.contains_key(&name) {
                names.push(name);
            }
        }
        names
    }

    /// GPU address of `offset` inside buffer `name`.
    pub fn resolve(&self, name: u32, offset: u32) -> Option<u32> {
        let storage = self.objects.get(&name)?.storage?;
        storage.address.checked_add(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stride_is_tightly_packed() {
        let mut array = VertexArray::new(3, ArrayType::Short);
        assert_eq!(array.effective_stride(), 6);
        array.stride = 16;
        assert_eq!(array.effective_stride(), 16);
    }

    #[test]
    fn test_resolve_requires_storage() {
        let mut state = BufferState::default();
        let name = state.gen_names(1)[0];
        state.objects.insert(name, BufferObject::default());
        assert_eq!(state.resolve(name, 8), None);
        state.objects.get_mut(&name).unwrap().storage = Some(GpuAllocation {
            address: 0x1000,
            size: 64,
        });
        assert_eq!(state.resolve(name, 8), Some(0x1008));
    }
}
