//! `glDrawArrays` and `glDrawElements`
//!
//! Both calls flush pending derived state exactly once, then bracket the
//! vertex stream with `BEGIN_END`. Array draws are sent as runs of up to 256
//! consecutive vertices; indexed draws as packed 16-bit index pairs, with a
//! trailing odd index or 32-bit indices going through `ARRAY_ELEMENT32`.

use smallvec::SmallVec;

use super::Context;
use crate::error::{GlError, GlResult};
use crate::gl::GLenum;
use crate::hw::methods::{
    ARRAY_ELEMENT16, ARRAY_ELEMENT32, BEGIN_END, DRAW_ARRAYS, DRAW_ARRAYS_COUNT_SHIFT,
    DRAW_ARRAYS_MAX_BATCH, DRAW_ARRAYS_MAX_VERTICES, PRIM_END,
};
use crate::hw::{Batch, Device, PushBuffer};
use crate::state::enums::{IndexType, Primitive};

/// Parameter words one method header can carry.
const MAX_METHOD_WORDS: usize = 2047;

/// Where `draw_elements` reads its indices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indices<'a> {
    /// Little-endian index data in client memory
    Client(&'a [u8]),
    /// Byte offset into the bound element array buffer
    Buffer(usize),
}

/// Index data after validation, widened to what the hardware takes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IndexStream {
    Short(Vec<u16>),
    Int(Vec<u32>),
}

impl IndexStream {
    fn decode(ty: IndexType, bytes: &[u8], count: usize) -> Option<Self> {
        let size = match ty {
            IndexType::UnsignedByte => 1,
            IndexType::UnsignedShort => 2,
            IndexType::UnsignedInt => 4,
        };
        let bytes = bytes.get(..count.checked_mul(size)?)?;
        Some(match ty {
            IndexType::UnsignedByte => Self::Short(bytes.iter().map(|&b| b as u16).collect()),
            IndexType::UnsignedShort => Self::Short(
                bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            IndexType::UnsignedInt => Self::Int(
                bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
        })
    }
}

/// `DRAW_ARRAYS` words covering `count` vertices from `first`.
fn draw_arrays_words(first: u32, count: u32) -> SmallVec<[u32; 8]> {
    let mut words = SmallVec::new();
    let mut start = first;
    let end = first + count;
    while start < end {
        let run = (end - start).min(DRAW_ARRAYS_MAX_BATCH);
        words.push(((run - 1) << DRAW_ARRAYS_COUNT_SHIFT) | start);
        start += run;
    }
    words
}

fn push_chunked<P: PushBuffer + ?Sized>(batch: &mut Batch<'_, P>, method: u32, words: &[u32]) {
    for chunk in words.chunks(MAX_METHOD_WORDS) {
        batch.push(method, chunk);
    }
}

fn push_indices<P: PushBuffer + ?Sized>(batch: &mut Batch<'_, P>, stream: &IndexStream) {
    match stream {
        IndexStream::Short(indices) => {
            let pairs = indices.chunks_exact(2);
            let tail = pairs.remainder().first().copied();
            let words: Vec<u32> = pairs
                .map(|p| p[0] as u32 | (p[1] as u32) << 16)
                .collect();
            push_chunked(batch, ARRAY_ELEMENT16, &words);
            if let Some(last) = tail {
                batch.push1(ARRAY_ELEMENT32, last as u32);
            }
        }
        IndexStream::Int(indices) => push_chunked(batch, ARRAY_ELEMENT32, indices),
    }
}

impl<D: Device> Context<D> {
    pub fn draw_arrays(&mut self, mode: GLenum, first: i32, count: i32) -> GlResult<()> {
        const OP: &str = "glDrawArrays";
        let Some(prim) = Primitive::from_gl(mode) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        if first < 0 || count < 0 {
            return self.fail(OP, GlError::InvalidValue);
        }
        if count == 0 {
            return Ok(());
        }
        if first as u64 + count as u64 > DRAW_ARRAYS_MAX_VERTICES {
            tracing::warn!(first, count, "vertex range exceeds the draw arrays start field");
            return self.fail(OP, GlError::InvalidValue);
        }
        if !self.state.arrays.vertex.enabled {
            tracing::warn!(first, count, "vertex array disabled, draw skipped");
            return Ok(());
        }

        self.flush_state();
        let words = draw_arrays_words(first as u32, count as u32);
        tracing::trace!(?prim, first, count, "draw arrays");

        let mut b = Batch::new(&mut self.device);
        b.push1(BEGIN_END, prim.to_hw());
        push_chunked(&mut b, DRAW_ARRAYS, &words);
        b.push1(BEGIN_END, PRIM_END);
        Ok(())
    }

    pub fn draw_elements(
        &mut self,
        mode: GLenum,
        count: i32,
        ty: GLenum,
        indices: Indices<'_>,
    ) -> GlResult<()> {
        const OP: &str = "glDrawElements";
        let (Some(prim), Some(ty)) = (Primitive::from_gl(mode), IndexType::from_gl(ty)) else {
            return self.fail(OP, GlError::InvalidEnum);
        };
        if count < 0 {
            return self.fail(OP, GlError::InvalidValue);
        }
        if count == 0 {
            return Ok(());
        }

        let bytes = match indices {
            Indices::Client(bytes) => Some(bytes),
            Indices::Buffer(offset) => {
                let name = self.state.arrays.element_array_buffer;
                let Some(buffer) = self.state.buffers.objects.get(&name).filter(|_| name != 0)
                else {
                    return self.fail(OP, GlError::InvalidOperation);
                };
                buffer.data.get(offset..)
            }
        };
        let Some(stream) = bytes.and_then(|b| IndexStream::decode(ty, b, count as usize)) else {
            return self.fail(OP, GlError::InvalidValue);
        };

        self.flush_state();
        tracing::trace!(?prim, count, ?ty, "draw elements");

        let mut b = Batch::new(&mut self.device);
        b.push1(BEGIN_END, prim.to_hw());
        push_indices(&mut b, &stream);
        b.push1(BEGIN_END, PRIM_END);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::RecordingDevice;

    #[test]
    fn test_draw_arrays_words_split_at_256() {
        assert_eq!(draw_arrays_words(0, 3).as_slice(), &[2 << 24]);
        assert_eq!(
            draw_arrays_words(10, 300).as_slice(),
            &[(255 << 24) | 10, (43 << 24) | 266]
        );
        assert!(draw_arrays_words(5, 0).is_empty());
    }

    #[test]
    fn test_decode_widens_bytes() {
        let stream = IndexStream::decode(IndexType::UnsignedByte, &[1, 2, 3], 3);
        assert_eq!(stream, Some(IndexStream::Short(vec![1, 2, 3])));
        assert_eq!(IndexStream::decode(IndexType::UnsignedShort, &[1, 0, 2], 2), None);
    }

    #[test]
    fn test_odd_short_tail_uses_32_bit_method() {
        let mut device = RecordingDevice::new();
        {
            let mut b = Batch::new(&mut device);
            push_indices(&mut b, &IndexStream::Short(vec![0, 1, 2]));
        }
        assert_eq!(device.last(ARRAY_ELEMENT16).unwrap().params.as_slice(), &[1 << 16]);
        assert_eq!(device.last(ARRAY_ELEMENT32).unwrap().params.as_slice(), &[2]);
    }
}
