//! Device boundary: push buffer, GPU status and GPU memory
//!
//! The state machine only ever appends method/parameter runs to a push
//! buffer. [`Batch`] brackets a run of pushes with `begin`/`end` and offers
//! typed helpers for the word layouts the NV2A expects.

use glam::{Mat4, Vec3, Vec4};

use crate::error::GlResult;

/// Append-only command sink.
pub trait PushBuffer {
    /// Opens a batch of pushes.
    fn begin(&mut self);
    /// Appends one method with its parameter words.
    fn push(&mut self, method: u32, params: &[u32]);
    /// Closes the batch opened by `begin`.
    fn end(&mut self);
}

/// GPU idle polling used by `finish`.
pub trait GpuStatus {
    /// True while the GPU is still processing.
    fn busy(&mut self) -> bool;
    /// True once the push buffer has fully drained.
    fn finished(&mut self) -> bool;
}

/// A GPU-visible allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuAllocation {
    /// GPU address of the first byte
    pub address: u32,
    pub size: usize,
}

/// Pixel repacking the device performs while uploading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelConversion {
    /// Bytes are copied as-is
    None,
    /// 3-byte RGB expanded to A8B8G8R8 with opaque alpha
    RgbToAbgr,
    /// RGBA4444 reordered to A4R4G4B4
    Rgba4444ToArgb,
    /// RGBA5551 reordered to A1R5G5B5
    Rgba5551ToArgb,
}

/// Everything the device needs to convert and swizzle one image level.
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    /// Source row pitch in bytes, already aligned to the unpack alignment
    pub src_pitch: u32,
    /// Destination row pitch in bytes (power-of-two width)
    pub dst_pitch: u32,
    pub dst_bytes_per_pixel: u32,
    pub conversion: PixelConversion,
}

/// Contiguous GPU memory.
pub trait GpuMemory {
    fn allocate(&mut self, size: usize, align: usize) -> GlResult<GpuAllocation>;
    fn free(&mut self, allocation: GpuAllocation);
    /// Copies `bytes` into `allocation` at `offset`.
    fn write(&mut self, allocation: &GpuAllocation, offset: usize, bytes: &[u8]);
    /// Converts and swizzles `upload` into `allocation`.
    fn upload_texture(&mut self, allocation: &GpuAllocation, upload: &TextureUpload<'_>);
}

/// Everything a [`crate::Context`] talks to.
pub trait Device: PushBuffer + GpuStatus + GpuMemory {}

impl<T: PushBuffer + GpuStatus + GpuMemory> Device for T {}

// ============================================================================
// Batch
// ============================================================================

/// Scoped `begin`/`end` pair over a push buffer.
pub struct Batch<'a, P: PushBuffer + ?Sized> {
    pb: &'a mut P,
}

impl<'a, P: PushBuffer + ?Sized> Batch<'a, P> {
    pub fn new(pb: &'a mut P) -> Self {
        pb.begin();
        Self { pb }
    }

    #[inline]
    pub fn push(&mut self, method: u32, params: &[u32]) {
        self.pb.push(method, params);
    }

    #[inline]
    pub fn push1(&mut self, method: u32, value: u32) {
        self.pb.push(method, &[value]);
    }

    #[inline]
    pub fn push_bool(&mut self, method: u32, value: bool) {
        self.pb.push(method, &[value as u32]);
    }

    #[inline]
    pub fn push_f32(&mut self, method: u32, value: f32) {
        self.pb.push(method, &[value.to_bits()]);
    }

    pub fn push_floats(&mut self, method: u32, values: &[f32]) {
        self.pb.push(method, bytemuck::cast_slice(values));
    }

    pub fn push_vec3(&mut self, method: u32, v: Vec3) {
        self.push_floats(method, &v.to_array());
    }

    pub fn push_vec4(&mut self, method: u32, v: Vec4) {
        self.push_floats(method, &v.to_array());
    }

    /// Pushes `m` row by row, the layout the transform registers expect.
    pub fn push_matrix(&mut self, method: u32, m: &Mat4) {
        self.push_floats(method, &m.transpose().to_cols_array());
    }

    /// Pushes `m` column by column.
    pub fn push_matrix_raw(&mut self, method: u32, m: &Mat4) {
        self.push_floats(method, &m.to_cols_array());
    }
}

impl<P: PushBuffer + ?Sized> Drop for Batch<'_, P> {
    fn drop(&mut self) {
        self.pb.end();
    }
}
