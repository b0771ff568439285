//! In-memory device that records every push
//!
//! Used by the unit tests and by `nv2a-pbtrace` to inspect the command
//! stream without hardware.

use hashbrown::HashMap;
use smallvec::SmallVec;

use super::push_buffer::{GpuAllocation, GpuMemory, GpuStatus, PixelConversion, PushBuffer, TextureUpload};
use crate::error::{GlError, GlResult};

/// One recorded method push.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub method: u32,
    pub params: SmallVec<[u32; 4]>,
}

impl Command {
    /// Parameter `i` reinterpreted as a float.
    pub fn f32(&self, i: usize) -> f32 {
        f32::from_bits(self.params[i])
    }
}

/// A texture upload as seen by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub address: u32,
    pub width: u32,
    pub height: u32,
    pub src_pitch: u32,
    pub dst_pitch: u32,
    pub conversion: PixelConversion,
    pub bytes: usize,
}

const HEAP_BASE: u32 = 0x0010_0000;

/// Push buffer, status and memory backed by plain vectors.
#[derive(Debug)]
pub struct RecordingDevice {
    batches: Vec<Vec<Command>>,
    open: Option<Vec<Command>>,
    /// Number of `busy()` polls left that report busy
    busy_polls: u32,
    pub busy_calls: u32,
    next_address: u32,
    heap_limit: usize,
    heap_used: usize,
    memory: HashMap<u32, Vec<u8>>,
    pub uploads: Vec<RecordedUpload>,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            open: None,
            busy_polls: 0,
            busy_calls: 0,
            next_address: HEAP_BASE,
            heap_limit: 64 * 1024 * 1024,
            heap_used: 0,
            memory: HashMap::new(),
            uploads: Vec::new(),
        }
    }

    /// Caps the bytes `allocate` hands out before reporting out of memory.
    pub fn with_heap_limit(mut self, bytes: usize) -> Self {
        self.heap_limit = bytes;
        self
    }

    /// Makes the next `polls` calls to `busy()` return true.
    pub fn set_busy_polls(&mut self, polls: u32) {
        self.busy_polls = polls;
    }

    /// Closed batches, oldest first.
    pub fn batches(&self) -> &[Vec<Command>] {
        &self.batches
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.batches.iter().flatten()
    }

    pub fn command_count(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// All pushes to `method`, oldest first.
    pub fn find(&self, method: u32) -> Vec<&Command> {
        self.commands().filter(|c| c.method == method).collect()
    }

    /// Most recent push to `method`.
    pub fn last(&self, method: u32) -> Option<&Command> {
        self.commands().filter(|c| c.method == method).last()
    }

    pub fn contains(&self, method: u32) -> bool {
        self.commands().any(|c| c.method == method)
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.batches.clear();
        self.uploads.clear();
    }

    /// Bytes currently held by `allocation`.
    pub fn memory(&self, allocation: &GpuAllocation) -> Option<&[u8]> {
        self.memory.get(&allocation.address).map(Vec::as_slice)
    }

    pub fn is_balanced(&self) -> bool {
        self.open.is_none()
    }
}

impl PushBuffer for RecordingDevice {
    fn begin(&mut self) {
        debug_assert!(self.open.is_none(), "nested push buffer batch");
        self.open = Some(Vec::new());
    }

    fn push(&mut self, method: u32, params: &[u32]) {
        let command = Command {
            method,
            params: SmallVec::from_slice(params),
        };
        match self.open.as_mut() {
            Some(batch) => batch.push(command),
            None => self.batches.push(vec![command]),
        }
    }

    fn end(&mut self) {
        if let Some(batch) = self.open.take()
            && !batch.is_empty()
        {
            self.batches.push(batch);
        }
    }
}

impl GpuStatus for RecordingDevice {
    fn busy(&mut self) -> bool {
        self.busy_calls += 1;
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            true
        } else {
            false
        }
    }

    fn finished(&mut self) -> bool {
        true
    }
}

impl GpuMemory for RecordingDevice {
    fn allocate(&mut self, size: usize, align: usize) -> GlResult<GpuAllocation> {
        let align = align.max(1) as u32;
        let address = self.next_address.div_ceil(align) * align;
        if self.heap_used + size > self.heap_limit {
            return Err(GlError::OutOfMemory);
        }
        let end = u32::try_from(size)
            .ok()
            .and_then(|s| address.checked_add(s))
            .ok_or(GlError::OutOfMemory)?;
        self.next_address = end;
        self.heap_used += size;
        self.memory.insert(address, vec![0; size]);
        Ok(GpuAllocation { address, size })
    }

    fn free(&mut self, allocation: GpuAllocation) {
        if self.memory.remove(&allocation.address).is_some() {
            self.heap_used -= allocation.size;
        }
    }

    fn write(&mut self, allocation: &GpuAllocation, offset: usize, bytes: &[u8]) {
        if let Some(mem) = self.memory.get_mut(&allocation.address) {
            let end = (offset + bytes.len()).min(mem.len());
            if offset < end {
                mem[offset..end].copy_from_slice(&bytes[..end - offset]);
            }
        }
    }

    fn upload_texture(&mut self, allocation: &GpuAllocation, upload: &TextureUpload<'_>) {
        self.uploads.push(RecordedUpload {
            address: allocation.address,
            width: upload.width,
            height: upload.height,
            src_pitch: upload.src_pitch,
            dst_pitch: upload.dst_pitch,
            conversion: upload.conversion,
            bytes: upload.data.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw::Batch;

    #[test]
    fn test_batch_groups_pushes() {
        let mut dev = RecordingDevice::new();
        {
            let mut batch = Batch::new(&mut dev);
            batch.push1(0x100, 1);
            batch.push_f32(0x104, 2.0);
        }
        assert!(dev.is_balanced());
        assert_eq!(dev.batches().len(), 1);
        assert_eq!(dev.last(0x104).unwrap().f32(0), 2.0);
    }

    #[test]
    fn test_empty_batch_is_not_recorded() {
        let mut dev = RecordingDevice::new();
        drop(Batch::new(&mut dev));
        assert_eq!(dev.command_count(), 0);
    }

    #[test]
    fn test_allocations_are_aligned_and_distinct() {
        let mut dev = RecordingDevice::new();
        let a = dev.allocate(10, 4).unwrap();
        let b = dev.allocate(16, 64).unwrap();
        assert_eq!(b.address % 64, 0);
        assert!(b.address >= a.address + 10);
    }

    #[test]
    fn test_heap_limit_reports_out_of_memory() {
        let mut dev = RecordingDevice::new().with_heap_limit(32);
        let a = dev.allocate(24, 4).unwrap();
        assert_eq!(dev.allocate(16, 4), Err(GlError::OutOfMemory));
        dev.free(a);
        assert!(dev.allocate(16, 4).is_ok());
    }

    #[test]
    fn test_write_lands_in_allocation() {
        let mut dev = RecordingDevice::new();
        let a = dev.allocate(8, 4).unwrap();
        dev.write(&a, 2, &[1, 2, 3]);
        assert_eq!(dev.memory(&a).unwrap(), &[0, 0, 1, 2, 3, 0, 0, 0]);
    }
}
