//! NV2A hardware boundary
//!
//! - [`methods`]: Kelvin method addresses and field encodings
//! - [`push_buffer`]: device traits and the [`Batch`] helper
//! - [`tables`]: GL enum to hardware value maps
//! - [`recording`]: in-memory device for tests and tracing

pub mod methods;
pub mod push_buffer;
pub mod recording;
pub mod tables;

pub use push_buffer::{
    Batch, Device, GpuAllocation, GpuMemory, GpuStatus, PixelConversion, PushBuffer, TextureUpload,
};
pub use recording::{Command, RecordedUpload, RecordingDevice};
pub use tables::{TextureLayout, texture_layout};

/// Hardware light slots.
pub const MAX_LIGHTS: usize = 8;
/// Register combiner / texture stages.
pub const MAX_STAGES: usize = 4;
/// GL texture units exposed; one stage stays free for clip planes.
pub const MAX_TEXTURE_UNITS: usize = 3;
pub const MAX_CLIP_PLANES: usize = 4;
