//! nv2a-gles - OpenGL ES 1.1 on the NV2A
//!
//! A fixed-function GL ES 1.1 state machine that validates GL calls, keeps
//! the GL state and lowers it to Kelvin push-buffer methods.
//!
//! # Architecture
//!
//! - [`Context`] - GL entry points, error slot and write-through registers
//! - [`state`] - GL state groups with their dirty flags
//! - [`derive`] - pure derivations (eye-space lights, fog, point attenuation)
//! - [`combiner`] - texture environments compiled to register combiners
//! - [`flush`] - deferred emission of derived state before each draw
//! - [`hw`] - method addresses, the [`Device`] boundary and a recording device
//!
//! ```
//! use nv2a_gles::{Context, ContextConfig, RecordingDevice, gl};
//!
//! let mut ctx = Context::new(RecordingDevice::new(), ContextConfig::default()).unwrap();
//! ctx.enable(gl::DEPTH_TEST).unwrap();
//! ctx.vertex_pointer(3, gl::FLOAT, 0, 0x0010_0000).unwrap();
//! ctx.enable_client_state(gl::VERTEX_ARRAY).unwrap();
//! ctx.draw_arrays(gl::TRIANGLES, 0, 3).unwrap();
//! assert!(ctx.device().is_balanced());
//! ```

pub mod combiner;
pub mod config;
pub mod context;
pub mod derive;
pub mod error;
pub mod flush;
pub mod gl;
pub mod hw;
pub mod state;

pub use config::{ConfigError, ContextConfig, DiagnosticsConfig, Limits, SurfaceConfig};
pub use context::{Context, Indices, Params, TexImage2D, Value};
pub use error::{GlError, GlResult, NO_ERROR};
pub use flush::{FlushSummary, HardwareShadow};
pub use hw::{Command, Device, GpuAllocation, RecordingDevice};
pub use state::RenderState;
