//! GL ES 1.1 context
//!
//! [`Context`] owns the state store, the device and the sticky error slot.
//! Every entry point validates its arguments before touching anything; a
//! rejected call records its error and leaves state as it was.
//!
//! State with a derivation (transform, lighting, fog, textures, point
//! parameters, vertex arrays) is only marked dirty here and reaches the
//! device through [`crate::flush`] right before a draw. Flat state that maps
//! one-to-one onto a register is written through immediately.
//!
//! The entry points are split by state group:
//! - `core`: enables, errors, strings, hints, finish
//! - `transform`: matrix stacks, viewport, depth range, clip planes
//! - `lighting`, `fog`, `texture`, `raster`, `pixel_ops`, `framebuffer`
//! - `arrays`, `buffers`, `draw`
//! - `query`: `glGet*`

use crate::config::{ConfigError, ContextConfig};
use crate::error::{ErrorSlot, GlError, GlResult};
use crate::flush::{FlushSummary, HardwareShadow, flush_state_change};
use crate::hw::{Batch, Device};
use crate::state::RenderState;

mod arrays;
mod buffers;
mod core;
mod draw;
mod fog;
mod framebuffer;
mod lighting;
mod pixel_ops;
mod query;
mod raster;
mod texture;
mod transform;

#[cfg(test)]
mod tests;

pub use draw::Indices;
pub use lighting::Params;
pub use query::Value;
pub use texture::TexImage2D;

/// A GL ES 1.1 rendering context on top of an NV2A device.
pub struct Context<D: Device> {
    state: RenderState,
    device: D,
    errors: ErrorSlot,
    config: ContextConfig,
    shadow: HardwareShadow,
}

impl<D: Device> Context<D> {
    /// Builds a context with GL default state and programs the hardware to
    /// match it.
    pub fn new(device: D, config: ContextConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut ctx = Self {
            state: RenderState::new(&config),
            device,
            errors: ErrorSlot::default(),
            config,
            shadow: HardwareShadow::default(),
        };
        ctx.init_hardware();
        ctx.flush_state();
        tracing::info!(
            width = ctx.config.surface.width,
            height = ctx.config.surface.height,
            "context created"
        );
        Ok(ctx)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consumes the context, handing back its device.
    pub fn into_device(self) -> D {
        self.device
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Values last written by the flush steps.
    pub fn hardware_shadow(&self) -> &HardwareShadow {
        &self.shadow
    }

    /// Emits all pending derived state. Draw calls do this on their own.
    pub fn flush_state(&mut self) -> FlushSummary {
        let depth_max = self.config.limits.depth_buffer_max as f32;
        flush_state_change(&mut self.state, &mut self.shadow, &mut self.device, depth_max)
    }

    /// Records `err` for `op` and returns it.
    fn fail<T>(&mut self, op: &'static str, err: GlError) -> GlResult<T> {
        let stored = self.errors.record(err);
        if self.config.diagnostics.log_errors {
            tracing::debug!(op, %err, stored, "gl error");
        }
        Err(err)
    }

    /// Records the error of a failed validation step.
    fn check<T>(&mut self, op: &'static str, result: GlResult<T>) -> GlResult<T> {
        match result {
            Ok(v) => Ok(v),
            Err(err) => self.fail(op, err),
        }
    }

    /// Opens a batch for write-through registers.
    fn batch(&mut self) -> Batch<'_, D> {
        Batch::new(&mut self.device)
    }
}
