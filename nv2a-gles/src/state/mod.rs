//! State store
//!
//! One value type per GL state group, each carrying its own dirty flags.
//! Mutators in [`crate::context`] set the flags; the flush steps in
//! [`crate::flush`] consume and clear them.

pub mod arrays;
pub mod coloring;
pub mod enums;
pub mod framebuffer;
pub mod lighting;
pub mod pixel_ops;
pub mod raster;
pub mod texture;
pub mod transform;

pub use arrays::{BufferObject, BufferState, VertexArray, VertexArrayState};
pub use coloring::ColoringState;
pub use framebuffer::{ClearMask, ColorMask, CurrentValues, FramebufferState, Hints, PixelStore};
pub use lighting::{Light, LightingState, Material};
pub use pixel_ops::PixelOpsState;
pub use raster::{MultisampleState, RasterState};
pub use texture::{TexEnv, TextureImage, TextureObject, TextureState, TextureUnit};
pub use transform::{MatrixStack, TransformState};

use crate::config::ContextConfig;

/// Complete GL ES 1.1 fixed-function state.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub transform: TransformState,
    pub lighting: LightingState,
    pub coloring: ColoringState,
    pub texture: TextureState,
    pub raster: RasterState,
    pub multisample: MultisampleState,
    pub pixel_ops: PixelOpsState,
    pub framebuffer: FramebufferState,
    pub pixel_store: PixelStore,
    pub hints: Hints,
    pub current: CurrentValues,
    pub arrays: VertexArrayState,
    pub buffers: BufferState,
}

impl RenderState {
    /// Initial state for a surface of the configured size.
    pub fn new(config: &ContextConfig) -> Self {
        let surface = config.surface;
        let limits = &config.limits;
        Self {
            transform: TransformState::new(
                surface.width,
                surface.height,
                limits.max_modelview_stack,
                limits.max_projection_stack,
                limits.max_texture_stack,
            ),
            lighting: LightingState::default(),
            coloring: ColoringState::default(),
            texture: TextureState::default(),
            raster: RasterState::default(),
            multisample: MultisampleState::default(),
            pixel_ops: PixelOpsState::new(surface.width, surface.height),
            framebuffer: FramebufferState::default(),
            pixel_store: PixelStore::default(),
            hints: Hints::default(),
            current: CurrentValues::default(),
            arrays: VertexArrayState::default(),
            buffers: BufferState::default(),
        }
    }
}
