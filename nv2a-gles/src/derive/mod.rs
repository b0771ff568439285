//! Equation derivation
//!
//! Pure functions turning GL state into the numbers the NV2A registers take.
//! Nothing here touches a device; the flush steps call these and push the
//! results.

mod fog;
mod lighting;
mod point;
mod transform;

pub use fog::{FogParams, fog_params};
pub use lighting::{
    DerivedLight, LOCAL_RANGE, LightClass, LightColors, SpotParams, classify_light, derive_light,
    light_colors, light_mask, material_ambient, specular_params,
};
pub use point::{PointParams, point_attenuation};
pub use transform::{
    composite, eye_direction, eye_plane, eye_position, frustum, ortho, rotation, viewport_matrix,
};
