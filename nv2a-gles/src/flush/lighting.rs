//! Materials, lights and the light model

use glam::Vec3;

use super::HardwareShadow;
use crate::derive::{
    DerivedLight, LOCAL_RANGE, derive_light, light_colors, light_mask, material_ambient,
    specular_params,
};
use crate::hw::methods::{
    self, BACK_LIGHT_AMBIENT_COLOR, BACK_LIGHT_DIFFUSE_COLOR, BACK_LIGHT_SPECULAR_COLOR,
    BACK_MATERIAL_EMISSION, BACK_MATERIAL_FACTOR_ALPHA, BACK_SCENE_AMBIENT_COLOR,
    BACK_SPECULAR_PARAMS, COLOR_MATERIAL, COLOR_MATERIAL_ALL_FROM_MATERIAL,
    COLOR_MATERIAL_AMBIENT_DIFFUSE_FROM_VERTEX, LIGHT_AMBIENT_COLOR, LIGHT_DIFFUSE_COLOR,
    LIGHT_ENABLE_MASK, LIGHT_INFINITE_DIRECTION, LIGHT_INFINITE_HALF_VECTOR,
    LIGHT_LOCAL_ATTENUATION, LIGHT_LOCAL_POSITION, LIGHT_LOCAL_RANGE, LIGHT_SPECULAR_COLOR,
    LIGHT_SPOT_DIRECTION, LIGHT_SPOT_FALLOFF, MATERIAL_EMISSION, MATERIAL_FACTOR_ALPHA,
    SCENE_AMBIENT_COLOR, SPECULAR_PARAMS, TWO_SIDE_LIGHT_EN,
};
use crate::hw::{Batch, PushBuffer};
use crate::state::{LightingState, Material, RenderState};

/// Per-face register set.
struct FaceRegisters {
    scene_ambient: u32,
    emission: u32,
    factor_alpha: u32,
    specular_params: u32,
}

const FRONT: FaceRegisters = FaceRegisters {
    scene_ambient: SCENE_AMBIENT_COLOR,
    emission: MATERIAL_EMISSION,
    factor_alpha: MATERIAL_FACTOR_ALPHA,
    specular_params: SPECULAR_PARAMS,
};

const BACK: FaceRegisters = FaceRegisters {
    scene_ambient: BACK_SCENE_AMBIENT_COLOR,
    emission: BACK_MATERIAL_EMISSION,
    factor_alpha: BACK_MATERIAL_FACTOR_ALPHA,
    specular_params: BACK_SPECULAR_PARAMS,
};

pub(super) fn flush<P: PushBuffer + ?Sized>(
    state: &mut RenderState,
    shadow: &mut HardwareShadow,
    pb: &mut P,
) -> bool {
    let l = &mut state.lighting;
    if !l.any_dirty() {
        return false;
    }
    tracing::trace!(model = l.model_dirty, "flush lighting");

    let mut batch = Batch::new(pb);
    let model_dirty = l.model_dirty;
    let materials_dirty = model_dirty || l.front.dirty || l.back.dirty;

    if l.front.dirty || model_dirty {
        push_material(&mut batch, &FRONT, &l.front, l);
    }
    if l.back.dirty || model_dirty {
        push_material(&mut batch, &BACK, &l.back, l);
    }

    for (i, light) in l.lights.iter().enumerate() {
        if !light.enabled {
            continue;
        }
        if light.dirty || model_dirty {
            let derived = derive_light(light);
            if shadow.lights[i] != Some(derived) {
                let switched = shadow.lights[i]
                    .is_some_and(|prev| prev.is_directional() != derived.is_directional());
                push_derived(&mut batch, i, &derived, switched);
                shadow.lights[i] = Some(derived);
            }
        }
        if light.dirty || materials_dirty {
            let front = light_colors(light, &l.front, l.model_ambient, l.color_material);
            batch.push_vec3(methods::light(LIGHT_AMBIENT_COLOR, i), front.ambient);
            batch.push_vec3(methods::light(LIGHT_DIFFUSE_COLOR, i), front.diffuse);
            batch.push_vec3(methods::light(LIGHT_SPECULAR_COLOR, i), front.specular);
            let back = light_colors(light, &l.back, l.model_ambient, l.color_material);
            batch.push_vec3(methods::back_light(BACK_LIGHT_AMBIENT_COLOR, i), back.ambient);
            batch.push_vec3(methods::back_light(BACK_LIGHT_DIFFUSE_COLOR, i), back.diffuse);
            batch.push_vec3(methods::back_light(BACK_LIGHT_SPECULAR_COLOR, i), back.specular);
        }
    }

    let mask = light_mask(&l.lights);
    if shadow.light_mask != Some(mask) {
        batch.push1(LIGHT_ENABLE_MASK, mask);
        shadow.light_mask = Some(mask);
    }

    if model_dirty {
        batch.push_bool(TWO_SIDE_LIGHT_EN, l.two_sided);
        batch.push1(
            COLOR_MATERIAL,
            if l.color_material {
                COLOR_MATERIAL_AMBIENT_DIFFUSE_FROM_VERTEX
            } else {
                COLOR_MATERIAL_ALL_FROM_MATERIAL
            },
        );
    }

    l.model_dirty = false;
    l.front.dirty = false;
    l.back.dirty = false;
    for light in &mut l.lights {
        light.dirty = false;
    }
    true
}

fn push_material<P: PushBuffer + ?Sized>(
    batch: &mut Batch<'_, P>,
    regs: &FaceRegisters,
    material: &Material,
    l: &LightingState,
) {
    let (scene_ambient, emission) = material_ambient(material, l.model_ambient, l.color_material);
    batch.push_vec3(regs.scene_ambient, scene_ambient);
    batch.push_vec3(regs.emission, emission);
    batch.push_f32(regs.factor_alpha, material.diffuse.w);
    batch.push_floats(regs.specular_params, &specular_params(material.shininess));
}

fn push_derived<P: PushBuffer + ?Sized>(
    batch: &mut Batch<'_, P>,
    index: usize,
    derived: &DerivedLight,
    switched: bool,
) {
    let reg = |base| methods::light(base, index);
    batch.push_f32(reg(LIGHT_LOCAL_RANGE), LOCAL_RANGE);
    match derived {
        DerivedLight::Directional {
            half_vector,
            direction,
        } => {
            batch.push_vec3(reg(LIGHT_INFINITE_HALF_VECTOR), *half_vector);
            batch.push_vec3(reg(LIGHT_INFINITE_DIRECTION), *direction);
            if switched {
                batch.push_vec3(reg(LIGHT_LOCAL_POSITION), Vec3::ZERO);
                batch.push_vec3(reg(LIGHT_LOCAL_ATTENUATION), Vec3::ZERO);
            }
        }
        DerivedLight::Positional {
            position,
            attenuation,
            spot,
        } => {
            batch.push_vec3(reg(LIGHT_LOCAL_POSITION), *position);
            batch.push_vec3(reg(LIGHT_LOCAL_ATTENUATION), *attenuation);
            if let Some(spot) = spot {
                batch.push_vec3(reg(LIGHT_SPOT_FALLOFF), spot.falloff);
                batch.push_vec4(reg(LIGHT_SPOT_DIRECTION), spot.direction);
            }
            if switched {
                batch.push_vec3(reg(LIGHT_INFINITE_HALF_VECTOR), Vec3::ZERO);
                batch.push_vec3(reg(LIGHT_INFINITE_DIRECTION), Vec3::ZERO);
            }
        }
    }
}
