//! Texture units, environments and texture objects

use glam::Vec4;
use hashbrown::HashMap;

use super::enums::{
    CombineFunc, CombineOperand, CombineSource, MagFilter, MinFilter, PixelFormat, PixelType,
    TexEnvMode, TextureWrap,
};
use crate::hw::{GpuAllocation, MAX_TEXTURE_UNITS, TextureLayout};

/// Per-unit texture environment.
#[derive(Debug, Clone, PartialEq)]
pub struct TexEnv {
    pub mode: TexEnvMode,
    pub color: Vec4,
    /// Point sprite texcoord replacement (`COORD_REPLACE_OES`)
    pub coord_replace: bool,
    pub combine_rgb: CombineFunc,
    pub combine_alpha: CombineFunc,
    pub src_rgb: [CombineSource; 3],
    pub src_alpha: [CombineSource; 3],
    pub operand_rgb: [CombineOperand; 3],
    pub operand_alpha: [CombineOperand; 3],
    /// 1, 2 or 4
    pub rgb_scale: f32,
    /// 1, 2 or 4
    pub alpha_scale: f32,
}

impl Default for TexEnv {
    fn default() -> Self {
        Self {
            mode: TexEnvMode::Modulate,
            color: Vec4::ZERO,
            coord_replace: false,
            combine_rgb: CombineFunc::Modulate,
            combine_alpha: CombineFunc::Modulate,
            src_rgb: [
                CombineSource::Texture,
                CombineSource::Previous,
                CombineSource::Constant,
            ],
            src_alpha: [
                CombineSource::Texture,
                CombineSource::Previous,
                CombineSource::Constant,
            ],
            operand_rgb: [
                CombineOperand::SrcColor,
                CombineOperand::SrcColor,
                CombineOperand::SrcAlpha,
            ],
            operand_alpha: [CombineOperand::SrcAlpha; 3],
            rgb_scale: 1.0,
            alpha_scale: 1.0,
        }
    }
}

/// Storage and layout of a specified image level 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Power-of-two storage size
    pub pot_width: u32,
    pub pot_height: u32,
    /// Destination row pitch in bytes
    pub pitch: u32,
    pub format: PixelFormat,
    pub ty: PixelType,
    pub layout: TextureLayout,
    pub allocation: GpuAllocation,
}

impl TextureImage {
    /// Texcoord scale mapping [0, 1] onto the used part of the storage.
    pub fn uv_scale(&self) -> (f32, f32) {
        (
            self.width as f32 / self.pot_width as f32,
            self.height as f32 / self.pot_height as f32,
        )
    }

    pub fn log2_size(&self) -> (u32, u32) {
        (self.pot_width.trailing_zeros(), self.pot_height.trailing_zeros())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureObject {
    pub name: u32,
    pub min_filter: MinFilter,
    pub mag_filter: MagFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
    pub generate_mipmap: bool,
    pub image: Option<TextureImage>,
    pub dirty: bool,
}

impl TextureObject {
    pub fn new(name: u32) -> Self {
        Self {
            name,
            min_filter: MinFilter::NearestMipmapLinear,
            mag_filter: MagFilter::Linear,
            wrap_s: TextureWrap::Repeat,
            wrap_t: TextureWrap::Repeat,
            generate_mipmap: false,
            image: None,
            dirty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureUnit {
    pub enabled: bool,
    /// Bound object name; 0 selects the unit's default object
    pub binding: u32,
    pub env: TexEnv,
    /// Object used while `binding == 0`
    pub default_object: TextureObject,
    pub dirty: bool,
}

impl Default for TextureUnit {
    fn default() -> Self {
        Self {
            enabled: false,
            binding: 0,
            env: TexEnv::default(),
            default_object: TextureObject::new(0),
            dirty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureState {
    pub active_unit: usize,
    pub units: [TextureUnit; MAX_TEXTURE_UNITS],
    pub objects: HashMap<u32, TextureObject>,
    next_name: u32,
}

impl Default for TextureState {
    fn default() -> Self {
        Self {
            active_unit: 0,
            units: std::array::from_fn(|_| TextureUnit::default()),
            objects: HashMap::new(),
            next_name: 1,
        }
    }
}

impl TextureState {
    /// Object bound to `unit`.
    pub fn bound(&self, unit: usize) -> &TextureObject {
        let u = &self.units[unit];
        match u.binding {
            0 => &u.default_object,
            name => self.objects.get(&name).unwrap_or(&u.default_object),
        }
    }

    pub fn bound_mut(&mut self, unit: usize) -> &mut TextureObject {
        let u = &mut self.units[unit];
        match u.binding {
            0 => &mut u.default_object,
            name => match self.objects.get_mut(&name) {
                Some(obj) => obj,
                None => &mut u.default_object,
            },
        }
    }

    /// Enabled with a specified image.
    pub fn unit_active(&self, unit: usize) -> bool {
        self.units[unit].enabled && self.bound(unit).image.is_some()
    }

    /// Hands out `count` unused names, skipping 0.
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

    pub fn any_unit_dirty(&self) -> bool {
        (0..MAX_TEXTURE_UNITS).any(|u| self.units[u].dirty || self.bound(u).dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_names_skip_zero_and_existing() {
        let mut state = TextureState::default();
        state.objects.insert(2, TextureObject::new(2));
        let names = state.gen_names(3);
        assert_eq!(names, vec![1, 3, 4]);
    }

    #[test]
    fn test_unknown_binding_falls_back_to_default_object() {
        let mut state = TextureState::default();
        state.units[1].binding = 42;
        assert_eq!(state.bound(1).name, 0);
    }

    #[test]
    fn test_unit_without_image_is_inactive() {
        let mut state = TextureState::default();
        state.units[0].enabled = true;
        assert!(!state.unit_active(0));
    }

    #[test]
    fn test_default_env_is_modulate() {
        let env = TexEnv::default();
        assert_eq!(env.mode, TexEnvMode::Modulate);
        assert_eq!(env.src_rgb[1], CombineSource::Previous);
        assert_eq!(env.operand_rgb[2], CombineOperand::SrcAlpha);
    }
}
