//! Stage allocation
//!
//! Texture units, point sprites and user clip planes compete for the four
//! combiner stages. Point-sprite coordinates only exist on the last stage,
//! and clip planes need a stage of their own for texgen.

use smallvec::SmallVec;

use crate::hw::{MAX_STAGES, MAX_TEXTURE_UNITS};

/// The only stage that receives point-sprite coordinates.
pub const POINT_SPRITE_STAGE: usize = MAX_STAGES - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageOwner {
    Texture(usize),
    ClipPlanes,
    PassThrough,
}

/// A point-sprite unit that could not get [`POINT_SPRITE_STAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConflict {
    pub unit: usize,
    pub stage: usize,
    pub holder: StageOwner,
}

/// The state stage allocation depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AllocationInput {
    /// Enabled with a specified image
    pub active_units: [bool; MAX_TEXTURE_UNITS],
    pub coord_replace: [bool; MAX_TEXTURE_UNITS],
    pub point_sprite: bool,
    pub clip_planes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageAssignment {
    pub owners: [StageOwner; MAX_STAGES],
    pub conflicts: SmallVec<[StageConflict; 2]>,
    /// Clip planes were requested but no stage was free
    pub clip_planes_dropped: bool,
}

impl Default for StageAssignment {
    fn default() -> Self {
        Self {
            owners: [StageOwner::PassThrough; MAX_STAGES],
            conflicts: SmallVec::new(),
            clip_planes_dropped: false,
        }
    }
}

impl StageAssignment {
    pub fn stage_of(&self, unit: usize) -> Option<usize> {
        self.owners
            .iter()
            .position(|&o| o == StageOwner::Texture(unit))
    }

    pub fn clip_stage(&self) -> Option<usize> {
        self.owners.iter().position(|&o| o == StageOwner::ClipPlanes)
    }
}

/// Assigns every stage an owner.
///
/// 1. Point-sprite units claim [`POINT_SPRITE_STAGE`]; a unit that finds it
///    taken is reported as a conflict and allocated normally.
/// 2. Remaining active units take the lowest free stage, in unit order.
/// 3. Clip planes take the highest free stage.
/// 4. Everything left is a pass-through.
pub fn allocate_stages(input: &AllocationInput) -> StageAssignment {
    let mut owners: [Option<StageOwner>; MAX_STAGES] = [None; MAX_STAGES];
    let mut conflicts = SmallVec::new();
    let mut pending: SmallVec<[usize; MAX_TEXTURE_UNITS]> = SmallVec::new();

    for unit in (0..MAX_TEXTURE_UNITS).filter(|&u| input.active_units[u]) {
        if !(input.point_sprite && input.coord_replace[unit]) {
            pending.push(unit);
            continue;
        }
        match owners[POINT_SPRITE_STAGE] {
            None => owners[POINT_SPRITE_STAGE] = Some(StageOwner::Texture(unit)),
            Some(holder) => {
                tracing::warn!(
                    unit,
                    stage = POINT_SPRITE_STAGE,
                    ?holder,
                    "point sprite stage already taken, sprite coordinates unavailable"
                );
                conflicts.push(StageConflict {
                    unit,
                    stage: POINT_SPRITE_STAGE,
                    holder,
                });
                pending.push(unit);
            }
        }
    }

    for unit in pending {
        if let Some(slot) = owners.iter_mut().find(|o| o.is_none()) {
            *slot = Some(StageOwner::Texture(unit));
        }
    }

    let mut clip_planes_dropped = false;
    if input.clip_planes {
        match owners.iter_mut().rev().find(|o| o.is_none()) {
            Some(slot) => *slot = Some(StageOwner::ClipPlanes),
            None => {
                tracing::warn!("no free combiner stage for user clip planes, clipping disabled");
                clip_planes_dropped = true;
            }
        }
    }

    StageAssignment {
        owners: owners.map(|o| o.unwrap_or(StageOwner::PassThrough)),
        conflicts,
        clip_planes_dropped,
    }
}
