//! Passive regions that modify player movement on overlap
//!
//! Zones never block motion. Their effects compose independently:
//! push vectors of every overlapping zone are summed, invert flags are OR'd.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use super::geometry::Rect;

/// What a zone does to a player standing in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ZoneEffect {
    /// Additive displacement applied once per tick
    Push { dx: i32, dy: i32 },
    /// Swap the sign of every directional input
    Invert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    entity: Entity,
    pub effect: ZoneEffect,
}

impl Zone {
    pub fn new(id: EntityId, region: Rect, effect: ZoneEffect) -> Self {
        Self {
            entity: Entity::from_rect(id, EntityKind::Zone, region),
            effect,
        }
    }

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn region(&self) -> Rect {
        self.entity.bounds()
    }
}

/// Combined effect of every zone overlapping one box
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneInfluence {
    pub push: IVec2,
    pub invert: bool,
}

impl ZoneInfluence {
    /// Fold the effects of all zones overlapping `target`
    pub fn gather(zones: &[Zone], target: &Rect) -> Self {
        zones
            .iter()
            .filter(|z| z.entity.overlaps(target))
            .fold(Self::default(), |mut acc, z| {
                match z.effect {
                    ZoneEffect::Push { dx, dy } => acc.push += IVec2::new(dx, dy),
                    ZoneEffect::Invert => acc.invert = true,
                }
                acc
            })
    }
}
