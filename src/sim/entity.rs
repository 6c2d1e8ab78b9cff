//! Common state shared by every simulated object

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, intersects};

/// Arena-local entity identifier (allocation order)
pub type EntityId = u32;

/// What an entity is, for overlap queries and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Projectile,
    Goal,
    Zone,
    Wall,
}

/// A simulated box on the pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: IVec2,
    pub size: IVec2,
    alive: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: IVec2, size: IVec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            alive: true,
        }
    }

    pub fn from_rect(id: EntityId, kind: EntityKind, rect: Rect) -> Self {
        Self::new(id, kind, rect.center, rect.size)
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark for removal. Safe to call any number of times.
    pub fn despawn(&mut self) {
        self.alive = false;
    }

    /// Overlap test against another box; dead entities never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.alive && intersects(&self.bounds(), other)
    }
}

/// An immovable wall. Only ever participates in overlap queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticObstacle {
    entity: Entity,
}

impl StaticObstacle {
    pub fn new(id: EntityId, rect: Rect) -> Self {
        Self {
            entity: Entity::from_rect(id, EntityKind::Wall, rect),
        }
    }

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.entity.bounds()
    }
}

/// True if `rect` overlaps any wall in the set
pub fn touches_wall(walls: &[StaticObstacle], rect: &Rect) -> bool {
    walls.iter().any(|w| intersects(&w.bounds(), rect))
}
