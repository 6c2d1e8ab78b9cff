//! Short-lived shots fired by emitter obstacles

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, StaticObstacle, touches_wall};
use super::geometry::WorldBounds;

/// Cardinal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector in screen coordinates (y grows downward)
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Request from an emitter, materialized by the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileSpawn {
    pub pos: IVec2,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub entity: Entity,
    pub vel: IVec2,
}

impl Projectile {
    pub fn new(id: EntityId, spawn: ProjectileSpawn, speed: i32, size: IVec2) -> Self {
        Self {
            entity: Entity::new(id, EntityKind::Projectile, spawn.pos, size),
            vel: spawn.direction.unit() * speed,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// Advance one tick; despawns itself on a world edge or wall contact
    pub fn update(&mut self, walls: &[StaticObstacle], world: WorldBounds) {
        if !self.is_alive() {
            return;
        }
        self.entity.pos = world.clamp_box(self.entity.pos + self.vel, self.entity.size);
        let bounds = self.entity.bounds();
        if world.at_edge(&bounds) || touches_wall(walls, &bounds) {
            self.entity.despawn();
        }
    }
}
