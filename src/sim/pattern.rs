//! Obstacle motion patterns
//!
//! Each obstacle owns exactly one pattern. A pattern mutates only its own
//! entity and its own state, once per tick, and leaves the entity consistent
//! with its boundary rule (reflect, clamp, wrap, or nothing for stationary
//! kinds).

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, StaticObstacle, touches_wall};
use super::geometry::WorldBounds;
use super::projectile::{Direction, ProjectileSpawn};

/// Patrol speed range used when a layout asks for a random speed
pub const RANDOM_PATROL_SPEED: std::ops::RangeInclusive<i32> = 1..=5;
pub const DEFAULT_WANDER_STEP: i32 = 2;
pub const DEFAULT_WANDER_EDGE_MARGIN: i32 = 5;
pub const DEFAULT_CHASE_STEP: i32 = 1;
pub const DEFAULT_WRAP_SPEED: i32 = 3;
pub const DEFAULT_EMIT_COOLDOWN: i32 = 60;
pub const DEFAULT_EMIT_JITTER: i32 = 30;

/// Movement axis for patrols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn unit(self) -> IVec2 {
        match self {
            Axis::Horizontal => IVec2::X,
            Axis::Vertical => IVec2::Y,
        }
    }

    #[inline]
    fn get(self, pos: IVec2) -> i32 {
        match self {
            Axis::Horizontal => pos.x,
            Axis::Vertical => pos.y,
        }
    }

    #[inline]
    fn set(self, pos: &mut IVec2, value: i32) {
        match self {
            Axis::Horizontal => pos.x = value,
            Axis::Vertical => pos.y = value,
        }
    }

    fn extent(self, world: WorldBounds) -> i32 {
        match self {
            Axis::Horizontal => world.width,
            Axis::Vertical => world.height,
        }
    }
}

fn default_wander_step() -> i32 {
    DEFAULT_WANDER_STEP
}

fn default_wander_margin() -> i32 {
    DEFAULT_WANDER_EDGE_MARGIN
}

fn default_chase_step() -> i32 {
    DEFAULT_CHASE_STEP
}

fn default_wrap_speed() -> i32 {
    DEFAULT_WRAP_SPEED
}

fn default_emit_cooldown() -> i32 {
    DEFAULT_EMIT_COOLDOWN
}

fn default_emit_jitter() -> i32 {
    DEFAULT_EMIT_JITTER
}

/// Declarative pattern parameters, as authored in a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum PatternSpec {
    /// Pace between `min` and `max` on one axis. Speed 0 picks a random speed.
    Patrol {
        axis: Axis,
        min: i32,
        max: i32,
        #[serde(default)]
        speed: i32,
    },
    /// Grow and shrink in place between two sizes
    Pulse {
        min_size: i32,
        max_size: i32,
        delta: i32,
    },
    /// Random axis step each tick
    Wander {
        #[serde(default = "default_wander_step")]
        step: i32,
        #[serde(default = "default_wander_margin")]
        edge_margin: i32,
    },
    /// Step toward the player on both axes
    Chase {
        #[serde(default = "default_chase_step")]
        step: i32,
    },
    /// Fixed random heading, wraps at world edges
    TeleportWrap {
        #[serde(default = "default_wrap_speed")]
        speed: i32,
    },
    /// Stationary shooter
    Emitter {
        direction: Direction,
        #[serde(default = "default_emit_cooldown")]
        base_cooldown: i32,
        #[serde(default = "default_emit_jitter")]
        jitter: i32,
    },
}

impl PatternSpec {
    pub fn name(&self) -> &'static str {
        match self {
            PatternSpec::Patrol { .. } => "patrol",
            PatternSpec::Pulse { .. } => "pulse",
            PatternSpec::Wander { .. } => "wander",
            PatternSpec::Chase { .. } => "chase",
            PatternSpec::TeleportWrap { .. } => "teleport_wrap",
            PatternSpec::Emitter { .. } => "emitter",
        }
    }

    /// Largest footprint an obstacle authored at `size` reaches over its life
    pub fn largest_size(&self, size: IVec2) -> IVec2 {
        match *self {
            PatternSpec::Pulse { max_size, .. } => size.max(pulse_size(size, max_size)),
            _ => size,
        }
    }

    /// Parameter sanity check against the world the obstacle will live in
    pub fn check(&self, world: WorldBounds) -> Result<(), String> {
        match *self {
            PatternSpec::Patrol {
                axis,
                min,
                max,
                speed,
            } => {
                if min > max {
                    return Err(format!("min {min} exceeds max {max}"));
                }
                let extent = axis.extent(world);
                if min < 0 || max >= extent {
                    return Err(format!("range [{min}, {max}] leaves the world (0..{extent})"));
                }
                if speed < 0 {
                    return Err(format!("speed {speed} is negative"));
                }
            }
            PatternSpec::Pulse {
                min_size,
                max_size,
                delta,
            } => {
                if min_size <= 0 || min_size > max_size {
                    return Err(format!("size range [{min_size}, {max_size}] is empty"));
                }
                if delta == 0 {
                    return Err("delta must be non-zero".to_string());
                }
            }
            PatternSpec::Wander { step, edge_margin } => {
                if step <= 0 || edge_margin < 0 {
                    return Err(format!("step {step} / margin {edge_margin} out of range"));
                }
            }
            PatternSpec::Chase { step } => {
                if step <= 0 {
                    return Err(format!("step {step} must be positive"));
                }
            }
            PatternSpec::TeleportWrap { speed } => {
                if speed <= 0 {
                    return Err(format!("speed {speed} must be positive"));
                }
            }
            PatternSpec::Emitter {
                base_cooldown,
                jitter,
                ..
            } => {
                if base_cooldown <= 0 || jitter < 0 {
                    return Err(format!("cooldown {base_cooldown} + jitter {jitter} out of range"));
                }
            }
        }
        Ok(())
    }
}

/// Size of a pulse obstacle, always derived from the untouched reference shape
#[inline]
pub fn pulse_size(reference: IVec2, current: i32) -> IVec2 {
    let longest = reference.max_element().max(1);
    (reference * current / longest).max(IVec2::ONE)
}

/// Per-obstacle runtime state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePattern {
    Patrol {
        axis: Axis,
        min: i32,
        max: i32,
        /// Signed speed along `axis`
        velocity: i32,
    },
    Pulse {
        min_size: i32,
        max_size: i32,
        delta: i32,
        current: i32,
        reference: IVec2,
    },
    Wander {
        step: i32,
        edge_margin: i32,
    },
    Chase {
        step: i32,
    },
    TeleportWrap {
        velocity: IVec2,
    },
    Emitter {
        direction: Direction,
        cooldown: i32,
        base_cooldown: i32,
        jitter: i32,
    },
}

/// Everything a pattern may look at during its update
pub struct PatternContext<'a> {
    pub walls: &'a [StaticObstacle],
    pub world: WorldBounds,
    pub player_pos: IVec2,
    pub rng: &'a mut Pcg32,
}

impl ObstaclePattern {
    /// Instantiate runtime state from authored parameters. `reference` is the authored size.
    pub fn spawn(spec: &PatternSpec, reference: IVec2, rng: &mut Pcg32) -> Self {
        match *spec {
            PatternSpec::Patrol {
                axis,
                min,
                max,
                speed,
            } => {
                let velocity = if speed == 0 {
                    rng.random_range(RANDOM_PATROL_SPEED)
                } else {
                    speed
                };
                ObstaclePattern::Patrol {
                    axis,
                    min,
                    max,
                    velocity,
                }
            }
            PatternSpec::Pulse {
                min_size,
                max_size,
                delta,
            } => ObstaclePattern::Pulse {
                min_size,
                max_size,
                delta,
                current: min_size,
                reference,
            },
            PatternSpec::Wander { step, edge_margin } => {
                ObstaclePattern::Wander { step, edge_margin }
            }
            PatternSpec::Chase { step } => ObstaclePattern::Chase { step },
            PatternSpec::TeleportWrap { speed } => {
                let mut heading = IVec2::new(rng.random_range(-1..=1), rng.random_range(-1..=1));
                if heading == IVec2::ZERO {
                    heading = IVec2::X;
                }
                ObstaclePattern::TeleportWrap {
                    velocity: heading * speed,
                }
            }
            PatternSpec::Emitter {
                direction,
                base_cooldown,
                jitter,
            } => ObstaclePattern::Emitter {
                direction,
                cooldown: 0,
                base_cooldown,
                jitter,
            },
        }
    }

    /// Size the entity should have right after spawning
    pub fn initial_size(&self, authored: IVec2) -> IVec2 {
        match *self {
            ObstaclePattern::Pulse {
                current, reference, ..
            } => pulse_size(reference, current),
            _ => authored,
        }
    }

    /// Advance one tick. Emitters may request a projectile.
    pub fn update(&mut self, entity: &mut Entity, ctx: &mut PatternContext<'_>) -> Option<ProjectileSpawn> {
        match self {
            ObstaclePattern::Patrol {
                axis,
                min,
                max,
                velocity,
            } => {
                let old = entity.pos;
                let heading = velocity.signum();
                // Turn where the box meets the world edge if that comes first
                let (lo, hi) = ctx.world.center_range(entity.size);
                let low = (*min).max(axis.get(lo));
                let high = (*max).min(axis.get(hi)).max(low);
                entity.pos = ctx.world.clamp_box(old + axis.unit() * *velocity, entity.size);

                if axis.get(entity.pos) <= low {
                    axis.set(&mut entity.pos, low);
                    *velocity = velocity.abs();
                }
                if axis.get(entity.pos) >= high {
                    axis.set(&mut entity.pos, high);
                    *velocity = -velocity.abs();
                }
                // Wall contact: back to the pre-move cell, heading away from the wall
                if touches_wall(ctx.walls, &entity.bounds()) {
                    entity.pos = old;
                    *velocity = -heading * velocity.abs();
                }
                None
            }
            ObstaclePattern::Pulse {
                min_size,
                max_size,
                delta,
                current,
                reference,
            } => {
                *current += *delta;
                if *current >= *max_size {
                    *current = *max_size;
                    *delta = -delta.abs();
                }
                if *current <= *min_size {
                    *current = *min_size;
                    *delta = delta.abs();
                }
                entity.size = pulse_size(*reference, *current);
                None
            }
            ObstaclePattern::Wander { step, edge_margin } => {
                let old = entity.pos;
                let heading = Direction::ALL[ctx.rng.random_range(0..Direction::ALL.len())];
                entity.pos = ctx.world.clamp_box(old + heading.unit() * *step, entity.size);

                let bounds = entity.bounds();
                if touches_wall(ctx.walls, &bounds) || ctx.world.near_edge(&bounds, *edge_margin) {
                    entity.pos = old;
                }
                None
            }
            ObstaclePattern::Chase { step } => {
                let old = entity.pos;
                let toward = (ctx.player_pos - old).signum() * *step;
                entity.pos = ctx.world.clamp_box(old + toward, entity.size);

                if touches_wall(ctx.walls, &entity.bounds()) {
                    entity.pos = old;
                }
                None
            }
            ObstaclePattern::TeleportWrap { velocity } => {
                let mut next = entity.pos + *velocity;
                let last = ctx.world.last_cell();
                wrap_axis(&mut next.x, velocity.x, last.x);
                wrap_axis(&mut next.y, velocity.y, last.y);
                entity.pos = next;
                None
            }
            ObstaclePattern::Emitter {
                direction,
                cooldown,
                base_cooldown,
                jitter,
            } => {
                if *cooldown <= 0 {
                    let extra = if *jitter > 0 {
                        ctx.rng.random_range(0..*jitter)
                    } else {
                        0
                    };
                    *cooldown = *base_cooldown + extra;
                    Some(ProjectileSpawn {
                        pos: entity.pos,
                        direction: *direction,
                    })
                } else {
                    *cooldown -= 1;
                    None
                }
            }
        }
    }
}

/// Reaching or passing an edge in the direction of travel lands on the
/// opposite side, one cell in so the next tick does not trigger again.
#[inline]
fn wrap_axis(coord: &mut i32, velocity: i32, last: i32) {
    if velocity < 0 && *coord <= 0 {
        *coord = last;
    } else if velocity > 0 && *coord >= last {
        *coord = 1;
    }
}

/// An obstacle entity driven by its pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub entity: Entity,
    pub pattern: ObstaclePattern,
}

impl Obstacle {
    pub fn new(id: EntityId, pos: IVec2, size: IVec2, spec: &PatternSpec, rng: &mut Pcg32) -> Self {
        let pattern = ObstaclePattern::spawn(spec, size, rng);
        let size = pattern.initial_size(size);
        Self {
            entity: Entity::new(id, EntityKind::Obstacle, pos, size),
            pattern,
        }
    }

    #[inline]
    pub fn update(&mut self, ctx: &mut PatternContext<'_>) -> Option<ProjectileSpawn> {
        self.pattern.update(&mut self.entity, ctx)
    }
}
