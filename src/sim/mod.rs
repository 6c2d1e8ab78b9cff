//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`tick`] is one step)
//! - Seeded RNG only, owned by the active arena
//! - Stable iteration order (layout order, then spawn order)
//! - No rendering, audio or input-device dependencies

pub mod arena;
pub mod campaign;
pub mod entity;
pub mod geometry;
pub mod pattern;
pub mod player;
pub mod projectile;
pub mod tick;
pub mod zone;

pub use arena::Arena;
pub use campaign::{Campaign, CampaignPhase};
pub use entity::{Entity, EntityId, EntityKind, StaticObstacle};
pub use geometry::{Rect, WorldBounds, intersects};
pub use pattern::{Axis, Obstacle, ObstaclePattern, PatternSpec};
pub use player::{PlayerController, PlayerReport};
pub use projectile::{Direction, Projectile};
pub use tick::{ScriptStep, TickInput, TickOutcome, Transition, expand_script, load_script, tick};
pub use zone::{Zone, ZoneEffect, ZoneInfluence};
