//! Declarative arena descriptions
//!
//! A layout is plain data: wall rectangles, obstacle spawns, zones, the goal
//! and the player start. Layouts are validated once, before any arena is
//! built from them, so a running campaign never sees ill-formed geometry.

use std::path::Path;

use glam::IVec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::{LayoutError, LoadError};
use crate::sim::geometry::{Rect, WorldBounds, intersects};
use crate::sim::pattern::{Axis, PatternSpec};
use crate::sim::projectile::Direction;
use crate::sim::zone::ZoneEffect;

/// Default footprint of the original obstacle sprites
pub const PATROL_DOT_SIZE: i32 = 20;
pub const VERTICAL_DOT_SIZE: i32 = 36;
pub const MIN_VERTICAL_DOT_SIZE: i32 = 12;
pub const ROAMER_SIZE: i32 = 30;
pub const GOAL_SIZE: i32 = 40;
pub const PLAYER_START: IVec2 = IVec2::new(30, 30);

/// One obstacle spawn: where, how big, and how it moves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub pos: IVec2,
    pub size: IVec2,
    #[serde(flatten)]
    pub pattern: PatternSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub region: Rect,
    #[serde(flatten)]
    pub effect: ZoneEffect,
}

fn default_world() -> WorldBounds {
    WorldBounds::new(WORLD_WIDTH, WORLD_HEIGHT)
}

fn default_start() -> IVec2 {
    PLAYER_START
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaLayout {
    pub name: String,
    #[serde(default = "default_world")]
    pub world: WorldBounds,
    #[serde(default)]
    pub walls: Vec<Rect>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
    pub goal: Rect,
    #[serde(default = "default_start")]
    pub player_start: IVec2,
}

impl ArenaLayout {
    pub fn new(name: impl Into<String>, goal: Rect) -> Self {
        Self {
            name: name.into(),
            world: default_world(),
            walls: Vec::new(),
            obstacles: Vec::new(),
            zones: Vec::new(),
            goal,
            player_start: PLAYER_START,
        }
    }

    /// Wall authored by its top-left corner
    pub fn wall(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.walls.push(Rect::from_corner(x, y, width, height));
        self
    }

    pub fn obstacle(mut self, x: i32, y: i32, size: i32, pattern: PatternSpec) -> Self {
        self.obstacles.push(ObstacleSpec {
            pos: IVec2::new(x, y),
            size: IVec2::splat(size),
            pattern,
        });
        self
    }

    /// Zone authored by its center and size
    pub fn zone(mut self, x: i32, y: i32, width: i32, height: i32, effect: ZoneEffect) -> Self {
        self.zones.push(ZoneSpec {
            region: Rect::new(IVec2::new(x, y), IVec2::new(width, height)),
            effect,
        });
        self
    }

    pub fn start(mut self, x: i32, y: i32) -> Self {
        self.player_start = IVec2::new(x, y);
        self
    }

    /// Reject layouts the engine cannot run. `player_size` is the footprint
    /// the player will have in this arena.
    pub fn validate(&self, player_size: IVec2) -> Result<(), LayoutError> {
        let world = self.world;
        if world.width <= 0 || world.height <= 0 {
            return Err(LayoutError::InvalidWorld {
                arena: self.name.clone(),
                width: world.width,
                height: world.height,
            });
        }

        let check_rect = |what: &'static str, index: usize, rect: &Rect| {
            if !rect.has_area() {
                return Err(LayoutError::EmptyRect {
                    arena: self.name.clone(),
                    what,
                    index,
                    size: rect.size,
                });
            }
            if !world.contains_rect(rect) {
                return Err(LayoutError::OutOfBounds {
                    arena: self.name.clone(),
                    what,
                    index,
                    pos: rect.center,
                });
            }
            Ok(())
        };

        for (i, wall) in self.walls.iter().enumerate() {
            check_rect("wall", i, wall)?;
        }
        for (i, zone) in self.zones.iter().enumerate() {
            check_rect("zone", i, &zone.region)?;
        }
        for (i, spec) in self.obstacles.iter().enumerate() {
            check_rect("obstacle", i, &Rect::new(spec.pos, spec.size))?;
            check_rect("obstacle", i, &Rect::new(spec.pos, spec.pattern.largest_size(spec.size)))?;
            spec.pattern
                .check(world)
                .map_err(|reason| LayoutError::InvalidPattern {
                    arena: self.name.clone(),
                    index: i,
                    pattern: spec.pattern.name(),
                    reason,
                })?;
        }
        check_rect("goal", 0, &self.goal)?;

        let player = Rect::new(self.player_start, player_size);
        check_rect("player", 0, &player)?;
        if self.walls.iter().any(|w| intersects(w, &player)) {
            return Err(LayoutError::StartInWall {
                arena: self.name.clone(),
                pos: self.player_start,
            });
        }
        Ok(())
    }
}

/// Validate every arena of a campaign up front
pub fn validate_campaign(layouts: &[ArenaLayout], player_size: IVec2) -> Result<(), LayoutError> {
    if layouts.is_empty() {
        return Err(LayoutError::NoArenas);
    }
    layouts.iter().try_for_each(|l| l.validate(player_size))
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: display,
        source,
    })
}

/// Load a campaign (a JSON array of layouts) from disk
pub fn load_campaign(path: &Path, player_size: IVec2) -> Result<Vec<ArenaLayout>, LoadError> {
    let layouts: Vec<ArenaLayout> = read_json(path)?;
    validate_campaign(&layouts, player_size)?;
    log::info!("Loaded {} arenas from {}", layouts.len(), path.display());
    Ok(layouts)
}

fn patrol_x(min: i32, max: i32, speed: i32) -> PatternSpec {
    PatternSpec::Patrol {
        axis: Axis::Horizontal,
        min,
        max,
        speed,
    }
}

fn patrol_y(min: i32, max: i32, speed: i32) -> PatternSpec {
    PatternSpec::Patrol {
        axis: Axis::Vertical,
        min,
        max,
        speed,
    }
}

fn pulse(min_size: i32, max_size: i32, delta: i32) -> PatternSpec {
    PatternSpec::Pulse {
        min_size,
        max_size,
        delta,
    }
}

fn shooter(direction: Direction) -> PatternSpec {
    PatternSpec::Emitter {
        direction,
        base_cooldown: crate::sim::pattern::DEFAULT_EMIT_COOLDOWN,
        jitter: crate::sim::pattern::DEFAULT_EMIT_JITTER,
    }
}

fn goal(x: i32, y: i32) -> Rect {
    Rect::new(IVec2::new(x, y), IVec2::splat(GOAL_SIZE))
}

fn vertical_dot(size: i32) -> i32 {
    size.max(MIN_VERTICAL_DOT_SIZE)
}

/// The five stock arenas
pub fn builtin_campaign() -> Vec<ArenaLayout> {
    vec![level_one(), level_two(), level_three(), level_four(), level_five()]
}

fn level_one() -> ArenaLayout {
    // Two offset vertical walls; dots pace the middle channel at random speeds
    ArenaLayout::new("Level 1", goal(560, 360))
        .wall(100, 0, 80, 340)
        .wall(420, 60, 80, 340)
        .obstacle(250, 100, PATROL_DOT_SIZE, patrol_x(190, 410, 0))
        .obstacle(300, 160, PATROL_DOT_SIZE, patrol_x(190, 410, 0))
        .obstacle(350, 220, PATROL_DOT_SIZE, patrol_x(190, 410, 0))
        .obstacle(280, 280, PATROL_DOT_SIZE, patrol_x(190, 410, 0))
}

fn level_two() -> ArenaLayout {
    let size = vertical_dot(30);
    ArenaLayout::new("Level 2", goal(560, 360))
        .wall(0, 100, 540, 60)
        .wall(60, 260, 540, 60)
        .obstacle(200, 200, size, patrol_y(145, 255, 1))
        .obstacle(300, 200, size, patrol_y(145, 255, 2))
        .obstacle(400, 200, size, patrol_y(145, 255, 1))
        .obstacle(500, 200, size, patrol_y(145, 255, 2))
}

fn level_three() -> ArenaLayout {
    // U-shaped maze: down the left, across the bottom, up the right
    let size = vertical_dot(30);
    ArenaLayout::new("Level 3 - The Maze", goal(560, 60))
        .wall(120, 0, 40, 280)
        .wall(120, 280, 440, 40)
        .wall(400, 40, 40, 240)
        .obstacle(60, 100, PATROL_DOT_SIZE, patrol_x(10, 110, 2))
        .obstacle(60, 200, PATROL_DOT_SIZE, patrol_x(10, 110, 3))
        .obstacle(220, 340, size, patrol_y(330, 390, 2))
        .obstacle(380, 340, size, patrol_y(330, 390, 2))
        .obstacle(520, 220, 50, pulse(25, 50, 1))
        .obstacle(520, 120, 50, pulse(25, 50, 2))
}

fn level_four() -> ArenaLayout {
    const WALL: i32 = 50;
    const CORRIDOR: i32 = 130;
    // Corridor centers; the last corridor is cut short by the world edge
    let [first, second, third, fourth] = [65, 245, 425, 570];

    ArenaLayout::new("Level 4 - Wind Tunnel", goal(560, 360))
        .wall(CORRIDOR, 100, WALL, 200)
        .wall(CORRIDOR * 2 + WALL, 100, WALL, 200)
        .wall(CORRIDOR * 3 + WALL * 2, 100, WALL, 200)
        .zone(second, WORLD_HEIGHT / 2, CORRIDOR, WORLD_HEIGHT, ZoneEffect::Push { dx: -1, dy: 0 })
        .obstacle(first, 200, vertical_dot(35), patrol_y(120, 280, 2))
        .obstacle(third, 120, ROAMER_SIZE, PatternSpec::Chase { step: 1 })
        .obstacle(third, 280, ROAMER_SIZE, PatternSpec::Chase { step: 1 })
        .obstacle(fourth, 80, ROAMER_SIZE, shooter(Direction::Down))
        .obstacle(fourth, 250, PATROL_DOT_SIZE, patrol_x(fourth - 40, WORLD_WIDTH - PATROL_DOT_SIZE / 2, 3))
}

fn level_five() -> ArenaLayout {
    const WALL: i32 = 40;
    const CORRIDOR: i32 = 100;
    let [walker, striders, inverted, pulsar, last] = [50, 190, 330, 470, 580];
    let size = vertical_dot(30);

    let mut layout = ArenaLayout::new("Level 5 - Inversion Madness", goal(560, 360));
    for n in 1..=4 {
        layout = layout.wall(CORRIDOR * n + WALL * (n - 1), 80, WALL, 240);
    }
    layout
        .zone(inverted, WORLD_HEIGHT / 2, CORRIDOR, 350, ZoneEffect::Invert)
        .obstacle(walker, 200, ROAMER_SIZE, PatternSpec::Wander { step: 2, edge_margin: 5 })
        .obstacle(striders, 140, ROAMER_SIZE, PatternSpec::TeleportWrap { speed: 3 })
        .obstacle(striders, 260, ROAMER_SIZE, PatternSpec::TeleportWrap { speed: 3 })
        .obstacle(inverted, 150, size, patrol_y(100, 300, 2))
        .obstacle(inverted, 250, size, patrol_y(100, 300, 2))
        .obstacle(pulsar, 200, 50, pulse(25, 50, 2))
        .obstacle(last, 70, ROAMER_SIZE, shooter(Direction::Down))
        .obstacle(last, 250, PATROL_DOT_SIZE, patrol_x(last - 35, WORLD_WIDTH - PATROL_DOT_SIZE / 2, 3))
}
