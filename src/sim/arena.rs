//! One self-contained level: walls, obstacles, zones, goal and the player
//!
//! The arena owns every live entity and the RNG that drives them. All
//! mutation happens inside [`Arena::tick`]; between ticks the arena is
//! read-only to the outside world.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityId, EntityKind, StaticObstacle};
use super::geometry::WorldBounds;
use super::pattern::{Obstacle, PatternContext};
use super::player::{PlayerController, PlayerReport, PlayerSurroundings};
use super::projectile::Projectile;
use super::tick::TickInput;
use super::zone::Zone;
use crate::error::LayoutError;
use crate::layout::ArenaLayout;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Arena {
    name: String,
    world: WorldBounds,
    walls: Vec<StaticObstacle>,
    zones: Vec<Zone>,
    /// Updated in layout order
    obstacles: Vec<Obstacle>,
    /// Updated in spawn order
    projectiles: Vec<Projectile>,
    goal: Entity,
    player: PlayerController,
    rng: Pcg32,
    projectile_speed: i32,
    projectile_size: IVec2,
    next_id: EntityId,
}

impl Arena {
    /// Validate `layout` and build a fresh arena from it
    pub fn new(layout: &ArenaLayout, settings: &Settings, seed: u64) -> Result<Self, LayoutError> {
        let settings = settings.clone().sanitized();
        layout.validate(settings.player_extent())?;
        Ok(Self::build(layout, &settings, seed))
    }

    /// Build from a layout that already passed validation
    pub(crate) fn build(layout: &ArenaLayout, settings: &Settings, seed: u64) -> Self {
        let mut arena = Self {
            name: layout.name.clone(),
            world: layout.world,
            walls: Vec::with_capacity(layout.walls.len()),
            zones: Vec::with_capacity(layout.zones.len()),
            obstacles: Vec::with_capacity(layout.obstacles.len()),
            projectiles: Vec::new(),
            goal: Entity::from_rect(0, EntityKind::Goal, layout.goal),
            player: PlayerController::new(
                0,
                layout.player_start,
                settings.player_extent(),
                settings.player_step,
                settings.max_lives,
            ),
            rng: Pcg32::seed_from_u64(seed),
            projectile_speed: settings.projectile_speed,
            projectile_size: settings.projectile_extent(),
            next_id: 1,
        };

        arena.player.entity.id = arena.next_entity_id();
        arena.goal.id = arena.next_entity_id();
        for rect in &layout.walls {
            let id = arena.next_entity_id();
            arena.walls.push(StaticObstacle::new(id, *rect));
        }
        for spec in &layout.zones {
            let id = arena.next_entity_id();
            arena.zones.push(Zone::new(id, spec.region, spec.effect));
        }
        for spec in &layout.obstacles {
            let id = arena.next_entity_id();
            let obstacle = Obstacle::new(id, spec.pos, spec.size, &spec.pattern, &mut arena.rng);
            arena.obstacles.push(obstacle);
        }
        arena
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn world(&self) -> WorldBounds {
        self.world
    }

    #[inline]
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.player.lives()
    }

    pub fn walls(&self) -> &[StaticObstacle] {
        &self.walls
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn goal(&self) -> &Entity {
        &self.goal
    }

    /// True once the player stands on the goal
    pub fn is_complete(&self) -> bool {
        self.player.entity.overlaps(&self.goal.bounds())
    }

    /// Every live entity, back to front: walls, zones, goal, obstacles,
    /// projectiles, player
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.walls
            .iter()
            .map(StaticObstacle::entity)
            .chain(self.zones.iter().map(Zone::entity))
            .chain(std::iter::once(&self.goal))
            .chain(self.obstacles.iter().map(|o| &o.entity))
            .chain(self.projectiles.iter().map(|p| &p.entity))
            .chain(std::iter::once(&self.player.entity))
            .filter(|e| e.is_alive())
    }

    /// Advance every entity by one tick. Obstacles and projectiles move
    /// first so the player always resolves against this tick's positions.
    pub fn tick(&mut self, input: &TickInput) -> PlayerReport {
        let world = self.world;

        let mut spawns = Vec::new();
        {
            let mut ctx = PatternContext {
                walls: &self.walls,
                world,
                player_pos: self.player.pos(),
                rng: &mut self.rng,
            };
            for obstacle in &mut self.obstacles {
                if let Some(spawn) = obstacle.update(&mut ctx) {
                    spawns.push(spawn);
                }
            }
        }

        for shot in &mut self.projectiles {
            shot.update(&self.walls, world);
        }

        for spawn in spawns {
            let id = self.next_entity_id();
            self.projectiles
                .push(Projectile::new(id, spawn, self.projectile_speed, self.projectile_size));
        }

        let report = self.player.resolve(
            input,
            PlayerSurroundings {
                world,
                walls: &self.walls,
                zones: &self.zones,
                obstacles: &self.obstacles,
                projectiles: &mut self.projectiles,
                goal: &self.goal.bounds(),
            },
        );

        self.projectiles.retain(Projectile::is_alive);

        if report.damaged {
            log::debug!(
                "{}: player hit, {} lives left",
                self.name,
                self.player.lives()
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::builtin_campaign;
    use crate::sim::geometry::Rect;
    use crate::sim::pattern::{Axis, PatternSpec};
    use crate::sim::projectile::Direction;
    use crate::sim::zone::ZoneEffect;

    fn corridor() -> ArenaLayout {
        ArenaLayout::new("test", Rect::new(IVec2::new(560, 360), IVec2::splat(40)))
    }

    #[test]
    fn test_build_assigns_unique_ids() {
        let layout = builtin_campaign().remove(4);
        let arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        let mut ids: Vec<EntityId> = arena.entities().map(|e| e.id).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(arena.entities().filter(|e| e.kind == EntityKind::Player).count(), 1);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let layout = corridor().wall(10, 10, 0, 10);
        assert!(Arena::new(&layout, &Settings::default(), 1).is_err());
    }

    #[test]
    fn test_unusable_settings_are_sanitized() {
        let settings = Settings {
            player_step: -4,
            max_lives: 0,
            ..Settings::default()
        };
        let mut arena = Arena::new(&corridor().start(100, 100), &settings, 1).unwrap();
        assert_eq!(arena.lives(), 1);
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        arena.tick(&input);
        assert_eq!(arena.player().pos(), IVec2::new(101, 100));
    }

    #[test]
    fn test_emitted_projectile_moves_next_tick() {
        let layout = corridor().obstacle(
            300,
            100,
            30,
            PatternSpec::Emitter {
                direction: Direction::Down,
                base_cooldown: 60,
                jitter: 0,
            },
        );
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();

        arena.tick(&TickInput::default());
        assert_eq!(arena.projectiles().len(), 1);
        assert_eq!(arena.projectiles()[0].entity.pos, IVec2::new(300, 100));

        arena.tick(&TickInput::default());
        assert_eq!(arena.projectiles()[0].entity.pos, IVec2::new(300, 105));
    }

    #[test]
    fn test_projectiles_are_purged_after_leaving() {
        let layout = corridor().obstacle(
            300,
            385,
            30,
            PatternSpec::Emitter {
                direction: Direction::Down,
                base_cooldown: 60,
                jitter: 0,
            },
        );
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        for _ in 0..5 {
            arena.tick(&TickInput::default());
        }
        assert!(arena.projectiles().is_empty());
    }

    #[test]
    fn test_projectile_hit_costs_life_and_removes_shot() {
        // Emitter right above the player fires straight down into it
        let layout = corridor().start(300, 140).obstacle(
            300,
            100,
            20,
            PatternSpec::Emitter {
                direction: Direction::Down,
                base_cooldown: 60,
                jitter: 0,
            },
        );
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        let max = arena.lives();
        let mut damaged = false;
        for _ in 0..10 {
            damaged |= arena.tick(&TickInput::default()).damaged;
        }
        assert!(damaged);
        assert_eq!(arena.lives(), max - 1);
        assert!(arena.projectiles().is_empty());
        assert_eq!(arena.player().pos(), IVec2::new(300, 140));
    }

    #[test]
    fn test_chaser_sees_player_position_from_tick_start() {
        let layout = corridor()
            .start(100, 100)
            .obstacle(200, 100, 20, PatternSpec::Chase { step: 1 });
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        arena.tick(&input);
        assert_eq!(arena.obstacles()[0].entity.pos, IVec2::new(199, 100));
        assert_eq!(arena.player().pos(), IVec2::new(103, 100));
    }

    #[test]
    fn test_patrol_in_lane_drains_lives() {
        let layout = corridor().start(150, 200).obstacle(
            100,
            200,
            20,
            PatternSpec::Patrol {
                axis: Axis::Horizontal,
                min: 100,
                max: 200,
                speed: 2,
            },
        );
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        let mut hits = 0u8;
        for _ in 0..60 {
            let report = arena.tick(&TickInput::default());
            if report.damaged {
                hits += 1;
            }
            if report.lives_exhausted {
                break;
            }
        }
        // Respawn puts the player right back into the lane, one life per tick
        assert_eq!(hits, Settings::default().max_lives);
        assert_eq!(arena.lives(), 0);
    }

    #[test]
    fn test_completion_query_follows_player() {
        let layout = ArenaLayout::new("hop", Rect::new(IVec2::new(80, 30), IVec2::splat(40)));
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        assert!(!arena.is_complete());
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        // Player spans [20, 40) and steps 3 px; the goal starts at x = 60
        let mut reached = false;
        for _ in 0..10 {
            reached = arena.tick(&input).reached_goal;
            if reached {
                break;
            }
        }
        assert!(reached);
        assert!(arena.is_complete());
        assert_eq!(arena.player().pos(), IVec2::new(51, 30));
    }

    #[test]
    fn test_wind_pushes_idle_player() {
        let layout = corridor().start(300, 200).zone(300, 200, 200, 200, ZoneEffect::Push { dx: -1, dy: 0 });
        let mut arena = Arena::new(&layout, &Settings::default(), 1).unwrap();
        for _ in 0..10 {
            arena.tick(&TickInput::default());
        }
        assert_eq!(arena.player().pos(), IVec2::new(290, 200));
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let layout = builtin_campaign().remove(4);
        let mut a = Arena::new(&layout, &Settings::default(), 99).unwrap();
        let mut b = Arena::new(&layout, &Settings::default(), 99).unwrap();
        for _ in 0..300 {
            a.tick(&TickInput::default());
            b.tick(&TickInput::default());
        }
        let pa: Vec<IVec2> = a.entities().map(|e| e.pos).collect();
        let pb: Vec<IVec2> = b.entities().map(|e| e.pos).collect();
        assert_eq!(pa, pb);
    }
}
