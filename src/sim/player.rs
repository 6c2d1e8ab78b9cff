//! Player movement, collision and damage resolution
//!
//! One call to [`PlayerController::resolve`] is one player tick. The order
//! is fixed: zones are sampled at the start position, keys move the player
//! one direction at a time, zone push is added, a wall overlap rolls the
//! whole tick back, then damage, then the goal.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind, StaticObstacle, touches_wall};
use super::geometry::{Rect, WorldBounds};
use super::pattern::Obstacle;
use super::projectile::Projectile;
use super::tick::TickInput;
use super::zone::{Zone, ZoneInfluence};

/// Lives granted on every arena entry
pub const MAX_LIVES: u8 = 5;
/// Pixels per held direction per tick
pub const DEFAULT_STEP: i32 = 3;
pub const DEFAULT_PLAYER_SIZE: i32 = 20;

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerReport {
    /// Movement was rolled back by a wall
    pub bumped_wall: bool,
    /// A life was lost (and the player respawned unless lives ran out)
    pub damaged: bool,
    pub lives_exhausted: bool,
    pub reached_goal: bool,
}

/// Geometry the player resolves against, borrowed from the arena
pub struct PlayerSurroundings<'a> {
    pub world: WorldBounds,
    pub walls: &'a [StaticObstacle],
    pub zones: &'a [Zone],
    pub obstacles: &'a [Obstacle],
    pub projectiles: &'a mut [Projectile],
    pub goal: &'a Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerController {
    pub entity: Entity,
    pub step: i32,
    pub respawn_point: IVec2,
    lives: u8,
    max_lives: u8,
}

impl PlayerController {
    pub fn new(id: EntityId, start: IVec2, size: IVec2, step: i32, max_lives: u8) -> Self {
        Self {
            entity: Entity::new(id, EntityKind::Player, start, size),
            step,
            respawn_point: start,
            lives: max_lives,
            max_lives,
        }
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    pub fn max_lives(&self) -> u8 {
        self.max_lives
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.entity.pos
    }

    pub fn respawn(&mut self) {
        self.entity.pos = self.respawn_point;
    }

    /// Signed per-direction steps (left, right, up, down)
    fn signed_steps(&self, invert: bool) -> [IVec2; 4] {
        let s = if invert { -self.step } else { self.step };
        [
            IVec2::new(-s, 0),
            IVec2::new(s, 0),
            IVec2::new(0, -s),
            IVec2::new(0, s),
        ]
    }

    /// Run one player tick against already-updated surroundings
    pub fn resolve(&mut self, input: &TickInput, env: PlayerSurroundings<'_>) -> PlayerReport {
        let mut report = PlayerReport::default();
        let rollback = self.entity.pos;

        let influence = ZoneInfluence::gather(env.zones, &self.entity.bounds());

        let held = [input.left, input.right, input.up, input.down];
        for (pressed, delta) in held.into_iter().zip(self.signed_steps(influence.invert)) {
            if pressed {
                self.entity.pos = env.world.clamp_box(self.entity.pos + delta, self.entity.size);
            }
        }

        if influence.push != IVec2::ZERO {
            self.entity.pos = env.world.clamp_box(self.entity.pos + influence.push, self.entity.size);
        }

        if touches_wall(env.walls, &self.entity.bounds()) {
            self.entity.pos = rollback;
            report.bumped_wall = true;
        }

        let me = self.entity.bounds();
        let mut hit = env.obstacles.iter().any(|o| o.entity.overlaps(&me));
        for shot in env.projectiles.iter_mut().filter(|p| p.entity.overlaps(&me)) {
            shot.entity.despawn();
            hit = true;
        }
        if hit {
            report.damaged = true;
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                report.lives_exhausted = true;
                return report;
            }
            self.respawn();
        }

        if env.goal.has_area() && self.entity.overlaps(env.goal) {
            report.reached_goal = true;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pattern::{ObstaclePattern, PatternSpec};
    use crate::sim::projectile::{Direction, ProjectileSpawn};
    use crate::sim::zone::ZoneEffect;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const WORLD: WorldBounds = WorldBounds::new(600, 400);
    const NOWHERE: Rect = Rect::new(IVec2::new(590, 390), IVec2::new(10, 10));

    fn player_at(x: i32, y: i32) -> PlayerController {
        PlayerController::new(1, IVec2::new(x, y), IVec2::splat(20), 3, MAX_LIVES)
    }

    fn wall(x: i32, y: i32, w: i32, h: i32) -> StaticObstacle {
        StaticObstacle::new(100, Rect::from_corner(x, y, w, h))
    }

    fn zone(x: i32, y: i32, w: i32, h: i32, effect: ZoneEffect) -> Zone {
        Zone::new(200, Rect::new(IVec2::new(x, y), IVec2::new(w, h)), effect)
    }

    fn idle_obstacle(x: i32, y: i32) -> Obstacle {
        Obstacle {
            entity: Entity::new(300, EntityKind::Obstacle, IVec2::new(x, y), IVec2::splat(20)),
            pattern: ObstaclePattern::Chase { step: 0 },
        }
    }

    struct Scene {
        walls: Vec<StaticObstacle>,
        zones: Vec<Zone>,
        obstacles: Vec<Obstacle>,
        projectiles: Vec<Projectile>,
        goal: Rect,
    }

    impl Scene {
        fn empty() -> Self {
            Self {
                walls: Vec::new(),
                zones: Vec::new(),
                obstacles: Vec::new(),
                projectiles: Vec::new(),
                goal: NOWHERE,
            }
        }

        fn run(&mut self, player: &mut PlayerController, input: &TickInput) -> PlayerReport {
            player.resolve(
                input,
                PlayerSurroundings {
                    world: WORLD,
                    walls: &self.walls,
                    zones: &self.zones,
                    obstacles: &self.obstacles,
                    projectiles: &mut self.projectiles,
                    goal: &self.goal,
                },
            )
        }
    }

    fn keys(left: bool, right: bool, up: bool, down: bool) -> TickInput {
        TickInput {
            left,
            right,
            up,
            down,
            ..Default::default()
        }
    }

    #[test]
    fn test_keys_move_by_step() {
        let mut scene = Scene::empty();
        let mut p = player_at(100, 100);
        scene.run(&mut p, &keys(false, true, false, true));
        assert_eq!(p.pos(), IVec2::new(103, 103));
    }

    #[test]
    fn test_all_keys_cancel_but_push_applies() {
        let mut scene = Scene::empty();
        scene.zones.push(zone(100, 100, 100, 100, ZoneEffect::Push { dx: -1, dy: 0 }));
        let mut p = player_at(100, 100);
        scene.run(&mut p, &keys(true, true, true, true));
        assert_eq!(p.pos(), IVec2::new(99, 100));
    }

    #[test]
    fn test_two_push_zones_compose() {
        let mut scene = Scene::empty();
        scene.zones.push(zone(100, 100, 100, 100, ZoneEffect::Push { dx: 1, dy: 0 }));
        scene.zones.push(zone(100, 100, 100, 100, ZoneEffect::Push { dx: 0, dy: 1 }));
        let mut p = player_at(100, 100);
        let report = scene.run(&mut p, &TickInput::default());
        assert_eq!(p.pos(), IVec2::new(101, 101));
        assert!(!report.bumped_wall);
    }

    #[test]
    fn test_composed_push_into_wall_rolls_back() {
        let mut scene = Scene::empty();
        scene.zones.push(zone(100, 100, 100, 100, ZoneEffect::Push { dx: 1, dy: 0 }));
        scene.zones.push(zone(100, 100, 100, 100, ZoneEffect::Push { dx: 0, dy: 1 }));
        // Player spans [90, 110); the wall starts right at its edge
        scene.walls.push(wall(110, 0, 20, 400));
        let mut p = player_at(100, 100);
        let report = scene.run(&mut p, &TickInput::default());
        assert_eq!(p.pos(), IVec2::new(100, 100));
        assert!(report.bumped_wall);
    }

    #[test]
    fn test_rollback_undoes_keys_and_push_together() {
        let mut scene = Scene::empty();
        scene.zones.push(zone(100, 100, 200, 200, ZoneEffect::Push { dx: 0, dy: 2 }));
        scene.walls.push(wall(112, 0, 20, 400));
        let mut p = player_at(100, 100);
        // Down alone would be fine; right pushes into the wall; nothing moves
        scene.run(&mut p, &keys(false, true, false, true));
        assert_eq!(p.pos(), IVec2::new(100, 100));
    }

    #[test]
    fn test_invert_zone_mirrors_controls() {
        let mut outside = Scene::empty();
        let mut reference = player_at(300, 200);
        outside.run(&mut reference, &keys(false, true, false, false));

        let mut inside = Scene::empty();
        inside.zones.push(zone(300, 200, 100, 100, ZoneEffect::Invert));
        let mut p = player_at(300, 200);
        inside.run(&mut p, &keys(true, false, false, false));

        assert_eq!(p.pos(), reference.pos());
        assert_eq!(p.pos(), IVec2::new(303, 200));
    }

    #[test]
    fn test_moves_are_clamped_to_world() {
        let mut scene = Scene::empty();
        let mut p = player_at(12, 12);
        for _ in 0..10 {
            scene.run(&mut p, &keys(true, false, true, false));
        }
        // The whole 20 px box stays on the grid
        assert_eq!(p.pos(), IVec2::new(10, 10));
        assert_eq!(p.entity.bounds().min(), IVec2::ZERO);

        let mut p = player_at(585, 385);
        scene.zones.push(zone(500, 300, 200, 200, ZoneEffect::Push { dx: 4, dy: 4 }));
        for _ in 0..10 {
            scene.run(&mut p, &keys(false, true, false, true));
        }
        assert_eq!(p.pos(), IVec2::new(590, 390));
        assert!(WORLD.contains_rect(&p.entity.bounds()));
    }

    #[test]
    fn test_wall_and_obstacle_same_tick() {
        let mut scene = Scene::empty();
        scene.walls.push(wall(112, 0, 20, 400));
        scene.obstacles.push(idle_obstacle(100, 100));
        let mut p = player_at(100, 100);
        p.respawn_point = IVec2::new(30, 30);

        let report = scene.run(&mut p, &keys(false, true, false, false));
        assert!(report.bumped_wall);
        assert!(report.damaged);
        assert_eq!(p.lives(), MAX_LIVES - 1);
        assert_eq!(p.pos(), IVec2::new(30, 30));
    }

    #[test]
    fn test_obstacle_and_projectile_cost_one_life() {
        let mut scene = Scene::empty();
        scene.obstacles.push(idle_obstacle(100, 100));
        let spawn = ProjectileSpawn {
            pos: IVec2::new(100, 100),
            direction: Direction::Left,
        };
        scene.projectiles.push(Projectile::new(400, spawn, 5, IVec2::splat(8)));
        let mut p = player_at(100, 100);

        let report = scene.run(&mut p, &TickInput::default());
        assert!(report.damaged);
        assert_eq!(p.lives(), MAX_LIVES - 1);
        assert!(!scene.projectiles[0].is_alive());
    }

    #[test]
    fn test_last_life_reports_exhaustion_without_goal() {
        let mut scene = Scene::empty();
        scene.obstacles.push(idle_obstacle(100, 100));
        scene.goal = Rect::new(IVec2::new(100, 100), IVec2::splat(40));
        let mut p = PlayerController::new(1, IVec2::new(100, 100), IVec2::splat(20), 3, 1);

        let report = scene.run(&mut p, &TickInput::default());
        assert!(report.lives_exhausted);
        assert!(!report.reached_goal);
        assert_eq!(p.lives(), 0);
    }

    #[test]
    fn test_goal_after_damage_uses_respawn_position() {
        let mut scene = Scene::empty();
        scene.obstacles.push(idle_obstacle(100, 100));
        scene.goal = Rect::new(IVec2::new(100, 100), IVec2::splat(40));
        let mut p = player_at(100, 100);
        p.respawn_point = IVec2::new(30, 30);

        let report = scene.run(&mut p, &TickInput::default());
        assert!(report.damaged);
        assert!(!report.reached_goal, "respawned away from the goal");

        let mut scene = Scene::empty();
        scene.goal = Rect::new(IVec2::new(100, 100), IVec2::splat(40));
        let mut p = player_at(100, 100);
        assert!(scene.run(&mut p, &TickInput::default()).reached_goal);
    }

    #[test]
    fn test_dead_projectile_does_no_damage() {
        let mut scene = Scene::empty();
        let spawn = ProjectileSpawn {
            pos: IVec2::new(100, 100),
            direction: Direction::Left,
        };
        let mut shot = Projectile::new(400, spawn, 5, IVec2::splat(8));
        shot.entity.despawn();
        scene.projectiles.push(shot);
        let mut p = player_at(100, 100);
        assert!(!scene.run(&mut p, &TickInput::default()).damaged);
        assert_eq!(p.lives(), MAX_LIVES);
    }

    #[test]
    fn test_spawned_obstacle_from_spec_hurts() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut scene = Scene::empty();
        let spec = PatternSpec::Pulse {
            min_size: 25,
            max_size: 50,
            delta: 1,
        };
        scene
            .obstacles
            .push(Obstacle::new(5, IVec2::new(120, 100), IVec2::splat(50), &spec, &mut rng));
        // Player spans [90, 110), pulse at min size spans [108, 133)
        let mut p = player_at(100, 100);
        assert!(scene.run(&mut p, &TickInput::default()).damaged);
    }
}
