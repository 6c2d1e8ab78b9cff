//! Simulation tunables
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::layout::read_json;
use crate::sim::player::{DEFAULT_PLAYER_SIZE, DEFAULT_STEP, MAX_LIVES};

/// Default projectile speed (pixels per tick)
pub const DEFAULT_PROJECTILE_SPEED: i32 = 5;
pub const DEFAULT_PROJECTILE_SIZE: i32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; every arena entry derives its RNG from it
    pub seed: u64,
    /// Lives granted on every arena entry
    pub max_lives: u8,
    /// Pixels moved per held direction per tick
    pub player_step: i32,
    /// Player footprint (square)
    pub player_size: i32,
    pub projectile_speed: i32,
    pub projectile_size: i32,
    /// Arena the campaign starts in (0-based)
    pub start_arena: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            max_lives: MAX_LIVES,
            player_step: DEFAULT_STEP,
            player_size: DEFAULT_PLAYER_SIZE,
            projectile_speed: DEFAULT_PROJECTILE_SPEED,
            projectile_size: DEFAULT_PROJECTILE_SIZE,
            start_arena: 0,
        }
    }
}

impl Settings {
    /// Default settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "corridor_dash.json";

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    #[inline]
    pub fn player_extent(&self) -> IVec2 {
        IVec2::splat(self.player_size)
    }

    #[inline]
    pub fn projectile_extent(&self) -> IVec2 {
        IVec2::splat(self.projectile_size)
    }

    /// Load settings from `path`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let settings: Self = read_json(path)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.sanitized())
    }

    /// Clamp values the engine cannot work with
    pub fn sanitized(mut self) -> Self {
        self.max_lives = self.max_lives.max(1);
        self.player_step = self.player_step.max(1);
        self.player_size = self.player_size.max(1);
        self.projectile_speed = self.projectile_speed.max(1);
        self.projectile_size = self.projectile_size.max(1);
        self
    }
}
