//! Ordered arena progression
//!
//! The campaign owns exactly one active [`Arena`] and replaces it wholesale
//! on every transition. Transitions are linear: goal advances to the next
//! arena (or completes the campaign from the last one), life exhaustion
//! resets to the first arena.

use crate::error::LayoutError;
use crate::layout::{ArenaLayout, validate_campaign};
use crate::settings::Settings;

use super::arena::Arena;
use super::entity::Entity;

/// Where the campaign stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignPhase {
    /// Playing the arena at this index
    Playing(usize),
    /// The last arena's goal was reached
    Completed,
}

#[derive(Debug, Clone)]
pub struct Campaign {
    layouts: Vec<ArenaLayout>,
    settings: Settings,
    arena: Arena,
    phase: CampaignPhase,
    /// Simulation tick counter
    time_ticks: u64,
    /// Arena entries so far; feeds the per-entry RNG seed
    entries: u64,
}

/// Seed for the `entry`-th arena instantiation of a run
pub fn arena_seed(run_seed: u64, entry: u64) -> u64 {
    entry.wrapping_mul(2654435761).wrapping_add(run_seed)
}

impl Campaign {
    /// Validate every layout, then enter the configured start arena
    pub fn new(layouts: Vec<ArenaLayout>, settings: Settings) -> Result<Self, LayoutError> {
        let settings = settings.sanitized();
        validate_campaign(&layouts, settings.player_extent())?;
        let start = settings.start_arena;
        if start >= layouts.len() {
            return Err(LayoutError::NoSuchArena {
                index: start,
                len: layouts.len(),
            });
        }

        let arena = Arena::build(&layouts[start], &settings, arena_seed(settings.seed, 0));
        log::info!(
            "Campaign of {} arenas starting in '{}' (seed {})",
            layouts.len(),
            arena.name(),
            settings.seed
        );
        Ok(Self {
            layouts,
            settings,
            arena,
            phase: CampaignPhase::Playing(start),
            time_ticks: 0,
            entries: 1,
        })
    }

    /// Replace the active arena with a fresh instance of `index`:
    /// new obstacle, zone and wall sets, player at the start, full lives.
    pub(crate) fn enter_arena(&mut self, index: usize) {
        let seed = arena_seed(self.settings.seed, self.entries);
        self.entries += 1;
        self.arena = Arena::build(&self.layouts[index], &self.settings, seed);
        self.phase = CampaignPhase::Playing(index);
        log::info!("Entered arena {} '{}'", index + 1, self.arena.name());
    }

    pub(crate) fn complete(&mut self) {
        self.phase = CampaignPhase::Completed;
        log::info!("Campaign completed after {} ticks", self.time_ticks);
    }

    pub(crate) fn advance_clock(&mut self) {
        self.time_ticks += 1;
    }

    pub(crate) fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    #[inline]
    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.phase == CampaignPhase::Completed
    }

    /// Index of the arena being played, or of the final arena once completed
    pub fn arena_index(&self) -> usize {
        match self.phase {
            CampaignPhase::Playing(index) => index,
            CampaignPhase::Completed => self.layouts.len() - 1,
        }
    }

    /// 1-based arena number for display
    pub fn arena_ordinal(&self) -> usize {
        self.arena_index() + 1
    }

    pub fn arena_count(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_last_arena(&self) -> bool {
        self.arena_index() + 1 == self.layouts.len()
    }

    pub fn arena_name(&self) -> &str {
        self.arena.name()
    }

    pub fn lives(&self) -> u8 {
        self.arena.lives()
    }

    pub fn max_lives(&self) -> u8 {
        self.settings.max_lives
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Read-only view of every live entity in the active arena
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.arena.entities()
    }
}
