//! Fixed-step simulation tick
//!
//! One call advances the active arena by exactly one step and then applies
//! whatever campaign transition that step produced.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::campaign::{Campaign, CampaignPhase};
use super::player::PlayerReport;
use crate::error::LoadError;
use crate::layout::read_json;

/// Input snapshot for a single tick (sampled once by the host)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump straight into this arena (debug/testing)
    pub jump_to: Option<usize>,
}

impl TickInput {
    pub fn idle() -> Self {
        Self::default()
    }
}

fn one() -> u32 {
    1
}

/// One entry of a recorded input script: hold `input` for `repeat` ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(flatten)]
    pub input: TickInput,
    #[serde(default = "one")]
    pub repeat: u32,
}

impl ScriptStep {
    pub fn hold(input: TickInput, repeat: u32) -> Self {
        Self { input, repeat }
    }
}

/// Load an input script (a JSON array of [`ScriptStep`])
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, LoadError> {
    let script: Vec<ScriptStep> = read_json(path)?;
    log::info!("Loaded {} script steps from {}", script.len(), path.display());
    Ok(script)
}

/// Expand a script into the per-tick inputs it stands for
pub fn expand_script(script: &[ScriptStep]) -> impl Iterator<Item = &TickInput> + '_ {
    script
        .iter()
        .flat_map(|step| std::iter::repeat_n(&step.input, step.repeat as usize))
}

/// Campaign state change caused by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Goal reached; now playing this arena
    Advanced { to: usize },
    /// Goal reached in the last arena
    Completed,
    /// Lives ran out; back to the first arena
    Reset,
    /// Debug jump honored
    Jumped { to: usize },
}

/// Everything a presentation layer may want to react to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub player: PlayerReport,
    pub transition: Option<Transition>,
}

/// Advance the campaign by one fixed step
pub fn tick(campaign: &mut Campaign, input: &TickInput) -> TickOutcome {
    // Nothing moves once the campaign is won
    let index = match campaign.phase() {
        CampaignPhase::Playing(index) => index,
        CampaignPhase::Completed => return TickOutcome::default(),
    };

    campaign.advance_clock();
    let player = campaign.arena_mut().tick(input);

    let mut transition = if player.lives_exhausted {
        log::info!("Out of lives in '{}', back to the first arena", campaign.arena_name());
        campaign.enter_arena(0);
        Some(Transition::Reset)
    } else if player.reached_goal {
        if campaign.is_last_arena() {
            campaign.complete();
            Some(Transition::Completed)
        } else {
            campaign.enter_arena(index + 1);
            Some(Transition::Advanced { to: index + 1 })
        }
    } else {
        None
    };

    if let Some(target) = input.jump_to {
        if campaign.is_completed() {
            log::warn!("Ignoring jump to arena {target}: campaign already completed");
        } else if target < campaign.arena_count() {
            campaign.enter_arena(target);
            transition = Some(Transition::Jumped { to: target });
        } else {
            log::warn!(
                "Ignoring jump to arena {target}: only {} arenas",
                campaign.arena_count()
            );
        }
    }

    TickOutcome { player, transition }
}
