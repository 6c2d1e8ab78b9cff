//! Corridor Dash headless driver
//!
//! Replays an input script through the campaign and logs what happens.
//!
//! Usage: `corridor-dash [script.json]`
//! - `CORRIDOR_DASH_SETTINGS`: settings file (default `corridor_dash.json`)
//! - `CORRIDOR_DASH_CAMPAIGN`: JSON campaign replacing the built-in arenas

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use corridor_dash::consts::TICKS_PER_SECOND;
    use corridor_dash::sim::{Campaign, ScriptStep, TickInput, Transition, expand_script, load_script, tick};
    use corridor_dash::{Settings, builtin_campaign, load_campaign};

    /// Ticks to idle through when no script is given
    const DEFAULT_IDLE_TICKS: u32 = 10 * TICKS_PER_SECOND;

    pub fn main() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Corridor Dash (headless) starting...");

        let settings_path = std::env::var_os("CORRIDOR_DASH_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
        let settings = Settings::load(&settings_path)?;

        let layouts = match std::env::var_os("CORRIDOR_DASH_CAMPAIGN") {
            Some(path) => load_campaign(&PathBuf::from(path), settings.player_extent())?,
            None => builtin_campaign(),
        };

        let script = match std::env::args_os().nth(1) {
            Some(path) => load_script(&PathBuf::from(path))?,
            None => {
                log::info!("No input script, idling for {DEFAULT_IDLE_TICKS} ticks");
                vec![ScriptStep::hold(TickInput::idle(), DEFAULT_IDLE_TICKS)]
            }
        };

        let mut campaign = Campaign::new(layouts, settings)?;
        run(&mut campaign, &script);

        let seconds = campaign.time_ticks() as f64 / f64::from(TICKS_PER_SECOND);
        if campaign.is_completed() {
            log::info!("Victory! All {} arenas cleared in {seconds:.1}s", campaign.arena_count());
        } else {
            log::info!(
                "Script ended in arena {}/{} '{}' with {} lives after {seconds:.1}s",
                campaign.arena_ordinal(),
                campaign.arena_count(),
                campaign.arena_name(),
                campaign.lives()
            );
        }
        Ok(())
    }

    fn run(campaign: &mut Campaign, script: &[ScriptStep]) {
        for input in expand_script(script) {
            if campaign.is_completed() {
                break;
            }
            let outcome = tick(campaign, input);
            if outcome.player.damaged {
                log::info!("Hit! {} lives left", campaign.lives());
            }
            match outcome.transition {
                Some(Transition::Advanced { to }) | Some(Transition::Jumped { to }) => {
                    log::info!("Now in arena {}: {}", to + 1, campaign.arena_name());
                }
                Some(Transition::Reset) => log::info!("Game over, restarting from the first arena"),
                Some(Transition::Completed) => log::info!("Final goal reached"),
                None => {}
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    headless::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless driver needs files and the process environment
}
