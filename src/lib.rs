//! Corridor Dash - a tick-driven arena dodging simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, overlap, zones, campaign)
//! - `layout`: Declarative arena descriptions and the built-in campaign
//! - `settings`: Data-driven tunables
//! - `error`: Load and validation errors

pub mod error;
pub mod layout;
pub mod settings;
pub mod sim;

pub use error::{LayoutError, LoadError};
pub use layout::{ArenaLayout, builtin_campaign, load_campaign};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// World dimensions (pixels)
    pub const WORLD_WIDTH: i32 = 600;
    pub const WORLD_HEIGHT: i32 = 400;

    /// Nominal host tick rate; the simulation itself is step-based
    pub const TICKS_PER_SECOND: u32 = 60;
}
