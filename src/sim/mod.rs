//! Round simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod difficulty;
pub mod placement;
pub mod round;
pub mod scoring;
pub mod state;

pub use difficulty::{dot_interval, level_for_score, theme_for_level};
pub use placement::{DotPlacer, ScreenBounds};
pub use round::RoundController;
pub use scoring::{ComboState, hit_points, milestones_crossed};
pub use state::{Dot, GameEvent, RoundState, RoundStats, RoundSummary, TapOutcome};
