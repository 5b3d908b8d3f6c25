//! Tap The Dot - a round-based tap-reaction game core
//!
//! Core modules:
//! - `sim`: Round state machine, scoring, dot placement and difficulty
//! - `highscores`: Bounded top-5 leaderboard persisted as JSON
//! - `session`: Wires a round to storage, leaderboard and ads
//! - `persistence`: Key/value string storage backends
//! - `platform`: External collaborators and logger setup
//! - `settings`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ServiceError, StoreError};
pub use highscores::{HighScores, ScoreEntry};
pub use session::GameSession;
pub use settings::{LevelFormula, Settings};

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_DURATION: f64 = 30.0;
    /// Pre-round countdown (whole seconds, 0 = start immediately)
    pub const COUNTDOWN_SECS: u32 = 3;

    /// Max gap between taps that keeps a combo alive (seconds)
    pub const COMBO_WINDOW: f64 = 1.5;

    /// Probability that a freshly placed dot is a bonus dot
    pub const BONUS_CHANCE: f64 = 0.15;
    /// Extra points for tapping a bonus dot
    pub const BONUS_POINTS: u64 = 5;

    /// Score thresholds that extend the round
    pub const MILESTONES: [u64; 2] = [50, 100];
    /// Seconds added when a milestone is crossed
    pub const MILESTONE_TIME_BONUS: f64 = 5.0;

    /// Dot movement interval at level 0 (seconds)
    pub const BASE_DOT_INTERVAL: f64 = 1.5;
    /// Interval multiplier per level (10% faster each level)
    pub const DOT_INTERVAL_DECAY: f64 = 0.9;
    /// Fastest the dot is ever allowed to move (seconds)
    pub const MIN_DOT_INTERVAL: f64 = 0.3;

    /// Hit radius of a regular dot (points)
    pub const DOT_RADIUS: f32 = 30.0;
    /// Hit radius of a bonus dot (points)
    pub const BONUS_DOT_RADIUS: f32 = 40.0;

    /// Default screen size used when the host hasn't reported one
    pub const DEFAULT_SCREEN_WIDTH: f32 = 390.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 844.0;

    /// Keep dots clear of the HUD and the home indicator
    pub const INSET_SIDE: f32 = 80.0;
    pub const INSET_TOP: f32 = 100.0;
    pub const INSET_BOTTOM: f32 = 150.0;

    /// Number of high scores kept
    pub const MAX_HIGH_SCORES: usize = 5;
    /// Present an interstitial every N finished rounds
    pub const AD_EVERY_N_PLAYS: u32 = 5;
    /// Leaderboard the final score is reported to
    pub const LEADERBOARD_ID: &str = "tapthedot.highscore";

    /// Float slack when comparing accumulated timer values
    pub const TIME_EPSILON: f64 = 1e-9;
}
