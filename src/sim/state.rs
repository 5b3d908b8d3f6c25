//! Round state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// No round running yet
    Idle,
    /// Pre-round countdown, whole seconds left
    Countdown(u32),
    /// Active gameplay
    Active,
    /// Round is paused
    Paused,
    /// Round ended
    Over,
}

impl RoundState {
    /// True while the round clock or the countdown can advance
    pub fn is_running(&self) -> bool {
        matches!(self, RoundState::Countdown(_) | RoundState::Active)
    }
}

/// The single live dot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    /// Increases every time a dot is placed
    pub id: u32,
    pub pos: Vec2,
    pub bonus: bool,
    /// Round-clock time at which the dot appeared
    pub spawned_at: f64,
}

impl Dot {
    pub fn contains(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance_squared(point) <= radius * radius
    }
}

/// Per-round statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundStats {
    pub hits: u32,
    pub misses: u32,
    pub bonus_hits: u32,
    pub max_combo: u32,
    /// Fastest hit (seconds from spawn to tap)
    pub best_reaction: Option<f64>,
    /// Sum of all hit reaction times, for the mean
    pub total_reaction: f64,
}

impl RoundStats {
    pub fn record_reaction(&mut self, reaction: f64) {
        self.total_reaction += reaction;
        self.best_reaction = Some(match self.best_reaction {
            Some(best) => best.min(reaction),
            None => reaction,
        });
    }

    pub fn mean_reaction(&self) -> Option<f64> {
        (self.hits > 0).then(|| self.total_reaction / self.hits as f64)
    }

    /// Hit ratio over all taps (0.0 - 1.0)
    pub fn accuracy(&self) -> f64 {
        let taps = self.hits + self.misses;
        if taps == 0 {
            0.0
        } else {
            self.hits as f64 / taps as f64
        }
    }
}

/// Final result of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u64,
    pub level: u32,
    /// Active time played, pauses excluded (seconds)
    pub time_played: f64,
    pub stats: RoundStats,
}

/// Things that happened during a tick or tap, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Countdown ticked down to this many seconds
    Countdown(u32),
    /// Round went live
    RoundStarted,
    /// Dot was (re)placed
    DotMoved(Dot),
    Hit {
        points: u64,
        combo: u32,
        bonus: bool,
        reaction: f64,
    },
    /// Background tap
    Miss,
    /// Combo lapsed because no hit landed within the window
    ComboExpired,
    /// Milestone reached, seconds added
    TimeBonus { milestone: u64, seconds: f64 },
    LevelUp(u32),
    Paused,
    Resumed,
    RoundOver(RoundSummary),
}

/// Outcome of a single tap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// Not in the Active state
    Ignored,
    Hit { points: u64, combo: u32 },
    Miss,
}
