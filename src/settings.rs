//! Game settings and balance
//!
//! Persisted separately from high scores under its own key.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StoreError;
use crate::persistence::{self, KeyValueStore};

/// How the difficulty level is derived from score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelFormula {
    /// floor(sqrt(score / 25)) + 1
    #[default]
    Sqrt,
    /// score / 100
    Linear,
}

impl LevelFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelFormula::Sqrt => "Sqrt",
            LevelFormula::Linear => "Linear",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sqrt" => Some(LevelFormula::Sqrt),
            "linear" | "lin" => Some(LevelFormula::Linear),
            _ => None,
        }
    }
}

/// Margins (points) dots must keep from each screen edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for Insets {
    fn default() -> Self {
        Self {
            top: INSET_TOP,
            left: INSET_SIDE,
            bottom: INSET_BOTTOM,
            right: INSET_SIDE,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Round ===
    /// Round length (seconds)
    pub round_duration: f64,
    /// Countdown before the round goes live (whole seconds)
    pub countdown_secs: u32,

    // === Scoring ===
    /// Max gap between hits that keeps a combo going (seconds)
    pub combo_window: f64,
    /// Chance a placed dot is a bonus dot (0.0 - 1.0)
    pub bonus_chance: f64,
    /// Extra points for a bonus dot
    pub bonus_points: u64,
    /// Score thresholds that extend the round
    pub milestones: Vec<u64>,
    /// Seconds added per milestone
    pub milestone_time_bonus: f64,

    // === Difficulty ===
    pub level_formula: LevelFormula,
    pub base_dot_interval: f64,
    pub dot_interval_decay: f64,
    pub min_dot_interval: f64,

    // === Dots ===
    pub dot_radius: f32,
    pub bonus_dot_radius: f32,
    pub insets: Insets,

    // === Services ===
    /// Show an ad every N finished rounds (0 = never)
    pub ad_every: u32,
    pub leaderboard_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION,
            countdown_secs: COUNTDOWN_SECS,

            combo_window: COMBO_WINDOW,
            bonus_chance: BONUS_CHANCE,
            bonus_points: BONUS_POINTS,
            milestones: MILESTONES.to_vec(),
            milestone_time_bonus: MILESTONE_TIME_BONUS,

            level_formula: LevelFormula::Sqrt,
            base_dot_interval: BASE_DOT_INTERVAL,
            dot_interval_decay: DOT_INTERVAL_DECAY,
            min_dot_interval: MIN_DOT_INTERVAL,

            dot_radius: DOT_RADIUS,
            bonus_dot_radius: BONUS_DOT_RADIUS,
            insets: Insets::default(),

            ad_every: AD_EVERY_N_PLAYS,
            leaderboard_id: LEADERBOARD_ID.to_string(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "tapTheDotSettings";

    /// Defaults with a different level formula
    pub fn with_formula(formula: LevelFormula) -> Self {
        Self {
            level_formula: formula,
            ..Self::default()
        }
    }

    /// Clamp values that would break the round invariants
    pub fn sanitized(mut self) -> Self {
        self.round_duration = self.round_duration.max(0.0);
        self.combo_window = self.combo_window.max(0.0);
        self.bonus_chance = if self.bonus_chance.is_finite() {
            self.bonus_chance.clamp(0.0, 1.0)
        } else {
            BONUS_CHANCE
        };
        self.milestone_time_bonus = self.milestone_time_bonus.max(0.0);
        self.min_dot_interval = self.min_dot_interval.max(MIN_DOT_INTERVAL);
        self.base_dot_interval = self.base_dot_interval.max(self.min_dot_interval);
        self.dot_interval_decay = self.dot_interval_decay.clamp(0.0, 1.0);
        self.dot_radius = self.dot_radius.max(0.0);
        self.bonus_dot_radius = self.bonus_dot_radius.max(0.0);
        self.insets = Insets {
            top: self.insets.top.max(0.0),
            left: self.insets.left.max(0.0),
            bottom: self.insets.bottom.max(0.0),
            right: self.insets.right.max(0.0),
        };
        self.milestones.sort_unstable();
        self.milestones.dedup();
        self
    }

    /// Load settings; missing or malformed data gives defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings.sanitized()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_formula_from_str() {
        assert_eq!(LevelFormula::from_str("SQRT"), Some(LevelFormula::Sqrt));
        assert_eq!(LevelFormula::from_str("lin"), Some(LevelFormula::Linear));
        assert_eq!(LevelFormula::from_str("cubic"), None);
        assert_eq!(LevelFormula::Linear.as_str(), "Linear");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, r#"{"round_duration": 10.0}"#).unwrap();
        let s = Settings::load(&store);
        assert_eq!(s.round_duration, 10.0);
        assert_eq!(s.combo_window, COMBO_WINDOW);
        assert_eq!(s.milestones, vec![50, 100]);
    }

    #[test]
    fn test_sanitized_keeps_interval_floor() {
        let s = Settings {
            min_dot_interval: 0.05,
            bonus_chance: 3.0,
            milestones: vec![100, 50, 100],
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.min_dot_interval, MIN_DOT_INTERVAL);
        assert_eq!(s.bonus_chance, 1.0);
        assert_eq!(s.milestones, vec![50, 100]);
    }

    #[test]
    fn test_sanitized_rejects_offscreen_insets_and_nan_chance() {
        let s = Settings {
            bonus_chance: f64::NAN,
            insets: Insets {
                top: -20.0,
                left: -5.0,
                bottom: 10.0,
                right: -1.0,
            },
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.bonus_chance, BONUS_CHANCE);
        assert_eq!(
            s.insets,
            Insets {
                top: 0.0,
                left: 0.0,
                bottom: 10.0,
                right: 0.0,
            }
        );
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let s = Settings::with_formula(LevelFormula::Linear);
        s.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), s);
    }
}
