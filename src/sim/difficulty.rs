//! Score-driven difficulty: level and dot movement speed

use crate::settings::{LevelFormula, Settings};

/// Difficulty tier for a score
pub fn level_for_score(score: u64, formula: LevelFormula) -> u32 {
    match formula {
        LevelFormula::Sqrt => ((score as f64 / 25.0).sqrt().floor() as u32).saturating_add(1),
        LevelFormula::Linear => (score / 100).min(u32::MAX as u64) as u32,
    }
}

/// Seconds between dot movements at a level, never below the floor
pub fn dot_interval(level: u32, settings: &Settings) -> f64 {
    let exponent = level.min(i32::MAX as u32) as i32;
    let interval = settings.base_dot_interval * settings.dot_interval_decay.powi(exponent);
    interval.max(settings.min_dot_interval)
}

/// Visual theme index for a level, cycling through `theme_count` themes
pub fn theme_for_level(level: u32, theme_count: u32) -> u32 {
    if theme_count == 0 {
        return 0;
    }
    level.saturating_sub(1) % theme_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_DOT_INTERVAL;
    use proptest::prelude::*;

    #[test]
    fn test_sqrt_levels() {
        let f = LevelFormula::Sqrt;
        assert_eq!(level_for_score(0, f), 1);
        assert_eq!(level_for_score(24, f), 1);
        assert_eq!(level_for_score(25, f), 2);
        assert_eq!(level_for_score(99, f), 2);
        assert_eq!(level_for_score(100, f), 3);
        assert_eq!(level_for_score(225, f), 4);
    }

    #[test]
    fn test_linear_levels() {
        let f = LevelFormula::Linear;
        assert_eq!(level_for_score(0, f), 0);
        assert_eq!(level_for_score(99, f), 0);
        assert_eq!(level_for_score(100, f), 1);
        assert_eq!(level_for_score(350, f), 3);
    }

    #[test]
    fn test_interval_decays_then_floors() {
        let s = Settings::default();
        assert!((dot_interval(0, &s) - 1.5).abs() < 1e-12);
        assert!((dot_interval(1, &s) - 1.35).abs() < 1e-12);
        assert!((dot_interval(2, &s) - 1.215).abs() < 1e-12);
        assert_eq!(dot_interval(16, &s), MIN_DOT_INTERVAL);
        assert_eq!(dot_interval(u32::MAX, &s), MIN_DOT_INTERVAL);
    }

    #[test]
    fn test_theme_cycles() {
        assert_eq!(theme_for_level(1, 4), 0);
        assert_eq!(theme_for_level(5, 4), 0);
        assert_eq!(theme_for_level(6, 4), 1);
        assert_eq!(theme_for_level(0, 4), 0);
        assert_eq!(theme_for_level(3, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_interval_never_below_floor(level in 0u32..10_000) {
            prop_assert!(dot_interval(level, &Settings::default()) >= MIN_DOT_INTERVAL);
        }

        #[test]
        fn prop_level_monotonic(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for f in [LevelFormula::Sqrt, LevelFormula::Linear] {
                prop_assert!(level_for_score(lo, f) <= level_for_score(hi, f));
            }
        }
    }
}
