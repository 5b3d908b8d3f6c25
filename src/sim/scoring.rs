//! Combo tracking and per-hit scoring

use serde::{Deserialize, Serialize};

use crate::consts::TIME_EPSILON;

/// Consecutive-hit tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComboState {
    pub count: u32,
    /// Round-clock time of the last hit
    pub last_tap: Option<f64>,
}

impl ComboState {
    /// Register a hit at `time`, returning the new combo count.
    /// Within `window` of the previous hit the combo grows, otherwise it restarts at 1.
    pub fn register_hit(&mut self, time: f64, window: f64) -> u32 {
        let chained = self
            .last_tap
            .is_some_and(|last| time - last <= window + TIME_EPSILON);
        self.count = if chained && self.count > 0 {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last_tap = Some(time);
        self.count
    }

    /// Drop the combo to 0 if the last hit is older than `window`.
    /// Returns true when a live combo was lost.
    pub fn expire(&mut self, now: f64, window: f64) -> bool {
        let stale = self
            .last_tap
            .is_none_or(|last| now - last > window + TIME_EPSILON);
        if stale && self.count > 0 {
            self.count = 0;
            return true;
        }
        false
    }

    /// Background tap: lose the combo outright
    pub fn break_combo(&mut self) {
        self.count = 0;
    }
}

/// Points for a hit at the given combo
pub fn hit_points(combo: u32, bonus: bool, bonus_points: u64) -> u64 {
    let base = combo as u64;
    if bonus { base + bonus_points } else { base }
}

/// Milestones passed when the score moves from `before` to `after`
pub fn milestones_crossed(before: u64, after: u64, milestones: &[u64]) -> Vec<u64> {
    milestones
        .iter()
        .copied()
        .filter(|&m| before < m && after >= m)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WINDOW: f64 = 1.5;

    #[test]
    fn test_first_hit_starts_at_one() {
        let mut combo = ComboState::default();
        assert_eq!(combo.register_hit(0.4, WINDOW), 1);
    }

    #[test]
    fn test_hits_inside_window_chain() {
        let mut combo = ComboState::default();
        combo.register_hit(1.0, WINDOW);
        assert_eq!(combo.register_hit(2.0, WINDOW), 2);
        assert_eq!(combo.register_hit(3.5, WINDOW), 3);
    }

    #[test]
    fn test_gap_over_window_resets_to_one() {
        let mut combo = ComboState::default();
        combo.register_hit(1.0, WINDOW);
        combo.register_hit(2.0, WINDOW);
        assert_eq!(combo.register_hit(3.6, WINDOW), 1);
    }

    #[test]
    fn test_expire_and_break_reset_to_zero() {
        let mut combo = ComboState::default();
        combo.register_hit(1.0, WINDOW);
        combo.register_hit(2.0, WINDOW);
        assert!(!combo.expire(3.0, WINDOW));
        assert_eq!(combo.count, 2);
        assert!(combo.expire(3.6, WINDOW));
        assert_eq!(combo.count, 0);
        // Already at zero, nothing more to lose
        assert!(!combo.expire(10.0, WINDOW));

        combo.register_hit(11.0, WINDOW);
        combo.break_combo();
        assert_eq!(combo.count, 0);
    }

    #[test]
    fn test_hit_after_break_starts_over() {
        let mut combo = ComboState::default();
        combo.register_hit(1.0, WINDOW);
        combo.break_combo();
        assert_eq!(combo.register_hit(1.2, WINDOW), 1);
    }

    #[test]
    fn test_hit_points() {
        assert_eq!(hit_points(1, false, 5), 1);
        assert_eq!(hit_points(4, false, 5), 4);
        assert_eq!(hit_points(4, true, 5), 9);
    }

    #[test]
    fn test_milestones_crossed() {
        let ms = [50, 100];
        assert!(milestones_crossed(40, 49, &ms).is_empty());
        assert_eq!(milestones_crossed(45, 50, &ms), vec![50]);
        assert_eq!(milestones_crossed(48, 55, &ms), vec![50]);
        assert!(milestones_crossed(50, 60, &ms).is_empty());
        assert_eq!(milestones_crossed(40, 120, &ms), vec![50, 100]);
    }

    proptest! {
        #[test]
        fn prop_chained_hits_sum_to_triangular(n in 1u32..200, gap in 0.0f64..1.5) {
            let mut combo = ComboState::default();
            let mut score = 0u64;
            for i in 0..n {
                let c = combo.register_hit(i as f64 * gap, WINDOW);
                score += hit_points(c, false, 5);
            }
            prop_assert_eq!(score, n as u64 * (n as u64 + 1) / 2);
        }
    }
}
