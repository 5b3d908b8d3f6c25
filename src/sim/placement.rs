//! Dot placement inside the playable screen area

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Dot;
use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};
use crate::settings::Insets;

/// Screen size in points, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl ScreenBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Allowed (min, max) corner for dot centers. An axis whose insets
    /// overlap collapses to the midpoint between them.
    pub fn playable(&self, insets: &Insets) -> (Vec2, Vec2) {
        let axis = |lo: f32, hi: f32| {
            if lo <= hi {
                (lo, hi)
            } else {
                let mid = (lo + hi) / 2.0;
                (mid, mid)
            }
        };
        let (x0, x1) = axis(insets.left, self.width - insets.right);
        let (y0, y1) = axis(insets.top, self.height - insets.bottom);
        (Vec2::new(x0, y0), Vec2::new(x1, y1))
    }
}

/// Seeded generator for dot positions and bonus rolls
#[derive(Debug, Clone)]
pub struct DotPlacer {
    rng: Pcg32,
    next_id: u32,
}

impl DotPlacer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Place a fresh dot, uniformly inside the playable area
    pub fn place(
        &mut self,
        bounds: &ScreenBounds,
        insets: &Insets,
        bonus_chance: f64,
        now: f64,
    ) -> Dot {
        let (min, max) = bounds.playable(insets);
        let x = self.rng.random_range(min.x..=max.x);
        let y = self.rng.random_range(min.y..=max.y);
        let bonus = self.rng.random_bool(bonus_chance.clamp(0.0, 1.0));

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        Dot {
            id,
            pos: Vec2::new(x, y),
            bonus,
            spawned_at: now,
        }
    }
}
