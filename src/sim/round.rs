//! Round controller
//!
//! Owns the round lifecycle and both logical timers (countdown and dot
//! movement). The host calls `tick` from a single periodic source and
//! forwards taps; everything observable comes back through drained events.

use glam::Vec2;

use super::difficulty::{dot_interval, level_for_score};
use super::placement::{DotPlacer, ScreenBounds};
use super::scoring::{ComboState, hit_points, milestones_crossed};
use super::state::{Dot, GameEvent, RoundState, RoundStats, RoundSummary, TapOutcome};
use crate::consts::TIME_EPSILON;
use crate::settings::Settings;

/// Accumulators for the two periodic timers
#[derive(Debug, Clone, Copy, Default)]
struct Timers {
    /// Sub-second progress of the pre-round countdown
    countdown: f64,
    /// Time since the dot last moved
    dot: f64,
}

pub struct RoundController {
    settings: Settings,
    bounds: ScreenBounds,
    placer: DotPlacer,

    state: RoundState,
    /// State to return to on resume
    paused_from: Option<RoundState>,
    /// Bumped whenever the timers are invalidated
    generation: u64,
    timers: Timers,

    /// Active time since the round went live, pauses excluded
    clock: f64,
    time_remaining: f64,
    score: u64,
    level: u32,
    combo: ComboState,
    dot: Option<Dot>,
    stats: RoundStats,

    events: Vec<GameEvent>,
}

impl RoundController {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let level = level_for_score(0, settings.level_formula);
        Self {
            time_remaining: settings.round_duration,
            settings,
            bounds: ScreenBounds::default(),
            placer: DotPlacer::new(seed),
            state: RoundState::Idle,
            paused_from: None,
            generation: 0,
            timers: Timers::default(),
            clock: 0.0,
            score: 0,
            level,
            combo: ComboState::default(),
            dot: None,
            stats: RoundStats::default(),
            events: Vec::new(),
        }
    }

    // === Accessors ===

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo.count
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining.max(0.0)
    }

    /// Round clock; taps should be timestamped on it
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn dot(&self) -> Option<&Dot> {
        self.dot.as_ref()
    }

    pub fn stats(&self) -> &RoundStats {
        &self.stats
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Seconds until the dot moves on its own, at the current score
    pub fn current_dot_interval(&self) -> f64 {
        dot_interval(self.level, &self.settings)
    }

    /// Hit radius of the live dot
    pub fn dot_radius(&self, dot: &Dot) -> f32 {
        if dot.bonus {
            self.settings.bonus_dot_radius
        } else {
            self.settings.dot_radius
        }
    }

    pub fn set_screen_bounds(&mut self, bounds: ScreenBounds) {
        self.bounds = bounds;
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Lifecycle ===

    /// Begin a fresh round from any state
    pub fn start(&mut self) {
        self.invalidate_timers();
        self.clock = 0.0;
        self.time_remaining = self.settings.round_duration;
        self.score = 0;
        self.level = level_for_score(0, self.settings.level_formula);
        self.combo = ComboState::default();
        self.dot = None;
        self.stats = RoundStats::default();
        self.paused_from = None;

        log::info!(
            "Round starting ({}s, countdown {})",
            self.settings.round_duration,
            self.settings.countdown_secs
        );

        if self.settings.countdown_secs > 0 {
            self.state = RoundState::Countdown(self.settings.countdown_secs);
            self.events.push(GameEvent::Countdown(self.settings.countdown_secs));
        } else {
            self.go_live();
        }
    }

    pub fn pause(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.invalidate_timers();
        self.paused_from = Some(self.state);
        self.state = RoundState::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Round paused");
    }

    pub fn resume(&mut self) {
        if self.state != RoundState::Paused {
            return;
        }
        self.invalidate_timers();
        self.state = self.paused_from.take().unwrap_or(RoundState::Active);
        self.events.push(GameEvent::Resumed);
        log::info!("Round resumed");
    }

    /// End the round now. No-op unless a round is in progress.
    pub fn end(&mut self) {
        if !matches!(
            self.state,
            RoundState::Countdown(_) | RoundState::Active | RoundState::Paused
        ) {
            return;
        }
        self.invalidate_timers();
        self.state = RoundState::Over;
        self.paused_from = None;
        self.dot = None;
        self.time_remaining = self.time_remaining.max(0.0);

        let summary = self.summary();
        log::info!(
            "Round over: score {} (level {}, max combo {})",
            summary.score,
            summary.level,
            summary.stats.max_combo
        );
        self.events.push(GameEvent::RoundOver(summary));
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score,
            level: self.level,
            time_played: self.clock,
            stats: self.stats.clone(),
        }
    }

    // === Time ===

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        match self.state {
            RoundState::Countdown(n) => self.tick_countdown(n, dt),
            RoundState::Active => self.tick_active(dt),
            RoundState::Idle | RoundState::Paused | RoundState::Over => {}
        }
    }

    /// Tick from a scheduled callback; dropped if the timers were
    /// invalidated since `generation` was read. Returns whether it ran.
    pub fn tick_scheduled(&mut self, generation: u64, dt: f64) -> bool {
        if generation != self.generation {
            log::debug!(
                "Dropping stale tick (generation {} != {})",
                generation,
                self.generation
            );
            return false;
        }
        self.tick(dt);
        true
    }

    fn tick_countdown(&mut self, mut remaining: u32, dt: f64) {
        self.timers.countdown += dt;
        while self.timers.countdown + TIME_EPSILON >= 1.0 && remaining > 0 {
            self.timers.countdown = (self.timers.countdown - 1.0).max(0.0);
            remaining -= 1;
            if remaining == 0 {
                self.go_live();
                return;
            }
            self.state = RoundState::Countdown(remaining);
            self.events.push(GameEvent::Countdown(remaining));
        }
    }

    fn tick_active(&mut self, dt: f64) {
        self.clock += dt;
        self.time_remaining -= dt;
        if self.time_remaining <= TIME_EPSILON {
            self.time_remaining = 0.0;
            self.end();
            return;
        }

        self.timers.dot += dt;
        loop {
            let interval = self.current_dot_interval();
            if self.timers.dot + TIME_EPSILON < interval {
                break;
            }
            self.timers.dot -= interval;
            // A long tick can cover several moves; expire against when each was due
            let moved_at = self.clock - self.timers.dot.max(0.0);
            self.move_dot();
            if self.combo.expire(moved_at, self.settings.combo_window) {
                log::debug!("Combo expired");
                self.events.push(GameEvent::ComboExpired);
            }
        }
    }

    fn go_live(&mut self) {
        self.state = RoundState::Active;
        self.timers = Timers::default();
        self.events.push(GameEvent::RoundStarted);
        self.move_dot();
    }

    fn move_dot(&mut self) {
        let dot = self.placer.place(
            &self.bounds,
            &self.settings.insets,
            self.settings.bonus_chance,
            self.clock,
        );
        self.dot = Some(dot);
        self.events.push(GameEvent::DotMoved(dot));
    }

    fn invalidate_timers(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.timers = Timers::default();
    }

    // === Input ===

    /// Player tapped `position` at round-clock `time`
    pub fn tap(&mut self, position: Vec2, time: f64) -> TapOutcome {
        if self.state != RoundState::Active {
            return TapOutcome::Ignored;
        }
        let Some(dot) = self.dot else {
            return TapOutcome::Ignored;
        };

        if !dot.contains(position, self.dot_radius(&dot)) {
            self.combo.break_combo();
            self.stats.misses += 1;
            self.events.push(GameEvent::Miss);
            log::debug!("Miss at ({:.0}, {:.0})", position.x, position.y);
            return TapOutcome::Miss;
        }

        let combo = self.combo.register_hit(time, self.settings.combo_window);
        let points = hit_points(combo, dot.bonus, self.settings.bonus_points);
        let reaction = (time - dot.spawned_at).max(0.0);

        let before = self.score;
        self.score = self.score.saturating_add(points);

        self.stats.hits += 1;
        if dot.bonus {
            self.stats.bonus_hits += 1;
        }
        self.stats.max_combo = self.stats.max_combo.max(combo);
        self.stats.record_reaction(reaction);

        log::debug!(
            "Hit dot {} for {} (combo {}, reaction {:.3}s)",
            dot.id,
            points,
            combo,
            reaction
        );
        self.events.push(GameEvent::Hit {
            points,
            combo,
            bonus: dot.bonus,
            reaction,
        });

        for milestone in milestones_crossed(before, self.score, &self.settings.milestones) {
            let seconds = self.settings.milestone_time_bonus;
            self.time_remaining += seconds;
            log::info!("Milestone {} reached: +{}s", milestone, seconds);
            self.events.push(GameEvent::TimeBonus { milestone, seconds });
        }

        let level = level_for_score(self.score, self.settings.level_formula);
        if level > self.level {
            self.level = level;
            log::info!("Level up: {}", level);
            self.events.push(GameEvent::LevelUp(level));
        }

        // Fresh dot gets a full movement interval
        self.timers.dot = 0.0;
        self.move_dot();

        TapOutcome::Hit { points, combo }
    }
}
