//! Game session
//!
//! Connects a `RoundController` to everything outside the round: the
//! high-score table, the persisted play counter, the online leaderboard and
//! the ad network. None of those can fail a round; errors are logged.

use glam::Vec2;

use crate::highscores::HighScores;
use crate::persistence::KeyValueStore;
use crate::platform::{AdPresenter, Leaderboard};
use crate::settings::Settings;
use crate::sim::{GameEvent, RoundController, RoundState, RoundSummary, ScreenBounds, TapOutcome};

pub struct GameSession {
    round: RoundController,
    high_scores: HighScores,
    play_count: u32,
    /// Final score of the last round, waiting for a name
    pending_score: Option<u64>,
    store: Box<dyn KeyValueStore>,
    leaderboard: Box<dyn Leaderboard>,
    ads: Box<dyn AdPresenter>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Storage key for the number of finished rounds
    pub const PLAY_COUNT_KEY: &'static str = "gamePlayCount";

    /// Restore settings, high scores and play count from `store`
    pub fn load(
        store: Box<dyn KeyValueStore>,
        leaderboard: Box<dyn Leaderboard>,
        ads: Box<dyn AdPresenter>,
        seed: u64,
    ) -> Self {
        let settings = Settings::load(store.as_ref());
        let high_scores = HighScores::load(store.as_ref());
        let play_count = load_play_count(store.as_ref());
        log::info!("Session loaded (seed {}, {} plays)", seed, play_count);

        Self {
            round: RoundController::new(settings, seed),
            high_scores,
            play_count,
            pending_score: None,
            store,
            leaderboard,
            ads,
            events: Vec::new(),
        }
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    pub fn pending_score(&self) -> Option<u64> {
        self.pending_score
    }

    pub fn set_screen_bounds(&mut self, bounds: ScreenBounds) {
        self.round.set_screen_bounds(bounds);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Round forwarding ===

    pub fn start_round(&mut self) {
        if let Some(score) = self.pending_score.take() {
            log::info!("Unsaved score {} dropped by new round", score);
        }
        self.round.start();
        self.pump();
    }

    pub fn tick(&mut self, dt: f64) {
        self.round.tick(dt);
        self.pump();
    }

    /// Current timer generation, to tag scheduled ticks with
    pub fn generation(&self) -> u64 {
        self.round.generation()
    }

    /// Tick from a scheduled callback; stale generations are dropped
    pub fn tick_scheduled(&mut self, generation: u64, dt: f64) -> bool {
        let ran = self.round.tick_scheduled(generation, dt);
        self.pump();
        ran
    }

    pub fn tap(&mut self, position: Vec2, time: f64) -> TapOutcome {
        let outcome = self.round.tap(position, time);
        self.pump();
        outcome
    }

    pub fn pause(&mut self) {
        self.round.pause();
        self.pump();
    }

    pub fn resume(&mut self) {
        self.round.resume();
        self.pump();
    }

    pub fn end_round(&mut self) {
        self.round.end();
        self.pump();
    }

    /// App lost focus: never let the clock run unattended
    pub fn on_background(&mut self) {
        if self.round.state().is_running() {
            log::info!("Auto-paused (app backgrounded)");
            self.pause();
        }
    }

    // === High scores ===

    /// Record the pending score under `name`. Returns the rank achieved.
    pub fn save_score(&mut self, name: &str) -> Option<usize> {
        let score = self.pending_score.take()?;
        let rank = self.high_scores.submit(name, score);
        if let Err(e) = self.high_scores.save(self.store.as_mut()) {
            log::warn!("Failed to save high scores: {}", e);
        }
        rank
    }

    pub fn discard_score(&mut self) {
        self.pending_score = None;
    }

    // === Side effects ===

    fn pump(&mut self) {
        for event in self.round.drain_events() {
            if let GameEvent::RoundOver(summary) = &event {
                self.on_round_over(summary);
            }
            self.events.push(event);
        }
    }

    fn on_round_over(&mut self, summary: &RoundSummary) {
        debug_assert_eq!(self.round.state(), RoundState::Over);

        let leaderboard_id = self.round.settings().leaderboard_id.clone();
        match self.leaderboard.report_score(summary.score, &leaderboard_id) {
            Ok(()) => log::info!("Score {} reported to {}", summary.score, leaderboard_id),
            Err(e) => log::warn!("Score report failed: {}", e),
        }

        self.play_count = self.play_count.saturating_add(1);
        let count = self.play_count.to_string();
        if let Err(e) = self.store.set(Self::PLAY_COUNT_KEY, &count) {
            log::warn!("Failed to save play count: {}", e);
        }
        log::info!("Play count: {}", self.play_count);

        let every = self.round.settings().ad_every;
        if every > 0 && self.play_count % every == 0 {
            log::info!("{} plays reached, presenting ad", self.play_count);
            if let Err(e) = self.ads.present_ad() {
                log::warn!("Ad not shown: {}", e);
            }
        }

        self.pending_score = Some(summary.score);
    }
}

fn load_play_count(store: &dyn KeyValueStore) -> u32 {
    match store.get(GameSession::PLAY_COUNT_KEY) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed play count {:?}", raw);
            0
        }),
        None => 0,
    }
}
