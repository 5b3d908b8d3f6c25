//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - Run seeds
//! - External services (leaderboard, interstitial ads)

use crate::error::ServiceError;

/// Online leaderboard. Reports are fire-and-forget: callers log failures.
pub trait Leaderboard {
    fn report_score(&mut self, score: u64, leaderboard_id: &str) -> Result<(), ServiceError>;
}

/// Full-screen ad network
pub trait AdPresenter {
    fn present_ad(&mut self) -> Result<(), ServiceError>;
}

/// Leaderboard for builds without an online service
#[derive(Debug, Default)]
pub struct OfflineLeaderboard;

impl Leaderboard for OfflineLeaderboard {
    fn report_score(&mut self, score: u64, leaderboard_id: &str) -> Result<(), ServiceError> {
        log::debug!("Offline: not reporting {} to {}", score, leaderboard_id);
        Ok(())
    }
}

/// Ad presenter for ad-free builds
#[derive(Debug, Default)]
pub struct NoAds;

impl AdPresenter for NoAds {
    fn present_ad(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Initialize logging for the current platform
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // A second init (tests, embedding hosts) is harmless
    let _ = env_logger::try_init();
}

/// Seed for a new run, taken from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn run_seed() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
