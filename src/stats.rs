//! The per-difficulty statistics record (§3) and its lock discipline,
//! per the REDESIGN FLAGS note in §9: atomic counters for the
//! high-frequency fields, a small mutex only for the timestamps and
//! status that change rarely and need to move together.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Pending,
    Running,
    Done,
}

#[derive(Default)]
struct Timing {
    status: Option<Status>,
    started: Option<Instant>,
    ended: Option<Instant>,
}

/// One difficulty's live counters, shared read-only (by reference)
/// across its worker pool and the driver thread that samples it.
pub struct DiffStats {
    pub game: String,
    pub difficulty: String,
    pub target: u64,
    generated: AtomicU64,
    attempts: AtomicU64,
    failures: AtomicU64,
    stop: AtomicBool,
    timing: Mutex<Timing>,
}

impl DiffStats {
    pub fn new(game: &str, difficulty: &str, target: u64) -> Self {
        DiffStats {
            game: game.to_string(),
            difficulty: difficulty.to_string(),
            target,
            generated: AtomicU64::new(0),
            attempts: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            stop: AtomicBool::new(false),
            timing: Mutex::new(Timing {
                status: Some(Status::Pending),
                started: None,
                ended: None,
            }),
        }
    }

    pub fn mark_running(&self) {
        let mut timing = self.timing.lock().unwrap();
        timing.status = Some(Status::Running);
        timing.started = Some(Instant::now());
    }

    pub fn mark_done(&self) {
        let mut timing = self.timing.lock().unwrap();
        timing.status = Some(Status::Done);
        timing.ended = Some(Instant::now());
    }

    pub fn status(&self) -> Status {
        self.timing.lock().unwrap().status.unwrap_or(Status::Pending)
    }

    pub fn elapsed(&self) -> Duration {
        let timing = self.timing.lock().unwrap();
        match (timing.started, timing.ended) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => start.elapsed(),
            (None, _) => Duration::ZERO,
        }
    }

    /// A worker's single post-attempt bookkeeping step: one attempt
    /// always counts, and it lands in exactly one of `generated` or
    /// `failures`.
    pub fn record_attempt(&self, success: bool) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if success {
            self.generated.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn target_reached(&self) -> bool {
        self.generated() >= self.target
    }

    /// A worker's exit condition, sampled once per attempt: target
    /// met, this difficulty stopped (e.g. timeout), or the whole run
    /// was asked to shut down.
    pub fn should_stop(&self, keep_running: &AtomicBool) -> bool {
        self.target_reached() || self.is_stopped() || !keep_running.load(Ordering::Relaxed)
    }

    pub fn success_rate(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            0.0
        } else {
            self.generated() as f64 / attempts as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_start_pending_with_zero_counters() {
        let stats = DiffStats::new("minesweeper", "easy", 5);
        assert_eq!(stats.status(), Status::Pending);
        assert_eq!(stats.generated(), 0);
        assert_eq!(stats.attempts(), 0);
        assert_eq!(stats.failures(), 0);
        assert!(!stats.is_stopped());
    }

    #[test]
    fn record_attempt_splits_into_generated_or_failures() {
        let stats = DiffStats::new("minesweeper", "easy", 5);
        stats.record_attempt(true);
        stats.record_attempt(false);
        stats.record_attempt(true);
        assert_eq!(stats.attempts(), 3);
        assert_eq!(stats.generated(), 2);
        assert_eq!(stats.failures(), 1);
    }

    #[test]
    fn target_reached_flips_once_generated_meets_target() {
        let stats = DiffStats::new("minesweeper", "easy", 2);
        assert!(!stats.target_reached());
        stats.record_attempt(true);
        assert!(!stats.target_reached());
        stats.record_attempt(true);
        assert!(stats.target_reached());
    }

    #[test]
    fn should_stop_honors_stop_flag_and_global_interrupt() {
        let stats = DiffStats::new("minesweeper", "easy", 100);
        let keep_running = AtomicBool::new(true);
        assert!(!stats.should_stop(&keep_running));

        stats.stop();
        assert!(stats.should_stop(&keep_running));

        let stats2 = DiffStats::new("minesweeper", "easy", 100);
        keep_running.store(false, Ordering::Relaxed);
        assert!(stats2.should_stop(&keep_running));
    }

    #[test]
    fn lifecycle_transitions_pending_running_done() {
        let stats = DiffStats::new("minesweeper", "easy", 1);
        assert_eq!(stats.status(), Status::Pending);
        stats.mark_running();
        assert_eq!(stats.status(), Status::Running);
        stats.mark_done();
        assert_eq!(stats.status(), Status::Done);
    }

    #[test]
    fn success_rate_is_zero_with_no_attempts() {
        let stats = DiffStats::new("minesweeper", "easy", 1);
        assert_eq!(stats.success_rate(), 0.0);
    }
}
