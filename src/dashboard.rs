//! Plain-text progress reporting (A.4), grounded in the original
//! `main.c` dashboard: one line per difficulty, periodically redrawn
//! while attached to a terminal, plain line-per-difficulty otherwise.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

use crate::stats::{DiffStats, Status};

/// Hides the cursor for the lifetime of a live dashboard and restores
/// it on drop, so a `?`-propagated error or a panic never leaves the
/// terminal with its cursor hidden. A no-op off a real terminal.
pub struct TermGuard {
    active: bool,
}

impl TermGuard {
    pub fn new() -> Self {
        let active = io::stdout().is_terminal();
        if active {
            print!("\x1b[?25l");
            let _ = io::stdout().flush();
        }
        TermGuard { active }
    }
}

impl Drop for TermGuard {
    fn drop(&mut self) {
        if self.active {
            print!("\x1b[?25h");
            let _ = io::stdout().flush();
        }
    }
}

/// Redraws the progress table in place when stdout is a terminal
/// (clear screen, reposition cursor, write fresh rows); otherwise
/// prints one fresh block of rows without the clear, so piped /
/// redirected output stays append-only and legible.
pub fn render(game: &str, rows: &[&DiffStats]) {
    let is_tty = io::stdout().is_terminal();
    if is_tty {
        print!("\x1b[2J\x1b[H");
    }

    println!("== {game} ==");
    println!(
        "{:<16} {:>10} {:>10} {:>9} {:>8}",
        "difficulty", "generated", "attempts", "success%", "elapsed"
    );

    for stats in rows {
        let elapsed = format_elapsed(stats.elapsed());
        let label = format!("{}/{}", stats.generated(), stats.target);
        let status_label = match stats.status() {
            Status::Pending => "pending".to_string(),
            Status::Running if stats.is_stopped() => "timeout".red().to_string(),
            Status::Running => "running".to_string(),
            Status::Done => "done".to_string(),
        };
        println!(
            "{:<16} {:>10} {:>10} {:>8.1}% {:>8} {}",
            stats.difficulty,
            label,
            stats.attempts(),
            stats.success_rate(),
            elapsed,
            status_label
        );
    }
    let _ = io::stdout().flush();
}

/// One terminal summary line per difficulty, used in `--quiet` mode
/// instead of the live redraw.
pub fn print_summary(game: &str, rows: &[&DiffStats]) {
    for stats in rows {
        println!(
            "{game}: {} generated {}/{} in {} (attempts {}, success {:.1}%)",
            stats.difficulty,
            stats.generated(),
            stats.target,
            format_elapsed(stats.elapsed()),
            stats.attempts(),
            stats.success_rate()
        );
    }
}

fn format_elapsed(elapsed: std::time::Duration) -> String {
    let total = elapsed.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    let hundredths = elapsed.subsec_millis() / 10;
    format!("{minutes:02}:{seconds:02}.{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn format_elapsed_matches_mm_ss_hh() {
        let d = Duration::from_millis(65_340);
        assert_eq!(format_elapsed(d), "01:05.34");
    }

    #[test]
    fn format_elapsed_handles_zero() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00.00");
    }
}
