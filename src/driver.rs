//! The generation driver (§4.5, §5): for each configured game module,
//! in declared order, run its declared difficulties sequentially, each
//! behind its own worker pool, with live progress reporting.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{GameConfig, RootConfig};
use crate::csv_sink::CsvSink;
use crate::dashboard;
use crate::game_module::registry;
use crate::stats::DiffStats;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs every configured engine to completion (or until interrupted).
/// Fatal errors (unknown engine, sink open failure) are logged to
/// stderr and only abort that one engine's block, per §7 — a mistake
/// in one engine's configuration must not prevent the others from
/// running.
pub fn run(config: &RootConfig, keep_running: &AtomicBool, quiet: bool) {
    for game in &config.games {
        run_game(game, config.threads.max(1), keep_running, quiet);
    }
}

fn run_game(game: &GameConfig, threads: usize, keep_running: &AtomicBool, quiet: bool) {
    let Some(module) = registry::get_module(&game.engine_name) else {
        eprintln!(
            "game_forge: unknown engine {:?}, skipping its difficulties",
            game.engine_name
        );
        return;
    };

    let sink = match CsvSink::open(Path::new(&game.output), module.csv_header(), game.append) {
        Ok(sink) => sink,
        Err(err) => {
            eprintln!("game_forge: failed to open sink for {:?}: {err:?}", game.engine_name);
            return;
        }
    };

    // Hides the cursor for the lifetime of this engine's live dashboard
    // (a no-op off a real terminal) and restores it on drop, covering
    // every difficulty's redraws with one guard.
    let _term_guard = (!quiet).then(dashboard::TermGuard::new);

    for difficulty in &game.difficulties {
        if !keep_running.load(std::sync::atomic::Ordering::Relaxed) {
            break;
        }

        let stats = DiffStats::new(&game.engine_name, &difficulty.name, difficulty.count);
        stats.mark_running();

        let ctx = module.init(difficulty);
        let max_time = difficulty.get_int("max_time", 0).max(0) as u64;

        thread::scope(|scope| {
            for _ in 0..threads {
                let ctx_ref = ctx.as_ref();
                let stats_ref = &stats;
                let sink_ref = &sink;
                scope.spawn(move || worker_loop(ctx_ref, stats_ref, sink_ref, keep_running, &difficulty.name));
            }
            monitor_loop(&stats, max_time, keep_running, quiet, &game.engine_name);
        });

        stats.mark_done();
        if quiet {
            dashboard::print_summary(&game.engine_name, &[&stats]);
        } else {
            dashboard::render(&game.engine_name, &[&stats]);
        }

        module.cleanup(ctx);
    }
}

fn worker_loop(
    ctx: &dyn crate::game_module::GameContext,
    stats: &DiffStats,
    sink: &CsvSink,
    keep_running: &AtomicBool,
    difficulty: &str,
) {
    while !stats.should_stop(keep_running) {
        let seed = worker_seed();
        let result = ctx.process(seed);

        if result.success {
            let payload = result.payload.as_deref().unwrap_or("");
            if let Err(err) = sink.write_row(difficulty, seed, result.score, payload) {
                eprintln!("game_forge: failed to write CSV row: {err:?}");
                stats.stop();
                stats.record_attempt(false);
                break;
            }
        }

        stats.record_attempt(result.success);
    }
}

fn monitor_loop(stats: &DiffStats, max_time: u64, keep_running: &AtomicBool, quiet: bool, game: &str) {
    let started = Instant::now();
    loop {
        if stats.target_reached() {
            stats.stop();
            break;
        }
        if !keep_running.load(std::sync::atomic::Ordering::Relaxed) {
            stats.stop();
            break;
        }
        if max_time > 0 && started.elapsed() >= Duration::from_secs(max_time) {
            stats.stop();
            break;
        }
        if !quiet {
            dashboard::render(game, &[stats]);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// A fresh per-attempt seed, drawn once per worker iteration from the
/// current wall clock mixed with the calling thread's identity, per
/// §4.1.
fn worker_seed() -> u32 {
    let mut hasher = DefaultHasher::new();
    std::time::SystemTime::now().hash(&mut hasher);
    thread::current().id().hash(&mut hasher);
    hasher.finish() as u32
}

/// Validates a loaded configuration against the module registry,
/// reporting every problem that would cause an engine block to be
/// skipped, without running anything. Used by `--dry-run`.
pub fn validate(config: &RootConfig) -> Vec<String> {
    let mut problems = Vec::new();
    if config.games.is_empty() {
        problems.push("configuration declares no game engines".to_string());
    }
    for game in &config.games {
        if registry::get_module(&game.engine_name).is_none() {
            problems.push(format!("unknown engine {:?}", game.engine_name));
        }
        if game.difficulties.is_empty() {
            problems.push(format!("engine {:?} declares no difficulties", game.engine_name));
        }
    }
    problems
}
