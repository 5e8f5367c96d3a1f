use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use game_forge::{config, driver};

#[derive(Parser)]
#[clap(about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[clap(short, long, value_parser, default_value = "game_forge.yaml")]
    config: PathBuf,

    /// Suppress the live dashboard; print one summary line per
    /// difficulty on completion instead.
    #[clap(short, long, value_parser)]
    quiet: bool,

    /// Load and validate the configuration, print the resolved plan,
    /// and exit without generating anything.
    #[clap(long, value_parser)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load(&cli.config)
        .with_context(|| format!("while loading config at {}", cli.config.display()))?;

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let keep_running = Arc::new(AtomicBool::new(true));
    let handler_flag = Arc::clone(&keep_running);
    ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::Relaxed);
    })
    .context("failed to install SIGINT handler")?;

    driver::run(&config, &keep_running, cli.quiet);

    Ok(())
}

fn print_plan(config: &config::RootConfig) {
    println!("threads: {}", config.threads);
    for game in &config.games {
        println!("game: {} -> {}", game.engine_name, game.output);
        for diff in &game.difficulties {
            println!(
                "  {} (target {}, columns={}, rows={}, mines={}..={})",
                diff.name,
                diff.count,
                diff.get_int("columns", 9),
                diff.get_int("rows", 9),
                diff.get_int("mines.minimum", 10),
                diff.get_int("mines.maximum", 10),
            );
        }
    }

    for problem in driver::validate(config) {
        eprintln!("game_forge: {problem}");
    }
}
