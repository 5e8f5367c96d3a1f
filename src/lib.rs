//! Library surface for `game_forge`: exposes the configuration model,
//! the generation driver, the pluggable game-module contract, and the
//! Minesweeper engine so both `src/main.rs` and the `tests/` directory
//! can drive them end to end.

pub mod config;
pub mod csv_sink;
pub mod dashboard;
pub mod driver;
pub mod game_module;
pub mod minesweeper;
pub mod stats;
