//! The pluggable game-module contract: `{init, process, cleanup}` over
//! an opaque, shared-immutable context. The Minesweeper engine is the
//! one implementation behind it; further engines register into
//! [`registry::get_module`] by name.

use crate::config::DifficultyConfig;

/// Outcome of one `process` call. Mirrors the original C
/// `game_result_t`: a module signals failure only through
/// `success = false`, never through an error channel — an unsolvable
/// attempt is the expected steady state, not a fault.
pub struct GameResult {
    pub success: bool,
    pub score: f64,
    pub payload: Option<String>,
}

/// Per-difficulty context handed back by [`GameModule::init`]. The
/// driver shares one context, read-only, across every worker thread
/// processing that difficulty; `process` must therefore be safe to
/// call concurrently with the same `&self`.
pub trait GameContext: Send + Sync {
    fn process(&self, seed: u32) -> GameResult;
}

/// An immutable descriptor for one game engine: a display name, the
/// CSV header fragment to emit after the standard
/// `difficulty,seed,score` columns, and the module lifecycle.
pub trait GameModule: Send + Sync {
    fn name(&self) -> &str;

    fn csv_header(&self) -> &str;

    fn init(&self, difficulty: &DifficultyConfig) -> Box<dyn GameContext>;

    /// No-op by default; the difficulty record the context was built
    /// from is owned by the driver, not the module.
    fn cleanup(&self, _ctx: Box<dyn GameContext>) {}
}

pub mod registry {
    use super::GameModule;
    use crate::minesweeper::MinesweeperModule;

    /// Looks up a game module by its configuration name. Populated at
    /// startup; unknown names resolve to `None` so the driver can log
    /// and skip that engine's difficulties.
    pub fn get_module(name: &str) -> Option<&'static dyn GameModule> {
        static MINESWEEPER: MinesweeperModule = MinesweeperModule;
        match name {
            "minesweeper" => Some(&MINESWEEPER),
            _ => None,
        }
    }
}
