//! The Minesweeper engine adapter: binds [`board`], [`rng`],
//! [`generator`], and [`solver`] to the generic game-module contract.

pub mod board;
pub mod generator;
pub mod rng;
pub mod solver;

use crate::config::DifficultyConfig;
use crate::game_module::{GameContext, GameModule, GameResult};
use board::Board;
use rng::GameRng;

pub struct MinesweeperModule;

impl GameModule for MinesweeperModule {
    fn name(&self) -> &str {
        "Minesweeper"
    }

    fn csv_header(&self) -> &str {
        "width,height,mines,tags,board_string"
    }

    fn init(&self, difficulty: &DifficultyConfig) -> Box<dyn GameContext> {
        Box::new(MinesweeperContext {
            config: difficulty.clone(),
        })
    }
}

struct MinesweeperContext {
    config: DifficultyConfig,
}

impl GameContext for MinesweeperContext {
    fn process(&self, seed: u32) -> GameResult {
        let columns = self.config.get_int("columns", 9).max(1) as usize;
        let rows = self.config.get_int("rows", 9).max(1) as usize;
        let min_mines = self.config.get_int("mines.minimum", 10).max(0) as usize;
        let max_mines = self.config.get_int("mines.maximum", 10).max(min_mines as i64) as usize;
        let tags = self.config.get_string("tags", "");

        let mut rng = GameRng::from_seed(seed);
        let mines = if max_mines > min_mines {
            min_mines + rng.gen_range_inclusive(max_mines - min_mines)
        } else {
            min_mines
        };
        let size = columns.saturating_mul(rows);
        let mines = mines.min(size.saturating_sub(1));

        let mut board = Board::new(columns, rows, mines, seed, &self.config.name);
        generator::generate(&mut board, mines, &mut rng);
        let success = solver::solve(&mut board);

        if success {
            let payload = format!(
                "{},{},{},{},{}",
                board.width,
                board.height,
                board.mines,
                tags,
                board.board_string()
            );
            GameResult {
                success: true,
                score: board.score,
                payload: Some(payload),
            }
        } else {
            GameResult {
                success: false,
                score: board.score,
                payload: None,
            }
        }
    }
}
