//! Random mine placement (Fisher-Yates) and 8-neighbor clue computation.

use super::board::Board;
use super::rng::GameRng;

/// Fills `board` with `mines` mines, chosen uniformly among all cells,
/// then computes every non-mine cell's clue.
///
/// Preconditions: `board` is freshly constructed, `mines < board.size()`.
pub fn generate(board: &mut Board, mines: usize, rng: &mut GameRng) {
    let size = board.size();
    debug_assert!(mines < size);

    let mut indices: Vec<usize> = (0..size).collect();

    // Fisher-Yates: for each position i from the top down, swap it
    // with a uniformly drawn position in [0, i].
    for i in (1..size).rev() {
        let j = rng.gen_range_inclusive(i);
        indices.swap(i, j);
    }

    for &idx in indices.iter().take(mines) {
        board.set_mine(idx);
    }

    for idx in 0..size {
        if board.cell(idx).is_mine() {
            continue;
        }
        let count = board
            .neighbors(idx)
            .iter()
            .filter(|&&n| board.cell(n).is_mine())
            .count() as u8;
        board.set_clue(idx, count);
    }
}
