//! No-guess solvability check via single-cell deduction, and 3BV scoring.

use std::collections::VecDeque;

use super::board::{Board, Cell};

/// Attempts to fully reveal `board` using only single-cell deductions
/// from one seeded opening. Always computes 3BV into `board.score`,
/// independent of whether the board turns out solvable.
///
/// Returns `true` iff every non-mine cell ends up revealed.
pub fn solve(board: &mut Board) -> bool {
    board.score = three_bv(board);
    board.reset_solver_state();

    let total_safe = board.size() - board.mines;
    let Some(start) = find_start(board) else {
        return false;
    };

    let mut revealed_count = flood_from(board, start);

    loop {
        if revealed_count >= total_safe {
            break;
        }

        let mut progress = false;

        for idx in 0..board.size() {
            if !board.is_revealed(idx) {
                continue;
            }
            let Cell::Clue(clue) = board.cell(idx) else {
                // Revealing a mine would indicate an inconsistent board;
                // the solver suppresses this silently per the spec and
                // simply makes no further progress from this cell.
                continue;
            };
            if clue == 0 {
                continue;
            }
            let clue = clue as usize;

            let neighbors = board.neighbors(idx);
            let flags = neighbors.iter().filter(|&&n| board.is_flagged(n)).count();
            let hidden: Vec<usize> = neighbors
                .iter()
                .copied()
                .filter(|&n| !board.is_revealed(n) && !board.is_flagged(n))
                .collect();

            if hidden.is_empty() {
                continue;
            }

            if flags + hidden.len() == clue {
                for &n in &hidden {
                    board.flag(n);
                }
                progress = true;
            } else if flags == clue {
                for &n in &hidden {
                    if board.cell(n) == Cell::Clue(0) {
                        revealed_count += flood_from(board, n);
                    } else {
                        board.reveal(n);
                        revealed_count += 1;
                    }
                }
                progress = true;
            }
        }

        if !progress {
            break;
        }
    }

    revealed_count >= total_safe
}

/// First row-major zero-clue cell; else the first non-mine cell; else
/// `None` if the board has no safe cell at all.
fn find_start(board: &Board) -> Option<usize> {
    for idx in 0..board.size() {
        if let Cell::Clue(0) = board.cell(idx) {
            return Some(idx);
        }
    }
    for idx in 0..board.size() {
        if !board.cell(idx).is_mine() {
            return Some(idx);
        }
    }
    None
}

/// Reveals `start` and floods through any chain of adjoining zero
/// cells, mirroring a standard chord-on-zero reveal. Returns the
/// number of cells newly revealed by this flood (including `start`,
/// if it was not already revealed).
fn flood_from(board: &mut Board, start: usize) -> usize {
    if board.is_revealed(start) {
        return 0;
    }

    let mut count = 0;
    let mut queue = VecDeque::new();
    board.reveal(start);
    count += 1;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if board.cell(current) != Cell::Clue(0) {
            continue;
        }
        for n in board.neighbors(current) {
            if !board.is_revealed(n) {
                board.reveal(n);
                count += 1;
                queue.push_back(n);
            }
        }
    }

    count
}

/// 3BV: number of openings (connected zero-clue components, under
/// 8-connectivity) plus the number of non-mine cells not covered by
/// any opening. Computed from the true grid, independent of solver
/// progress.
fn three_bv(board: &Board) -> f64 {
    let size = board.size();
    let mut covered = vec![false; size];
    let mut count = 0u64;

    for idx in 0..size {
        if covered[idx] || board.cell(idx) != Cell::Clue(0) {
            continue;
        }

        count += 1;
        let mut queue = VecDeque::new();
        covered[idx] = true;
        queue.push_back(idx);

        while let Some(current) = queue.pop_front() {
            for n in board.neighbors(current) {
                if covered[n] {
                    continue;
                }
                covered[n] = true;
                if board.cell(n) == Cell::Clue(0) {
                    queue.push_back(n);
                }
            }
        }
    }

    for idx in 0..size {
        if !covered[idx] && !board.cell(idx).is_mine() {
            count += 1;
        }
    }

    count as f64
}
