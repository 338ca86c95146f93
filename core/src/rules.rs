// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reachability: which cells a piece may move to

use crate::board::{Board, CellState};
use crate::piece::Piece;
use crate::{CellId, Coord, PieceId};

/// Walk one direction from the piece's cell, collecting reachable cells
///
/// Free cells are collected and the walk continues up to the step limit.
/// An enemy cell is collected and ends the walk; an ally or an off-board
/// coordinate ends it without being collected.
pub fn walk_direction(board: &Board, piece: &Piece, direction: Coord, out: &mut Vec<CellId>) {
    let Some(start) = piece.current_cell().and_then(|id| board.cell(id)) else {
        return;
    };

    let mut coord = start.coord();
    let mut steps: u32 = 0;
    let limit = piece.pattern().step_limit.map(u32::from);

    loop {
        if limit.is_some_and(|limit| steps >= limit) {
            break;
        }
        // Overflowing i32 lies off every board
        let Some(next) = coord.checked_add(direction) else {
            break;
        };
        coord = next;
        steps += 1;

        match board.classify_cell(coord, piece) {
            CellState::Free => {
                if let Some(id) = board.cell_id(coord) {
                    out.push(id);
                }
            }
            CellState::Enemy => {
                if let Some(id) = board.cell_id(coord) {
                    out.push(id);
                }
                break;
            }
            CellState::Ally | CellState::OutOfBounds => break,
        }
    }
}

/// Candidate destinations of a piece, in pattern direction order
///
/// Inactive pieces and unknown ids have no candidates.
pub fn candidate_cells(board: &Board, piece: PieceId) -> Vec<CellId> {
    let Some(piece) = board.piece(piece) else {
        return Vec::new();
    };
    if !piece.is_active() {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(piece.pattern().directions.len());
    for &direction in &piece.pattern().directions {
        // A zero vector would never leave the piece's own (ally) cell
        if direction == Coord::new(0, 0) {
            continue;
        }
        walk_direction(board, piece, direction, &mut candidates);
    }

    tracing::debug!(piece = piece.id().0, count = candidates.len(), "Computed candidate cells");
    candidates
}

/// Check whether `target` is a legal destination for `piece`
pub fn is_reachable(board: &Board, piece: PieceId, target: Coord) -> bool {
    board
        .cell_id(target)
        .is_some_and(|id| candidate_cells(board, piece).contains(&id))
}
