// SPDX-License-Identifier: MIT OR Apache-2.0

//! Initial piece placement

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::board::Board;
use crate::piece::PieceKind;
use crate::{BoardError, Coord, PieceId, Side};

/// Back rank order for a standard 8-wide board
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One piece in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub side: Side,
    #[serde(default = "default_kind")]
    pub kind: PieceKind,
}

fn default_kind() -> PieceKind {
    PieceKind::Walker
}

impl Placement {
    pub fn new(x: i32, y: i32, side: Side, kind: PieceKind) -> Self {
        Self { x, y, side, kind }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// A set of placements applied to an empty board at setup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub pieces: Vec<Placement>,
}

impl Layout {
    /// White on row 0 and Black on the last row, one full rank each
    ///
    /// Boards wider than eight repeat the rank pattern.
    pub fn back_ranks(width: u32, height: u32) -> Self {
        let last = height.saturating_sub(1) as i32;
        let mut pieces = Vec::with_capacity(width as usize * 2);

        for (side, y) in [(Side::White, 0), (Side::Black, last)] {
            if side == Side::Black && last == 0 {
                break;
            }
            for x in 0..width {
                let kind = BACK_RANK[x as usize % BACK_RANK.len()];
                pieces.push(Placement::new(x as i32, y, side, kind));
            }
        }

        Self { pieces }
    }

    /// Place every piece on `board`, in order
    ///
    /// Every placement is checked first; if one is off-board or lands on an
    /// occupied cell the board is left untouched.
    pub fn apply(&self, board: &mut Board) -> Result<Vec<PieceId>, BoardError> {
        self.validate(board)?;

        let ids = self
            .pieces
            .iter()
            .map(|p| board.add_piece(p.side, p.kind, p.coord()))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(pieces = ids.len(), "Layout applied");
        Ok(ids)
    }

    fn validate(&self, board: &Board) -> Result<(), BoardError> {
        let mut taken = HashSet::with_capacity(self.pieces.len());
        for placement in &self.pieces {
            let coord = placement.coord();
            if !board.contains(coord) {
                return Err(BoardError::OutOfBounds(coord));
            }
            if board.occupant(coord).is_some() || !taken.insert(coord) {
                return Err(BoardError::CellOccupied(coord));
            }
        }
        Ok(())
    }
}
