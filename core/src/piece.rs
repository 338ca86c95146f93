// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pieces and their data-described movement patterns

use serde::{Deserialize, Serialize};

use crate::{CellId, Coord, PieceId, Side};

/// Single steps to the eight neighbours, in evaluation order:
/// horizontal, vertical, upper diagonal, lower diagonal.
pub const ADJACENT_STEPS: [Coord; 8] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
    Coord::new(1, 1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
    Coord::new(1, -1),
];

pub const ROOK_DIRS: [Coord; 4] = [
    Coord::new(1, 0),
    Coord::new(-1, 0),
    Coord::new(0, 1),
    Coord::new(0, -1),
];

pub const BISHOP_DIRS: [Coord; 4] = [
    Coord::new(1, 1),
    Coord::new(-1, 1),
    Coord::new(-1, -1),
    Coord::new(1, -1),
];

pub const KNIGHT_JUMPS: [Coord; 8] = [
    Coord::new(1, 2),
    Coord::new(2, 1),
    Coord::new(2, -1),
    Coord::new(1, -2),
    Coord::new(-1, -2),
    Coord::new(-2, -1),
    Coord::new(-2, 1),
    Coord::new(-1, 2),
];

/// Direction set plus how far a piece may travel along each direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePattern {
    /// Direction vectors, evaluated in order
    pub directions: Vec<Coord>,
    /// Maximum steps per direction; `None` slides until blocked
    pub step_limit: Option<u8>,
}

impl MovePattern {
    /// One step to any of the eight neighbouring cells
    pub fn adjacent() -> Self {
        Self::stepping(&ADJACENT_STEPS)
    }

    /// Single step along each given direction (also covers jumps)
    pub fn stepping(directions: &[Coord]) -> Self {
        Self {
            directions: directions.to_vec(),
            step_limit: Some(1),
        }
    }

    /// Unbounded slide along each given direction
    pub fn sliding(directions: &[Coord]) -> Self {
        Self {
            directions: directions.to_vec(),
            step_limit: None,
        }
    }
}

/// Kind of piece; kinds differ only in the pattern they carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Generic single-step piece
    Walker,
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PieceKind {
    /// Movement pattern for this kind
    pub fn pattern(self) -> MovePattern {
        match self {
            PieceKind::Walker | PieceKind::King => MovePattern::adjacent(),
            PieceKind::Queen => MovePattern::sliding(&ADJACENT_STEPS),
            PieceKind::Rook => MovePattern::sliding(&ROOK_DIRS),
            PieceKind::Bishop => MovePattern::sliding(&BISHOP_DIRS),
            PieceKind::Knight => MovePattern::stepping(&KNIGHT_JUMPS),
        }
    }

    /// Single-letter symbol, upper case for White
    pub fn symbol(self, side: Side) -> char {
        let c = match self {
            PieceKind::Walker => 'w',
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
        };
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

/// A side-affiliated occupant of the board
///
/// Cell references are arena ids; the board keeps `current` and the cell's
/// occupant in agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) side: Side,
    pub(crate) kind: PieceKind,
    pub(crate) pattern: MovePattern,
    pub(crate) current: Option<CellId>,
    pub(crate) home: CellId,
    pub(crate) first_move: bool,
}

impl Piece {
    pub(crate) fn new(id: PieceId, side: Side, kind: PieceKind, pattern: MovePattern, home: CellId) -> Self {
        Self {
            id,
            side,
            kind,
            pattern,
            current: Some(home),
            home,
            first_move: true,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn pattern(&self) -> &MovePattern {
        &self.pattern
    }

    /// Cell currently holding this piece, `None` once captured
    pub fn current_cell(&self) -> Option<CellId> {
        self.current
    }

    /// Cell the piece was originally placed on
    pub fn home_cell(&self) -> CellId {
        self.home
    }

    /// True until the piece completes its first move
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    /// A piece is active while it stands on a cell
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}
