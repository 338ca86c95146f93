// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gridmove Core - Move Legality and Selection
//!
//! This crate provides the board-side logic of a drag-to-move board game:
//! - Board and cell representation with piece occupancy
//! - Data-described movement patterns and reachability
//! - The selection state machine and committed move execution
//! - Gesture adaptation and hit-testing for an external input layer
//! - Turn tracking, initial layouts and configuration

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod piece;
pub mod rules;
pub mod engine;
pub mod gesture;
pub mod turn;
pub mod layout;
pub mod config;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Side a piece plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// White side (moves first)
    White,
    /// Black side
    Black,
}

impl Side {
    /// Returns the opposing side
    pub fn opposite(&self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// Board coordinate; signed so that stepping off the edge stays representable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `step`; `None` if either axis overflows `i32`
    pub fn checked_add(self, step: Coord) -> Option<Coord> {
        Some(Coord::new(self.x.checked_add(step.x)?, self.y.checked_add(step.y)?))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Index of a cell in the board's cell arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// Index of a piece in the board's piece arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// Errors raised by board construction and mutation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Width or height was zero
    #[error("Invalid board dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// The coordinate is outside the board
    #[error("Coordinate {0} is outside the board")]
    OutOfBounds(Coord),

    /// The cell already holds a piece
    #[error("Cell {0} is already occupied")]
    CellOccupied(Coord),

    /// No piece with this id exists
    #[error("Unknown piece {0:?}")]
    UnknownPiece(PieceId),

    /// Cell and piece back-references disagree
    #[error("Inconsistent occupancy: {0}")]
    Inconsistent(String),
}

/// Usage errors of the selection protocol
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// `begin_selection` was called while a selection is active
    #[error("A selection is already in progress")]
    SelectionInProgress,

    /// `commit` or `cancel` was called with no active selection
    #[error("No selection in progress")]
    NoSelection,

    /// The piece has been captured and cannot be selected
    #[error("Piece {0:?} is not on the board")]
    PieceInactive(PieceId),

    /// Underlying board error
    #[error(transparent)]
    Board(#[from] BoardError),
}

pub use board::{Board, Cell, CellState};
pub use piece::{MovePattern, Piece, PieceKind};
pub use engine::{
    execute_move, CommitOutcome, MoveEngine, MoveRecord, NullPresentation, Presentation,
    SelectionState, TurnCoordinator,
};
pub use gesture::{GestureAdapter, GridLayout, HitTest, ScreenPoint, ScreenRect};
pub use turn::TurnTracker;
pub use layout::{Layout, Placement};
pub use config::EngineConfig;
