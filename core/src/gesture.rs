// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gesture adaptation: press, drag and release in screen space
//!
//! The input layer owns screen geometry and reports it through [`HitTest`].
//! [`GestureAdapter`] turns the three gesture callbacks into engine calls.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::engine::{CommitOutcome, MoveEngine, Presentation, TurnCoordinator};
use crate::{CellId, Coord, EngineError};

/// A point in screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle; both edges count as inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRect {
    pub fn from_min_size(min: ScreenPoint, size: f32) -> Self {
        Self {
            min,
            max: ScreenPoint::new(min.x + size, min.y + size),
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new((self.min.x + self.max.x) / 2.0, (self.min.y + self.max.y) / 2.0)
    }
}

/// Screen-to-board resolution supplied by the input layer
pub trait HitTest {
    /// Board coordinate under `point`; may be off-board
    fn resolve(&self, point: ScreenPoint) -> Option<Coord>;

    /// Check if the screen area of `cell` contains `point`
    fn cell_contains(&self, cell: Coord, point: ScreenPoint) -> bool;
}

/// Uniform square grid anchored at `origin`, row `y` growing downwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub origin: ScreenPoint,
    pub cell_size: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::default(),
            cell_size: 64.0,
        }
    }
}

impl GridLayout {
    pub fn new(origin: ScreenPoint, cell_size: f32) -> Self {
        Self { origin, cell_size }
    }

    /// Screen rectangle covered by `cell`
    pub fn cell_rect(&self, cell: Coord) -> ScreenRect {
        let min = ScreenPoint::new(
            self.origin.x + cell.x as f32 * self.cell_size,
            self.origin.y + cell.y as f32 * self.cell_size,
        );
        ScreenRect::from_min_size(min, self.cell_size)
    }

    /// Screen position of the middle of `cell`
    pub fn cell_center(&self, cell: Coord) -> ScreenPoint {
        self.cell_rect(cell).center()
    }
}

impl HitTest for GridLayout {
    fn resolve(&self, point: ScreenPoint) -> Option<Coord> {
        if self.cell_size.is_nan() || self.cell_size <= 0.0 {
            return None;
        }
        let x = ((point.x - self.origin.x) / self.cell_size).floor();
        let y = ((point.y - self.origin.y) / self.cell_size).floor();
        if !x.is_finite() || !y.is_finite() || x.abs() > i32::MAX as f32 || y.abs() > i32::MAX as f32 {
            return None;
        }
        Some(Coord::new(x as i32, y as i32))
    }

    fn cell_contains(&self, cell: Coord, point: ScreenPoint) -> bool {
        self.cell_rect(cell).contains(point)
    }
}

/// Translates press/drag/release gestures into selection calls
#[derive(Debug, Clone)]
pub struct GestureAdapter<H> {
    hit_test: H,
    enforce_turns: bool,
}

impl<H: HitTest> GestureAdapter<H> {
    pub fn new(hit_test: H) -> Self {
        Self {
            hit_test,
            enforce_turns: false,
        }
    }

    /// Ignore presses on pieces whose side is not to move
    pub fn with_turn_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_turns = enforce;
        self
    }

    pub fn hit_test(&self) -> &H {
        &self.hit_test
    }

    /// Pointer pressed; selects the piece under `point`
    ///
    /// Returns `Ok(false)` when there is nothing selectable under the
    /// pointer. Pressing while a selection is active is a usage error.
    pub fn on_selection_start<P, T>(
        &mut self,
        engine: &mut MoveEngine<P, T>,
        board: &Board,
        point: ScreenPoint,
    ) -> Result<bool, EngineError>
    where
        P: Presentation,
        T: TurnCoordinator,
    {
        let Some(piece) = self.hit_test.resolve(point).and_then(|coord| board.occupant(coord)) else {
            tracing::trace!(x = point.x, y = point.y, "Press on empty space");
            return Ok(false);
        };

        if self.enforce_turns {
            let side = board.piece(piece).map(|p| p.side());
            if side.is_some_and(|side| !engine.turns().is_turn_of(side)) {
                tracing::debug!(piece = piece.0, ?side, "Press ignored, not this side's turn");
                return Ok(false);
            }
        }

        engine.begin_selection(board, piece)?;
        Ok(true)
    }

    /// Pointer moved; tracks which candidate cell is under it
    ///
    /// Candidates are checked in order and the last one containing the
    /// pointer becomes the provisional target. If none contains it the
    /// target is cleared.
    pub fn on_selection_move<P, T>(
        &mut self,
        engine: &mut MoveEngine<P, T>,
        board: &Board,
        point: ScreenPoint,
    ) -> Option<CellId>
    where
        P: Presentation,
        T: TurnCoordinator,
    {
        if !engine.is_selecting() {
            return None;
        }

        let mut hovered = None;
        for cell in engine.candidates().iter().filter_map(|&id| board.cell(id)) {
            if self.hit_test.cell_contains(cell.coord(), point) {
                hovered = Some(cell.coord());
            }
        }

        match hovered {
            Some(coord) => engine.update_target(board, coord),
            None => {
                engine.clear_target();
                None
            }
        }
    }

    /// Pointer released; commits the selection
    ///
    /// The release point is tracked like a final move first. Returns
    /// `Ok(None)` if no selection was active.
    pub fn on_selection_end<P, T>(
        &mut self,
        engine: &mut MoveEngine<P, T>,
        board: &mut Board,
        point: ScreenPoint,
    ) -> Result<Option<CommitOutcome>, EngineError>
    where
        P: Presentation,
        T: TurnCoordinator,
    {
        if !engine.is_selecting() {
            return Ok(None);
        }

        self.on_selection_move(engine, board, point);
        engine.commit(board).map(Some)
    }
}
