// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection state machine and move execution
//!
//! A selection runs `Idle -> Selecting -> Idle`. While selecting, the engine
//! holds the candidate cells of the chosen piece and an optional provisional
//! target. Committing with a target executes the move; committing without
//! one (or cancelling) leaves the board untouched and snaps the piece back.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::rules;
use crate::{BoardError, CellId, Coord, EngineError, PieceId, Side};

/// Presentation layer notified of highlight and piece position changes
pub trait Presentation {
    /// Highlight the given cells, in candidate order
    fn highlight(&mut self, cells: &[Coord]);

    /// Remove every highlight
    fn clear_highlight(&mut self);

    /// Move the visual token of `piece` to `cell`
    fn set_piece_position(&mut self, piece: PieceId, cell: Coord);

    /// A piece was captured and left the board
    fn piece_captured(&mut self, _piece: PieceId) {}
}

/// Receives notice of every committed move
pub trait TurnCoordinator {
    /// Called exactly once per committed move, never on cancel
    fn on_move_completed(&mut self, side: Side);

    /// Check if `side` may start a move; unrestricted by default
    fn is_turn_of(&self, _side: Side) -> bool {
        true
    }
}

/// Presentation that ignores every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn highlight(&mut self, _cells: &[Coord]) {}
    fn clear_highlight(&mut self) {}
    fn set_piece_position(&mut self, _piece: PieceId, _cell: Coord) {}
}

/// Selection protocol state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// No piece selected
    #[default]
    Idle,
    /// A piece is selected and its candidate cells are highlighted
    Selecting {
        piece: PieceId,
        candidates: Vec<CellId>,
        target: Option<CellId>,
    },
}

/// A committed move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub side: Side,
    pub from: Coord,
    pub to: Coord,
    /// Piece removed from `to`, if the move was a capture
    pub captured: Option<PieceId>,
}

/// Result of a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The piece moved
    Moved(MoveRecord),
    /// No valid target; the piece went back to its cell
    Reverted,
}

/// Move the piece onto `target`, capturing any occupant there
///
/// The board is updated in one step: the captured piece is deactivated, the
/// origin cell emptied and the piece placed on the target. Presentation is
/// told about the capture and the new position afterwards.
pub fn execute_move<P>(
    board: &mut Board,
    piece: PieceId,
    target: CellId,
    presentation: &mut P,
) -> Result<MoveRecord, EngineError>
where
    P: Presentation + ?Sized,
{
    let side = board.piece(piece).ok_or(BoardError::UnknownPiece(piece))?.side();
    let from = board.piece_coord(piece).ok_or(EngineError::PieceInactive(piece))?;
    let to = board
        .cell(target)
        .map(|cell| cell.coord())
        .ok_or_else(|| BoardError::Inconsistent(format!("cell {} does not exist", target.0)))?;

    let captured = board.transfer(piece, target)?;
    debug_assert!(board.check_consistency().is_ok());

    if let Some(victim) = captured {
        presentation.piece_captured(victim);
    }
    presentation.set_piece_position(piece, to);

    tracing::info!(piece = piece.0, ?side, %from, %to, ?captured, "Move executed");

    Ok(MoveRecord {
        piece,
        side,
        from,
        to,
        captured,
    })
}

/// Drives selection and move commits against an explicitly passed board
pub struct MoveEngine<P, T> {
    presentation: P,
    turns: T,
    state: SelectionState,
    history: Vec<MoveRecord>,
}

impl<P: Presentation, T: TurnCoordinator> MoveEngine<P, T> {
    /// Create an idle engine notifying the given collaborators
    pub fn new(presentation: P, turns: T) -> Self {
        Self {
            presentation,
            turns,
            state: SelectionState::Idle,
            history: Vec::new(),
        }
    }

    /// Select `piece`, compute and highlight its candidate cells
    ///
    /// Fails if a selection is already active or the piece is not on the
    /// board.
    pub fn begin_selection(&mut self, board: &Board, piece: PieceId) -> Result<&[CellId], EngineError> {
        if let SelectionState::Selecting { piece: current, .. } = self.state {
            tracing::warn!(requested = piece.0, current = current.0, "Selection already in progress");
            return Err(EngineError::SelectionInProgress);
        }

        let selected = board.piece(piece).ok_or(BoardError::UnknownPiece(piece))?;
        if !selected.is_active() {
            tracing::warn!(piece = piece.0, "Cannot select a captured piece");
            return Err(EngineError::PieceInactive(piece));
        }

        let candidates = rules::candidate_cells(board, piece);
        let highlighted: Vec<Coord> = candidates
            .iter()
            .filter_map(|&id| board.cell(id).map(|cell| cell.coord()))
            .collect();
        self.presentation.highlight(&highlighted);

        tracing::debug!(piece = piece.0, candidates = ?highlighted, "Selection started");

        self.state = SelectionState::Selecting {
            piece,
            candidates,
            target: None,
        };
        Ok(self.candidates())
    }

    /// Update the provisional target
    ///
    /// The target is kept only if `coord` is one of the candidate cells;
    /// otherwise it is cleared. Does nothing while idle.
    pub fn update_target(&mut self, board: &Board, coord: Coord) -> Option<CellId> {
        let SelectionState::Selecting { candidates, target, .. } = &mut self.state else {
            return None;
        };

        *target = board.cell_id(coord).filter(|id| candidates.contains(id));
        tracing::trace!(%coord, cell = ?*target, "Target updated");
        *target
    }

    /// Clear the provisional target
    pub fn clear_target(&mut self) {
        if let SelectionState::Selecting { target, .. } = &mut self.state {
            *target = None;
        }
    }

    /// Finish the selection
    ///
    /// With a provisional target the move is executed and the turn
    /// coordinator notified; without one the piece snaps back and the board
    /// is unchanged. Either way the engine returns to idle with highlights
    /// cleared.
    pub fn commit(&mut self, board: &mut Board) -> Result<CommitOutcome, EngineError> {
        let SelectionState::Selecting { piece, candidates, target } = std::mem::take(&mut self.state) else {
            tracing::warn!("Commit called with no selection");
            return Err(EngineError::NoSelection);
        };

        let target = target.filter(|&cell| {
            // Target must still be reachable on the board as passed in now
            let still_legal = rules::candidate_cells(board, piece).contains(&cell);
            if !still_legal {
                tracing::warn!(piece = piece.0, cell = cell.0, "Target is no longer reachable");
            }
            still_legal
        });

        let Some(target) = target else {
            self.revert(board, piece);
            return Ok(CommitOutcome::Reverted);
        };
        debug_assert!(candidates.contains(&target));

        let result = execute_move(board, piece, target, &mut self.presentation);
        self.presentation.clear_highlight();
        let record = result?;

        self.turns.on_move_completed(record.side);
        self.history.push(record.clone());
        Ok(CommitOutcome::Moved(record))
    }

    /// Abandon the selection without touching the board
    pub fn cancel(&mut self, board: &Board) -> Result<(), EngineError> {
        let SelectionState::Selecting { piece, .. } = std::mem::take(&mut self.state) else {
            tracing::warn!("Cancel called with no selection");
            return Err(EngineError::NoSelection);
        };

        self.revert(board, piece);
        Ok(())
    }

    fn revert(&mut self, board: &Board, piece: PieceId) {
        self.presentation.clear_highlight();
        if let Some(coord) = board.piece_coord(piece) {
            self.presentation.set_piece_position(piece, coord);
        }
        tracing::debug!(piece = piece.0, "Selection reverted");
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Piece of the active selection
    pub fn selected_piece(&self) -> Option<PieceId> {
        match self.state {
            SelectionState::Selecting { piece, .. } => Some(piece),
            SelectionState::Idle => None,
        }
    }

    /// Candidate cells of the active selection; empty while idle
    pub fn candidates(&self) -> &[CellId] {
        match &self.state {
            SelectionState::Selecting { candidates, .. } => candidates,
            SelectionState::Idle => &[],
        }
    }

    /// Provisional target of the active selection
    pub fn target(&self) -> Option<CellId> {
        match self.state {
            SelectionState::Selecting { target, .. } => target,
            SelectionState::Idle => None,
        }
    }

    /// Moves committed through this engine, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn turns(&self) -> &T {
        &self.turns
    }

    pub fn turns_mut(&mut self) -> &mut T {
        &mut self.turns
    }
}

impl<P: Presentation + Default, T: TurnCoordinator + Default> Default for MoveEngine<P, T> {
    fn default() -> Self {
        Self::new(P::default(), T::default())
    }
}
