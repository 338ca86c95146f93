// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn tracking

use crate::engine::TurnCoordinator;
use crate::Side;

/// Tracks whose turn it is; White moves first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTracker {
    first: Side,
    side_to_move: Side,
    moves_played: u32,
}

impl Default for TurnTracker {
    fn default() -> Self {
        Self::new(Side::White)
    }
}

impl TurnTracker {
    /// Start with `first` to move
    pub fn new(first: Side) -> Self {
        Self {
            first,
            side_to_move: first,
            moves_played: 0,
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// Back to the opening side with no moves played
    pub fn reset(&mut self) {
        self.side_to_move = self.first;
        self.moves_played = 0;
        tracing::debug!(first = ?self.first, "Turns reset");
    }
}

impl TurnCoordinator for TurnTracker {
    fn on_move_completed(&mut self, side: Side) {
        if side != self.side_to_move {
            tracing::warn!(?side, expected = ?self.side_to_move, "Move completed out of turn");
        }
        // The side that just moved hands over to its opponent
        self.side_to_move = side.opposite();
        self.moves_played += 1;
        tracing::debug!(next = ?self.side_to_move, moves = self.moves_played, "Turn switched");
    }

    fn is_turn_of(&self, side: Side) -> bool {
        self.side_to_move == side
    }
}
