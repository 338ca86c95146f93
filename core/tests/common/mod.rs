// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test collaborators

#![allow(dead_code)]

use gridmove_core::{Board, Coord, PieceId, Presentation, Side, TurnCoordinator};

/// Every notification the engine sent, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Highlight(Vec<Coord>),
    ClearHighlight,
    Position(PieceId, Coord),
    Captured(PieceId),
}

#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub events: Vec<Event>,
}

impl RecordingPresentation {
    /// Cells currently highlighted, per the notifications so far
    pub fn highlighted(&self) -> Vec<Coord> {
        let mut current = Vec::new();
        for event in &self.events {
            match event {
                Event::Highlight(cells) => current = cells.clone(),
                Event::ClearHighlight => current.clear(),
                _ => {}
            }
        }
        current
    }
}

impl Presentation for RecordingPresentation {
    fn highlight(&mut self, cells: &[Coord]) {
        self.events.push(Event::Highlight(cells.to_vec()));
    }

    fn clear_highlight(&mut self) {
        self.events.push(Event::ClearHighlight);
    }

    fn set_piece_position(&mut self, piece: PieceId, cell: Coord) {
        self.events.push(Event::Position(piece, cell));
    }

    fn piece_captured(&mut self, piece: PieceId) {
        self.events.push(Event::Captured(piece));
    }
}

#[derive(Debug, Default)]
pub struct RecordingTurns {
    pub completed: Vec<Side>,
}

impl TurnCoordinator for RecordingTurns {
    fn on_move_completed(&mut self, side: Side) {
        self.completed.push(side);
    }
}

/// Snapshot of the occupant of every cell, row-major
pub fn occupancy(board: &Board) -> Vec<Option<PieceId>> {
    board.cells().iter().map(|cell| cell.occupant()).collect()
}

/// Candidate coordinates, sorted for set comparison
pub fn sorted_coords(board: &Board, cells: &[gridmove_core::CellId]) -> Vec<Coord> {
    let mut coords: Vec<Coord> = cells
        .iter()
        .map(|&id| board.cell(id).expect("candidate cell exists").coord())
        .collect();
    coords.sort();
    coords
}
