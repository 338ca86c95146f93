// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation: the cell arena, the piece arena and occupancy

use serde::{Deserialize, Serialize};

use crate::piece::{MovePattern, Piece, PieceKind};
use crate::{BoardError, CellId, Coord, PieceId, Side};

/// Standard board edge length
pub const STANDARD_SIZE: u32 = 8;

/// Classification of a coordinate relative to a requesting piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Unoccupied, reachable
    Free,
    /// Held by the opposing side; reachable as a capture, blocks beyond
    Enemy,
    /// Held by the same side; blocks
    Ally,
    /// Not a board coordinate; blocks
    OutOfBounds,
}

/// A single addressable grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    coord: Coord,
    occupant: Option<PieceId>,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Piece standing on this cell, if any
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }
}

/// Fixed-size grid owning every cell and every piece for its lifetime
#[derive(Debug, Clone)]
pub struct Board {
    width: u32,
    height: u32,
    /// Cells in row-major order
    cells: Vec<Cell>,
    pieces: Vec<Piece>,
}

impl Board {
    /// Create an empty board of the given dimensions
    pub fn new(width: u32, height: u32) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        Ok(Self::with_size(width, height))
    }

    /// Create an empty 8x8 board
    pub fn standard() -> Self {
        Self::with_size(STANDARD_SIZE, STANDARD_SIZE)
    }

    /// Dimensions must already be validated
    fn with_size(width: u32, height: u32) -> Self {
        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .enumerate()
            .map(|(idx, (x, y))| Cell {
                id: CellId(idx),
                coord: Coord::new(x as i32, y as i32),
                occupant: None,
            })
            .collect();

        Self {
            width,
            height,
            cells,
            pieces: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if a coordinate lies within [0, width) x [0, height)
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Arena id of the cell at `coord`
    pub fn cell_id(&self, coord: Coord) -> Option<CellId> {
        if !self.contains(coord) {
            return None;
        }
        Some(CellId(coord.y as usize * self.width as usize + coord.x as usize))
    }

    /// Cell at an in-bounds coordinate
    pub fn cell_at(&self, coord: Coord) -> Result<&Cell, BoardError> {
        self.cell_id(coord)
            .map(|id| &self.cells[id.0])
            .ok_or(BoardError::OutOfBounds(coord))
    }

    /// Cell by arena id
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Occupant of the cell at `coord`; `None` when empty or off-board
    pub fn occupant(&self, coord: Coord) -> Option<PieceId> {
        self.cell_id(coord).and_then(|id| self.cells[id.0].occupant)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Coordinate of the cell a piece currently stands on
    pub fn piece_coord(&self, id: PieceId) -> Option<Coord> {
        self.piece(id)
            .and_then(|p| p.current)
            .map(|cell| self.cells[cell.0].coord)
    }

    /// Classify `coord` from the point of view of `requesting`
    pub fn classify_cell(&self, coord: Coord, requesting: &Piece) -> CellState {
        let Some(id) = self.cell_id(coord) else {
            return CellState::OutOfBounds;
        };

        match self.cells[id.0].occupant {
            None => CellState::Free,
            Some(other) if self.pieces[other.0].side != requesting.side => CellState::Enemy,
            Some(_) => CellState::Ally,
        }
    }

    /// Create a piece of the given kind and place it on `coord`
    pub fn add_piece(&mut self, side: Side, kind: PieceKind, coord: Coord) -> Result<PieceId, BoardError> {
        self.add_piece_with_pattern(side, kind, kind.pattern(), coord)
    }

    /// Create a piece with an explicit movement pattern and place it on `coord`
    ///
    /// The cell becomes both the current and the home cell of the piece.
    pub fn add_piece_with_pattern(
        &mut self,
        side: Side,
        kind: PieceKind,
        pattern: MovePattern,
        coord: Coord,
    ) -> Result<PieceId, BoardError> {
        let cell = self.cell_id(coord).ok_or(BoardError::OutOfBounds(coord))?;
        if self.cells[cell.0].occupant.is_some() {
            return Err(BoardError::CellOccupied(coord));
        }

        let id = PieceId(self.pieces.len());
        self.pieces.push(Piece::new(id, side, kind, pattern, cell));
        self.cells[cell.0].occupant = Some(id);

        tracing::debug!(piece = id.0, ?side, ?kind, %coord, "Placed piece");
        Ok(id)
    }

    /// Remove a piece from its cell and mark it inactive
    ///
    /// Killing an already inactive piece does nothing.
    pub fn kill(&mut self, id: PieceId) -> Result<(), BoardError> {
        let piece = self.pieces.get_mut(id.0).ok_or(BoardError::UnknownPiece(id))?;
        if let Some(cell) = piece.current.take() {
            self.cells[cell.0].occupant = None;
            tracing::debug!(piece = id.0, coord = %self.cells[cell.0].coord, "Piece removed from board");
        }
        Ok(())
    }

    /// Return a piece to its home cell and reactivate it
    ///
    /// Whatever stands on the home cell is removed first. Returns the
    /// displaced piece, if any.
    pub fn reset_piece(&mut self, id: PieceId) -> Result<Option<PieceId>, BoardError> {
        if id.0 >= self.pieces.len() {
            return Err(BoardError::UnknownPiece(id));
        }

        let displaced = self.send_home(id.0);
        tracing::debug!(
            piece = id.0,
            coord = %self.cells[self.pieces[id.0].home.0].coord,
            ?displaced,
            "Piece reset"
        );
        Ok(displaced)
    }

    /// Reset every piece to its home cell, in id order
    ///
    /// When several pieces share a home cell the highest id ends up on it
    /// and the others stay off the board.
    pub fn reset_all(&mut self) {
        for idx in 0..self.pieces.len() {
            self.send_home(idx);
        }
        tracing::info!(pieces = self.pieces.len(), "Board reset");
    }

    /// Kill-then-Place onto the home cell; `idx` must be a valid piece index
    fn send_home(&mut self, idx: usize) -> Option<PieceId> {
        if let Some(cell) = self.pieces[idx].current.take() {
            self.cells[cell.0].occupant = None;
        }

        let home = self.pieces[idx].home;
        let displaced = self.cells[home.0].occupant.take();
        if let Some(other) = displaced {
            self.pieces[other.0].current = None;
        }

        let piece = &mut self.pieces[idx];
        piece.current = Some(home);
        piece.first_move = true;
        self.cells[home.0].occupant = Some(piece.id);
        displaced
    }

    /// Move `id` onto `target`, capturing any occupant there
    ///
    /// Returns the captured piece. This is the only place occupancy moves
    /// between cells.
    pub(crate) fn transfer(&mut self, id: PieceId, target: CellId) -> Result<Option<PieceId>, BoardError> {
        let from = self
            .pieces
            .get(id.0)
            .ok_or(BoardError::UnknownPiece(id))?
            .current;
        let Some(from) = from else {
            return Err(BoardError::Inconsistent(format!("piece {} is not on the board", id.0)));
        };
        if target.0 >= self.cells.len() {
            return Err(BoardError::Inconsistent(format!("cell {} does not exist", target.0)));
        }

        let captured = self.cells[target.0].occupant.filter(|&other| other != id);
        if let Some(other) = captured {
            self.kill(other)?;
        }

        self.cells[from.0].occupant = None;
        let piece = &mut self.pieces[id.0];
        piece.current = Some(target);
        piece.first_move = false;
        self.cells[target.0].occupant = Some(id);

        Ok(captured)
    }

    /// Verify that every occupant points back at its cell and vice versa
    pub fn check_consistency(&self) -> Result<(), BoardError> {
        for cell in &self.cells {
            if let Some(id) = cell.occupant {
                let piece = self.pieces.get(id.0).ok_or(BoardError::UnknownPiece(id))?;
                if piece.current != Some(cell.id) {
                    return Err(BoardError::Inconsistent(format!(
                        "cell {} holds piece {} which stands on {:?}",
                        cell.coord, id.0, piece.current
                    )));
                }
            }
        }

        for piece in &self.pieces {
            if let Some(cell) = piece.current {
                if self.cells.get(cell.0).and_then(|c| c.occupant) != Some(piece.id) {
                    return Err(BoardError::Inconsistent(format!(
                        "piece {} points at cell {} which does not hold it",
                        piece.id.0, cell.0
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::standard();
        assert_eq!(board.width(), 8);
        assert_eq!(board.height(), 8);
        assert_eq!(board.cells().len(), 64);
        assert_eq!(board.cell_at(Coord::new(3, 5)).unwrap().coord(), Coord::new(3, 5));
        assert_eq!(board.occupant(Coord::new(0, 0)), None);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Board::new(0, 4).unwrap_err(),
            BoardError::InvalidDimensions { width: 0, height: 4 }
        );
    }

    #[test]
    fn test_rectangular_board_indexing() {
        let board = Board::new(5, 3).unwrap();
        for cell in board.cells() {
            assert_eq!(board.cell_id(cell.coord()), Some(cell.id()));
        }
        assert!(board.cell_at(Coord::new(5, 0)).is_err());
        assert!(board.cell_at(Coord::new(0, 3)).is_err());
        assert!(board.cell_at(Coord::new(4, 2)).is_ok());
    }

    #[test]
    fn test_classify_cell() {
        let mut board = Board::standard();
        let p = board.add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3)).unwrap();
        board.add_piece(Side::Black, PieceKind::Walker, Coord::new(4, 4)).unwrap();
        board.add_piece(Side::White, PieceKind::Walker, Coord::new(2, 2)).unwrap();

        let piece = board.piece(p).unwrap();
        assert_eq!(board.classify_cell(Coord::new(3, 4), piece), CellState::Free);
        assert_eq!(board.classify_cell(Coord::new(4, 4), piece), CellState::Enemy);
        assert_eq!(board.classify_cell(Coord::new(2, 2), piece), CellState::Ally);
        assert_eq!(board.classify_cell(Coord::new(-1, 0), piece), CellState::OutOfBounds);
        assert_eq!(board.classify_cell(Coord::new(0, 8), piece), CellState::OutOfBounds);
    }

    #[test]
    fn test_add_piece_on_occupied_cell() {
        let mut board = Board::standard();
        board.add_piece(Side::White, PieceKind::King, Coord::new(1, 1)).unwrap();
        assert_eq!(
            board.add_piece(Side::Black, PieceKind::King, Coord::new(1, 1)),
            Err(BoardError::CellOccupied(Coord::new(1, 1)))
        );
        assert_eq!(
            board.add_piece(Side::Black, PieceKind::King, Coord::new(9, 1)),
            Err(BoardError::OutOfBounds(Coord::new(9, 1)))
        );
    }

    #[test]
    fn test_kill_clears_both_references() {
        let mut board = Board::standard();
        let p = board.add_piece(Side::White, PieceKind::Walker, Coord::new(0, 0)).unwrap();

        board.kill(p).unwrap();
        assert!(!board.piece(p).unwrap().is_active());
        assert_eq!(board.occupant(Coord::new(0, 0)), None);
        board.check_consistency().unwrap();

        // Second kill is a no-op
        board.kill(p).unwrap();
        assert_eq!(board.kill(PieceId(42)), Err(BoardError::UnknownPiece(PieceId(42))));
    }

    #[test]
    fn test_reset_displaces_occupant() {
        let mut board = Board::standard();
        let p = board.add_piece(Side::White, PieceKind::Walker, Coord::new(0, 0)).unwrap();
        let q = board.add_piece(Side::Black, PieceKind::Walker, Coord::new(1, 1)).unwrap();

        board.kill(p).unwrap();
        let home = board.cell_id(Coord::new(0, 0)).unwrap();
        board.transfer(q, home).unwrap();

        let displaced = board.reset_piece(p).unwrap();
        assert_eq!(displaced, Some(q));
        assert_eq!(board.occupant(Coord::new(0, 0)), Some(p));
        assert!(board.piece(p).unwrap().is_active());
        assert!(board.piece(p).unwrap().is_first_move());
        assert!(!board.piece(q).unwrap().is_active());
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_reset_all_restores_home_cells() {
        let mut board = Board::standard();
        let p = board.add_piece(Side::White, PieceKind::Walker, Coord::new(0, 0)).unwrap();
        let q = board.add_piece(Side::Black, PieceKind::Walker, Coord::new(1, 1)).unwrap();

        // q captures p on p's home cell
        board.transfer(q, board.cell_id(Coord::new(0, 0)).unwrap()).unwrap();
        board.reset_all();

        assert_eq!(board.occupant(Coord::new(0, 0)), Some(p));
        assert_eq!(board.occupant(Coord::new(1, 1)), Some(q));
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_reset_all_with_shared_home_cell() {
        let mut board = Board::standard();
        let first = board.add_piece(Side::White, PieceKind::Walker, Coord::new(0, 0)).unwrap();
        board.kill(first).unwrap();
        let second = board.add_piece(Side::Black, PieceKind::Walker, Coord::new(0, 0)).unwrap();

        board.reset_all();

        assert_eq!(board.occupant(Coord::new(0, 0)), Some(second));
        assert!(!board.piece(first).unwrap().is_active());
        assert!(board.piece(second).unwrap().is_active());
        board.check_consistency().unwrap();

        // Resetting the other one swaps them over
        assert_eq!(board.reset_piece(first).unwrap(), Some(second));
        assert!(!board.piece(second).unwrap().is_active());
        board.check_consistency().unwrap();
    }

    #[test]
    fn test_standard_matches_new() {
        let standard = Board::standard();
        let built = Board::new(STANDARD_SIZE, STANDARD_SIZE).unwrap();
        assert_eq!(standard.cells(), built.cells());
        assert_eq!((standard.width(), standard.height()), (built.width(), built.height()));
    }

    #[test]
    fn test_transfer_captures() {
        let mut board = Board::standard();
        let p = board.add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3)).unwrap();
        let q = board.add_piece(Side::Black, PieceKind::Walker, Coord::new(4, 4)).unwrap();

        let captured = board.transfer(p, board.cell_id(Coord::new(4, 4)).unwrap()).unwrap();
        assert_eq!(captured, Some(q));
        assert_eq!(board.piece_coord(p), Some(Coord::new(4, 4)));
        assert_eq!(board.occupant(Coord::new(3, 3)), None);
        assert!(!board.piece(p).unwrap().is_first_move());
        board.check_consistency().unwrap();
    }
}
