// SPDX-License-Identifier: MIT OR Apache-2.0

//! Press / drag / release through the gesture adapter

mod common;

use common::{RecordingPresentation, RecordingTurns};
use gridmove_core::{
    Board, CommitOutcome, Coord, EngineError, GestureAdapter, GridLayout, HitTest, MoveEngine,
    PieceKind, ScreenPoint, ScreenRect, Side, TurnTracker,
};

fn layout() -> GridLayout {
    GridLayout::new(ScreenPoint::new(0.0, 0.0), 100.0)
}

#[test]
fn drag_and_release_moves_piece() {
    let mut board = Board::standard();
    let p = board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), RecordingTurns::default());
    let mut gestures = GestureAdapter::new(layout());

    assert!(gestures
        .on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(3, 3)))
        .unwrap());
    assert_eq!(engine.presentation().highlighted().len(), 8);

    let hovered = gestures.on_selection_move(&mut engine, &board, ScreenPoint::new(450.0, 450.0));
    assert_eq!(hovered, board.cell_id(Coord::new(4, 4)));

    let outcome = gestures
        .on_selection_end(&mut engine, &mut board, ScreenPoint::new(450.0, 450.0))
        .unwrap();
    assert!(matches!(outcome, Some(CommitOutcome::Moved(_))));
    assert_eq!(board.piece_coord(p), Some(Coord::new(4, 4)));
    assert_eq!(engine.turns().completed, vec![Side::White]);
}

#[test]
fn pointer_leaving_all_candidates_clears_target() {
    let mut board = Board::standard();
    board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), RecordingTurns::default());
    let mut gestures = GestureAdapter::new(layout());

    gestures
        .on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(3, 3)))
        .unwrap();
    assert!(gestures
        .on_selection_move(&mut engine, &board, layout().cell_center(Coord::new(2, 2)))
        .is_some());
    assert!(gestures
        .on_selection_move(&mut engine, &board, layout().cell_center(Coord::new(7, 0)))
        .is_none());
    assert_eq!(engine.target(), None);
}

#[test]
fn press_during_selection_is_usage_error() {
    let mut board = Board::standard();
    board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3))
        .unwrap();
    board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(6, 6))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), RecordingTurns::default());
    let mut gestures = GestureAdapter::new(layout());

    gestures
        .on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(3, 3)))
        .unwrap();
    assert_eq!(
        gestures.on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(6, 6))),
        Err(EngineError::SelectionInProgress)
    );
}

#[test]
fn enforced_turns_alternate_sides() {
    let mut board = Board::standard();
    let white = board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(0, 0))
        .unwrap();
    let black = board
        .add_piece(Side::Black, PieceKind::Walker, Coord::new(7, 7))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), TurnTracker::default());
    let mut gestures = GestureAdapter::new(layout()).with_turn_enforcement(true);

    let drag = |gestures: &mut GestureAdapter<GridLayout>,
                engine: &mut MoveEngine<RecordingPresentation, TurnTracker>,
                board: &mut Board,
                from: Coord,
                to: Coord| {
        if !gestures
            .on_selection_start(engine, board, layout().cell_center(from))
            .unwrap()
        {
            return None;
        }
        gestures
            .on_selection_end(engine, board, layout().cell_center(to))
            .unwrap()
    };

    // Black may not open
    assert_eq!(drag(&mut gestures, &mut engine, &mut board, Coord::new(7, 7), Coord::new(6, 6)), None);
    assert!(drag(&mut gestures, &mut engine, &mut board, Coord::new(0, 0), Coord::new(1, 1)).is_some());
    assert_eq!(engine.turns().side_to_move(), Side::Black);
    assert!(drag(&mut gestures, &mut engine, &mut board, Coord::new(7, 7), Coord::new(6, 6)).is_some());

    assert_eq!(board.piece_coord(white), Some(Coord::new(1, 1)));
    assert_eq!(board.piece_coord(black), Some(Coord::new(6, 6)));
    assert_eq!(engine.turns().moves_played(), 2);
}

/// Hit-test whose cell areas are inflated so neighbours overlap
struct OverlappingCells {
    inner: GridLayout,
    grow: f32,
}

impl HitTest for OverlappingCells {
    fn resolve(&self, point: ScreenPoint) -> Option<Coord> {
        self.inner.resolve(point)
    }

    fn cell_contains(&self, cell: Coord, point: ScreenPoint) -> bool {
        let rect = self.inner.cell_rect(cell);
        let grown = ScreenRect {
            min: ScreenPoint::new(rect.min.x - self.grow, rect.min.y - self.grow),
            max: ScreenPoint::new(rect.max.x + self.grow, rect.max.y + self.grow),
        };
        grown.contains(point)
    }
}

#[test]
fn overlapping_cells_pick_last_candidate_in_order() {
    let mut board = Board::standard();
    board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), RecordingTurns::default());
    let mut gestures = GestureAdapter::new(OverlappingCells {
        inner: layout(),
        grow: 20.0,
    });

    gestures
        .on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(3, 3)))
        .unwrap();

    // Just inside (4,3) near its top edge, also inside the grown (4,2) and (3,2).
    // In candidate order (4,3) comes before (3,2) and (4,2); (4,2) is last.
    let point = ScreenPoint::new(410.0, 305.0);
    let hovered = gestures.on_selection_move(&mut engine, &board, point);
    assert_eq!(hovered, board.cell_id(Coord::new(4, 2)));
}

#[test]
fn shared_edge_point_goes_to_later_candidate() {
    let mut board = Board::standard();
    board
        .add_piece(Side::White, PieceKind::Walker, Coord::new(3, 3))
        .unwrap();
    let mut engine = MoveEngine::new(RecordingPresentation::default(), RecordingTurns::default());
    let mut gestures = GestureAdapter::new(layout());

    gestures
        .on_selection_start(&mut engine, &board, layout().cell_center(Coord::new(3, 3)))
        .unwrap();

    // x = 300 is the edge shared by (2,4) and (3,4); (2,4) is evaluated later.
    let hovered = gestures.on_selection_move(&mut engine, &board, ScreenPoint::new(300.0, 450.0));
    assert_eq!(hovered, board.cell_id(Coord::new(2, 4)));
}
