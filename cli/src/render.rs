// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the CLI.

use gridmove_core::{Board, Coord};

/// Render the board, marking highlighted cells with `*`
pub fn render_board(board: &Board, highlighted: &[Coord]) -> String {
    let mut output = String::new();

    push_column_labels(&mut output, board.width());

    for row in 0..board.height() as i32 {
        output.push_str(&format!("{:2} ", row));

        for col in 0..board.width() as i32 {
            let coord = Coord::new(col, row);
            let marker = if highlighted.contains(&coord) { '*' } else { ' ' };

            let symbol = board
                .occupant(coord)
                .and_then(|id| board.piece(id))
                .map(|piece| piece.kind().symbol(piece.side()))
                .unwrap_or('.');

            output.push(marker);
            output.push(symbol);
        }

        output.push_str(&format!(" {}", row));
        output.push('\n');
    }

    push_column_labels(&mut output, board.width());
    output
}

fn push_column_labels(output: &mut String, width: u32) {
    output.push_str("   ");
    for col in 0..width {
        output.push_str(&format!(" {}", coord_to_column_char(col)));
    }
    output.push('\n');
}

/// Convert a column index to a label character, wrapping after 'Z'
fn coord_to_column_char(col: u32) -> char {
    (b'A' + (col % 26) as u8) as char
}
