// SPDX-License-Identifier: MIT OR Apache-2.0

//! A single board and engine driven by CLI commands

use anyhow::{Context, Result};
use gridmove_core::{
    Board, CommitOutcome, Coord, EngineConfig, GestureAdapter, GridLayout, MoveEngine, PieceId,
    Presentation, ScreenPoint, TurnTracker,
};

use crate::command::{Command, HELP};
use crate::render::render_board;

/// Presentation that remembers highlights for the ASCII renderer
#[derive(Debug, Default)]
pub struct TextPresentation {
    highlighted: Vec<Coord>,
}

impl TextPresentation {
    pub fn highlighted(&self) -> &[Coord] {
        &self.highlighted
    }
}

impl Presentation for TextPresentation {
    fn highlight(&mut self, cells: &[Coord]) {
        self.highlighted = cells.to_vec();
    }

    fn clear_highlight(&mut self) {
        self.highlighted.clear();
    }

    fn set_piece_position(&mut self, piece: PieceId, cell: Coord) {
        tracing::debug!(piece = piece.0, %cell, "Token moved");
    }

    fn piece_captured(&mut self, piece: PieceId) {
        tracing::debug!(piece = piece.0, "Token hidden");
    }
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the message and keep reading
    Continue(String),
    Quit,
}

pub struct Session {
    board: Board,
    engine: MoveEngine<TextPresentation, TurnTracker>,
    gestures: GestureAdapter<GridLayout>,
    layout: GridLayout,
    pointer: ScreenPoint,
}

impl Session {
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let board = config.build_board().context("Failed to set up board")?;
        let layout = config.grid_layout();

        Ok(Self {
            board,
            engine: MoveEngine::new(TextPresentation::default(), TurnTracker::default()),
            gestures: GestureAdapter::new(layout).with_turn_enforcement(config.enforce_turns),
            layout,
            pointer: ScreenPoint::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &MoveEngine<TextPresentation, TurnTracker> {
        &self.engine
    }

    pub fn render(&self) -> String {
        render_board(&self.board, self.engine.presentation().highlighted())
    }

    /// Run one command
    ///
    /// Usage errors from the engine are returned as errors; the session
    /// stays usable afterwards.
    pub fn execute(&mut self, command: Command) -> Result<Step> {
        let message = match command {
            Command::Show => self.render(),
            Command::Drag { from, to } => {
                if !self.press(from)? {
                    format!("Nothing to pick up at {}", from)
                } else {
                    self.hover(to);
                    self.release()?
                }
            }
            Command::Select(cell) => {
                if self.press(cell)? {
                    self.render()
                } else {
                    format!("Nothing to pick up at {}", cell)
                }
            }
            Command::Hover(cell) => match self.hover(cell) {
                Some(_) => format!("Target {}", cell),
                None => "No target".to_string(),
            },
            Command::Release => self.release()?,
            Command::Cancel => {
                self.engine.cancel(&self.board)?;
                "Selection cancelled".to_string()
            }
            Command::Reset => {
                if self.engine.is_selecting() {
                    self.engine.cancel(&self.board)?;
                }
                self.board.reset_all();
                self.engine.turns_mut().reset();
                self.render()
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Step::Quit),
        };

        Ok(Step::Continue(message))
    }

    fn press(&mut self, cell: Coord) -> Result<bool> {
        self.pointer = self.layout.cell_center(cell);
        Ok(self
            .gestures
            .on_selection_start(&mut self.engine, &self.board, self.pointer)?)
    }

    fn hover(&mut self, cell: Coord) -> Option<gridmove_core::CellId> {
        self.pointer = self.layout.cell_center(cell);
        self.gestures
            .on_selection_move(&mut self.engine, &self.board, self.pointer)
    }

    fn release(&mut self) -> Result<String> {
        let outcome = self
            .gestures
            .on_selection_end(&mut self.engine, &mut self.board, self.pointer)?;

        let summary = match outcome {
            None => "No selection to release".to_string(),
            Some(CommitOutcome::Reverted) => "No valid target, piece returned".to_string(),
            Some(CommitOutcome::Moved(record)) => {
                let mut line = format!("{:?} moved {} -> {}", record.side, record.from, record.to);
                if record.captured.is_some() {
                    line.push_str(" (capture)");
                }
                line.push_str(&format!(
                    "; {:?} to move",
                    self.engine.turns().side_to_move()
                ));
                format!("{}\n{}", line, self.render())
            }
        };
        Ok(summary)
    }
}
