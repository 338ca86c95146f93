// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text commands accepted by the CLI

use anyhow::{anyhow, bail, Result};
use gridmove_core::Coord;

/// One line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the board
    Show,
    /// Press on `from`, drag to `to` and release there
    Drag { from: Coord, to: Coord },
    /// Press on a cell
    Select(Coord),
    /// Move the pointer over a cell
    Hover(Coord),
    /// Release the pointer where it is
    Release,
    /// Abandon the active selection
    Cancel,
    /// Put every piece back on its home cell
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  show                    print the board
  drag X1 Y1 X2 Y2        press on (X1,Y1), drag to (X2,Y2), release
  select X Y              press on a cell
  hover X Y               move the pointer over a cell
  release                 release the pointer
  cancel                  abandon the selection
  reset                   return all pieces to their home cells
  help                    show this text
  quit                    exit";

impl Command {
    /// Parse a command line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let args = words
            .map(|w| w.parse::<i32>().map_err(|_| anyhow!("Not a number: {}", w)))
            .collect::<Result<Vec<_>>>()?;

        let command = match (name.as_str(), args.as_slice()) {
            ("show", []) => Command::Show,
            ("drag", [x1, y1, x2, y2]) => Command::Drag {
                from: Coord::new(*x1, *y1),
                to: Coord::new(*x2, *y2),
            },
            ("select", [x, y]) => Command::Select(Coord::new(*x, *y)),
            ("hover", [x, y]) => Command::Hover(Coord::new(*x, *y)),
            ("release", []) => Command::Release,
            ("cancel", []) => Command::Cancel,
            ("reset", []) => Command::Reset,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            ("show" | "drag" | "select" | "hover" | "release" | "cancel" | "reset" | "help" | "quit" | "exit", _) => {
                bail!("Wrong number of arguments for '{}'", name)
            }
            _ => bail!("Unknown command '{}', try 'help'", name),
        };

        Ok(Some(command))
    }
}
