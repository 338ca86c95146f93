// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gridmove CLI - headless driver for the move engine
//!
//! Replays text commands as press / drag / release gestures against a
//! configured board and prints the result as ASCII.

#![deny(unsafe_code)]

pub mod command;
pub mod render;
pub mod session;

pub use command::Command;
pub use session::{Session, Step};
