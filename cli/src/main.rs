// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gridmove CLI - Command-line driver for the move engine
//!
//! Reads commands from stdin or a script file and replays them as
//! pointer gestures against a board built from the configuration.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gridmove_cli::{Command, Session, Step};
use gridmove_core::config::{self, EngineConfig};

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(
    name = "gridmove-cli",
    about = "Drive the grid move engine from the command line",
    version
)]
struct Args {
    /// Config file (defaults to the per-user config, created if missing)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[clap(short, long)]
    script: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn init_logging(debug: bool, config: &EngineConfig) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    if let Some(path) = &args.config {
        return config::load_config(path);
    }

    let path = config::default_config_path()?;
    match config::load_or_create(&path) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Warning: {:#}; using built-in defaults", e);
            Ok(EngineConfig::default())
        }
    }
}

/// Main entry point
fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(args.debug, &config);

    tracing::info!(
        width = config.board.width,
        height = config.board.height,
        enforce_turns = config.enforce_turns,
        "Starting session"
    );
    let mut session = Session::from_config(&config)?;

    let interactive = args.script.is_none();
    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script: {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    println!("{}", session.render());
    if interactive {
        println!("Type 'help' for commands.");
    }

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Step::Continue(message)) => println!("{}", message),
            Ok(Step::Quit) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
        io::stdout().flush()?;
    }

    Ok(())
}
