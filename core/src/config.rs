// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine configuration loaded from TOML

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{Board, STANDARD_SIZE};
use crate::gesture::{GridLayout, ScreenPoint};
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Ignore presses on pieces of the side not to move
    #[serde(default = "default_enforce_turns")]
    pub enforce_turns: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Initial pieces; back ranks when absent
    #[serde(default)]
    pub layout: Option<Layout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_board_size")]
    pub width: u32,
    #[serde(default = "default_board_size")]
    pub height: u32,
}

/// Screen geometry for the built-in grid hit-test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub origin_x: f32,
    #[serde(default)]
    pub origin_y: f32,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

fn default_board_size() -> u32 {
    STANDARD_SIZE
}

fn default_cell_size() -> f32 {
    64.0
}

fn default_enforce_turns() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_size(),
            height: default_board_size(),
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: default_cell_size(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            screen: ScreenConfig::default(),
            enforce_turns: default_enforce_turns(),
            log_level: default_log_level(),
            layout: None,
        }
    }
}

impl EngineConfig {
    /// Build the configured board with its initial pieces placed
    pub fn build_board(&self) -> Result<Board> {
        let mut board = Board::new(self.board.width, self.board.height)
            .context("Invalid board dimensions in config")?;

        let layout = self
            .layout
            .clone()
            .unwrap_or_else(|| Layout::back_ranks(self.board.width, self.board.height));
        layout
            .apply(&mut board)
            .context("Failed to place configured pieces")?;

        Ok(board)
    }

    pub fn grid_layout(&self) -> GridLayout {
        GridLayout::new(
            ScreenPoint::new(self.screen.origin_x, self.screen.origin_y),
            self.screen.cell_size,
        )
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "gridmove", "gridmove")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load `path`, writing the default config there first if it does not exist
pub fn load_or_create(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        tracing::info!("Config file not found, creating default at: {}", path.display());

        let default_config = EngineConfig::default();
        save_config(path, &default_config)?;
        return Ok(default_config);
    }

    load_config(path)
}

pub fn save_config(path: &Path, config: &EngineConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    let toml_content = toml::to_string_pretty(config)
        .context("Failed to serialize config")?;

    fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    tracing::info!("Saved config to: {}", path.display());
    Ok(())
}
