//! Driver settings loaded from an optional JSON file.
//!
//! ```json
//! {
//!   "display": { "window_width": 640, "window_height": 480, "cell_size": 20 },
//!   "arena": { "grid_width": 32, "grid_height": 24, "growth_pool_size": 6 }
//! }
//! ```
//!
//! Without an `arena` section the grid is sized to fill the display. With
//! one, its grid must match the grid the display tiles into.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wormy_core::{ArenaConfig, DisplayConfig};

/// Everything the driver reads from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window geometry and cadence.
    pub display: DisplayConfig,
    /// Match rules; derived from `display` when absent.
    pub arena: Option<ArenaConfig>,
}

impl Settings {
    /// Loads settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("malformed config {}", path.display()))
    }

    /// Validates the display and returns the arena config to play with.
    pub fn arena_config(&self) -> anyhow::Result<ArenaConfig> {
        self.display.validate().context("invalid display config")?;
        let config = match &self.arena {
            Some(arena) => {
                let (width, height) = self.display.grid_size();
                anyhow::ensure!(
                    (arena.grid_width, arena.grid_height) == (width, height),
                    "arena grid {}x{} does not match the {width}x{height} display grid",
                    arena.grid_width,
                    arena.grid_height,
                );
                arena.clone()
            }
            None => ArenaConfig::for_display(&self.display)?,
        };
        config.validate().context("invalid arena config")?;
        Ok(config)
    }
}
