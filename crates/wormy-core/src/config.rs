//! Match and display configuration.
//!
//! [`ArenaConfig`] holds every constant the tick engine depends on. The
//! defaults reproduce the classic two-player game: a 48x36 board (a 960x720
//! window of 20-pixel cells), three-segment worms, four apples, projectiles
//! at twice worm speed and a five-cell start margin.
//!
//! [`DisplayConfig`] describes the external renderer's window. The engine
//! never reads it, but it is validated here so a driver can refuse to start
//! with a window that whole cells cannot tile.
//!
//! Both structs deserialize with `#[serde(default)]`, so a config file only
//! needs the fields it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entity::{Rgb, WormStyle};
use crate::error::{ConfigError, Result};
use crate::grid::GridBounds;

// =============================================================================
// ArenaConfig
// =============================================================================

/// Constants for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of columns.
    pub grid_width: i32,
    /// Number of rows.
    pub grid_height: i32,
    /// Segments each worm spawns with.
    pub starting_length: usize,
    /// Growth items kept on the board at all times.
    pub growth_pool_size: usize,
    /// Cells a projectile travels per tick.
    pub projectile_speed: i32,
    /// Minimum distance, in cells, between a spawning head and any edge.
    pub start_margin: i32,
    /// One entry per worm, in spawn order.
    pub worms: Vec<WormStyle>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let (grid_width, grid_height) = DisplayConfig::default().grid_size();
        Self {
            grid_width,
            grid_height,
            starting_length: 3,
            growth_pool_size: 4,
            projectile_speed: 2,
            start_margin: 5,
            worms: vec![
                WormStyle::new(Rgb::new(0, 255, 0), Rgb::new(0, 155, 0), 1),
                WormStyle::new(Rgb::new(255, 131, 24), Rgb::new(181, 94, 17), 2),
            ],
        }
    }
}

impl ArenaConfig {
    /// Creates the default config on a `width` x `height` grid.
    #[must_use]
    pub fn with_grid(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Creates the default config sized to fill `display`.
    ///
    /// # Errors
    ///
    /// Returns the display's validation error if its window cannot be tiled.
    pub fn for_display(display: &DisplayConfig) -> Result<Self> {
        display.validate()?;
        let (width, height) = display.grid_size();
        Ok(Self::with_grid(width, height))
    }

    /// Returns the grid bounds.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        GridBounds::new(self.grid_width, self.grid_height)
    }

    /// Checks that a match can be set up with this config.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let (width, height, margin) = (self.grid_width, self.grid_height, self.start_margin);

        if width <= 0 || height <= 0 {
            return Err(ConfigError::NonPositiveGrid { width, height });
        }
        let span = i64::from(margin) * 2;
        if margin < 0 || i64::from(width) <= span || i64::from(height) <= span {
            return Err(ConfigError::GridTooSmallForMargin {
                width,
                height,
                margin,
            });
        }
        if self.starting_length == 0 {
            return Err(ConfigError::ZeroStartingLength);
        }
        // The body trails leftward from the head, so the tail lands at
        // `head.x - (length - 1)`, which must stay on the grid.
        let trailing = self.starting_length - 1;
        if usize::try_from(margin).map_or(true, |margin| trailing > margin) {
            return Err(ConfigError::StartingLengthExceedsMargin {
                length: self.starting_length,
                margin,
            });
        }
        let cells = self.bounds().cell_count();
        // A grid too large for `usize` fits any pool.
        if usize::try_from(cells).is_ok_and(|cells| self.growth_pool_size >= cells) {
            return Err(ConfigError::GrowthPoolTooLarge {
                pool: self.growth_pool_size,
                cells,
            });
        }
        if self.projectile_speed <= 0 {
            return Err(ConfigError::ZeroProjectileSpeed);
        }
        if self.worms.is_empty() {
            return Err(ConfigError::NoWorms);
        }
        Ok(())
    }
}

// =============================================================================
// DisplayConfig
// =============================================================================

/// Window geometry and cadence for an external renderer and driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Side of one square grid cell in pixels.
    pub cell_size: u32,
    /// Ticks the driver runs per second.
    pub ticks_per_second: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 720,
            cell_size: 20,
            ticks_per_second: 15,
        }
    }
}

impl DisplayConfig {
    /// Checks that the window can be tiled by whole cells.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.window_width % self.cell_size != 0 || self.window_height % self.cell_size != 0 {
            return Err(ConfigError::CellSizeMismatch {
                window_width: self.window_width,
                window_height: self.window_height,
                cell_size: self.cell_size,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// Returns the grid dimensions `(columns, rows)` the window holds.
    ///
    /// A zero cell size yields `(0, 0)`, which grid validation rejects.
    #[must_use]
    pub fn grid_size(&self) -> (i32, i32) {
        if self.cell_size == 0 {
            return (0, 0);
        }
        let cols = i32::try_from(self.window_width / self.cell_size).unwrap_or(i32::MAX);
        let rows = i32::try_from(self.window_height / self.cell_size).unwrap_or(i32::MAX);
        (cols, rows)
    }

    /// Wall-clock time between two ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

// =============================================================================
// Tests
// =============================================================================
