//! Error types for arena construction.
//!
//! The tick engine itself has no recoverable failures: gameplay failure is a
//! [`TickOutcome`](crate::outcome::TickOutcome), not an error. The only errors
//! are configuration violations, detected once before a match starts.

use thiserror::Error;

/// A configuration that cannot host a match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid width or height is zero or negative.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    NonPositiveGrid {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
    },

    /// The grid leaves no start cells once the edge margin is applied.
    #[error("grid {width}x{height} is too small for a start margin of {margin} cells")]
    GridTooSmallForMargin {
        /// Configured width.
        width: i32,
        /// Configured height.
        height: i32,
        /// Configured start margin.
        margin: i32,
    },

    /// Worms must start with at least one segment.
    #[error("starting length must be at least 1")]
    ZeroStartingLength,

    /// The starting body would poke out past the left edge.
    #[error("starting length {length} does not fit inside a start margin of {margin} cells")]
    StartingLengthExceedsMargin {
        /// Configured starting length.
        length: usize,
        /// Configured start margin.
        margin: i32,
    },

    /// The growth pool must leave at least one free cell for respawning.
    #[error("growth pool of {pool} items does not fit a grid of {cells} cells")]
    GrowthPoolTooLarge {
        /// Configured pool size.
        pool: usize,
        /// Cells available on the grid.
        cells: i64,
    },

    /// Projectiles must move.
    #[error("projectile speed must be at least 1 cell per tick")]
    ZeroProjectileSpeed,

    /// A match needs at least one worm.
    #[error("at least one worm must be configured")]
    NoWorms,

    /// Cell size of zero pixels.
    #[error("cell size must be positive")]
    ZeroCellSize,

    /// The window cannot be tiled by whole cells.
    #[error("window {window_width}x{window_height} is not a multiple of cell size {cell_size}")]
    CellSizeMismatch {
        /// Window width in pixels.
        window_width: u32,
        /// Window height in pixels.
        window_height: u32,
        /// Cell size in pixels.
        cell_size: u32,
    },

    /// The driver cadence must be positive.
    #[error("ticks per second must be positive")]
    ZeroTickRate,
}

/// Result type alias for configuration checks.
pub type Result<T> = std::result::Result<T, ConfigError>;
