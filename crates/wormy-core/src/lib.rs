//! # Wormy Core
//!
//! Deterministic tick engine for a grid-based multiplayer worm arena.
//!
//! Worms move one cell per tick, grow by eating growth items, and fire
//! projectiles that sever opposing bodies into permanent obstacles. The
//! crate owns the simulation only: it consumes per-tick command batches and
//! exposes a snapshot for rendering. It performs no I/O and never sleeps;
//! cadence, input devices and drawing belong to the driver.
//!
//! ## Architecture
//!
//! - **Primitives** ([`grid`]): positions, directions, bounds
//! - **Entities** ([`entity`]): worms, projectiles, obstacles, growth items
//! - **Arena** ([`arena`]): exclusive owner of every entity, plus the seeded RNG
//! - **Tick engine** ([`tick`]): [`Arena::advance`], thirteen ordered phases
//! - **Contracts** ([`input`], [`outcome`], [`snapshot`]): what goes in and
//!   what comes out of a tick
//!
//! ## Usage
//!
//! ```
//! use wormy_core::{Arena, ArenaConfig, TickCommands, TickOutcome};
//!
//! let mut arena = Arena::new(ArenaConfig::default(), 42).unwrap();
//! let first = arena.worms()[0].id();
//!
//! let mut commands = TickCommands::new();
//! commands.shoot(first);
//!
//! if let TickOutcome::GameOver(reason) = arena.advance(&commands) {
//!     println!("{reason}");
//! }
//! let frame = arena.snapshot();
//! assert_eq!(frame.tick, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod input;
pub mod outcome;
pub mod snapshot;
pub mod tick;

pub use arena::Arena;
pub use config::{ArenaConfig, DisplayConfig};
pub use entity::{GrowthItem, Obstacle, Projectile, Rgb, Worm, WormId, WormStyle};
pub use error::ConfigError;
pub use grid::{Direction, GridBounds, Position};
pub use input::{Control, ControlKeys, InputBindings, TickCommands, WormCommand};
pub use outcome::{ArenaEvent, GameOverReason, MatchPhase, TickOutcome};
pub use snapshot::{ArenaSnapshot, ProjectileView, WormView};

#[cfg(test)]
mod tests;
