//! Entity types living on the arena grid.
//!
//! - [`Worm`]: a player-controlled chain of cells
//! - [`Projectile`]: a shot travelling in a straight line
//! - [`Obstacle`]: a permanent hazard left behind by a severed segment
//! - [`GrowthItem`]: a pickup that lengthens the worm that eats it
//!
//! Entities never hold references to each other or to the arena's
//! collections. Cross-entity questions ("did this projectile hit that
//! worm?") are asked by the [`Arena`](crate::arena::Arena), which owns
//! everything.

pub mod projectile;
pub mod worm;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::Position;

pub use projectile::Projectile;
pub use worm::Worm;

// =============================================================================
// Identity
// =============================================================================

/// Identifier of a worm within a match.
///
/// Ids are handed out in spawn order starting at 0, and ordering by id is
/// the iteration order of every per-worm pass.
///
/// # Example
///
/// ```
/// use wormy_core::entity::WormId;
///
/// let first = WormId::new(0);
/// let second = WormId::new(1);
///
/// assert!(first < second);
/// assert_eq!(second.as_u32(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WormId(u32);

impl WormId {
    /// Creates a `WormId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for WormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WormId({})", self.0)
    }
}

impl fmt::Display for WormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WormId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

// =============================================================================
// Styling
// =============================================================================

/// An 8-bit RGB colour.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Creates a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

/// How a renderer should draw a worm and where its score goes.
///
/// The engine carries styling through to snapshots untouched.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WormStyle {
    /// Fill colour of each segment.
    pub body: Rgb,
    /// Border colour of each segment.
    pub outline: Rgb,
    /// Position of this worm's score on the scoreboard, counted from the right.
    pub scoreboard_slot: u8,
}

impl WormStyle {
    /// Creates a style.
    #[must_use]
    pub const fn new(body: Rgb, outline: Rgb, scoreboard_slot: u8) -> Self {
        Self {
            body,
            outline,
            scoreboard_slot,
        }
    }
}

// =============================================================================
// Static Entities
// =============================================================================

/// A permanent hazard cell created from a severed worm segment.
///
/// Obstacles are never removed during a match. Any worm segment that
/// overlaps one ends the match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    position: Position,
}

impl Obstacle {
    /// Creates an obstacle at `position`.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the obstacle's cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// A pickup that grows the worm whose head reaches it.
///
/// The arena keeps a fixed-size pool of these; an eaten item is replaced
/// immediately at a fresh random cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrowthItem {
    position: Position,
}

impl GrowthItem {
    /// Creates a growth item at `position`.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the item's cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}
