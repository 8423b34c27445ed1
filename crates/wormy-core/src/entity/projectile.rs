//! Projectile ballistics.
//!
//! A projectile flies in a straight line at a fixed number of cells per tick
//! (twice worm speed by default). When it strikes a worm's body it is marked
//! spent, and the arena replaces it with the two fragments returned by
//! [`Projectile::explode`]: one carrying on, one flying back the way it came.
//!
//! Because a projectile jumps several cells per tick, it only ever tests the
//! cell it lands on. Segments it jumps over are not hit.

use serde::{Deserialize, Serialize};

use crate::grid::{Direction, GridBounds, Position};

/// A single shot in flight.
///
/// # Example
///
/// ```
/// use wormy_core::entity::Projectile;
/// use wormy_core::grid::{Direction, GridBounds, Position};
///
/// let mut shot = Projectile::new(Position::new(30, 5), Direction::Right);
/// shot.advance(2);
///
/// assert_eq!(shot.position(), Position::new(32, 5));
/// assert!(shot.is_out_of_bounds(GridBounds::new(32, 24)));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    position: Position,
    direction: Direction,
    /// Set once the projectile has struck a worm this tick.
    spent: bool,
}

impl Projectile {
    /// Creates a live projectile.
    #[must_use]
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
            spent: false,
        }
    }

    /// Current cell. May be off-grid until bounds cleanup runs.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true once the projectile has struck a worm.
    #[must_use]
    pub const fn is_spent(&self) -> bool {
        self.spent
    }

    /// Flags the projectile for detonation.
    pub fn mark_spent(&mut self) {
        self.spent = true;
    }

    /// Moves `speed` cells along the heading.
    pub fn advance(&mut self, speed: i32) {
        self.position = self.position.offset(self.direction, speed);
    }

    /// Returns true if the projectile has left the grid.
    #[must_use]
    pub const fn is_out_of_bounds(&self, bounds: GridBounds) -> bool {
        !bounds.contains(self.position)
    }

    /// Splits into two live fragments at the current cell: the first keeps
    /// the heading, the second reverses it.
    #[must_use]
    pub const fn explode(&self) -> [Self; 2] {
        [
            Self::new(self.position, self.direction),
            Self::new(self.position, self.direction.opposite()),
        ]
    }
}
