//! Grid primitives: cell coordinates, movement directions and arena bounds.
//!
//! Everything in the arena lives on an integer grid. A [`Position`] names a
//! cell, a [`Direction`] names one of the four axis-aligned headings, and
//! [`GridBounds`] answers whether a cell is on the board.
//!
//! # Coordinate System
//!
//! `x` grows to the right and `y` grows downward, so `Direction::Up` is a
//! step of `-1` on the `y` axis. Positions are signed: a worm head or a
//! projectile may briefly sit one step outside the board before the engine
//! reacts to it.
//!
//! # Example
//!
//! ```
//! use wormy_core::grid::{Direction, GridBounds, Position};
//!
//! let bounds = GridBounds::new(32, 24);
//! let head = Position::new(31, 10);
//!
//! assert!(bounds.contains(head));
//! assert!(!bounds.contains(head.step(Direction::Right)));
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Position
// =============================================================================

/// A grid cell coordinate.
///
/// `Position` is a plain value type: two positions are equal when both
/// coordinates match, and it can be used directly as a set or map key for
/// collision lookups.
///
/// # Example
///
/// ```
/// use wormy_core::grid::{Direction, Position};
///
/// let p = Position::new(5, 5);
/// assert_eq!(p.step(Direction::Up), Position::new(5, 4));
/// assert_eq!(p.offset(Direction::Left, 2), Position::new(3, 5));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing rightward.
    pub x: i32,
    /// Row, growing downward.
    pub y: i32,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// Returns the cell `distance` steps away in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        Self::from(IVec2::from(self) + direction.unit() * distance)
    }
}

impl From<IVec2> for Position {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Position> for IVec2 {
    fn from(p: Position) -> Self {
        IVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// =============================================================================
// Direction
// =============================================================================

/// One of the four headings a worm or projectile can travel in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

/// Unit offsets indexed by [`Direction::index`].
const UNIT_OFFSETS: [IVec2; 4] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
];

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Returns the one-cell offset for this direction.
    #[must_use]
    pub const fn unit(self) -> IVec2 {
        UNIT_OFFSETS[self.index()]
    }

    /// Returns the exact reverse of this direction.
    ///
    /// ```
    /// use wormy_core::grid::Direction;
    ///
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// assert_eq!(Direction::Up.opposite().opposite(), Direction::Up);
    /// ```
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

// =============================================================================
// GridBounds
// =============================================================================

/// The playable area: `[0, width) x [0, height)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl GridBounds {
    /// Creates bounds for a `width` x `height` grid.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns true if `pos` is a cell of the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Returns true if `pos` lies on the wall ring just outside the grid
    /// (`x == -1`, `x == width`, `y == -1` or `y == height`).
    #[must_use]
    pub const fn is_wall(&self, pos: Position) -> bool {
        pos.x == -1 || pos.x == self.width || pos.y == -1 || pos.y == self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

// =============================================================================
// Tests
// =============================================================================
