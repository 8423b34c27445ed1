//! The worm: an ordered chain of cells with a heading.
//!
//! Index 0 of the body is the head; the rest follows front to back. A worm
//! moves by growing a new head one cell ahead and, unless it just ate,
//! dropping its tail, so its length only changes when it eats or is shot.
//!
//! # Invariants
//!
//! - The body always holds at least one segment.
//! - Movement never stores a duplicate segment by itself; a head landing on
//!   the worm's own body is a collision the arena reports, not a state the
//!   worm repairs.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::{Projectile, WormId, WormStyle};
use crate::grid::{Direction, GridBounds, Position};
use crate::outcome::GameOverReason;

/// A player-controlled worm.
///
/// # Example
///
/// ```
/// use wormy_core::entity::{Rgb, Worm, WormId, WormStyle};
/// use wormy_core::grid::{Direction, Position};
///
/// let style = WormStyle::new(Rgb::new(0, 255, 0), Rgb::new(0, 155, 0), 1);
/// let mut worm = Worm::spawn(WormId::new(0), Position::new(10, 10), 3, style);
///
/// assert_eq!(worm.direction(), Direction::Right);
/// assert_eq!(worm.length(), 3);
///
/// // Reversing into the neck is refused.
/// assert!(!worm.turn(Direction::Left));
/// assert!(worm.turn(Direction::Up));
///
/// worm.slither(false);
/// assert_eq!(worm.head(), Position::new(10, 9));
/// assert_eq!(worm.length(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worm {
    id: WormId,
    body: VecDeque<Position>,
    direction: Direction,
    style: WormStyle,
}

impl Worm {
    /// Creates a worm in its starting pose: `length` segments trailing left
    /// from `head`, facing right.
    ///
    /// A `length` of zero is treated as one.
    #[must_use]
    pub fn spawn(id: WormId, head: Position, length: usize, style: WormStyle) -> Self {
        let body = (0..length.max(1))
            .scan(head, |cell, _| {
                let segment = *cell;
                *cell = cell.step(Direction::Left);
                Some(segment)
            })
            .collect();
        Self {
            id,
            body,
            direction: Direction::Right,
            style,
        }
    }

    /// Creates a worm from an explicit body, head first.
    ///
    /// Returns `None` if `body` is empty.
    #[must_use]
    pub fn from_body(
        id: WormId,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
        style: WormStyle,
    ) -> Option<Self> {
        let body: VecDeque<Position> = body.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            id,
            body,
            direction,
            style,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Identity within the match.
    #[must_use]
    pub const fn id(&self) -> WormId {
        self.id
    }

    /// Current head cell.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty; the fallback only satisfies the type.
        self.body.front().copied().unwrap_or_default()
    }

    /// Segments, head first.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Current heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Rendering style.
    #[must_use]
    pub const fn style(&self) -> &WormStyle {
        &self.style
    }

    /// Number of segments.
    #[must_use]
    pub fn length(&self) -> usize {
        self.body.len()
    }

    /// Score shown on the scoreboard: the body length.
    #[must_use]
    pub fn score(&self) -> usize {
        self.length()
    }

    /// Returns true if any segment sits on `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Position) -> bool {
        self.body.contains(&cell)
    }

    // ========================================================================
    // Control
    // ========================================================================

    /// Turns to `direction` unless it is the exact reverse of the current
    /// heading. Returns whether the heading now equals `direction`.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Fires a projectile from the cell directly ahead of the head, in the
    /// current heading.
    #[must_use]
    pub fn shoot(&self) -> Projectile {
        Projectile::new(self.next_head(), self.direction)
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// The cell the head moves into next.
    #[must_use]
    pub fn next_head(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Advances one cell: a new head is inserted ahead of the current one
    /// and, unless `grew` is set, the tail segment is dropped.
    ///
    /// The new head is computed before the tail is removed, so a one-segment
    /// worm moves instead of vanishing.
    pub fn slither(&mut self, grew: bool) {
        let next = self.next_head();
        self.body.push_front(next);
        if !grew {
            self.body.pop_back();
        }
    }

    // ========================================================================
    // Collision Queries
    // ========================================================================

    /// Returns true if the head has left the grid.
    #[must_use]
    pub fn is_outside(&self, bounds: GridBounds) -> bool {
        !bounds.contains(self.head())
    }

    /// Checks this worm against `other` before movement: a head outside the
    /// grid is a wall collision, a head on any of `other`'s segments is a
    /// worm collision. Passing the worm itself as `other` is not meaningful;
    /// self-overlap is [`Worm::head_overlaps_body`].
    #[must_use]
    pub fn collided_with(&self, other: &Self, bounds: GridBounds) -> Option<GameOverReason> {
        if self.is_outside(bounds) {
            return Some(GameOverReason::WallCollision { worm: self.id });
        }
        if other.occupies(self.head()) {
            return Some(GameOverReason::WormCollision {
                worm: self.id,
                other: other.id,
            });
        }
        None
    }

    /// Returns true if the head shares a cell with one of the worm's own
    /// non-head segments.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if any segment lies on one of `cells`.
    #[must_use]
    pub fn touches_any(&self, cells: &HashSet<Position>) -> bool {
        self.body.iter().any(|segment| cells.contains(segment))
    }

    /// Returns the index of the segment `projectile` sits on, if any.
    ///
    /// Index 0 means a headshot.
    #[must_use]
    pub fn hit_by(&self, projectile: &Projectile) -> Option<usize> {
        let at = projectile.position();
        self.body.iter().position(|segment| *segment == at)
    }

    // ========================================================================
    // Damage
    // ========================================================================

    /// Severs the body at the first segment on `at`, removing that segment
    /// and everything behind it. Returns the removed cells, front to back.
    ///
    /// Returns nothing if `at` is not on the body or is the head; the head
    /// cannot be severed.
    pub fn lose_segments_from(&mut self, at: Position) -> Vec<Position> {
        match self.body.iter().position(|segment| *segment == at) {
            Some(index) if index > 0 => self.body.split_off(index).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Rgb;

    fn style() -> WormStyle {
        WormStyle::new(Rgb::new(0, 255, 0), Rgb::new(0, 155, 0), 1)
    }

    fn worm_at(cells: &[(i32, i32)], direction: Direction) -> Worm {
        Worm::from_body(
            WormId::new(0),
            cells.iter().map(|&(x, y)| Position::new(x, y)),
            direction,
            style(),
        )
        .unwrap()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn spawn_trails_left_and_faces_right() {
            let worm = Worm::spawn(WormId::new(1), Position::new(7, 4), 3, style());
            let body: Vec<_> = worm.body().collect();
            assert_eq!(
                body,
                vec![Position::new(7, 4), Position::new(6, 4), Position::new(5, 4)]
            );
            assert_eq!(worm.direction(), Direction::Right);
            assert_eq!(worm.id(), WormId::new(1));
        }

        #[test]
        fn spawn_never_builds_an_empty_body() {
            let worm = Worm::spawn(WormId::new(0), Position::new(7, 4), 0, style());
            assert_eq!(worm.length(), 1);
        }

        #[test]
        fn from_body_rejects_empty() {
            assert!(Worm::from_body(WormId::new(0), [], Direction::Up, style()).is_none());
        }
    }

    mod control_tests {
        use super::*;

        #[test]
        fn reverse_turn_is_ignored() {
            let mut worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            assert!(!worm.turn(Direction::Left));
            assert_eq!(worm.direction(), Direction::Right);
        }

        #[test]
        fn sideways_and_same_turns_are_accepted() {
            let mut worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            assert!(worm.turn(Direction::Right));
            assert!(worm.turn(Direction::Down));
            assert_eq!(worm.direction(), Direction::Down);
            assert!(worm.turn(Direction::Left));
            assert_eq!(worm.direction(), Direction::Left);
        }

        #[test]
        fn shoot_spawns_ahead_of_head() {
            let worm = worm_at(&[(5, 5), (5, 6), (5, 7)], Direction::Up);
            let shot = worm.shoot();
            assert_eq!(shot.position(), Position::new(5, 4));
            assert_eq!(shot.direction(), Direction::Up);
        }
    }

    mod movement_tests {
        use super::*;

        #[test]
        fn slither_keeps_length_without_growth() {
            let mut worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            worm.slither(false);
            let body: Vec<_> = worm.body().collect();
            assert_eq!(
                body,
                vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
            );
        }

        #[test]
        fn slither_with_growth_keeps_tail() {
            let mut worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            worm.slither(true);
            assert_eq!(worm.length(), 4);
            assert_eq!(worm.head(), Position::new(6, 5));
            assert_eq!(worm.body().last(), Some(Position::new(3, 5)));
        }

        #[test]
        fn single_segment_worm_still_moves() {
            let mut worm = worm_at(&[(5, 5)], Direction::Down);
            worm.slither(false);
            assert_eq!(worm.length(), 1);
            assert_eq!(worm.head(), Position::new(5, 6));
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn head_outside_grid_is_wall_collision() {
            let bounds = GridBounds::new(10, 10);
            let worm = worm_at(&[(10, 5), (9, 5)], Direction::Right);
            let other = worm_at(&[(1, 1)], Direction::Right);
            assert_eq!(
                worm.collided_with(&other, bounds),
                Some(GameOverReason::WallCollision { worm: WormId::new(0) })
            );
        }

        #[test]
        fn head_on_other_body_is_worm_collision() {
            let bounds = GridBounds::new(10, 10);
            let worm = worm_at(&[(5, 5), (4, 5)], Direction::Right);
            let other = Worm::from_body(
                WormId::new(1),
                [Position::new(5, 4), Position::new(5, 5), Position::new(5, 6)],
                Direction::Up,
                style(),
            )
            .unwrap();

            assert_eq!(
                worm.collided_with(&other, bounds),
                Some(GameOverReason::WormCollision {
                    worm: WormId::new(0),
                    other: WormId::new(1)
                })
            );
            // The other worm's head is not on this worm.
            assert_eq!(other.collided_with(&worm, bounds), None);
        }

        #[test]
        fn head_overlap_detects_loops() {
            let looped = worm_at(&[(5, 5), (5, 6), (4, 6), (4, 5), (5, 5)], Direction::Up);
            assert!(looped.head_overlaps_body());

            let straight = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            assert!(!straight.head_overlaps_body());
        }

        #[test]
        fn touches_any_checks_every_segment() {
            let worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            let cells: HashSet<_> = [Position::new(3, 5)].into_iter().collect();
            assert!(worm.touches_any(&cells));
            assert!(!worm.touches_any(&HashSet::new()));
        }

        #[test]
        fn hit_by_reports_segment_index() {
            let worm = worm_at(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
            let head_shot = Projectile::new(Position::new(5, 5), Direction::Left);
            let tail_shot = Projectile::new(Position::new(3, 5), Direction::Left);
            let miss = Projectile::new(Position::new(3, 6), Direction::Left);

            assert_eq!(worm.hit_by(&head_shot), Some(0));
            assert_eq!(worm.hit_by(&tail_shot), Some(2));
            assert_eq!(worm.hit_by(&miss), None);
        }
    }

    mod damage_tests {
        use super::*;

        #[test]
        fn lose_segments_is_inclusive_of_the_struck_cell() {
            let mut worm = worm_at(&[(6, 5), (5, 5), (4, 5), (3, 5), (2, 5)], Direction::Right);
            let lost = worm.lose_segments_from(Position::new(4, 5));

            assert_eq!(
                lost,
                vec![Position::new(4, 5), Position::new(3, 5), Position::new(2, 5)]
            );
            assert_eq!(worm.length(), 2);
            assert_eq!(worm.head(), Position::new(6, 5));
        }

        #[test]
        fn head_cannot_be_severed() {
            let mut worm = worm_at(&[(6, 5), (5, 5)], Direction::Right);
            assert!(worm.lose_segments_from(Position::new(6, 5)).is_empty());
            assert_eq!(worm.length(), 2);
        }

        #[test]
        fn missing_cell_severs_nothing() {
            let mut worm = worm_at(&[(6, 5), (5, 5)], Direction::Right);
            assert!(worm.lose_segments_from(Position::new(0, 0)).is_empty());
            assert_eq!(worm.length(), 2);
        }
    }
}
