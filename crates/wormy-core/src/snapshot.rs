//! Read-only render snapshot.
//!
//! After each tick a renderer reads an [`ArenaSnapshot`]: plain owned data
//! with no references back into the arena, so it can be kept, diffed or
//! serialized freely.

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::entity::{Projectile, Worm, WormId, WormStyle};
use crate::grid::{Direction, Position};
use crate::outcome::MatchPhase;

/// A worm as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormView {
    /// Worm identity.
    pub id: WormId,
    /// Segments, head first.
    pub body: Vec<Position>,
    /// Heading.
    pub direction: Direction,
    /// Colours and scoreboard slot.
    pub style: WormStyle,
    /// Score to display (the body length).
    pub score: usize,
}

impl From<&Worm> for WormView {
    fn from(worm: &Worm) -> Self {
        Self {
            id: worm.id(),
            body: worm.body().collect(),
            direction: worm.direction(),
            style: *worm.style(),
            score: worm.score(),
        }
    }
}

/// A projectile as the renderer sees it. The direction picks the sprite.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Current cell.
    pub position: Position,
    /// Heading.
    pub direction: Direction,
}

impl From<&Projectile> for ProjectileView {
    fn from(projectile: &Projectile) -> Self {
        Self {
            position: projectile.position(),
            direction: projectile.direction(),
        }
    }
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    /// Ticks executed so far in this match.
    pub tick: u64,
    /// Grid columns.
    pub grid_width: i32,
    /// Grid rows.
    pub grid_height: i32,
    /// Running or finished.
    pub phase: MatchPhase,
    /// Worms in spawn order.
    pub worms: Vec<WormView>,
    /// Live projectiles.
    pub projectiles: Vec<ProjectileView>,
    /// Obstacle cells.
    pub obstacles: Vec<Position>,
    /// Growth item cells.
    pub growth_items: Vec<Position>,
}

impl Arena {
    /// Captures the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ArenaSnapshot {
        let bounds = self.bounds();
        ArenaSnapshot {
            tick: self.tick(),
            grid_width: bounds.width,
            grid_height: bounds.height,
            phase: self.phase(),
            worms: self.worms().iter().map(WormView::from).collect(),
            projectiles: self.projectiles().iter().map(ProjectileView::from).collect(),
            obstacles: self.obstacles().iter().map(|o| o.position()).collect(),
            growth_items: self.growth_items().iter().map(|g| g.position()).collect(),
        }
    }
}
