//! Tick results, match phases and the per-tick event log.
//!
//! A tick either lets the match continue or ends it with a
//! [`GameOverReason`]. Ending a match is ordinary data, returned to the
//! caller like any other result; nothing in the engine treats it as an
//! error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::WormId;
use crate::grid::Position;

// =============================================================================
// Outcomes
// =============================================================================

/// Why a match ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// `worm`'s head ran onto a cell of `other`'s body.
    WormCollision {
        /// The worm whose head hit.
        worm: WormId,
        /// The worm that was hit.
        other: WormId,
    },
    /// `worm`'s head left the grid.
    WallCollision {
        /// The worm that crashed.
        worm: WormId,
    },
    /// `worm`'s head ran onto its own body.
    SelfCollision {
        /// The worm that looped into itself.
        worm: WormId,
    },
    /// A segment of `worm` sits on an obstacle.
    ObstacleCollision {
        /// The worm that touched the obstacle.
        worm: WormId,
    },
    /// A projectile struck `worm`'s head.
    Headshot {
        /// The worm that was shot.
        worm: WormId,
    },
}

impl GameOverReason {
    /// The worm whose move or injury ended the match.
    #[must_use]
    pub const fn worm(&self) -> WormId {
        match self {
            Self::WormCollision { worm, .. }
            | Self::WallCollision { worm }
            | Self::SelfCollision { worm }
            | Self::ObstacleCollision { worm }
            | Self::Headshot { worm } => *worm,
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WormCollision { worm, other } => {
                write!(f, "worm {worm} ran into worm {other}")
            }
            Self::WallCollision { worm } => write!(f, "worm {worm} hit the wall"),
            Self::SelfCollision { worm } => write!(f, "worm {worm} ran into itself"),
            Self::ObstacleCollision { worm } => write!(f, "worm {worm} hit an obstacle"),
            Self::Headshot { worm } => write!(f, "worm {worm} was shot in the head"),
        }
    }
}

/// Result of one [`Arena::advance`](crate::arena::Arena::advance) call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The match goes on.
    Continue,
    /// The match is over.
    GameOver(GameOverReason),
}

impl TickOutcome {
    /// Returns true if the match has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver(_))
    }
}

/// Match-level state.
///
/// Setup happens when the arena is built, so an arena is always either
/// running or finished. `Terminal` is absorbing until the match is
/// restarted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Ticks are being simulated.
    Running,
    /// The match ended for the given reason.
    Terminal(GameOverReason),
}

// =============================================================================
// Events
// =============================================================================

/// Something notable that happened during the last tick.
///
/// Events are informational: renderers use them for effects and sound, and
/// nothing in the engine reads them back.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaEvent {
    /// `worm` fired a projectile that appeared at `at`.
    ProjectileFired {
        /// The shooter.
        worm: WormId,
        /// Spawn cell of the projectile.
        at: Position,
    },
    /// A projectile cut `lost` segments off `worm`, starting at `at`.
    WormSevered {
        /// The injured worm.
        worm: WormId,
        /// Cell of the struck segment.
        at: Position,
        /// Number of segments turned into obstacles.
        lost: usize,
    },
    /// A spent projectile split into two fragments at `at`.
    ProjectileDetonated {
        /// Impact cell.
        at: Position,
    },
    /// A projectile left the grid and was removed.
    ProjectileExpired {
        /// Last (off-grid) cell of the projectile.
        at: Position,
    },
    /// `worm` ate the growth item at `at`; a new one appeared at `respawned_at`.
    GrowthItemEaten {
        /// The worm that grew.
        worm: WormId,
        /// Cell of the eaten item.
        at: Position,
        /// Cell of the replacement item.
        respawned_at: Position,
    },
    /// The match ended.
    GameOver {
        /// Why it ended.
        reason: GameOverReason,
    },
}
