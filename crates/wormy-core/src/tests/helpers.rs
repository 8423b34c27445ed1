//! Test helpers for building scenario arenas and driving them.

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::entity::WormId;
use crate::grid::{Direction, Position};
use crate::input::TickCommands;
use crate::outcome::{GameOverReason, TickOutcome};

// =============================================================================
// Arena Setup
// =============================================================================

/// Grid used by every hand-placed scenario.
pub const SCENARIO_WIDTH: i32 = 32;
/// Grid used by every hand-placed scenario.
pub const SCENARIO_HEIGHT: i32 = 24;

/// An empty 32x24 arena with the default rules.
pub fn scenario_arena() -> Arena {
    Arena::empty(ArenaConfig::with_grid(SCENARIO_WIDTH, SCENARIO_HEIGHT), 0)
        .expect("scenario config is valid")
}

/// A fully set-up 32x24 arena.
pub fn seeded_arena(seed: u64) -> Arena {
    Arena::new(ArenaConfig::with_grid(SCENARIO_WIDTH, SCENARIO_HEIGHT), seed)
        .expect("scenario config is valid")
}

/// Body of `length` cells trailing away from `head`, opposite `direction`.
pub fn straight_body(head: (i32, i32), direction: Direction, length: usize) -> Vec<Position> {
    let head = Position::new(head.0, head.1);
    (0..length)
        .map(|i| head.offset(direction.opposite(), i32::try_from(i).unwrap_or(i32::MAX)))
        .collect()
}

/// Spawns a straight worm facing `direction` and returns its id.
pub fn spawn_straight(
    arena: &mut Arena,
    head: (i32, i32),
    direction: Direction,
    length: usize,
) -> WormId {
    arena
        .spawn_worm(straight_body(head, direction, length), direction)
        .expect("non-empty body")
}

// =============================================================================
// Driving
// =============================================================================

/// A batch with no commands.
pub fn idle() -> TickCommands {
    TickCommands::new()
}

/// Advances with no input until the match ends or `max_ticks` pass.
///
/// Returns the tick on which the match ended and why.
pub fn run_idle(arena: &mut Arena, max_ticks: u64) -> Option<(u64, GameOverReason)> {
    for _ in 0..max_ticks {
        if let TickOutcome::GameOver(reason) = arena.advance(&idle()) {
            return Some((arena.tick(), reason));
        }
    }
    None
}

/// Current body of `id`, head first.
pub fn body_of(arena: &Arena, id: WormId) -> Vec<Position> {
    arena
        .worm(id)
        .map(|worm| worm.body().collect())
        .unwrap_or_default()
}
