//! Per-tick command batches and key bindings.
//!
//! The engine never sees raw input. Before each tick the driver turns
//! whatever the player pressed into a [`TickCommands`] batch: at most one
//! turn and one shoot request per worm. When several presses for the same
//! worm arrive in one tick, the last turn wins.
//!
//! [`InputBindings`] does that translation for any key type the driver uses.
//!
//! # Example
//!
//! ```
//! use wormy_core::entity::WormId;
//! use wormy_core::grid::Direction;
//! use wormy_core::input::{ControlKeys, InputBindings};
//!
//! let mut bindings = InputBindings::new();
//! bindings.bind_worm(WormId::new(0), ControlKeys {
//!     up: 'w',
//!     down: 's',
//!     left: 'a',
//!     right: 'd',
//!     shoot: 'e',
//! });
//!
//! let commands = bindings.resolve(['w', 'e', 'x']);
//! let cmd = commands.get(WormId::new(0)).unwrap();
//! assert_eq!(cmd.turn, Some(Direction::Up));
//! assert!(cmd.shoot);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::WormId;
use crate::grid::Direction;

// =============================================================================
// Command Batches
// =============================================================================

/// What one worm asked for this tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormCommand {
    /// Requested heading, if any.
    pub turn: Option<Direction>,
    /// Whether to fire a projectile.
    pub shoot: bool,
}

/// The resolved command batch for a single tick, keyed by worm.
///
/// Commands for worms that are not in the arena are ignored by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCommands {
    commands: BTreeMap<WormId, WormCommand>,
}

impl TickCommands {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a turn for `worm`, replacing any earlier request this tick.
    pub fn turn(&mut self, worm: WormId, direction: Direction) -> &mut Self {
        self.commands.entry(worm).or_default().turn = Some(direction);
        self
    }

    /// Requests a shot from `worm`.
    pub fn shoot(&mut self, worm: WormId) -> &mut Self {
        self.commands.entry(worm).or_default().shoot = true;
        self
    }

    /// Applies a bound control for `worm`.
    pub fn apply(&mut self, worm: WormId, control: Control) -> &mut Self {
        match control {
            Control::Turn(direction) => self.turn(worm, direction),
            Control::Shoot => self.shoot(worm),
        }
    }

    /// Returns the command for `worm`, if it asked for anything.
    #[must_use]
    pub fn get(&self, worm: WormId) -> Option<&WormCommand> {
        self.commands.get(&worm)
    }

    /// Returns true if no worm asked for anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates commands in worm-id order.
    pub fn iter(&self) -> impl Iterator<Item = (WormId, &WormCommand)> + '_ {
        self.commands.iter().map(|(id, cmd)| (*id, cmd))
    }
}

// =============================================================================
// Key Bindings
// =============================================================================

/// An abstract control a key can be bound to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    /// Turn towards a direction.
    Turn(Direction),
    /// Fire.
    Shoot,
}

/// The five keys controlling one worm.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlKeys<K> {
    /// Turn up.
    pub up: K,
    /// Turn down.
    pub down: K,
    /// Turn left.
    pub left: K,
    /// Turn right.
    pub right: K,
    /// Fire.
    pub shoot: K,
}

/// Maps driver keys to `(worm, control)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBindings<K: Ord> {
    bindings: BTreeMap<K, (WormId, Control)>,
}

impl<K: Ord> Default for InputBindings<K> {
    fn default() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> InputBindings<K> {
    /// Creates an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `control` on `worm`, replacing any earlier binding.
    pub fn bind(&mut self, key: K, worm: WormId, control: Control) -> &mut Self {
        self.bindings.insert(key, (worm, control));
        self
    }

    /// Binds a full set of control keys to `worm`.
    pub fn bind_worm(&mut self, worm: WormId, keys: ControlKeys<K>) -> &mut Self {
        self.bind(keys.up, worm, Control::Turn(Direction::Up))
            .bind(keys.down, worm, Control::Turn(Direction::Down))
            .bind(keys.left, worm, Control::Turn(Direction::Left))
            .bind(keys.right, worm, Control::Turn(Direction::Right))
            .bind(keys.shoot, worm, Control::Shoot)
    }

    /// Looks up what `key` does.
    #[must_use]
    pub fn lookup(&self, key: K) -> Option<(WormId, Control)> {
        self.bindings.get(&key).copied()
    }

    /// Resolves the keys pressed during one tick, in press order, into a
    /// command batch. Unbound keys are skipped.
    pub fn resolve(&self, pressed: impl IntoIterator<Item = K>) -> TickCommands {
        let mut commands = TickCommands::new();
        for (worm, control) in pressed.into_iter().filter_map(|key| self.lookup(key)) {
            commands.apply(worm, control);
        }
        commands
    }
}
