//! The arena: exclusive owner of every entity in a match.
//!
//! An [`Arena`] holds the worms, projectiles, obstacles and growth items of
//! one match together with the grid bounds and the match RNG. Entities never
//! reference each other; every cross-entity question is answered here or in
//! the tick engine ([`Arena::advance`]).
//!
//! # Determinism
//!
//! All randomness (start positions, growth items, respawns) is drawn from a
//! single [`ChaCha8Rng`] seeded from the `u64` passed to [`Arena::new`]. Worms
//! are stored in spawn order and projectiles in creation order, and every
//! pass iterates in that order. Two arenas built from the same config and
//! seed and fed the same command batches produce identical snapshots.
//!
//! # Example
//!
//! ```
//! use wormy_core::arena::Arena;
//! use wormy_core::config::ArenaConfig;
//! use wormy_core::input::TickCommands;
//! use wormy_core::outcome::TickOutcome;
//!
//! let mut arena = Arena::new(ArenaConfig::with_grid(32, 24), 7).unwrap();
//! assert_eq!(arena.worms().len(), 2);
//! assert_eq!(arena.growth_items().len(), 4);
//!
//! let outcome = arena.advance(&TickCommands::new());
//! assert_eq!(outcome, TickOutcome::Continue);
//! assert_eq!(arena.tick(), 1);
//! ```

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::ArenaConfig;
use crate::entity::{GrowthItem, Obstacle, Projectile, Worm, WormId, WormStyle};
use crate::error::Result;
use crate::grid::{Direction, GridBounds, Position};
use crate::outcome::{ArenaEvent, MatchPhase};

/// Start positions re-rolled at most this many times to avoid overlapping
/// worms spawned earlier.
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// A single match: all entities, the grid and the match RNG.
#[derive(Debug, Clone)]
pub struct Arena {
    pub(crate) config: ArenaConfig,
    pub(crate) bounds: GridBounds,
    pub(crate) worms: Vec<Worm>,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) obstacles: Vec<Obstacle>,
    /// Mirror of `obstacles` for per-segment lookups.
    pub(crate) obstacle_cells: HashSet<Position>,
    pub(crate) growth_items: Vec<GrowthItem>,
    pub(crate) rng: ChaCha8Rng,
    seed: u64,
    pub(crate) tick: u64,
    pub(crate) phase: MatchPhase,
    pub(crate) events: Vec<ArenaEvent>,
    next_worm_id: u32,
}

impl Arena {
    /// Validates `config` and sets up a match: one worm per configured
    /// style at a random start cell, and a full pool of growth items.
    ///
    /// # Errors
    ///
    /// Returns the first configuration violation found.
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self> {
        let mut arena = Self::empty(config, seed)?;
        arena.setup();
        Ok(arena)
    }

    /// Validates `config` and creates an arena with no entities at all.
    ///
    /// Used to build hand-placed scenarios with [`Arena::spawn_worm`] and
    /// friends.
    ///
    /// # Errors
    ///
    /// Returns the first configuration violation found.
    pub fn empty(config: ArenaConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bounds: config.bounds(),
            config,
            worms: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            obstacle_cells: HashSet::new(),
            growth_items: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: 0,
            phase: MatchPhase::Running,
            events: Vec::new(),
            next_worm_id: 0,
        })
    }

    /// Throws the current match away and sets up a new one with the same
    /// config.
    ///
    /// The RNG is not re-seeded: the new layout continues the same random
    /// stream, so a whole session of matches replays from the seed alone.
    pub fn restart(&mut self) {
        self.worms.clear();
        self.projectiles.clear();
        self.obstacles.clear();
        self.obstacle_cells.clear();
        self.growth_items.clear();
        self.events.clear();
        self.tick = 0;
        self.phase = MatchPhase::Running;
        self.next_worm_id = 0;
        self.setup();
    }

    // =========================================================================
    // Setup
    // =========================================================================

    fn setup(&mut self) {
        let styles = self.config.worms.clone();
        for style in styles {
            let head = self.random_start_head();
            let id = self.allocate_worm_id();
            self.worms
                .push(Worm::spawn(id, head, self.config.starting_length, style));
        }

        while self.growth_items.len() < self.config.growth_pool_size {
            let cell = self.random_free_growth_cell();
            self.growth_items.push(GrowthItem::new(cell));
        }

        debug!(
            seed = self.seed,
            worms = self.worms.len(),
            growth_items = self.growth_items.len(),
            "arena set up"
        );
    }

    /// Picks a head cell at least `start_margin` cells from every edge whose
    /// starting body does not overlap an existing worm.
    fn random_start_head(&mut self) -> Position {
        let margin = self.config.start_margin;
        let (max_x, max_y) = (self.bounds.width - 1 - margin, self.bounds.height - 1 - margin);
        let length = self.config.starting_length;

        let mut head = Position::default();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            head = Position::new(
                self.rng.gen_range(margin..=max_x),
                self.rng.gen_range(margin..=max_y),
            );
            let candidate = Worm::spawn(WormId::new(u32::MAX), head, length, WormStyle::default());
            if !candidate
                .body()
                .any(|cell| self.worms.iter().any(|worm| worm.occupies(cell)))
            {
                break;
            }
        }
        head
    }

    /// Picks a uniformly random grid cell.
    fn random_cell(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0..self.bounds.width),
            self.rng.gen_range(0..self.bounds.height),
        )
    }

    /// Picks a random cell not holding an active growth item.
    ///
    /// Worms and obstacles are not consulted, so an item may appear under
    /// either. Terminates because the pool is smaller than the grid.
    pub(crate) fn random_free_growth_cell(&mut self) -> Position {
        loop {
            let cell = self.random_cell();
            if !self.growth_items.iter().any(|item| item.position() == cell) {
                return cell;
            }
        }
    }

    fn allocate_worm_id(&mut self) -> WormId {
        let id = WormId::new(self.next_worm_id);
        self.next_worm_id += 1;
        id
    }

    // =========================================================================
    // Scenario Building
    // =========================================================================

    /// Adds a worm with an explicit body, head first.
    ///
    /// The worm gets the next id and the configured style at that index
    /// (cycling if there are more worms than styles). Returns `None` if
    /// `body` is empty.
    pub fn spawn_worm(
        &mut self,
        body: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<WormId> {
        let styles = &self.config.worms;
        let style = styles
            .get(self.next_worm_id as usize % styles.len().max(1))
            .copied()
            .unwrap_or_default();
        let worm = Worm::from_body(WormId::new(self.next_worm_id), body, direction, style)?;
        let id = self.allocate_worm_id();
        self.worms.push(worm);
        Some(id)
    }

    /// Places an obstacle. Returns false if the cell already holds one.
    pub fn place_obstacle(&mut self, position: Position) -> bool {
        if !self.obstacle_cells.insert(position) {
            return false;
        }
        self.obstacles.push(Obstacle::new(position));
        true
    }

    /// Places a growth item. Returns false if the cell already holds one.
    pub fn place_growth_item(&mut self, position: Position) -> bool {
        if self.growth_items.iter().any(|item| item.position() == position) {
            return false;
        }
        self.growth_items.push(GrowthItem::new(position));
        true
    }

    /// Adds a live projectile.
    pub fn spawn_projectile(&mut self, position: Position, direction: Direction) {
        self.projectiles.push(Projectile::new(position, direction));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Worms in spawn order.
    #[must_use]
    pub fn worms(&self) -> &[Worm] {
        &self.worms
    }

    /// Looks up a worm by id.
    #[must_use]
    pub fn worm(&self, id: WormId) -> Option<&Worm> {
        self.worms.iter().find(|worm| worm.id() == id)
    }

    /// Live projectiles in creation order.
    #[must_use]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Obstacles in creation order.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Returns true if `cell` holds an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, cell: Position) -> bool {
        self.obstacle_cells.contains(&cell)
    }

    /// Active growth items.
    #[must_use]
    pub fn growth_items(&self) -> &[GrowthItem] {
        &self.growth_items
    }

    /// Number of ticks executed in the current match.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Current match phase.
    #[must_use]
    pub const fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Returns true once the match has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::Terminal(_))
    }

    /// Events raised by the most recent executed tick.
    #[must_use]
    pub fn events(&self) -> &[ArenaEvent] {
        &self.events
    }

    /// Seed the match RNG was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Grid bounds.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Configuration the arena was built from.
    #[must_use]
    pub const fn config(&self) -> &ArenaConfig {
        &self.config
    }
}
