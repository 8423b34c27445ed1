//! The tick engine.
//!
//! [`Arena::advance`] runs one simulation step as a fixed sequence of
//! phases. Each phase sees the effects of the ones before it:
//!
//! 1. Apply turn commands (reverse turns are ignored)
//! 2. Apply shoot commands
//! 3. Worm-vs-worm and worm-vs-wall collisions, on pre-movement positions
//! 4. Worm-vs-obstacle collisions
//! 5. Projectile impacts: a headshot ends the tick at once, any other hit
//!    severs the worm and turns the lost segments into obstacles
//! 6. Spent projectiles detonate into a forward and a reverse fragment
//! 7. Self-overlap
//! 8. Growth-item consumption and respawn
//! 9. Tail retraction for worms that did not grow
//! 10. Worm advance
//! 11. Projectile advance
//! 12. Projectile bounds cleanup
//! 13. Report `Continue` unless a phase already ended the match
//!
//! Collision phases run before any movement so a worm can never move
//! through a lethal cell undetected. Removals are collected first and
//! applied afterwards; no collection is edited while it is being scanned.

use tracing::{debug, trace};

use crate::arena::Arena;
use crate::entity::{GrowthItem, Obstacle, Projectile};
use crate::input::TickCommands;
use crate::outcome::{ArenaEvent, GameOverReason, MatchPhase, TickOutcome};

impl Arena {
    /// Runs one tick with the given command batch.
    ///
    /// Commands for unknown worms and reverse turns are ignored. Once a
    /// tick has ended the match, further calls change nothing and keep
    /// returning the same outcome until [`Arena::restart`].
    ///
    /// # Example
    ///
    /// ```
    /// use wormy_core::arena::Arena;
    /// use wormy_core::config::ArenaConfig;
    /// use wormy_core::grid::{Direction, Position};
    /// use wormy_core::input::TickCommands;
    /// use wormy_core::outcome::{GameOverReason, TickOutcome};
    ///
    /// let mut arena = Arena::empty(ArenaConfig::with_grid(32, 24), 0).unwrap();
    /// let id = arena
    ///     .spawn_worm([Position::new(31, 5), Position::new(30, 5)], Direction::Right)
    ///     .unwrap();
    ///
    /// // The head steps onto the wall ring...
    /// assert_eq!(arena.advance(&TickCommands::new()), TickOutcome::Continue);
    /// // ...and the collision is reported on the next tick.
    /// assert_eq!(
    ///     arena.advance(&TickCommands::new()),
    ///     TickOutcome::GameOver(GameOverReason::WallCollision { worm: id })
    /// );
    /// ```
    pub fn advance(&mut self, commands: &TickCommands) -> TickOutcome {
        if let MatchPhase::Terminal(reason) = self.phase {
            trace!(%reason, "advance ignored, match is over");
            return TickOutcome::GameOver(reason);
        }

        self.events.clear();
        self.tick += 1;

        match self.run_phases(commands) {
            Ok(()) => TickOutcome::Continue,
            Err(reason) => {
                debug!(tick = self.tick, %reason, "match over");
                self.phase = MatchPhase::Terminal(reason);
                self.events.push(ArenaEvent::GameOver { reason });
                TickOutcome::GameOver(reason)
            }
        }
    }

    /// Runs phases 1 through 12, stopping at the first terminal condition.
    fn run_phases(&mut self, commands: &TickCommands) -> Result<(), GameOverReason> {
        self.apply_turns(commands);
        self.apply_shots(commands);
        self.check_worm_collisions()?;
        self.check_obstacle_collisions()?;
        self.resolve_projectile_impacts()?;
        self.detonate_spent_projectiles();
        self.check_self_overlap()?;
        let grew = self.consume_growth_items();
        self.move_worms(&grew);
        self.advance_projectiles();
        self.expire_projectiles();
        Ok(())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn apply_turns(&mut self, commands: &TickCommands) {
        for (id, command) in commands.iter() {
            let Some(direction) = command.turn else {
                continue;
            };
            match self.worms.iter_mut().find(|worm| worm.id() == id) {
                Some(worm) => {
                    if !worm.turn(direction) {
                        trace!(worm = %id, %direction, "reverse turn ignored");
                    }
                }
                None => trace!(worm = %id, "turn for unknown worm ignored"),
            }
        }
    }

    fn apply_shots(&mut self, commands: &TickCommands) {
        for (id, command) in commands.iter() {
            if !command.shoot {
                continue;
            }
            let Some(worm) = self.worms.iter().find(|worm| worm.id() == id) else {
                trace!(worm = %id, "shot for unknown worm ignored");
                continue;
            };
            let projectile = worm.shoot();
            self.events.push(ArenaEvent::ProjectileFired {
                worm: id,
                at: projectile.position(),
            });
            self.projectiles.push(projectile);
        }
    }

    // =========================================================================
    // Collisions
    // =========================================================================

    /// Every unordered pair `(a, b)` in spawn order is checked as a-wall,
    /// a-head-in-b, b-wall, b-head-in-a. A lone worm only gets the wall check.
    fn check_worm_collisions(&self) -> Result<(), GameOverReason> {
        if let [worm] = self.worms.as_slice() {
            if worm.is_outside(self.bounds) {
                return Err(GameOverReason::WallCollision { worm: worm.id() });
            }
            return Ok(());
        }

        for (i, a) in self.worms.iter().enumerate() {
            for b in &self.worms[i + 1..] {
                if let Some(reason) = a
                    .collided_with(b, self.bounds)
                    .or_else(|| b.collided_with(a, self.bounds))
                {
                    return Err(reason);
                }
            }
        }
        Ok(())
    }

    fn check_obstacle_collisions(&self) -> Result<(), GameOverReason> {
        match self
            .worms
            .iter()
            .find(|worm| worm.touches_any(&self.obstacle_cells))
        {
            Some(worm) => Err(GameOverReason::ObstacleCollision { worm: worm.id() }),
            None => Ok(()),
        }
    }

    fn check_self_overlap(&self) -> Result<(), GameOverReason> {
        match self.worms.iter().find(|worm| worm.head_overlaps_body()) {
            Some(worm) => Err(GameOverReason::SelfCollision { worm: worm.id() }),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Projectiles
    // =========================================================================

    /// Tests every projectile against every worm. A projectile that severs a
    /// worm is marked spent and tests no further worms.
    fn resolve_projectile_impacts(&mut self) -> Result<(), GameOverReason> {
        for projectile in &mut self.projectiles {
            for worm in &mut self.worms {
                match worm.hit_by(projectile) {
                    None => {}
                    Some(0) => return Err(GameOverReason::Headshot { worm: worm.id() }),
                    Some(index) => {
                        let at = projectile.position();
                        let lost = worm.lose_segments_from(at);
                        debug!(
                            worm = %worm.id(),
                            index,
                            lost = lost.len(),
                            "worm severed"
                        );
                        for cell in &lost {
                            if self.obstacle_cells.insert(*cell) {
                                self.obstacles.push(Obstacle::new(*cell));
                            }
                        }
                        self.events.push(ArenaEvent::WormSevered {
                            worm: worm.id(),
                            at,
                            lost: lost.len(),
                        });
                        projectile.mark_spent();
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Replaces every spent projectile with its two fragments, appended after
    /// the surviving projectiles.
    fn detonate_spent_projectiles(&mut self) {
        if !self.projectiles.iter().any(Projectile::is_spent) {
            return;
        }
        let (spent, mut live): (Vec<_>, Vec<_>) =
            self.projectiles.drain(..).partition(Projectile::is_spent);
        for projectile in &spent {
            self.events.push(ArenaEvent::ProjectileDetonated {
                at: projectile.position(),
            });
            live.extend(projectile.explode());
        }
        self.projectiles = live;
    }

    fn advance_projectiles(&mut self) {
        let speed = self.config.projectile_speed;
        for projectile in &mut self.projectiles {
            projectile.advance(speed);
        }
    }

    fn expire_projectiles(&mut self) {
        let bounds = self.bounds;
        let events = &mut self.events;
        self.projectiles.retain(|projectile| {
            if !projectile.is_out_of_bounds(bounds) {
                return true;
            }
            trace!(at = %projectile.position(), "projectile left the grid");
            events.push(ArenaEvent::ProjectileExpired {
                at: projectile.position(),
            });
            false
        });
    }

    // =========================================================================
    // Growth and Movement
    // =========================================================================

    /// Lets each worm eat the growth item under its head, respawning it at
    /// once. Returns, per worm, whether it grew this tick.
    fn consume_growth_items(&mut self) -> Vec<bool> {
        let mut grew = vec![false; self.worms.len()];
        for (index, flag) in grew.iter_mut().enumerate() {
            let (id, head) = (self.worms[index].id(), self.worms[index].head());
            let Some(eaten) = self
                .growth_items
                .iter()
                .position(|item| item.position() == head)
            else {
                continue;
            };

            self.growth_items.remove(eaten);
            let respawned_at = self.random_free_growth_cell();
            self.growth_items.push(GrowthItem::new(respawned_at));
            debug!(worm = %id, at = %head, %respawned_at, "growth item eaten");
            self.events.push(ArenaEvent::GrowthItemEaten {
                worm: id,
                at: head,
                respawned_at,
            });
            *flag = true;
        }
        grew
    }

    /// Phases 9 and 10: worms that did not grow lose their tail, and every
    /// worm gains a head one cell ahead.
    fn move_worms(&mut self, grew: &[bool]) {
        for (worm, grew) in self.worms.iter_mut().zip(grew) {
            worm.slither(*grew);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::entity::WormId;
    use crate::grid::{Direction, Position};

    fn arena() -> Arena {
        Arena::empty(ArenaConfig::with_grid(32, 24), 11).unwrap()
    }

    fn row(y: i32, xs: impl IntoIterator<Item = i32>) -> Vec<Position> {
        xs.into_iter().map(|x| Position::new(x, y)).collect()
    }

    mod command_tests {
        use super::*;

        #[test]
        fn turn_applies_before_movement() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let mut commands = TickCommands::new();
            commands.turn(id, Direction::Down);

            arena.advance(&commands);

            assert_eq!(arena.worm(id).unwrap().head(), Position::new(10, 11));
        }

        #[test]
        fn commands_for_unknown_worms_are_ignored() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let mut commands = TickCommands::new();
            commands
                .turn(WormId::new(42), Direction::Up)
                .shoot(WormId::new(42));

            assert_eq!(arena.advance(&commands), TickOutcome::Continue);
            assert!(arena.projectiles().is_empty());
            assert_eq!(arena.worm(id).unwrap().head(), Position::new(11, 10));
        }

        #[test]
        fn shot_spawns_ahead_then_flies() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let mut commands = TickCommands::new();
            commands.shoot(id);

            arena.advance(&commands);

            // Spawned at (11, 10), then moved two cells.
            assert_eq!(arena.projectiles().len(), 1);
            assert_eq!(arena.projectiles()[0].position(), Position::new(13, 10));
            assert_eq!(
                arena.events()[0],
                ArenaEvent::ProjectileFired {
                    worm: id,
                    at: Position::new(11, 10)
                }
            );
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn head_into_other_body_is_worm_collision() {
            let mut arena = arena();
            // Worm 0 already has its head on worm 1's second segment.
            let a = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let b = arena
                .spawn_worm(
                    [Position::new(10, 9), Position::new(10, 10), Position::new(10, 11)],
                    Direction::Up,
                )
                .unwrap();

            assert_eq!(
                arena.advance(&TickCommands::new()),
                TickOutcome::GameOver(GameOverReason::WormCollision { worm: a, other: b })
            );
        }

        #[test]
        fn pair_checks_first_worm_before_second() {
            let mut arena = arena();
            // Heads on each other's bodies: the earlier worm is reported.
            let a = arena.spawn_worm(row(10, [10, 9]), Direction::Right).unwrap();
            let b = arena.spawn_worm(row(10, [9, 10]), Direction::Left).unwrap();

            assert_eq!(
                arena.advance(&TickCommands::new()),
                TickOutcome::GameOver(GameOverReason::WormCollision { worm: a, other: b })
            );
        }

        #[test]
        fn segment_on_obstacle_ends_match() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            arena.place_obstacle(Position::new(8, 10));

            assert_eq!(
                arena.advance(&TickCommands::new()),
                TickOutcome::GameOver(GameOverReason::ObstacleCollision { worm: id })
            );
        }

        #[test]
        fn looping_into_itself_is_self_collision() {
            let mut arena = arena();
            let id = arena
                .spawn_worm(
                    [
                        Position::new(5, 5),
                        Position::new(5, 6),
                        Position::new(6, 6),
                        Position::new(6, 5),
                        Position::new(5, 5),
                    ],
                    Direction::Up,
                )
                .unwrap();

            assert_eq!(
                arena.advance(&TickCommands::new()),
                TickOutcome::GameOver(GameOverReason::SelfCollision { worm: id })
            );
        }

        #[test]
        fn terminal_outcome_is_absorbing() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [32, 31]), Direction::Right).unwrap();
            let reason = GameOverReason::WallCollision { worm: id };

            assert_eq!(arena.advance(&TickCommands::new()), TickOutcome::GameOver(reason));
            let tick = arena.tick();
            let body: Vec<_> = arena.worm(id).unwrap().body().collect();

            let mut commands = TickCommands::new();
            commands.turn(id, Direction::Up).shoot(id);
            assert_eq!(arena.advance(&commands), TickOutcome::GameOver(reason));

            assert_eq!(arena.tick(), tick);
            assert!(arena.projectiles().is_empty());
            assert_eq!(arena.worm(id).unwrap().body().collect::<Vec<_>>(), body);
            assert_eq!(arena.phase(), MatchPhase::Terminal(reason));
            assert_eq!(arena.events(), &[ArenaEvent::GameOver { reason }]);
        }
    }

    mod impact_tests {
        use super::*;

        #[test]
        fn headshot_ends_tick_without_obstacles() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            arena.spawn_projectile(Position::new(10, 10), Direction::Left);

            assert_eq!(
                arena.advance(&TickCommands::new()),
                TickOutcome::GameOver(GameOverReason::Headshot { worm: id })
            );
            assert!(arena.obstacles().is_empty());
            assert_eq!(arena.projectiles().len(), 1);
            assert_eq!(arena.worm(id).unwrap().head(), Position::new(10, 10));
        }

        #[test]
        fn body_hit_severs_and_detonates() {
            let mut arena = arena();
            let id = arena
                .spawn_worm(row(10, [10, 9, 8, 7, 6]), Direction::Right)
                .unwrap();
            arena.spawn_projectile(Position::new(8, 10), Direction::Down);

            assert_eq!(arena.advance(&TickCommands::new()), TickOutcome::Continue);

            let worm = arena.worm(id).unwrap();
            assert_eq!(worm.length(), 2);
            let obstacles: Vec<_> = arena.obstacles().iter().map(Obstacle::position).collect();
            assert_eq!(obstacles, row(10, [8, 7, 6]));

            // Fragments fly down and up from the impact cell.
            let fragments: Vec<_> = arena
                .projectiles()
                .iter()
                .map(|p| (p.position(), p.direction()))
                .collect();
            assert_eq!(
                fragments,
                vec![
                    (Position::new(8, 12), Direction::Down),
                    (Position::new(8, 8), Direction::Up),
                ]
            );
            assert!(arena.events().contains(&ArenaEvent::WormSevered {
                worm: id,
                at: Position::new(8, 10),
                lost: 3
            }));
        }

        #[test]
        fn spent_projectile_stops_after_first_worm() {
            let mut arena = arena();
            // Both tails share (8, 10); only the earlier worm is severed.
            let a = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let b = arena
                .spawn_worm(
                    [Position::new(8, 12), Position::new(8, 11), Position::new(8, 10)],
                    Direction::Down,
                )
                .unwrap();
            arena.spawn_projectile(Position::new(8, 10), Direction::Left);

            assert_eq!(arena.advance(&TickCommands::new()), TickOutcome::Continue);

            assert_eq!(arena.worm(a).unwrap().length(), 2);
            assert_eq!(arena.worm(b).unwrap().length(), 3);
            assert_eq!(arena.obstacles().len(), 1);
            assert_eq!(arena.projectiles().len(), 2);
        }

        #[test]
        fn projectile_leaving_grid_is_removed() {
            let mut arena = arena();
            arena.spawn_projectile(Position::new(1, 3), Direction::Left);

            assert_eq!(arena.advance(&TickCommands::new()), TickOutcome::Continue);

            assert!(arena.projectiles().is_empty());
            assert_eq!(
                arena.events(),
                &[ArenaEvent::ProjectileExpired {
                    at: Position::new(-1, 3)
                }]
            );
        }
    }

    mod growth_tests {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn eating_grows_and_respawns() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            let eaten = Position::new(10, 10);
            arena.place_growth_item(eaten);
            for x in 0..3 {
                arena.place_growth_item(Position::new(x, 0));
            }

            arena.advance(&TickCommands::new());

            let worm = arena.worm(id).unwrap();
            assert_eq!(worm.length(), 4);
            assert_eq!(worm.body().last(), Some(Position::new(8, 10)));

            let cells: HashSet<_> = arena.growth_items().iter().map(GrowthItem::position).collect();
            assert_eq!(cells.len(), 4);
            assert!(matches!(
                arena.events(),
                [ArenaEvent::GrowthItemEaten { worm, at, .. }] if *worm == id && *at == eaten
            ));
        }

        #[test]
        fn not_eating_keeps_length() {
            let mut arena = arena();
            let id = arena.spawn_worm(row(10, [10, 9, 8]), Direction::Right).unwrap();
            arena.advance(&TickCommands::new());
            let body: Vec<_> = arena.worm(id).unwrap().body().collect();
            assert_eq!(body, row(10, [11, 10, 9]));
        }
    }
}
