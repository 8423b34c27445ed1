//! Text rendering of arena snapshots.
//!
//! [`TextRenderer`] is the driver's render context: it is built once per
//! session and owns a reusable cell buffer and frame string. Cells are drawn in layers, later layers winning:
//! growth items, obstacles, projectiles, worm bodies, worm heads.

use wormy_core::{ArenaSnapshot, GameOverReason, GridBounds, Position, WormView};

const EMPTY: char = '.';
const GROWTH_ITEM: char = 'o';
const OBSTACLE: char = '#';
const PROJECTILE: char = '*';
const HEAD: char = '@';

/// Draws snapshots as rows of characters.
#[derive(Debug)]
pub struct TextRenderer {
    width: usize,
    height: usize,
    cells: Vec<char>,
    frame: String,
}

impl TextRenderer {
    /// Creates a renderer for a grid of the given bounds.
    pub fn new(bounds: GridBounds) -> Self {
        let width = usize::try_from(bounds.width).unwrap_or(0);
        let height = usize::try_from(bounds.height).unwrap_or(0);
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
            frame: String::with_capacity((width + 1) * (height + 2)),
        }
    }

    /// Draws `snapshot` and returns the frame text: a score line followed by
    /// one line per grid row.
    pub fn render(&mut self, snapshot: &ArenaSnapshot) -> &str {
        self.cells.fill(EMPTY);

        for &cell in &snapshot.growth_items {
            self.put(cell, GROWTH_ITEM);
        }
        for &cell in &snapshot.obstacles {
            self.put(cell, OBSTACLE);
        }
        for projectile in &snapshot.projectiles {
            self.put(projectile.position, PROJECTILE);
        }
        for worm in &snapshot.worms {
            let glyph = body_glyph(worm);
            for &cell in worm.body.iter().skip(1) {
                self.put(cell, glyph);
            }
        }
        for worm in &snapshot.worms {
            if let Some(&head) = worm.body.first() {
                self.put(head, HEAD);
            }
        }

        self.frame.clear();
        self.frame
            .push_str(&format!("tick {:>5}  {}\n", snapshot.tick, score_line(snapshot)));
        for row in self.cells.chunks(self.width.max(1)) {
            self.frame.extend(row);
            self.frame.push('\n');
        }
        &self.frame
    }

    /// Off-grid cells (a head on the wall ring) are not drawn.
    fn put(&mut self, cell: Position, glyph: char) {
        let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }
}

/// Body segments show the worm id's last digit.
fn body_glyph(worm: &WormView) -> char {
    char::from_digit(worm.id.as_u32() % 10, 10).unwrap_or('?')
}

/// Scores ordered by scoreboard slot, highest slot first so slot 1 ends up
/// rightmost.
pub fn score_line(snapshot: &ArenaSnapshot) -> String {
    let mut worms: Vec<_> = snapshot.worms.iter().collect();
    worms.sort_by_key(|worm| std::cmp::Reverse(worm.style.scoreboard_slot));
    worms
        .iter()
        .map(|worm| format!("Score {}: {}", worm.id, worm.score))
        .collect::<Vec<_>>()
        .join("   ")
}

/// Banner shown before each match.
pub fn title(match_number: u32) -> String {
    format!("=== Wormy! === match {match_number}")
}

/// Summary shown when a match ends.
pub fn game_over(reason: &GameOverReason, snapshot: &ArenaSnapshot) -> String {
    format!(
        "GAME OVER after {} ticks: {reason}\n{}",
        snapshot.tick,
        score_line(snapshot)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wormy_core::{Arena, ArenaConfig, Direction, WormId};

    fn small_arena() -> Arena {
        let config = ArenaConfig {
            start_margin: 2,
            ..ArenaConfig::with_grid(8, 5)
        };
        Arena::empty(config, 0).unwrap()
    }

    #[test]
    fn draws_every_layer() {
        let mut arena = small_arena();
        arena.spawn_worm(
            [Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)],
            Direction::Right,
        );
        arena.place_obstacle(Position::new(0, 4));
        arena.place_growth_item(Position::new(7, 0));
        arena.spawn_projectile(Position::new(5, 3), Direction::Up);

        let mut renderer = TextRenderer::new(arena.bounds());
        let frame = renderer.render(&arena.snapshot()).to_owned();
        let rows: Vec<_> = frame.lines().skip(1).collect();

        assert_eq!(
            rows,
            vec![".......o", ".00@....", "........", ".....*..", "#......."]
        );
        assert!(frame.lines().next().unwrap().contains("Score 0: 3"));
    }

    #[test]
    fn off_grid_head_is_skipped() {
        let mut arena = small_arena();
        arena.spawn_worm([Position::new(8, 0), Position::new(7, 0)], Direction::Right);

        let mut renderer = TextRenderer::new(arena.bounds());
        let frame = renderer.render(&arena.snapshot()).to_owned();

        assert_eq!(frame.lines().nth(1), Some(".......0"));
    }

    #[test]
    fn buffer_is_cleared_between_frames() {
        let mut arena = small_arena();
        arena.spawn_projectile(Position::new(1, 2), Direction::Left);
        let mut renderer = TextRenderer::new(arena.bounds());
        renderer.render(&arena.snapshot());

        // The projectile leaves the grid.
        arena.advance(&wormy_core::TickCommands::new());
        let frame = renderer.render(&arena.snapshot());
        assert!(!frame.contains(PROJECTILE));
    }

    #[test]
    fn slot_one_is_rightmost() {
        let mut arena = small_arena();
        arena.spawn_worm([Position::new(3, 1)], Direction::Right);
        arena.spawn_worm([Position::new(3, 3)], Direction::Right);

        let line = score_line(&arena.snapshot());
        assert_eq!(line, "Score 1: 1   Score 0: 1");

        let reason = GameOverReason::Headshot {
            worm: WormId::new(1),
        };
        assert!(game_over(&reason, &arena.snapshot()).starts_with("GAME OVER after 0 ticks"));
    }
}
