//! Scripted key presses.
//!
//! The headless driver has no keyboard. Instead it reads a JSON script of
//! key presses per tick and resolves them through the same bindings a
//! windowed front end would use:
//!
//! ```json
//! { "frames": [ { "tick": 3, "keys": ["ArrowUp", "RightShift"] } ] }
//! ```
//!
//! Ticks are counted per match starting at 1, and the script is replayed
//! from the top for every match of a session.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wormy_core::{ControlKeys, InputBindings, WormId};

/// Keys the classic two-player layout uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Right shift.
    RightShift,
    /// `W`.
    W,
    /// `A`.
    A,
    /// `S`.
    S,
    /// `D`.
    D,
    /// `E`.
    E,
    /// Quits the session.
    Escape,
}

/// Arrows and right shift drive the first worm, WASD and E the second.
pub fn default_bindings() -> InputBindings<Key> {
    let mut bindings = InputBindings::new();
    bindings
        .bind_worm(
            WormId::new(0),
            ControlKeys {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
                left: Key::ArrowLeft,
                right: Key::ArrowRight,
                shoot: Key::RightShift,
            },
        )
        .bind_worm(
            WormId::new(1),
            ControlKeys {
                up: Key::W,
                down: Key::S,
                left: Key::A,
                right: Key::D,
                shoot: Key::E,
            },
        );
    bindings
}

/// Keys pressed during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFrame {
    /// Match tick the presses apply to, starting at 1.
    pub tick: u64,
    /// Keys in press order.
    pub keys: Vec<Key>,
}

/// A whole input script, indexed by tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    frames: BTreeMap<u64, Vec<Key>>,
}

#[derive(Deserialize)]
struct ScriptFile {
    #[serde(default)]
    frames: Vec<ScriptFrame>,
}

impl InputScript {
    /// Builds a script from frames. Frames sharing a tick are concatenated
    /// in file order.
    pub fn from_frames(frames: impl IntoIterator<Item = ScriptFrame>) -> Self {
        let mut indexed: BTreeMap<u64, Vec<Key>> = BTreeMap::new();
        for frame in frames {
            indexed.entry(frame.tick).or_default().extend(frame.keys);
        }
        Self { frames: indexed }
    }

    /// Parses a script from JSON text.
    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let file: ScriptFile = serde_json::from_str(json).context("malformed input script")?;
        Ok(Self::from_frames(file.frames))
    }

    /// Loads a script file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("in script {}", path.display()))
    }

    /// Keys pressed on `tick`, in press order.
    pub fn keys_for(&self, tick: u64) -> &[Key] {
        self.frames.get(&tick).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of ticks with at least one press.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
