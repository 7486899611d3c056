use crate::*;
use alloc::vec::Vec;
pub use random::*;

mod random;

pub trait SequenceGenerator {
    fn next_color(&mut self) -> ColorId;

    fn generate(&mut self, length: usize) -> Vec<ColorId> {
        (0..length).map(|_| self.next_color()).collect()
    }
}

/// Replays a fixed list of colors, wrapping around when exhausted. Mostly useful for tests and demos.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSequenceGenerator {
    script: Vec<ColorId>,
    cursor: usize,
}

impl ScriptedSequenceGenerator {
    pub fn new(script: impl Into<Vec<ColorId>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl SequenceGenerator for ScriptedSequenceGenerator {
    fn next_color(&mut self) -> ColorId {
        if self.script.is_empty() {
            log::warn!("Empty script, falling back to {}", ColorId::Green);
            return ColorId::Green;
        }
        let color = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);
        color
    }
}
